// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access control middleware.
//!
//! Two tower layers built on the [`AuthContext`] extension that
//! [`auth_layer`](crate::auth_middleware::auth_layer) attaches:
//!
//! - [`PageGuard`] runs the route table over browser navigations and
//!   turns deny decisions into `303 See Other` redirects, carrying the
//!   original path to the login page so it can be resumed after sign-in.
//! - [`RequireRole`] protects API route groups, answering anonymous
//!   requests with a localized 401 and wrong-role requests with a 403.

use std::{
	future::Future,
	pin::Pin,
	sync::Arc,
	task::{Context, Poll},
};

use axum::{
	body::Body,
	http::{Request, StatusCode},
	response::{IntoResponse, Redirect, Response},
	Json,
};
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use wazeefa_common_i18n::DEFAULT_LOCALE;
use wazeefa_server_auth::{AccessDecision, AuthContext, Role, RouteTable};

use crate::{error::ErrorResponse, i18n};

/// Layer enforcing the page-route access table.
#[derive(Clone)]
pub struct PageGuard {
	table: Arc<RouteTable>,
}

impl PageGuard {
	pub fn new(table: Arc<RouteTable>) -> Self {
		Self { table }
	}
}

impl<S> Layer<S> for PageGuard {
	type Service = PageGuardService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		PageGuardService {
			inner,
			table: self.table.clone(),
		}
	}
}

#[derive(Clone)]
pub struct PageGuardService<S> {
	inner: S,
	table: Arc<RouteTable>,
}

impl<S> Service<Request<Body>> for PageGuardService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = AccessFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let path = req
			.uri()
			.path_and_query()
			.map(|pq| pq.as_str())
			.unwrap_or("/")
			.to_string();
		let visitor = req
			.extensions()
			.get::<AuthContext>()
			.map(|ctx| ctx.visitor())
			.unwrap_or(wazeefa_server_auth::Visitor::Anonymous);

		match self.table.evaluate(&path, &visitor) {
			AccessDecision::Allow => AccessFuture::Inner {
				fut: self.inner.call(req),
			},
			AccessDecision::RedirectToLogin { next } => {
				tracing::debug!(path = %path, "page requires sign-in, redirecting to login");
				AccessFuture::Rejected {
					resp: Some(login_redirect(&next)),
				}
			}
			AccessDecision::RedirectToRoleHome { home } => {
				tracing::debug!(path = %path, home = %home, "page outside visitor's area, redirecting home");
				AccessFuture::Rejected {
					resp: Some(Redirect::to(home).into_response()),
				}
			}
		}
	}
}

/// Layer requiring an authenticated user with a specific role.
#[derive(Clone)]
pub struct RequireRole {
	required: Role,
}

impl RequireRole {
	pub fn admin() -> Self {
		Self {
			required: Role::Admin,
		}
	}

	pub fn employer() -> Self {
		Self {
			required: Role::Employer,
		}
	}

	pub fn employee() -> Self {
		Self {
			required: Role::Employee,
		}
	}
}

impl<S> Layer<S> for RequireRole {
	type Service = RequireRoleService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequireRoleService {
			inner,
			required: self.required,
		}
	}
}

#[derive(Clone)]
pub struct RequireRoleService<S> {
	inner: S,
	required: Role,
}

impl<S> Service<Request<Body>> for RequireRoleService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = AccessFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let auth_ctx = req
			.extensions()
			.get::<AuthContext>()
			.cloned()
			.unwrap_or_else(AuthContext::unauthenticated);
		let locale = i18n::resolve_request_locale(req.headers(), &auth_ctx, DEFAULT_LOCALE);

		let Some(current_user) = auth_ctx.into_user() else {
			tracing::debug!(required = %self.required, "unauthenticated request rejected");
			return AccessFuture::Rejected {
				resp: Some(unauthorized_response(locale)),
			};
		};

		if current_user.role() == Some(self.required) {
			AccessFuture::Inner {
				fut: self.inner.call(req),
			}
		} else {
			tracing::info!(
				user_id = %current_user.user.id,
				required = %self.required,
				role = ?current_user.role(),
				"role requirement not met"
			);
			AccessFuture::Rejected {
				resp: Some(forbidden_response(locale)),
			}
		}
	}
}

pin_project! {
	/// Response future shared by the access-control services: either the
	/// inner service's future, or an already-built rejection.
	#[project = AccessFutureProj]
	pub enum AccessFuture<F> {
		Inner {
			#[pin]
			fut: F,
		},
		Rejected {
			resp: Option<Response>,
		},
	}
}

impl<F, E> Future for AccessFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			AccessFutureProj::Inner { fut } => fut.poll(cx),
			AccessFutureProj::Rejected { resp } => {
				Poll::Ready(Ok(resp.take().expect("polled after completion")))
			}
		}
	}
}

/// 303 redirect to the login page, carrying the original path so the
/// client can resume it after sign-in.
fn login_redirect(next: &str) -> Response {
	let query: String = url::form_urlencoded::Serializer::new(String::new())
		.append_pair("redirect", next)
		.finish();
	Redirect::to(&format!("/login?{query}")).into_response()
}

fn unauthorized_response(locale: &str) -> Response {
	(
		StatusCode::UNAUTHORIZED,
		Json(ErrorResponse {
			error: "unauthorized".to_string(),
			message: i18n::t(locale, "auth.unauthorized"),
		}),
	)
		.into_response()
}

fn forbidden_response(locale: &str) -> Response {
	(
		StatusCode::FORBIDDEN,
		Json(ErrorResponse {
			error: "forbidden".to_string(),
			message: i18n::t(locale, "auth.forbidden"),
		}),
	)
		.into_response()
}
