// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session authentication middleware.
//!
//! `auth_layer` runs on every API and page request. It decodes the
//! session cookie (or bearer token), validates it against the session
//! store, and attaches an [`AuthContext`] extension. Anything that can
//! go wrong - missing cookie, unknown token, expired session, deleted
//! user - degrades to the anonymous context; the middleware itself never
//! fails a request.

use axum::{
	extract::{Request, State},
	http::{HeaderMap, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};

use wazeefa_server_auth::{
	middleware::{bearer_token, find_cookie},
	session::hash_session_token,
	AuthContext, CurrentUser,
};

use crate::{api::AppState, error::ErrorResponse, i18n};

/// Attach the authentication context for the request.
pub async fn auth_layer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
	let auth_ctx = resolve_auth_context(&state, req.headers()).await;
	req.extensions_mut().insert(auth_ctx);
	next.run(req).await
}

/// Reject unauthenticated requests with a localized 401.
pub async fn require_auth_layer(
	State(state): State<AppState>,
	req: Request,
	next: Next,
) -> Response {
	let auth_ctx = req
		.extensions()
		.get::<AuthContext>()
		.cloned()
		.unwrap_or_else(AuthContext::unauthenticated);

	if !auth_ctx.is_authenticated() {
		let locale = i18n::resolve_request_locale(req.headers(), &auth_ctx, &state.default_locale);
		return unauthorized_response(locale);
	}

	next.run(req).await
}

/// Extractor yielding the authenticated [`CurrentUser`], rejecting with a
/// localized 401 otherwise.
pub struct RequireAuth(pub CurrentUser);

impl axum::extract::FromRequestParts<AppState> for RequireAuth {
	type Rejection = Response;

	async fn from_request_parts(
		parts: &mut axum::http::request::Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let auth_ctx = parts
			.extensions
			.get::<AuthContext>()
			.cloned()
			.unwrap_or_else(AuthContext::unauthenticated);

		let locale = i18n::resolve_request_locale(&parts.headers, &auth_ctx, &state.default_locale);
		match auth_ctx.into_user() {
			Some(current_user) => Ok(RequireAuth(current_user)),
			None => Err(unauthorized_response(locale)),
		}
	}
}

/// Extractor yielding the request's [`AuthContext`], anonymous when no
/// valid session is attached.
pub struct OptionalAuth(pub AuthContext);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = std::convert::Infallible;

	async fn from_request_parts(
		parts: &mut axum::http::request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		Ok(OptionalAuth(
			parts
				.extensions
				.get::<AuthContext>()
				.cloned()
				.unwrap_or_else(AuthContext::unauthenticated),
		))
	}
}

/// Decode the request credentials into an [`AuthContext`].
///
/// Order: dev-mode bypass, then session cookie, then bearer token.
async fn resolve_auth_context(state: &AppState, headers: &HeaderMap) -> AuthContext {
	if state.auth_options.dev_mode {
		if let Some(dev_user) = &state.dev_user {
			return AuthContext::authenticated(CurrentUser::without_session(dev_user.clone()));
		}
	}

	let token = find_cookie(headers, &state.auth_options.session_cookie_name)
		.or_else(|| bearer_token(headers));
	let Some(token) = token else {
		return AuthContext::unauthenticated();
	};

	let token_hash = hash_session_token(&token);
	let session = match state.session_repo.find_by_token_hash(&token_hash).await {
		Ok(Some(session)) => session,
		Ok(None) => {
			tracing::trace!("session token not found");
			return AuthContext::unauthenticated();
		}
		Err(e) => {
			tracing::error!(error = %e, "session lookup failed");
			return AuthContext::unauthenticated();
		}
	};

	if session.is_expired() {
		tracing::debug!(session_id = %session.id, "session expired");
		return AuthContext::unauthenticated();
	}

	let user = match state.user_repo.find_by_id(&session.user_id).await {
		Ok(Some(user)) => user,
		Ok(None) => {
			tracing::debug!(user_id = %session.user_id, "session user missing or deleted");
			return AuthContext::unauthenticated();
		}
		Err(e) => {
			tracing::error!(error = %e, "user lookup failed");
			return AuthContext::unauthenticated();
		}
	};

	// Sliding activity marker; losing it never blocks the request.
	if let Err(e) = state.session_repo.touch(&session.id).await {
		tracing::warn!(error = %e, session_id = %session.id, "failed to touch session");
	}

	AuthContext::authenticated(CurrentUser::session_backed(user, session.id))
}

/// Build the Set-Cookie value for a freshly issued session token.
pub fn build_session_cookie(cookie_name: &str, token: &str, ttl_hours: i64) -> String {
	let max_age = ttl_hours * 3600;
	format!("{cookie_name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

/// Build the Set-Cookie value that clears the session cookie on logout.
pub fn build_clear_session_cookie(cookie_name: &str) -> String {
	format!("{cookie_name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
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

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_session_cookie_attributes() {
		let cookie = build_session_cookie("wazeefa_session", "abc123", 720);
		assert!(cookie.starts_with("wazeefa_session=abc123"));
		assert!(cookie.contains("HttpOnly"));
		assert!(cookie.contains("SameSite=Lax"));
		assert!(cookie.contains("Path=/"));
		assert!(cookie.contains(&format!("Max-Age={}", 720 * 3600)));
	}

	#[test]
	fn test_clear_cookie_expires_immediately() {
		let cookie = build_clear_session_cookie("wazeefa_session");
		assert!(cookie.starts_with("wazeefa_session=;"));
		assert!(cookie.contains("Max-Age=0"));
	}
}
