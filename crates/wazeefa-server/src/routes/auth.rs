// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account and session HTTP handlers.
//!
//! Registration is restricted to the self-registrable roles; admin
//! accounts are provisioned out of band. Login and registration both
//! issue a session cookie, and failed logins answer with one generic
//! message so the endpoint does not leak which emails exist.

use axum::{
	extract::State,
	http::{header::SET_COOKIE, HeaderMap, StatusCode},
	response::IntoResponse,
	Json,
};

use wazeefa_server_auth::{
	password::{hash_password, verify_password},
	session::{mint_session_token, hash_session_token, Session},
	user::{normalize_email, validate_display_name, validate_email, validate_password},
	User, UserId, MIN_PASSWORD_LEN,
};
use wazeefa_server_db::DbError;

pub use wazeefa_server_api::auth::*;

use crate::{
	api::AppState,
	api_response::{bad_request, conflict, forbidden, internal_error, unauthorized},
	auth_middleware::{build_clear_session_cookie, build_session_cookie, OptionalAuth, RequireAuth},
	i18n::{self, resolve_request_locale, caller_locale, t, t_fmt},
	error_body, require_role,
	validation::parse_portal_role,
};

error_body!(AuthErrorResponse);

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = LoginResponse),
        (status = 400, description = "Invalid registration details", body = AuthErrorResponse),
        (status = 403, description = "Signups disabled", body = AuthErrorResponse),
        (status = 409, description = "Email already registered", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// POST /api/auth/register - Create an employer or employee account.
///
/// The new account is signed in immediately; the response carries the
/// session cookie.
pub async fn register(
	State(state): State<AppState>,
	OptionalAuth(auth_ctx): OptionalAuth,
	headers: HeaderMap,
	Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
	let locale = resolve_request_locale(&headers, &auth_ctx, &state.default_locale);

	if state.auth_options.signups_disabled {
		return forbidden::<AuthErrorResponse>("signups_disabled", t(locale, "auth.signups_disabled"))
			.into_response();
	}

	let role = require_role!(
		AuthErrorResponse,
		parse_portal_role(&payload.role, &t(locale, "auth.invalid_role"))
	);
	if !role.self_registrable() {
		return bad_request::<AuthErrorResponse>("invalid_role", t(locale, "auth.invalid_role"))
			.into_response();
	}

	if validate_display_name(&payload.display_name).is_err() {
		return bad_request::<AuthErrorResponse>(
			"invalid_display_name",
			t(locale, "auth.invalid_display_name"),
		)
			.into_response();
	}
	if validate_email(&payload.email).is_err() {
		return bad_request::<AuthErrorResponse>("invalid_email", t(locale, "auth.invalid_email"))
			.into_response();
	}
	if validate_password(&payload.password).is_err() {
		return bad_request::<AuthErrorResponse>(
			"password_too_short",
			t_fmt(
				locale,
				"auth.password_too_short",
				&[("min", &MIN_PASSWORD_LEN.to_string())],
			),
		)
			.into_response();
	}

	let password_hash = match hash_password(&payload.password) {
		Ok(hash) => hash,
		Err(e) => {
			tracing::error!(error = %e, "Failed to hash password");
			return internal_error::<AuthErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	// A locale cookie set while browsing anonymously becomes the account
	// preference.
	let locale_pref =
		i18n::locale_cookie(&headers).filter(|code| wazeefa_common_i18n::is_supported(code));

	let now = chrono::Utc::now();
	let user = User {
		id: UserId::generate(),
		display_name: payload.display_name.trim().to_string(),
		email: normalize_email(&payload.email),
		role: Some(role),
		password_hash,
		locale: locale_pref,
		created_at: now,
		updated_at: now,
		deleted_at: None,
	};

	match state.user_repo.insert(&user).await {
		Ok(()) => {}
		Err(DbError::Conflict(_)) => {
			return conflict::<AuthErrorResponse>("email_taken", t(locale, "auth.email_taken"))
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, "Failed to create user");
			return internal_error::<AuthErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	}

	let cookie = match issue_session(&state, user.id).await {
		Ok(cookie) => cookie,
		Err(e) => {
			tracing::error!(error = %e, user_id = %user.id, "Failed to create session");
			return internal_error::<AuthErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	tracing::info!(user_id = %user.id, role = %role, "User registered");

	(
		StatusCode::CREATED,
		[(SET_COOKIE, cookie)],
		Json(LoginResponse {
			message: t(locale, "auth.registered"),
			user: AuthUserResponse::from(user),
		}),
	)
		.into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Incorrect email or password", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// POST /api/auth/login - Sign in with email and password.
pub async fn login(
	State(state): State<AppState>,
	OptionalAuth(auth_ctx): OptionalAuth,
	headers: HeaderMap,
	Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
	let request_locale = resolve_request_locale(&headers, &auth_ctx, &state.default_locale);

	let user = match state
		.user_repo
		.find_by_email(&normalize_email(&payload.email))
		.await
	{
		Ok(Some(user)) => user,
		Ok(None) => {
			return unauthorized::<AuthErrorResponse>(
				"login_failed",
				t(request_locale, "auth.login_failed"),
			)
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, "Login lookup failed");
			return internal_error::<AuthErrorResponse>(t(request_locale, "api.internal_error"))
				.into_response();
		}
	};

	match verify_password(&payload.password, &user.password_hash) {
		Ok(true) => {}
		Ok(false) => {
			return unauthorized::<AuthErrorResponse>(
				"login_failed",
				t(request_locale, "auth.login_failed"),
			)
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, user_id = %user.id, "Password verification failed");
			return unauthorized::<AuthErrorResponse>(
				"login_failed",
				t(request_locale, "auth.login_failed"),
			)
				.into_response();
		}
	}

	// The stored account preference beats whatever the request carried.
	let locale = wazeefa_common_i18n::resolve_locale(user.locale.as_deref(), request_locale);

	let cookie = match issue_session(&state, user.id).await {
		Ok(cookie) => cookie,
		Err(e) => {
			tracing::error!(error = %e, user_id = %user.id, "Failed to create session");
			return internal_error::<AuthErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	tracing::info!(user_id = %user.id, "User logged in");

	(
		StatusCode::OK,
		[(SET_COOKIE, cookie)],
		Json(LoginResponse {
			message: t_fmt(locale, "dashboard.welcome", &[("name", &user.display_name)]),
			user: AuthUserResponse::from(user),
		}),
	)
		.into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = AuthSuccessResponse),
        (status = 401, description = "Not authenticated", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// POST /api/auth/logout - End the current session.
pub async fn logout(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	if let Some(session_id) = current_user.session_id {
		if let Err(e) = state.session_repo.delete(&session_id).await {
			tracing::error!(error = %e, session_id = %session_id, "Failed to delete session");
		}
	}

	(
		StatusCode::OK,
		[(
			SET_COOKIE,
			build_clear_session_cookie(&state.auth_options.session_cookie_name),
		)],
		Json(AuthSuccessResponse {
			message: t(locale, "auth.logged_out"),
		}),
	)
		.into_response()
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current visitor, authenticated or not", body = MeResponse)
    ),
    tag = "auth"
)]
/// GET /api/auth/me - Describe the current visitor.
///
/// Always answers 200; anonymous visitors get `authenticated: false`.
pub async fn current_user(OptionalAuth(auth_ctx): OptionalAuth) -> impl IntoResponse {
	match auth_ctx.into_user() {
		Some(current) => Json(MeResponse {
			authenticated: true,
			user: Some(AuthUserResponse::from(current.user)),
		}),
		None => Json(MeResponse {
			authenticated: false,
			user: None,
		}),
	}
}

/// Create a session row for `user_id` and return its Set-Cookie value.
async fn issue_session(state: &AppState, user_id: UserId) -> Result<String, DbError> {
	let token = mint_session_token();
	let token_hash = hash_session_token(&token);
	let session = Session::new(user_id, state.auth_options.session_ttl_hours);
	state.session_repo.insert(&session, &token_hash).await?;
	Ok(build_session_cookie(
		&state.auth_options.session_cookie_name,
		&token,
		state.auth_options.session_ttl_hours,
	))
}
