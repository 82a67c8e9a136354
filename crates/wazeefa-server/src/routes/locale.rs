// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Language preference HTTP handlers.
//!
//! Setting an unsupported language is a reported no-op, never an error:
//! the response carries `changed: false` and the locale that is still
//! active. Signed-in users get the preference stored on their account;
//! anonymous visitors carry it in a cookie. Both writes are best-effort
//! and never block the switch itself.

use axum::{
	extract::State,
	http::{header::SET_COOKIE, HeaderMap, StatusCode},
	response::IntoResponse,
	Json,
};

use wazeefa_common_i18n::Locale;

pub use wazeefa_server_api::locale::*;

use crate::{
	api::AppState,
	auth_middleware::OptionalAuth,
	i18n::{build_locale_cookie, resolve_request_locale},
};

#[utoipa::path(
    get,
    path = "/api/locale",
    responses(
        (status = 200, description = "Active language, direction, and the supported set", body = LocaleResponse)
    ),
    tag = "locale"
)]
/// GET /api/locale - Report the effective language for this request.
pub async fn get_locale(
	State(state): State<AppState>,
	OptionalAuth(auth_ctx): OptionalAuth,
	headers: HeaderMap,
) -> impl IntoResponse {
	let code = resolve_request_locale(&headers, &auth_ctx, &state.default_locale);
	// resolve_request_locale only returns supported codes.
	let locale = Locale::parse(code).unwrap_or_default();
	Json(LocaleResponse::from(locale))
}

#[utoipa::path(
    put,
    path = "/api/locale",
    request_body = SetLocaleRequest,
    responses(
        (status = 200, description = "Preference applied, or reported as unchanged", body = SetLocaleResponse)
    ),
    tag = "locale"
)]
/// PUT /api/locale - Set the preferred language.
pub async fn set_locale(
	State(state): State<AppState>,
	OptionalAuth(auth_ctx): OptionalAuth,
	headers: HeaderMap,
	Json(payload): Json<SetLocaleRequest>,
) -> impl IntoResponse {
	let current = resolve_request_locale(&headers, &auth_ctx, &state.default_locale);

	let Some(requested) = Locale::parse(&payload.locale) else {
		tracing::debug!(requested = %payload.locale, "unsupported locale requested, keeping current");
		let active = Locale::parse(current).unwrap_or_default();
		return Json(SetLocaleResponse {
			locale: active.code().to_string(),
			direction: active.direction().as_str().to_string(),
			changed: false,
		})
		.into_response();
	};

	apply_locale(&state, &auth_ctx, requested).await
}

#[utoipa::path(
    post,
    path = "/api/locale/toggle",
    responses(
        (status = 200, description = "Language switched to the other supported locale", body = SetLocaleResponse)
    ),
    tag = "locale"
)]
/// POST /api/locale/toggle - Switch between Arabic and English.
pub async fn toggle_locale(
	State(state): State<AppState>,
	OptionalAuth(auth_ctx): OptionalAuth,
	headers: HeaderMap,
) -> impl IntoResponse {
	let current = resolve_request_locale(&headers, &auth_ctx, &state.default_locale);
	let toggled = Locale::parse(current).unwrap_or_default().toggled();
	apply_locale(&state, &auth_ctx, toggled).await
}

/// Persist `requested` for the visitor and build the response.
///
/// Signed-in users get the account row updated; everyone gets the cookie
/// so the preference survives logout.
async fn apply_locale(
	state: &AppState,
	auth_ctx: &wazeefa_server_auth::AuthContext,
	requested: Locale,
) -> axum::response::Response {
	if let Some(current_user) = auth_ctx.user() {
		if let Err(e) = state
			.user_repo
			.set_locale(&current_user.user.id, Some(requested.code()))
			.await
		{
			tracing::warn!(
				error = %e,
				user_id = %current_user.user.id,
				"Failed to store locale preference, cookie still set"
			);
		}
	}

	(
		StatusCode::OK,
		[(SET_COOKIE, build_locale_cookie(requested.code()))],
		Json(SetLocaleResponse {
			locale: requested.code().to_string(),
			direction: requested.direction().as_str().to_string(),
			changed: true,
		}),
	)
		.into_response()
}
