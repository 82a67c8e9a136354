// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution for HTTP requests.
//!
//! A signed-in user's stored preference wins, then the locale cookie an
//! anonymous visitor may carry, then the server default. Whatever comes
//! out is clamped to a supported locale, so handlers can pass the result
//! straight to the catalog.

use axum::http::HeaderMap;

use wazeefa_server_auth::{middleware::find_cookie, AuthContext, CurrentUser};

pub use wazeefa_common_i18n::{t, t_fmt};

/// Cookie carrying the language preference of anonymous visitors.
pub const LOCALE_COOKIE_NAME: &str = "wazeefa_locale";

/// One year. The preference is not sensitive, so it can live long.
const LOCALE_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;

/// Resolve the effective locale for a signed-in user.
pub fn caller_locale(current_user: &CurrentUser, server_default: &str) -> &'static str {
	wazeefa_common_i18n::resolve_locale(current_user.locale(), server_default)
}

/// Resolve the effective locale for any request.
pub fn resolve_request_locale(
	headers: &HeaderMap,
	auth: &AuthContext,
	server_default: &str,
) -> &'static str {
	let user_pref = auth.user().and_then(|u| u.locale());
	let cookie_pref = locale_cookie(headers);
	wazeefa_common_i18n::resolve_locale(user_pref.or(cookie_pref.as_deref()), server_default)
}

/// Read the locale preference cookie, if present.
pub fn locale_cookie(headers: &HeaderMap) -> Option<String> {
	find_cookie(headers, LOCALE_COOKIE_NAME)
}

/// Build the Set-Cookie value persisting a locale preference.
pub fn build_locale_cookie(code: &str) -> String {
	format!("{LOCALE_COOKIE_NAME}={code}; Path=/; SameSite=Lax; Max-Age={LOCALE_COOKIE_MAX_AGE_SECS}")
}
