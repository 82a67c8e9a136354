// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fallback handler for page paths when no web bundle is configured.
//!
//! The route guard in front of this already issued its redirects, so
//! anything reaching here on an API-only deployment is a plain 404.

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::{
	error::ErrorResponse,
	i18n::t,
};

/// Answers page requests when `WAZEEFA_SERVER_WEB_DIR` is unset.
pub async fn page_fallback() -> impl IntoResponse {
	(
		StatusCode::NOT_FOUND,
		Json(ErrorResponse {
			error: "not_found".to_string(),
			message: t(wazeefa_common_i18n::DEFAULT_LOCALE, "api.not_found"),
		}),
	)
}
