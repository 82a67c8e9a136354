// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared shapes for JSON error replies.
//!
//! Each route module declares its own error-response struct so the
//! OpenAPI docs stay per-tag. [`error_body!`] wires a struct into the
//! helpers here; handlers then reply through the status-named functions
//! ([`bad_request`], [`conflict`], and friends) or bail out early with
//! [`require_id!`] and [`require_role!`].

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::validation::{IdParseError, RoleParseError};

/// A JSON error reply: machine-readable `error` code plus a localized
/// `message`.
pub trait ErrorBody: Serialize + Send {
	fn from_parts(error: impl Into<String>, message: impl Into<String>) -> Self;
}

/// Implements [`ErrorBody`] for a struct with `error` and `message`
/// fields.
#[macro_export]
macro_rules! error_body {
	($ty:ty) => {
		impl $crate::api_response::ErrorBody for $ty {
			fn from_parts(error: impl Into<String>, message: impl Into<String>) -> Self {
				Self {
					error: error.into(),
					message: message.into(),
				}
			}
		}
	};
}

/// Unwraps a parsed ID or leaves the handler with a 400.
///
/// ```ignore
/// let posting_id = require_id!(
///     PostingErrorResponse,
///     parse_posting_id(&posting_id, &t(locale, "api.invalid_id"))
/// );
/// ```
#[macro_export]
macro_rules! require_id {
	($error_ty:ty, $parse_expr:expr) => {
		match $parse_expr {
			Ok(id) => id,
			Err(e) => return $crate::api_response::id_parse_error::<$error_ty>(e).into_response(),
		}
	};
}

/// Unwraps a parsed role or leaves the handler with a 400.
///
/// ```ignore
/// let role = require_role!(
///     AuthErrorResponse,
///     parse_portal_role(&payload.role, &t(locale, "auth.invalid_role"))
/// );
/// ```
#[macro_export]
macro_rules! require_role {
	($error_ty:ty, $parse_expr:expr) => {
		match $parse_expr {
			Ok(role) => role,
			Err(e) => return $crate::api_response::role_parse_error::<$error_ty>(e).into_response(),
		}
	};
}

fn respond<T: ErrorBody>(
	status: StatusCode,
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	(status, Json(T::from_parts(error, message)))
}

/// 400 carrying the code and message of a failed ID parse.
pub fn id_parse_error<T: ErrorBody>(e: IdParseError) -> (StatusCode, Json<T>) {
	respond(StatusCode::BAD_REQUEST, e.error, e.message)
}

/// 400 carrying the code and message of a failed role parse.
pub fn role_parse_error<T: ErrorBody>(e: RoleParseError) -> (StatusCode, Json<T>) {
	respond(StatusCode::BAD_REQUEST, e.error, e.message)
}

pub fn bad_request<T: ErrorBody>(
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	respond(StatusCode::BAD_REQUEST, error, message)
}

pub fn conflict<T: ErrorBody>(
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	respond(StatusCode::CONFLICT, error, message)
}

/// 404 under the fixed `not_found` error code.
pub fn not_found<T: ErrorBody>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	respond(StatusCode::NOT_FOUND, "not_found", message)
}

/// 500 under the fixed `internal_error` error code.
pub fn internal_error<T: ErrorBody>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	respond(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
}

pub fn forbidden<T: ErrorBody>(
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	respond(StatusCode::FORBIDDEN, error, message)
}

pub fn unauthorized<T: ErrorBody>(
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	respond(StatusCode::UNAUTHORIZED, error, message)
}
