// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-level error types.

use serde::{Deserialize, Serialize};

/// JSON error body used outside the per-group response types, e.g. by
/// middleware rejections and the page fallback.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

/// Errors raised while assembling server state.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("database layer: {0}")]
	Database(#[from] wazeefa_server_db::DbError),

	#[error("password hashing: {0}")]
	Password(#[from] wazeefa_server_auth::password::PasswordError),
}
