// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("database: {0}")]
	Sqlx(#[from] sqlx::Error),

	/// Row lookups that must succeed (guarded updates, ownership checks).
	#[error("no such row: {0}")]
	NotFound(String),

	/// Unique-constraint hits (duplicate email, duplicate application) and
	/// stale status transitions.
	#[error("conflict: {0}")]
	Conflict(String),

	/// Stored data that fails to parse back into domain types.
	#[error("stored data is unusable: {0}")]
	Internal(String),

	/// JSON columns (skills lists) that fail to encode or decode.
	#[error("json column: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
