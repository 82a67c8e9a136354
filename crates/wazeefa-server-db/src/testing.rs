// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory databases for repository tests.
//!
//! Tests run against the same schema the server migrates at startup, so
//! a column added to [`run_migrations`](crate::migrations::run_migrations)
//! is immediately visible to every repository test.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::migrations::run_migrations;

/// Open an in-memory database with the full portal schema applied.
///
/// The pool is capped at one connection. SQLite gives every `:memory:`
/// connection its own private database, so a wider pool would hand
/// queries an empty one.
pub async fn memory_pool() -> SqlitePool {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect(":memory:")
		.await
		.expect("in-memory sqlite should always open");
	run_migrations(&pool)
		.await
		.expect("schema should apply cleanly to an empty database");
	pool
}
