// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema migrations.
//!
//! The schema is applied idempotently at startup: every statement is
//! `CREATE ... IF NOT EXISTS`, so restarting against an existing database
//! is a no-op. Timestamps are stored as RFC 3339 TEXT columns; UUIDs as
//! their canonical string form.

use sqlx::SqlitePool;

use crate::error::DbError;

static SCHEMA_STATEMENTS: &[&str] = &[
	r#"
	CREATE TABLE IF NOT EXISTS users (
		id TEXT PRIMARY KEY,
		display_name TEXT NOT NULL,
		email TEXT NOT NULL UNIQUE,
		role TEXT,
		password_hash TEXT NOT NULL,
		locale TEXT,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL,
		deleted_at TEXT
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS sessions (
		id TEXT PRIMARY KEY,
		user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		token_hash TEXT NOT NULL UNIQUE,
		created_at TEXT NOT NULL,
		expires_at TEXT NOT NULL,
		last_used_at TEXT
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)",
	"CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at)",
	r#"
	CREATE TABLE IF NOT EXISTS employee_profiles (
		user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
		headline TEXT NOT NULL,
		bio TEXT NOT NULL,
		skills TEXT NOT NULL DEFAULT '[]',
		years_experience INTEGER,
		cv_summary TEXT,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS employer_profiles (
		user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
		company_name TEXT NOT NULL,
		about TEXT NOT NULL,
		website TEXT,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS postings (
		id TEXT PRIMARY KEY,
		employer_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		title TEXT NOT NULL,
		description TEXT NOT NULL,
		location TEXT NOT NULL,
		employment_kind TEXT NOT NULL CHECK (employment_kind IN ('full_time', 'part_time', 'contract', 'remote')),
		salary_min INTEGER,
		salary_max INTEGER,
		status TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'closed')),
		closes_at TEXT,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_postings_employer ON postings(employer_id)",
	"CREATE INDEX IF NOT EXISTS idx_postings_status_created ON postings(status, created_at)",
	r#"
	CREATE TABLE IF NOT EXISTS applications (
		id TEXT PRIMARY KEY,
		posting_id TEXT NOT NULL REFERENCES postings(id) ON DELETE CASCADE,
		employee_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		cover_note TEXT NOT NULL,
		status TEXT NOT NULL DEFAULT 'submitted' CHECK (status IN ('submitted', 'under_review', 'accepted', 'rejected', 'withdrawn')),
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL,
		UNIQUE (posting_id, employee_id)
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_applications_employee ON applications(employee_id)",
	r#"
	CREATE TABLE IF NOT EXISTS messages (
		id TEXT PRIMARY KEY,
		application_id TEXT NOT NULL REFERENCES applications(id) ON DELETE CASCADE,
		sender_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		body TEXT NOT NULL,
		read_at TEXT,
		created_at TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_messages_application ON messages(application_id)",
];

/// Apply the portal schema to `pool`.
///
/// Safe to call on every startup.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for statement in SCHEMA_STATEMENTS {
		sqlx::query(statement).execute(pool).await?;
	}
	tracing::info!(statements = SCHEMA_STATEMENTS.len(), "database migrations applied");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_migrations_apply_to_fresh_database() {
		let pool = SqlitePool::connect(":memory:").await.unwrap();
		run_migrations(&pool).await.unwrap();

		// Spot-check a table and an index exist.
		let row: (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'postings'",
		)
		.fetch_one(&pool)
		.await
		.unwrap();
		assert_eq!(row.0, 1);

		let row: (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_sessions_expires_at'",
		)
		.fetch_one(&pool)
		.await
		.unwrap();
		assert_eq!(row.0, 1);
	}

	#[tokio::test]
	async fn test_migrations_are_idempotent() {
		let pool = SqlitePool::connect(":memory:").await.unwrap();
		run_migrations(&pool).await.unwrap();
		run_migrations(&pool).await.unwrap();
	}

	#[tokio::test]
	async fn test_schema_survives_reconnect() {
		let dir = tempfile::tempdir().unwrap();
		let url = format!("sqlite:{}?mode=rwc", dir.path().join("portal.db").display());

		let pool = SqlitePool::connect(&url).await.unwrap();
		run_migrations(&pool).await.unwrap();
		pool.close().await;

		// A second startup against the same file must find the schema
		// in place and apply cleanly on top of it.
		let pool = SqlitePool::connect(&url).await.unwrap();
		run_migrations(&pool).await.unwrap();

		let row: (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'messages'",
		)
		.fetch_one(&pool)
		.await
		.unwrap();
		assert_eq!(row.0, 1);
	}
}
