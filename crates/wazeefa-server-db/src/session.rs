// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite-backed session persistence.
//!
//! Sessions are stored with the SHA-256 hash of the client token; the raw
//! token never touches the database. Expiry is the caller's decision: hash
//! lookups return the row as stored so the auth middleware can degrade an
//! expired session to an anonymous visitor without a second query.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use wazeefa_server_auth::session::Session;
use wazeefa_server_auth::{SessionId, UserId};

use crate::error::DbError;
use crate::row::{read_timestamp, read_timestamp_opt, read_uuid};

/// Persists login sessions keyed by token hash. A leaked sessions table
/// contains nothing a client could replay.
#[derive(Clone)]
pub struct SessionRepository {
	pool: SqlitePool,
}

impl SessionRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Persist a new session. The table enforces a unique `token_hash`
	/// and a foreign key from `user_id` to `users`.
	#[tracing::instrument(skip_all, fields(session_id = %session.id, user_id = %session.user_id))]
	pub async fn insert(&self, session: &Session, token_hash: &str) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at, last_used_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(session.id.to_string())
		.bind(session.user_id.to_string())
		.bind(token_hash)
		.bind(session.created_at.to_rfc3339())
		.bind(session.expires_at.to_rfc3339())
		.bind(session.last_used_at.map(|d| d.to_rfc3339()))
		.execute(&self.pool)
		.await?;

		tracing::debug!(session_id = %session.id, "session created");
		Ok(())
	}

	/// Look up a session by the hash of a presented token, or `None` when
	/// no such hash is stored. Expired rows come back too; callers check
	/// `is_expired()` and treat an expired session as no session.
	#[tracing::instrument(skip_all)]
	pub async fn find_by_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Session>, DbError> {
		sqlx::query(
			r#"
			SELECT id, user_id, created_at, expires_at, last_used_at
			FROM sessions
			WHERE token_hash = ?
			"#,
		)
		.bind(token_hash)
		.fetch_optional(&self.pool)
		.await?
		.map(|row| row_to_session(&row))
		.transpose()
	}

	/// List sessions for a user, most recently created first.
	#[tracing::instrument(skip_all, fields(user_id = %user_id))]
	pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Session>, DbError> {
		sqlx::query(
			r#"
			SELECT id, user_id, created_at, expires_at, last_used_at
			FROM sessions
			WHERE user_id = ?
			ORDER BY created_at DESC
			"#,
		)
		.bind(user_id.to_string())
		.fetch_all(&self.pool)
		.await?
		.iter()
		.map(row_to_session)
		.collect()
	}

	/// Stamp `last_used_at` with the current time. Best-effort from the
	/// auth middleware's point of view; it ignores failures here rather
	/// than failing the request.
	#[tracing::instrument(skip_all, fields(session_id = %id))]
	pub async fn touch(&self, id: &SessionId) -> Result<(), DbError> {
		sqlx::query("UPDATE sessions SET last_used_at = ? WHERE id = ?")
			.bind(Utc::now().to_rfc3339())
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(())
	}

	/// Delete a session, reporting whether a row actually went away.
	#[tracing::instrument(skip_all, fields(session_id = %id))]
	pub async fn delete(&self, id: &SessionId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		match result.rows_affected() {
			0 => Ok(false),
			_ => {
				tracing::debug!(session_id = %id, "session deleted");
				Ok(true)
			}
		}
	}

	/// Delete every session belonging to a user. Used when an account is
	/// deactivated so stale cookies stop working immediately.
	#[tracing::instrument(skip_all, fields(user_id = %user_id))]
	pub async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, DbError> {
		let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
			.bind(user_id.to_string())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected();
		if deleted > 0 {
			tracing::info!(user_id = %user_id, deleted, "user sessions deleted");
		}
		Ok(deleted)
	}

	/// Remove sessions whose expiry has passed, returning how many rows
	/// went away. Driven by the periodic sweep job.
	#[tracing::instrument(skip_all)]
	pub async fn purge_expired(&self) -> Result<u64, DbError> {
		let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
			.bind(Utc::now().to_rfc3339())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected();
		tracing::debug!(deleted, "expired sessions purged");
		Ok(deleted)
	}
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<Session, DbError> {
	Ok(Session {
		id: SessionId::new(read_uuid(row, "id")?),
		user_id: UserId::new(read_uuid(row, "user_id")?),
		created_at: read_timestamp(row, "created_at")?,
		expires_at: read_timestamp(row, "expires_at")?,
		last_used_at: read_timestamp_opt(row, "last_used_at")?,
	})
}
