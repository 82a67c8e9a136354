// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite-backed user accounts.
//!
//! Emails are stored normalized (trimmed, lowercased) and unique. Role is
//! a free TEXT column decoded through [`Role::parse`] on the way out, so
//! an out-of-set tag becomes `role: None` instead of a read error.

use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};

use wazeefa_server_auth::user::normalize_email;
use wazeefa_server_auth::{Role, User, UserId};

use crate::error::DbError;
use crate::row::{read_timestamp, read_timestamp_opt, read_uuid};

#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new user row.
	///
	/// The email must already be normalized; a duplicate maps to
	/// `DbError::Conflict`.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn insert(&self, user: &User) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO users (id, display_name, email, role, password_hash, locale, created_at, updated_at, deleted_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.display_name)
		.bind(&user.email)
		.bind(user.role.map(|r| r.as_str()))
		.bind(&user.password_hash)
		.bind(user.locale.as_deref())
		.bind(user.created_at.to_rfc3339())
		.bind(user.updated_at.to_rfc3339())
		.bind(user.deleted_at.map(|d| d.to_rfc3339()))
		.execute(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
				DbError::Conflict("Email already registered".to_string())
			}
			_ => DbError::Sqlx(e),
		})?;

		tracing::debug!(user_id = %user.id, "account created");
		Ok(())
	}

	/// Fetch a user by id. Soft-deleted users read as absent.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, display_name, email, role, password_hash, locale, created_at, updated_at, deleted_at
			FROM users
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Fetch a user by email. The argument is normalized before lookup, so
	/// `Sara@Example.com` finds the `sara@example.com` account.
	#[tracing::instrument(skip(self, email))]
	pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
		let email = normalize_email(email);
		let row = sqlx::query(
			r#"
			SELECT id, display_name, email, role, password_hash, locale, created_at, updated_at, deleted_at
			FROM users
			WHERE email = ? AND deleted_at IS NULL
			"#,
		)
		.bind(&email)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	#[tracing::instrument(skip(self, display_name), fields(user_id = %id))]
	pub async fn set_display_name(
		&self,
		id: &UserId,
		display_name: &str,
	) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET display_name = ?, updated_at = ?
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(display_name)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Persist the user's locale preference. `None` clears it back to the
	/// server default.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn set_locale(&self, id: &UserId, locale: Option<&str>) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET locale = ?, updated_at = ?
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(locale)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		let updated = result.rows_affected() > 0;
		if updated {
			tracing::debug!(user_id = %id, locale = ?locale, "locale preference saved");
		}
		Ok(updated)
	}

	/// Assign a recognized role. This is the admin repair path for accounts
	/// whose stored tag fell outside the closed set.
	#[tracing::instrument(skip(self), fields(user_id = %id, role = %role))]
	pub async fn set_role(&self, id: &UserId, role: Role) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET role = ?, updated_at = ?
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(role.as_str())
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		let updated = result.rows_affected() > 0;
		if updated {
			tracing::info!(user_id = %id, role = %role, "role assigned");
		}
		Ok(updated)
	}

	/// Soft-delete a user. Returns `false` if already deleted or missing.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn soft_delete(&self, id: &UserId) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET deleted_at = ?, updated_at = ?
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(Utc::now().to_rfc3339())
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::info!(user_id = %id, "account soft-deleted");
		}
		Ok(deleted)
	}

	/// List users newest-first with the total count for pagination.
	#[tracing::instrument(skip(self), fields(limit, offset))]
	pub async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<User>, i64), DbError> {
		let total = self.count().await?;

		let rows = sqlx::query(
			r#"
			SELECT id, display_name, email, role, password_hash, locale, created_at, updated_at, deleted_at
			FROM users
			WHERE deleted_at IS NULL
			ORDER BY created_at DESC
			LIMIT ? OFFSET ?
			"#,
		)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.pool)
		.await?;

		let users: Vec<User> = rows.iter().map(row_to_user).collect::<Result<_, _>>()?;

		tracing::debug!(count = users.len(), total, "account page listed");
		Ok((users, total))
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64, DbError> {
		let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE deleted_at IS NULL")
			.fetch_one(&self.pool)
			.await?;
		Ok(row.get("count"))
	}
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let role_tag: Option<String> = row.get("role");

	Ok(User {
		id: UserId::new(read_uuid(row, "id")?),
		display_name: row.get("display_name"),
		email: row.get("email"),
		// An out-of-set tag decodes to None rather than failing the read; the
		// account stays reachable and lands on the generic home.
		role: role_tag.as_deref().and_then(Role::parse),
		password_hash: row.get("password_hash"),
		locale: row.get("locale"),
		created_at: read_timestamp(row, "created_at")?,
		updated_at: read_timestamp(row, "updated_at")?,
		deleted_at: read_timestamp_opt(row, "deleted_at")?,
	})
}
