// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Column readers shared by the repository row mappers.
//!
//! SQLite stores UUIDs and timestamps as TEXT; these helpers decode
//! them and name the offending column when stored data fails to parse.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;

pub(crate) fn read_uuid(row: &SqliteRow, column: &str) -> Result<Uuid, DbError> {
	let raw: String = row.get(column);
	Uuid::parse_str(&raw)
		.map_err(|e| DbError::Internal(format!("column {column} holds a malformed UUID: {e}")))
}

pub(crate) fn read_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, DbError> {
	let raw: String = row.get(column);
	parse_timestamp(column, &raw)
}

pub(crate) fn read_timestamp_opt(
	row: &SqliteRow,
	column: &str,
) -> Result<Option<DateTime<Utc>>, DbError> {
	let raw: Option<String> = row.get(column);
	raw.map(|s| parse_timestamp(column, &s)).transpose()
}

fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(raw)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("column {column} holds a malformed timestamp: {e}")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::memory_pool;

	#[tokio::test]
	async fn malformed_stored_values_name_the_column() {
		let pool = memory_pool().await;
		let row = sqlx::query("SELECT 'not-a-uuid' AS id, 'yesterday' AS created_at")
			.fetch_one(&pool)
			.await
			.unwrap();

		let err = read_uuid(&row, "id").unwrap_err();
		assert!(err.to_string().contains("column id"));

		let err = read_timestamp(&row, "created_at").unwrap_err();
		assert!(err.to_string().contains("column created_at"));
	}

	#[tokio::test]
	async fn valid_values_round_trip() {
		let pool = memory_pool().await;
		let row = sqlx::query(
			"SELECT '6a42f5a7-2f1e-4e0f-9c38-10a5c14e60c1' AS id, \
			 '2026-03-01T08:30:00+00:00' AS seen_at, NULL AS deleted_at",
		)
		.fetch_one(&pool)
		.await
		.unwrap();

		let id = read_uuid(&row, "id").unwrap();
		assert_eq!(id.to_string(), "6a42f5a7-2f1e-4e0f-9c38-10a5c14e60c1");

		let seen_at = read_timestamp(&row, "seen_at").unwrap();
		assert_eq!(seen_at.to_rfc3339(), "2026-03-01T08:30:00+00:00");

		assert_eq!(read_timestamp_opt(&row, "deleted_at").unwrap(), None);
	}
}
