// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message repository for database operations.
//!
//! Messages are threaded under an application, connecting the applicant
//! with the posting's employer. Read state is a nullable timestamp set
//! when the recipient opens the thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use wazeefa_server_auth::{ApplicationId, MessageId, UserId};

use crate::error::Result;
use crate::row::{read_timestamp, read_timestamp_opt, read_uuid};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
	pub id: MessageId,
	pub application_id: ApplicationId,
	pub sender_id: UserId,
	pub body: String,
	pub read_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
}

impl Message {
	pub fn is_read(&self) -> bool {
		self.read_at.is_some()
	}
}

#[derive(Clone)]
pub struct MessageRepository {
	pool: SqlitePool,
}

impl MessageRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, message), fields(message_id = %message.id, application_id = %message.application_id))]
	pub async fn insert(&self, message: &Message) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO messages (id, application_id, sender_id, body, read_at, created_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(message.id.to_string())
		.bind(message.application_id.to_string())
		.bind(message.sender_id.to_string())
		.bind(&message.body)
		.bind(message.read_at.map(|dt| dt.to_rfc3339()))
		.bind(message.created_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(message_id = %message.id, "message created");
		Ok(())
	}

	/// The thread in conversation order, oldest first.
	#[tracing::instrument(skip(self), fields(application_id = %application_id))]
	pub async fn list_for_application(
		&self,
		application_id: &ApplicationId,
	) -> Result<Vec<Message>> {
		let rows = sqlx::query(
			r#"
			SELECT id, application_id, sender_id, body, read_at, created_at
			FROM messages
			WHERE application_id = ?
			ORDER BY created_at ASC
			"#,
		)
		.bind(application_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_message).collect()
	}

	/// Mark every unread message in the thread that the reader did not
	/// send. Returns the number of messages marked.
	#[tracing::instrument(skip(self), fields(application_id = %application_id, reader_id = %reader_id))]
	pub async fn mark_read(
		&self,
		application_id: &ApplicationId,
		reader_id: &UserId,
	) -> Result<u64> {
		let result = sqlx::query(
			r#"
			UPDATE messages
			SET read_at = ?
			WHERE application_id = ? AND sender_id != ? AND read_at IS NULL
			"#,
		)
		.bind(Utc::now().to_rfc3339())
		.bind(application_id.to_string())
		.bind(reader_id.to_string())
		.execute(&self.pool)
		.await?;

		let marked = result.rows_affected();
		if marked > 0 {
			tracing::debug!(application_id = %application_id, marked, "messages marked read");
		}
		Ok(marked)
	}

	/// Unread messages addressed to the user across every thread they
	/// participate in, as applicant or as the posting's employer. Feeds
	/// the dashboard badge.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn count_unread_for_user(&self, user_id: &UserId) -> Result<i64> {
		let row = sqlx::query(
			r#"
			SELECT COUNT(*) as count
			FROM messages m
			JOIN applications a ON a.id = m.application_id
			JOIN postings p ON p.id = a.posting_id
			WHERE m.read_at IS NULL
			  AND m.sender_id != ?1
			  AND (a.employee_id = ?1 OR p.employer_id = ?1)
			"#,
		)
		.bind(user_id.to_string())
		.fetch_one(&self.pool)
		.await?;
		Ok(row.get("count"))
	}
}

fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<Message> {
	Ok(Message {
		id: MessageId::new(read_uuid(row, "id")?),
		application_id: ApplicationId::new(read_uuid(row, "application_id")?),
		sender_id: UserId::new(read_uuid(row, "sender_id")?),
		body: row.get("body"),
		read_at: read_timestamp_opt(row, "read_at")?,
		created_at: read_timestamp(row, "created_at")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::memory_pool;
	use chrono::Duration;
	use wazeefa_server_auth::PostingId;

	struct Thread {
		employer: UserId,
		employee: UserId,
		application: ApplicationId,
	}

	async fn seed_thread(pool: &SqlitePool) -> Thread {
		let employer = UserId::generate();
		let employee = UserId::generate();
		let posting = PostingId::generate();
		let application = ApplicationId::generate();
		let now = Utc::now().to_rfc3339();

		for (id, name, role) in [(&employer, "Employer", "employer"), (&employee, "Applicant", "employee")] {
			sqlx::query(
				r#"
				INSERT INTO users (id, display_name, email, role, password_hash, created_at, updated_at)
				VALUES (?, ?, ?, ?, ?, ?, ?)
				"#,
			)
			.bind(id.to_string())
			.bind(name)
			.bind(format!("{id}@example.com"))
			.bind(role)
			.bind("$argon2id$fake")
			.bind(&now)
			.bind(&now)
			.execute(pool)
			.await
			.unwrap();
		}

		sqlx::query(
			r#"
			INSERT INTO postings (id, employer_id, title, description, location, employment_kind, status, created_at, updated_at)
			VALUES (?, ?, 'Open role', 'Role description.', 'Amman', 'full_time', 'open', ?, ?)
			"#,
		)
		.bind(posting.to_string())
		.bind(employer.to_string())
		.bind(&now)
		.bind(&now)
		.execute(pool)
		.await
		.unwrap();

		sqlx::query(
			r#"
			INSERT INTO applications (id, posting_id, employee_id, cover_note, status, created_at, updated_at)
			VALUES (?, ?, ?, 'Cover note.', 'submitted', ?, ?)
			"#,
		)
		.bind(application.to_string())
		.bind(posting.to_string())
		.bind(employee.to_string())
		.bind(&now)
		.bind(&now)
		.execute(pool)
		.await
		.unwrap();

		Thread {
			employer,
			employee,
			application,
		}
	}

	fn make_message(application_id: ApplicationId, sender_id: UserId, body: &str, age_minutes: i64) -> Message {
		Message {
			id: MessageId::generate(),
			application_id,
			sender_id,
			body: body.to_string(),
			read_at: None,
			created_at: Utc::now() - Duration::minutes(age_minutes),
		}
	}

	#[tokio::test]
	async fn test_thread_lists_oldest_first() {
		let pool = memory_pool().await;
		let thread = seed_thread(&pool).await;
		let repo = MessageRepository::new(pool);

		repo.insert(&make_message(thread.application, thread.employee, "First", 30))
			.await
			.unwrap();
		repo.insert(&make_message(thread.application, thread.employer, "Second", 20))
			.await
			.unwrap();
		repo.insert(&make_message(thread.application, thread.employee, "Third", 10))
			.await
			.unwrap();

		let messages = repo
			.list_for_application(&thread.application)
			.await
			.unwrap();
		assert_eq!(messages.len(), 3);
		assert_eq!(messages[0].body, "First");
		assert_eq!(messages[1].body, "Second");
		assert_eq!(messages[2].body, "Third");
		assert!(!messages[0].is_read());
	}

	#[tokio::test]
	async fn test_arabic_body_roundtrip() {
		let pool = memory_pool().await;
		let thread = seed_thread(&pool).await;
		let repo = MessageRepository::new(pool);

		let body = "مرحبا، شكرا على تقديمك للوظيفة";
		repo.insert(&make_message(thread.application, thread.employer, body, 0))
			.await
			.unwrap();

		let messages = repo
			.list_for_application(&thread.application)
			.await
			.unwrap();
		assert_eq!(messages[0].body, body);
	}

	#[tokio::test]
	async fn test_mark_read_skips_own_messages() {
		let pool = memory_pool().await;
		let thread = seed_thread(&pool).await;
		let repo = MessageRepository::new(pool);

		repo.insert(&make_message(thread.application, thread.employer, "From employer", 20))
			.await
			.unwrap();
		repo.insert(&make_message(thread.application, thread.employee, "From applicant", 10))
			.await
			.unwrap();

		// The applicant opens the thread: one inbound message to mark.
		let marked = repo
			.mark_read(&thread.application, &thread.employee)
			.await
			.unwrap();
		assert_eq!(marked, 1);

		let messages = repo
			.list_for_application(&thread.application)
			.await
			.unwrap();
		assert!(messages[0].is_read());
		assert!(!messages[1].is_read());

		// Opening again marks nothing new.
		let marked = repo
			.mark_read(&thread.application, &thread.employee)
			.await
			.unwrap();
		assert_eq!(marked, 0);
	}

	#[tokio::test]
	async fn test_unread_counts_per_participant() {
		let pool = memory_pool().await;
		let thread = seed_thread(&pool).await;
		let repo = MessageRepository::new(pool);

		repo.insert(&make_message(thread.application, thread.employer, "Hello", 30))
			.await
			.unwrap();
		repo.insert(&make_message(thread.application, thread.employer, "Still there?", 20))
			.await
			.unwrap();
		repo.insert(&make_message(thread.application, thread.employee, "Yes!", 10))
			.await
			.unwrap();

		assert_eq!(repo.count_unread_for_user(&thread.employee).await.unwrap(), 2);
		assert_eq!(repo.count_unread_for_user(&thread.employer).await.unwrap(), 1);

		repo.mark_read(&thread.application, &thread.employee)
			.await
			.unwrap();
		assert_eq!(repo.count_unread_for_user(&thread.employee).await.unwrap(), 0);
		assert_eq!(repo.count_unread_for_user(&thread.employer).await.unwrap(), 1);
	}
}
