// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Job application repository for database operations.
//!
//! One application per (posting, employee) pair, enforced by a unique
//! constraint. The status workflow is a small graph validated through
//! [`ApplicationStatus::can_transition_to`]; writes are guarded on the
//! expected current status so concurrent reviewers cannot race past it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use wazeefa_server_auth::{ApplicationId, PostingId, UserId};

use crate::error::{DbError, Result};
use crate::row::{read_timestamp, read_uuid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
	Submitted,
	UnderReview,
	Accepted,
	Rejected,
	Withdrawn,
}

impl ApplicationStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			ApplicationStatus::Submitted => "submitted",
			ApplicationStatus::UnderReview => "under_review",
			ApplicationStatus::Accepted => "accepted",
			ApplicationStatus::Rejected => "rejected",
			ApplicationStatus::Withdrawn => "withdrawn",
		}
	}

	/// Terminal statuses accept no further transitions.
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			ApplicationStatus::Accepted | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
		)
	}

	/// The review workflow: `submitted → under_review → accepted | rejected`,
	/// with withdrawal allowed from any non-terminal status.
	pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
		match (self, next) {
			(ApplicationStatus::Submitted, ApplicationStatus::UnderReview) => true,
			(ApplicationStatus::UnderReview, ApplicationStatus::Accepted) => true,
			(ApplicationStatus::UnderReview, ApplicationStatus::Rejected) => true,
			(ApplicationStatus::Submitted, ApplicationStatus::Withdrawn) => true,
			(ApplicationStatus::UnderReview, ApplicationStatus::Withdrawn) => true,
			// Everything else, including any move out of a terminal status,
			// is rejected.
			_ => false,
		}
	}
}

impl std::str::FromStr for ApplicationStatus {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"submitted" => Ok(ApplicationStatus::Submitted),
			"under_review" => Ok(ApplicationStatus::UnderReview),
			"accepted" => Ok(ApplicationStatus::Accepted),
			"rejected" => Ok(ApplicationStatus::Rejected),
			"withdrawn" => Ok(ApplicationStatus::Withdrawn),
			_ => Err(format!("unknown application status: {s}")),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
	pub id: ApplicationId,
	pub posting_id: PostingId,
	pub employee_id: UserId,
	pub cover_note: String,
	pub status: ApplicationStatus,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// An application joined with its posting title, as shown to the
/// applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithPosting {
	pub application: Application,
	pub posting_title: String,
}

/// An application joined with the applicant's display name, as shown to
/// the reviewing employer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithApplicant {
	pub application: Application,
	pub applicant_name: String,
}

#[derive(Clone)]
pub struct ApplicationRepository {
	pool: SqlitePool,
}

impl ApplicationRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new application.
	///
	/// A second application for the same posting by the same employee maps
	/// to `DbError::Conflict`.
	#[tracing::instrument(skip(self, application), fields(application_id = %application.id, posting_id = %application.posting_id))]
	pub async fn insert(&self, application: &Application) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO applications (id, posting_id, employee_id, cover_note, status, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(application.id.to_string())
		.bind(application.posting_id.to_string())
		.bind(application.employee_id.to_string())
		.bind(&application.cover_note)
		.bind(application.status.as_str())
		.bind(application.created_at.to_rfc3339())
		.bind(application.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
				DbError::Conflict("Already applied to this posting".to_string())
			}
			_ => DbError::Sqlx(e),
		})?;

		tracing::debug!(application_id = %application.id, "application created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(application_id = %id))]
	pub async fn find_by_id(&self, id: &ApplicationId) -> Result<Option<Application>> {
		let row = sqlx::query(
			r#"
			SELECT id, posting_id, employee_id, cover_note, status, created_at, updated_at
			FROM applications
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_application(&r)).transpose()
	}

	/// List an employee's applications newest-first with posting titles.
	#[tracing::instrument(skip(self), fields(employee_id = %employee_id))]
	pub async fn list_for_employee(
		&self,
		employee_id: &UserId,
	) -> Result<Vec<ApplicationWithPosting>> {
		let rows = sqlx::query(
			r#"
			SELECT a.id, a.posting_id, a.employee_id, a.cover_note, a.status, a.created_at, a.updated_at,
			       p.title as posting_title
			FROM applications a
			JOIN postings p ON p.id = a.posting_id
			WHERE a.employee_id = ?
			ORDER BY a.created_at DESC
			"#,
		)
		.bind(employee_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let mut applications = Vec::with_capacity(rows.len());
		for row in rows {
			let application = row_to_application(&row)?;
			let posting_title: String = row.get("posting_title");
			applications.push(ApplicationWithPosting {
				application,
				posting_title,
			});
		}

		tracing::debug!(employee_id = %employee_id, count = applications.len(), "listed employee applications");
		Ok(applications)
	}

	/// List a posting's applications oldest-first with applicant names.
	#[tracing::instrument(skip(self), fields(posting_id = %posting_id))]
	pub async fn list_for_posting(
		&self,
		posting_id: &PostingId,
	) -> Result<Vec<ApplicationWithApplicant>> {
		let rows = sqlx::query(
			r#"
			SELECT a.id, a.posting_id, a.employee_id, a.cover_note, a.status, a.created_at, a.updated_at,
			       u.display_name as applicant_name
			FROM applications a
			JOIN users u ON u.id = a.employee_id
			WHERE a.posting_id = ?
			ORDER BY a.created_at ASC
			"#,
		)
		.bind(posting_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let mut applications = Vec::with_capacity(rows.len());
		for row in rows {
			let application = row_to_application(&row)?;
			let applicant_name: String = row.get("applicant_name");
			applications.push(ApplicationWithApplicant {
				application,
				applicant_name,
			});
		}

		tracing::debug!(posting_id = %posting_id, count = applications.len(), "listed posting applications");
		Ok(applications)
	}

	/// Move an application from `from` to `to`.
	///
	/// The update is guarded on the expected current status, so a stale
	/// transition - the row moved on since it was read - changes nothing.
	///
	/// # Returns
	/// `true` if the row was updated, `false` if the status no longer
	/// matched `from` (or the application does not exist).
	#[tracing::instrument(skip(self), fields(application_id = %id, from = %from.as_str(), to = %to.as_str()))]
	pub async fn set_status(
		&self,
		id: &ApplicationId,
		from: ApplicationStatus,
		to: ApplicationStatus,
	) -> Result<bool> {
		let result = sqlx::query(
			r#"
			UPDATE applications
			SET status = ?, updated_at = ?
			WHERE id = ? AND status = ?
			"#,
		)
		.bind(to.as_str())
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.bind(from.as_str())
		.execute(&self.pool)
		.await?;

		let updated = result.rows_affected() > 0;
		if updated {
			tracing::info!(application_id = %id, from = %from.as_str(), to = %to.as_str(), "application status updated");
		}
		Ok(updated)
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let row = sqlx::query("SELECT COUNT(*) as count FROM applications")
			.fetch_one(&self.pool)
			.await?;
		Ok(row.get("count"))
	}

	/// Count applications awaiting employer action across the employer's
	/// postings. Feeds the employer dashboard.
	#[tracing::instrument(skip(self), fields(employer_id = %employer_id))]
	pub async fn count_pending_for_employer(&self, employer_id: &UserId) -> Result<i64> {
		let row = sqlx::query(
			r#"
			SELECT COUNT(*) as count
			FROM applications a
			JOIN postings p ON p.id = a.posting_id
			WHERE p.employer_id = ? AND a.status IN ('submitted', 'under_review')
			"#,
		)
		.bind(employer_id.to_string())
		.fetch_one(&self.pool)
		.await?;
		Ok(row.get("count"))
	}
}

fn row_to_application(row: &sqlx::sqlite::SqliteRow) -> Result<Application> {
	let status: String = row.get("status");

	Ok(Application {
		id: ApplicationId::new(read_uuid(row, "id")?),
		posting_id: PostingId::new(read_uuid(row, "posting_id")?),
		employee_id: UserId::new(read_uuid(row, "employee_id")?),
		cover_note: row.get("cover_note"),
		status: status.parse().map_err(DbError::Internal)?,
		created_at: read_timestamp(row, "created_at")?,
		updated_at: read_timestamp(row, "updated_at")?,
	})
}
