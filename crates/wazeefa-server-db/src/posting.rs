// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Job posting repository for database operations.
//!
//! Public search only ever sees open postings; employers see their own
//! regardless of status. A posting with a `closes_at` in the past is
//! flipped to closed by the periodic expiry job rather than filtered at
//! read time, so the stored status stays authoritative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use wazeefa_server_auth::{PostingId, UserId};

use crate::error::{DbError, Result};
use crate::row::{read_timestamp, read_timestamp_opt, read_uuid};

/// Hard cap applied to search page sizes.
pub const MAX_SEARCH_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentKind {
	FullTime,
	PartTime,
	Contract,
	Remote,
}

impl EmploymentKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			EmploymentKind::FullTime => "full_time",
			EmploymentKind::PartTime => "part_time",
			EmploymentKind::Contract => "contract",
			EmploymentKind::Remote => "remote",
		}
	}
}

impl std::str::FromStr for EmploymentKind {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"full_time" => Ok(EmploymentKind::FullTime),
			"part_time" => Ok(EmploymentKind::PartTime),
			"contract" => Ok(EmploymentKind::Contract),
			"remote" => Ok(EmploymentKind::Remote),
			_ => Err(format!("unknown employment kind: {s}")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
	Open,
	Closed,
}

impl PostingStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			PostingStatus::Open => "open",
			PostingStatus::Closed => "closed",
		}
	}
}

impl std::str::FromStr for PostingStatus {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"open" => Ok(PostingStatus::Open),
			"closed" => Ok(PostingStatus::Closed),
			_ => Err(format!("unknown posting status: {s}")),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
	pub id: PostingId,
	pub employer_id: UserId,
	pub title: String,
	pub description: String,
	pub location: String,
	pub employment_kind: EmploymentKind,
	pub salary_min: Option<i64>,
	pub salary_max: Option<i64>,
	pub status: PostingStatus,
	pub closes_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Posting {
	pub fn is_open(&self) -> bool {
		self.status == PostingStatus::Open
	}
}

/// A posting joined with the employer's company name for the public
/// detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingDetail {
	pub posting: Posting,
	pub company_name: Option<String>,
}

/// Parameters for the public posting search.
#[derive(Debug, Clone)]
pub struct PostingSearchParams {
	/// Keyword matched against title and description.
	pub query: Option<String>,
	pub limit: u32,
	pub offset: u32,
}

impl PostingSearchParams {
	/// The requested limit with [`MAX_SEARCH_LIMIT`] applied.
	pub fn clamped_limit(&self) -> u32 {
		self.limit.min(MAX_SEARCH_LIMIT)
	}
}

impl Default for PostingSearchParams {
	fn default() -> Self {
		Self {
			query: None,
			limit: 20,
			offset: 0,
		}
	}
}

#[derive(Clone)]
pub struct PostingRepository {
	pool: SqlitePool,
}

impl PostingRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, posting), fields(posting_id = %posting.id, employer_id = %posting.employer_id))]
	pub async fn insert(&self, posting: &Posting) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO postings (id, employer_id, title, description, location, employment_kind,
			                      salary_min, salary_max, status, closes_at, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(posting.id.to_string())
		.bind(posting.employer_id.to_string())
		.bind(&posting.title)
		.bind(&posting.description)
		.bind(&posting.location)
		.bind(posting.employment_kind.as_str())
		.bind(posting.salary_min)
		.bind(posting.salary_max)
		.bind(posting.status.as_str())
		.bind(posting.closes_at.map(|d| d.to_rfc3339()))
		.bind(posting.created_at.to_rfc3339())
		.bind(posting.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(posting_id = %posting.id, "posting created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(posting_id = %id))]
	pub async fn find_by_id(&self, id: &PostingId) -> Result<Option<Posting>> {
		let row = sqlx::query(
			r#"
			SELECT id, employer_id, title, description, location, employment_kind,
			       salary_min, salary_max, status, closes_at, created_at, updated_at
			FROM postings
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_posting(&r)).transpose()
	}

	/// Fetch a posting joined with the employer's company name.
	#[tracing::instrument(skip(self), fields(posting_id = %id))]
	pub async fn find_detail(&self, id: &PostingId) -> Result<Option<PostingDetail>> {
		let row = sqlx::query(
			r#"
			SELECT p.id, p.employer_id, p.title, p.description, p.location, p.employment_kind,
			       p.salary_min, p.salary_max, p.status, p.closes_at, p.created_at, p.updated_at,
			       ep.company_name
			FROM postings p
			LEFT JOIN employer_profiles ep ON ep.user_id = p.employer_id
			WHERE p.id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		match row {
			Some(row) => {
				let posting = row_to_posting(&row)?;
				let company_name: Option<String> = row.get("company_name");
				Ok(Some(PostingDetail {
					posting,
					company_name,
				}))
			}
			None => Ok(None),
		}
	}

	/// Update the editable content of a posting. Ownership is the
	/// caller's responsibility.
	#[tracing::instrument(skip(self, posting), fields(posting_id = %posting.id))]
	pub async fn update(&self, posting: &Posting) -> Result<bool> {
		let result = sqlx::query(
			r#"
			UPDATE postings
			SET title = ?, description = ?, location = ?, employment_kind = ?,
			    salary_min = ?, salary_max = ?, closes_at = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&posting.title)
		.bind(&posting.description)
		.bind(&posting.location)
		.bind(posting.employment_kind.as_str())
		.bind(posting.salary_min)
		.bind(posting.salary_max)
		.bind(posting.closes_at.map(|d| d.to_rfc3339()))
		.bind(Utc::now().to_rfc3339())
		.bind(posting.id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Close a posting. Returns `false` if already closed or missing.
	#[tracing::instrument(skip(self), fields(posting_id = %id))]
	pub async fn close(&self, id: &PostingId) -> Result<bool> {
		let result = sqlx::query(
			r#"
			UPDATE postings
			SET status = 'closed', updated_at = ?
			WHERE id = ? AND status = 'open'
			"#,
		)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		let closed = result.rows_affected() > 0;
		if closed {
			tracing::info!(posting_id = %id, "posting closed");
		}
		Ok(closed)
	}

	#[tracing::instrument(skip(self), fields(posting_id = %id))]
	pub async fn delete(&self, id: &PostingId) -> Result<bool> {
		let result = sqlx::query("DELETE FROM postings WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Search open postings newest-first.
	///
	/// The optional keyword matches title or description. Returns the page
	/// and the total match count for pagination; the page size is clamped
	/// to [`MAX_SEARCH_LIMIT`].
	#[tracing::instrument(skip(self), fields(query = ?params.query, limit = params.limit, offset = params.offset))]
	pub async fn search_open(
		&self,
		params: &PostingSearchParams,
	) -> Result<(Vec<Posting>, i64)> {
		let limit = params.clamped_limit();
		let pattern = params
			.query
			.as_deref()
			.map(|q| q.trim())
			.filter(|q| !q.is_empty())
			.map(|q| format!("%{q}%"));

		let (rows, total) = if let Some(ref pattern) = pattern {
			let count_row = sqlx::query(
				r#"
				SELECT COUNT(*) as count
				FROM postings
				WHERE status = 'open' AND (title LIKE ?1 OR description LIKE ?1)
				"#,
			)
			.bind(pattern)
			.fetch_one(&self.pool)
			.await?;
			let total: i64 = count_row.get("count");

			let rows = sqlx::query(
				r#"
				SELECT id, employer_id, title, description, location, employment_kind,
				       salary_min, salary_max, status, closes_at, created_at, updated_at
				FROM postings
				WHERE status = 'open' AND (title LIKE ?1 OR description LIKE ?1)
				ORDER BY created_at DESC
				LIMIT ?2 OFFSET ?3
				"#,
			)
			.bind(pattern)
			.bind(limit)
			.bind(params.offset)
			.fetch_all(&self.pool)
			.await?;
			(rows, total)
		} else {
			let count_row = sqlx::query("SELECT COUNT(*) as count FROM postings WHERE status = 'open'")
				.fetch_one(&self.pool)
				.await?;
			let total: i64 = count_row.get("count");

			let rows = sqlx::query(
				r#"
				SELECT id, employer_id, title, description, location, employment_kind,
				       salary_min, salary_max, status, closes_at, created_at, updated_at
				FROM postings
				WHERE status = 'open'
				ORDER BY created_at DESC
				LIMIT ? OFFSET ?
				"#,
			)
			.bind(limit)
			.bind(params.offset)
			.fetch_all(&self.pool)
			.await?;
			(rows, total)
		};

		let postings: Vec<Posting> = rows.iter().map(row_to_posting).collect::<Result<_>>()?;

		tracing::debug!(count = postings.len(), total, "posting search completed");
		Ok((postings, total))
	}

	/// List an employer's postings newest-first, each with its application
	/// count.
	#[tracing::instrument(skip(self), fields(employer_id = %employer_id))]
	pub async fn list_for_employer(
		&self,
		employer_id: &UserId,
	) -> Result<Vec<(Posting, i64)>> {
		let rows = sqlx::query(
			r#"
			SELECT p.id, p.employer_id, p.title, p.description, p.location, p.employment_kind,
			       p.salary_min, p.salary_max, p.status, p.closes_at, p.created_at, p.updated_at,
			       COUNT(a.id) as application_count
			FROM postings p
			LEFT JOIN applications a ON a.posting_id = p.id
			WHERE p.employer_id = ?
			GROUP BY p.id
			ORDER BY p.created_at DESC
			"#,
		)
		.bind(employer_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let mut postings = Vec::with_capacity(rows.len());
		for row in rows {
			let posting = row_to_posting(&row)?;
			let application_count: i64 = row.get("application_count");
			postings.push((posting, application_count));
		}

		tracing::debug!(employer_id = %employer_id, count = postings.len(), "listed employer postings");
		Ok(postings)
	}

	/// Close open postings whose `closes_at` has passed.
	///
	/// # Returns
	/// The number of postings closed. Runs from the periodic expiry job.
	#[tracing::instrument(skip(self))]
	pub async fn close_expired(&self) -> Result<u64> {
		let result = sqlx::query(
			r#"
			UPDATE postings
			SET status = 'closed', updated_at = ?1
			WHERE status = 'open' AND closes_at IS NOT NULL AND closes_at < ?1
			"#,
		)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		let closed = result.rows_affected();
		if closed > 0 {
			tracing::info!(closed, "expired postings closed");
		}
		Ok(closed)
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let row = sqlx::query("SELECT COUNT(*) as count FROM postings")
			.fetch_one(&self.pool)
			.await?;
		Ok(row.get("count"))
	}

	#[tracing::instrument(skip(self))]
	pub async fn count_open(&self) -> Result<i64> {
		let row = sqlx::query("SELECT COUNT(*) as count FROM postings WHERE status = 'open'")
			.fetch_one(&self.pool)
			.await?;
		Ok(row.get("count"))
	}
}

fn row_to_posting(row: &sqlx::sqlite::SqliteRow) -> Result<Posting> {
	let kind: String = row.get("employment_kind");
	let status: String = row.get("status");

	Ok(Posting {
		id: PostingId::new(read_uuid(row, "id")?),
		employer_id: UserId::new(read_uuid(row, "employer_id")?),
		title: row.get("title"),
		description: row.get("description"),
		location: row.get("location"),
		employment_kind: kind.parse().map_err(DbError::Internal)?,
		salary_min: row.get("salary_min"),
		salary_max: row.get("salary_max"),
		status: status.parse().map_err(DbError::Internal)?,
		closes_at: read_timestamp_opt(row, "closes_at")?,
		created_at: read_timestamp(row, "created_at")?,
		updated_at: read_timestamp(row, "updated_at")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::memory_pool;
	use chrono::Duration;
	use uuid::Uuid;

	async fn seed_user(pool: &SqlitePool, role: &str) -> UserId {
		let id = UserId::generate();
		let now = Utc::now().to_rfc3339();
		sqlx::query(
			r#"
			INSERT INTO users (id, display_name, email, role, password_hash, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(id.to_string())
		.bind("Posting Owner")
		.bind(format!("{id}@example.com"))
		.bind(role)
		.bind("$argon2id$fake")
		.bind(&now)
		.bind(&now)
		.execute(pool)
		.await
		.unwrap();
		id
	}

	fn make_posting(employer_id: UserId, title: &str, age_minutes: i64) -> Posting {
		let created = Utc::now() - Duration::minutes(age_minutes);
		Posting {
			id: PostingId::generate(),
			employer_id,
			title: title.to_string(),
			description: "A role on the platform team.".to_string(),
			location: "Cairo".to_string(),
			employment_kind: EmploymentKind::FullTime,
			salary_min: Some(900),
			salary_max: Some(1400),
			status: PostingStatus::Open,
			closes_at: None,
			created_at: created,
			updated_at: created,
		}
	}

	#[tokio::test]
	async fn test_insert_and_find_by_id() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		let mut posting = make_posting(employer, "Rust engineer", 0);
		posting.employment_kind = EmploymentKind::Remote;
		posting.closes_at = Some(Utc::now() + Duration::days(30));
		repo.insert(&posting).await.unwrap();

		let fetched = repo.find_by_id(&posting.id).await.unwrap().unwrap();
		assert_eq!(fetched.title, "Rust engineer");
		assert_eq!(fetched.employer_id, employer);
		assert_eq!(fetched.employment_kind, EmploymentKind::Remote);
		assert_eq!(fetched.salary_min, Some(900));
		assert_eq!(fetched.status, PostingStatus::Open);
		assert!(fetched.closes_at.is_some());
	}

	#[tokio::test]
	async fn test_update_changes_content() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		let mut posting = make_posting(employer, "Backend engineer", 0);
		repo.insert(&posting).await.unwrap();

		posting.title = "Senior backend engineer".to_string();
		posting.salary_max = Some(2000);
		assert!(repo.update(&posting).await.unwrap());

		let fetched = repo.find_by_id(&posting.id).await.unwrap().unwrap();
		assert_eq!(fetched.title, "Senior backend engineer");
		assert_eq!(fetched.salary_max, Some(2000));
	}

	#[tokio::test]
	async fn test_close_is_one_way() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		let posting = make_posting(employer, "Closing soon", 0);
		repo.insert(&posting).await.unwrap();
		assert_eq!(repo.count_open().await.unwrap(), 1);

		assert!(repo.close(&posting.id).await.unwrap());
		assert!(!repo.close(&posting.id).await.unwrap());

		let fetched = repo.find_by_id(&posting.id).await.unwrap().unwrap();
		assert_eq!(fetched.status, PostingStatus::Closed);
		assert_eq!(repo.count().await.unwrap(), 1);
		assert_eq!(repo.count_open().await.unwrap(), 0);
	}

	#[tokio::test]
	async fn test_delete_removes_row() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		let posting = make_posting(employer, "Short lived", 0);
		repo.insert(&posting).await.unwrap();

		assert!(repo.delete(&posting.id).await.unwrap());
		assert!(repo.find_by_id(&posting.id).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_search_returns_open_postings_newest_first() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		repo.insert(&make_posting(employer, "Oldest", 30))
			.await
			.unwrap();
		repo.insert(&make_posting(employer, "Middle", 20))
			.await
			.unwrap();
		repo.insert(&make_posting(employer, "Newest", 10))
			.await
			.unwrap();

		let closed = make_posting(employer, "Closed role", 5);
		repo.insert(&closed).await.unwrap();
		repo.close(&closed.id).await.unwrap();

		let (page, total) = repo
			.search_open(&PostingSearchParams::default())
			.await
			.unwrap();
		assert_eq!(total, 3);
		let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
		assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
	}

	#[tokio::test]
	async fn test_search_matches_title_and_description() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		let mut a = make_posting(employer, "Rust engineer", 10);
		a.description = "Systems work.".to_string();
		repo.insert(&a).await.unwrap();

		let mut b = make_posting(employer, "Data analyst", 5);
		b.description = "Heavy use of Rust pipelines.".to_string();
		repo.insert(&b).await.unwrap();

		repo.insert(&make_posting(employer, "Accountant", 1))
			.await
			.unwrap();

		let params = PostingSearchParams {
			query: Some("rust".to_string()),
			..Default::default()
		};
		let (page, total) = repo.search_open(&params).await.unwrap();
		assert_eq!(total, 2);
		assert!(page.iter().all(|p| {
			p.title.to_lowercase().contains("rust")
				|| p.description.to_lowercase().contains("rust")
		}));
	}

	#[tokio::test]
	async fn test_search_paginates_with_total() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		for i in 0..5 {
			repo.insert(&make_posting(employer, &format!("Role {i}"), i))
				.await
				.unwrap();
		}

		let params = PostingSearchParams {
			limit: 2,
			offset: 2,
			..Default::default()
		};
		let (page, total) = repo.search_open(&params).await.unwrap();
		assert_eq!(page.len(), 2);
		assert_eq!(total, 5);
	}

	#[test]
	fn test_search_limit_is_clamped() {
		let params = PostingSearchParams {
			limit: 10_000,
			..Default::default()
		};
		assert_eq!(params.clamped_limit(), MAX_SEARCH_LIMIT);

		let params = PostingSearchParams::default();
		assert_eq!(params.clamped_limit(), 20);
	}

	#[tokio::test]
	async fn test_employer_listing_carries_application_counts() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let other_employer = seed_user(&pool, "employer").await;
		let applicant_a = seed_user(&pool, "employee").await;
		let applicant_b = seed_user(&pool, "employee").await;
		let repo = PostingRepository::new(pool.clone());

		let busy = make_posting(employer, "Popular role", 20);
		repo.insert(&busy).await.unwrap();
		let quiet = make_posting(employer, "Quiet role", 10);
		repo.insert(&quiet).await.unwrap();
		repo.insert(&make_posting(other_employer, "Unrelated", 5))
			.await
			.unwrap();

		let now = Utc::now().to_rfc3339();
		for applicant in [applicant_a, applicant_b] {
			sqlx::query(
				r#"
				INSERT INTO applications (id, posting_id, employee_id, cover_note, status, created_at, updated_at)
				VALUES (?, ?, ?, ?, 'submitted', ?, ?)
				"#,
			)
			.bind(Uuid::new_v4().to_string())
			.bind(busy.id.to_string())
			.bind(applicant.to_string())
			.bind("Interested.")
			.bind(&now)
			.bind(&now)
			.execute(&pool)
			.await
			.unwrap();
		}

		let listed = repo.list_for_employer(&employer).await.unwrap();
		assert_eq!(listed.len(), 2);
		// Newest first: quiet (10 min) before busy (20 min).
		assert_eq!(listed[0].0.title, "Quiet role");
		assert_eq!(listed[0].1, 0);
		assert_eq!(listed[1].0.title, "Popular role");
		assert_eq!(listed[1].1, 2);
	}

	#[tokio::test]
	async fn test_expiry_closes_only_past_deadlines() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool);

		let mut past = make_posting(employer, "Expired role", 30);
		past.closes_at = Some(Utc::now() - Duration::hours(1));
		repo.insert(&past).await.unwrap();

		let mut future = make_posting(employer, "Future deadline", 20);
		future.closes_at = Some(Utc::now() + Duration::hours(1));
		repo.insert(&future).await.unwrap();

		let open_ended = make_posting(employer, "No deadline", 10);
		repo.insert(&open_ended).await.unwrap();

		assert_eq!(repo.close_expired().await.unwrap(), 1);

		let fetched = repo.find_by_id(&past.id).await.unwrap().unwrap();
		assert_eq!(fetched.status, PostingStatus::Closed);
		let fetched = repo.find_by_id(&future.id).await.unwrap().unwrap();
		assert_eq!(fetched.status, PostingStatus::Open);
		let fetched = repo.find_by_id(&open_ended.id).await.unwrap().unwrap();
		assert_eq!(fetched.status, PostingStatus::Open);
	}

	#[tokio::test]
	async fn test_detail_includes_company_name_when_profiled() {
		let pool = memory_pool().await;
		let employer = seed_user(&pool, "employer").await;
		let repo = PostingRepository::new(pool.clone());

		let posting = make_posting(employer, "Named role", 0);
		repo.insert(&posting).await.unwrap();

		// Without a profile the join leaves the name empty.
		let detail = repo.find_detail(&posting.id).await.unwrap().unwrap();
		assert_eq!(detail.company_name, None);

		let now = Utc::now().to_rfc3339();
		sqlx::query(
			r#"
			INSERT INTO employer_profiles (user_id, company_name, about, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(employer.to_string())
		.bind("Nile Analytics")
		.bind("Data tooling.")
		.bind(&now)
		.bind(&now)
		.execute(&pool)
		.await
		.unwrap();

		let detail = repo.find_detail(&posting.id).await.unwrap().unwrap();
		assert_eq!(detail.company_name.as_deref(), Some("Nile Analytics"));
		assert_eq!(detail.posting.title, "Named role");
	}

	#[test]
	fn test_status_tags_roundtrip() {
		assert_eq!("open".parse::<PostingStatus>().unwrap(), PostingStatus::Open);
		assert_eq!(
			"remote".parse::<EmploymentKind>().unwrap(),
			EmploymentKind::Remote
		);
		assert!("freelance".parse::<EmploymentKind>().is_err());
		for kind in [
			EmploymentKind::FullTime,
			EmploymentKind::PartTime,
			EmploymentKind::Contract,
			EmploymentKind::Remote,
		] {
			assert_eq!(kind.as_str().parse::<EmploymentKind>().unwrap(), kind);
		}
	}
}
