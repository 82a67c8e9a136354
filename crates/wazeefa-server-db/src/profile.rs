// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-scoped profile repositories.
//!
//! One profile row per user, keyed by the user id with upsert semantics.
//! Employee skills are stored as a JSON array in a TEXT column.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use wazeefa_server_auth::UserId;

use crate::error::Result;
use crate::row::read_uuid;

/// A job seeker's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
	pub user_id: UserId,
	pub headline: String,
	pub bio: String,
	pub skills: Vec<String>,
	pub years_experience: Option<i64>,
	pub cv_summary: Option<String>,
}

/// An employer's public company profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerProfile {
	pub user_id: UserId,
	pub company_name: String,
	pub about: String,
	pub website: Option<String>,
}

#[derive(Clone)]
pub struct ProfileRepository {
	pool: SqlitePool,
}

impl ProfileRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, profile), fields(user_id = %profile.user_id))]
	pub async fn upsert_employee(&self, profile: &EmployeeProfile) -> Result<()> {
		let now = Utc::now().to_rfc3339();
		let skills_json = serde_json::to_string(&profile.skills)?;

		sqlx::query(
			r#"
			INSERT INTO employee_profiles (user_id, headline, bio, skills, years_experience, cv_summary, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?)
			ON CONFLICT(user_id) DO UPDATE SET
				headline = excluded.headline,
				bio = excluded.bio,
				skills = excluded.skills,
				years_experience = excluded.years_experience,
				cv_summary = excluded.cv_summary,
				updated_at = excluded.updated_at
			"#,
		)
		.bind(profile.user_id.to_string())
		.bind(&profile.headline)
		.bind(&profile.bio)
		.bind(&skills_json)
		.bind(profile.years_experience)
		.bind(profile.cv_summary.as_deref())
		.bind(&now)
		.bind(&now)
		.execute(&self.pool)
		.await?;

		tracing::debug!(user_id = %profile.user_id, "employee profile upserted");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn find_employee(&self, user_id: &UserId) -> Result<Option<EmployeeProfile>> {
		let row = sqlx::query(
			r#"
			SELECT user_id, headline, bio, skills, years_experience, cv_summary
			FROM employee_profiles
			WHERE user_id = ?
			"#,
		)
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_employee_profile(&r)).transpose()
	}

	#[tracing::instrument(skip(self, profile), fields(user_id = %profile.user_id))]
	pub async fn upsert_employer(&self, profile: &EmployerProfile) -> Result<()> {
		let now = Utc::now().to_rfc3339();

		sqlx::query(
			r#"
			INSERT INTO employer_profiles (user_id, company_name, about, website, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?)
			ON CONFLICT(user_id) DO UPDATE SET
				company_name = excluded.company_name,
				about = excluded.about,
				website = excluded.website,
				updated_at = excluded.updated_at
			"#,
		)
		.bind(profile.user_id.to_string())
		.bind(&profile.company_name)
		.bind(&profile.about)
		.bind(profile.website.as_deref())
		.bind(&now)
		.bind(&now)
		.execute(&self.pool)
		.await?;

		tracing::debug!(user_id = %profile.user_id, "employer profile upserted");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn find_employer(&self, user_id: &UserId) -> Result<Option<EmployerProfile>> {
		let row = sqlx::query(
			r#"
			SELECT user_id, company_name, about, website
			FROM employer_profiles
			WHERE user_id = ?
			"#,
		)
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_employer_profile(&r)).transpose()
	}
}

fn row_to_employee_profile(row: &sqlx::sqlite::SqliteRow) -> Result<EmployeeProfile> {
	let skills_json: String = row.get("skills");
	Ok(EmployeeProfile {
		user_id: UserId::new(read_uuid(row, "user_id")?),
		headline: row.get("headline"),
		bio: row.get("bio"),
		skills: serde_json::from_str(&skills_json)?,
		years_experience: row.get("years_experience"),
		cv_summary: row.get("cv_summary"),
	})
}

fn row_to_employer_profile(row: &sqlx::sqlite::SqliteRow) -> Result<EmployerProfile> {
	Ok(EmployerProfile {
		user_id: UserId::new(read_uuid(row, "user_id")?),
		company_name: row.get("company_name"),
		about: row.get("about"),
		website: row.get("website"),
	})
}
