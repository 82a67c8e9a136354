// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wazeefa_server_db::{Posting, PostingDetail};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// A job posting in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PostingResponse {
	pub id: String,
	pub employer_id: String,
	pub title: String,
	pub description: String,
	pub location: String,
	pub employment_kind: String,
	pub salary_min: Option<i64>,
	pub salary_max: Option<i64>,
	pub status: String,
	pub closes_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Posting> for PostingResponse {
	fn from(posting: Posting) -> Self {
		Self {
			id: posting.id.to_string(),
			employer_id: posting.employer_id.to_string(),
			title: posting.title,
			description: posting.description,
			location: posting.location,
			employment_kind: posting.employment_kind.as_str().to_string(),
			salary_min: posting.salary_min,
			salary_max: posting.salary_max,
			status: posting.status.as_str().to_string(),
			closes_at: posting.closes_at,
			created_at: posting.created_at,
			updated_at: posting.updated_at,
		}
	}
}

/// A posting with the employer's company name, for the detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PostingDetailResponse {
	#[serde(flatten)]
	pub posting: PostingResponse,
	pub company_name: Option<String>,
}

impl From<PostingDetail> for PostingDetailResponse {
	fn from(detail: PostingDetail) -> Self {
		Self {
			posting: detail.posting.into(),
			company_name: detail.company_name,
		}
	}
}

/// Query parameters for the public posting search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct SearchPostingsParams {
	/// Keyword matched against title and description.
	pub q: Option<String>,
	#[serde(default = "default_limit")]
	pub limit: u32,
	#[serde(default)]
	pub offset: u32,
}

fn default_limit() -> u32 {
	20
}

/// Paginated page of open postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListPostingsResponse {
	pub postings: Vec<PostingResponse>,
	pub total: i64,
	pub limit: u32,
	pub offset: u32,
}

/// A posting in the employer's own list, with its application count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EmployerPostingResponse {
	#[serde(flatten)]
	pub posting: PostingResponse,
	pub application_count: i64,
}

/// The employer's own postings, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListEmployerPostingsResponse {
	pub postings: Vec<EmployerPostingResponse>,
}

/// Request to create a posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatePostingRequest {
	pub title: String,
	pub description: String,
	pub location: String,
	/// One of `full_time`, `part_time`, `contract`, `remote`.
	pub employment_kind: String,
	pub salary_min: Option<i64>,
	pub salary_max: Option<i64>,
	pub closes_at: Option<DateTime<Utc>>,
}

/// Request to update a posting; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdatePostingRequest {
	pub title: Option<String>,
	pub description: Option<String>,
	pub location: Option<String>,
	pub employment_kind: Option<String>,
	pub salary_min: Option<i64>,
	pub salary_max: Option<i64>,
	pub closes_at: Option<DateTime<Utc>>,
}

/// Success response for posting operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PostingSuccessResponse {
	pub message: String,
}

/// Error response for posting operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PostingErrorResponse {
	pub error: String,
	pub message: String,
}
