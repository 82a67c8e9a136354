// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wazeefa_server_db::{Application, ApplicationWithApplicant, ApplicationWithPosting};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// An application in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ApplicationResponse {
	pub id: String,
	pub posting_id: String,
	pub employee_id: String,
	pub cover_note: String,
	pub status: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
	fn from(application: Application) -> Self {
		Self {
			id: application.id.to_string(),
			posting_id: application.posting_id.to_string(),
			employee_id: application.employee_id.to_string(),
			cover_note: application.cover_note,
			status: application.status.as_str().to_string(),
			created_at: application.created_at,
			updated_at: application.updated_at,
		}
	}
}

/// An application with its posting title, for the applicant's list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EmployeeApplicationResponse {
	#[serde(flatten)]
	pub application: ApplicationResponse,
	pub posting_title: String,
}

impl From<ApplicationWithPosting> for EmployeeApplicationResponse {
	fn from(row: ApplicationWithPosting) -> Self {
		Self {
			application: row.application.into(),
			posting_title: row.posting_title,
		}
	}
}

/// An application with the applicant's name, for the employer's review
/// list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PostingApplicationResponse {
	#[serde(flatten)]
	pub application: ApplicationResponse,
	pub applicant_name: String,
}

impl From<ApplicationWithApplicant> for PostingApplicationResponse {
	fn from(row: ApplicationWithApplicant) -> Self {
		Self {
			application: row.application.into(),
			applicant_name: row.applicant_name,
		}
	}
}

/// The applicant's own applications, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListEmployeeApplicationsResponse {
	pub applications: Vec<EmployeeApplicationResponse>,
}

/// Applications for one posting, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListPostingApplicationsResponse {
	pub applications: Vec<PostingApplicationResponse>,
}

/// Request to apply to a posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SubmitApplicationRequest {
	pub posting_id: String,
	pub cover_note: String,
}

/// Request to advance an application's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateApplicationStatusRequest {
	/// One of `under_review`, `accepted`, `rejected`.
	pub status: String,
}

/// Success response for application operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ApplicationSuccessResponse {
	pub message: String,
}

/// Error response for application operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ApplicationErrorResponse {
	pub error: String,
	pub message: String,
}
