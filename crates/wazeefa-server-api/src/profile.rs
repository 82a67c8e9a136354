// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use wazeefa_server_db::{EmployeeProfile, EmployerProfile};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// An employee's profile in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EmployeeProfileResponse {
	pub user_id: String,
	pub headline: String,
	pub bio: String,
	pub skills: Vec<String>,
	pub years_experience: Option<i64>,
	pub cv_summary: Option<String>,
}

impl From<EmployeeProfile> for EmployeeProfileResponse {
	fn from(profile: EmployeeProfile) -> Self {
		Self {
			user_id: profile.user_id.to_string(),
			headline: profile.headline,
			bio: profile.bio,
			skills: profile.skills,
			years_experience: profile.years_experience,
			cv_summary: profile.cv_summary,
		}
	}
}

/// An employer's profile in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EmployerProfileResponse {
	pub user_id: String,
	pub company_name: String,
	pub about: String,
	pub website: Option<String>,
}

impl From<EmployerProfile> for EmployerProfileResponse {
	fn from(profile: EmployerProfile) -> Self {
		Self {
			user_id: profile.user_id.to_string(),
			company_name: profile.company_name,
			about: profile.about,
			website: profile.website,
		}
	}
}

/// The caller's role-scoped profile. Exactly one side is present for a
/// recognized role; both are absent when no profile has been saved yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProfileResponse {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employee: Option<EmployeeProfileResponse>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employer: Option<EmployerProfileResponse>,
}

/// Request to create or replace the employee profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpsertEmployeeProfileRequest {
	pub headline: String,
	pub bio: String,
	#[serde(default)]
	pub skills: Vec<String>,
	pub years_experience: Option<i64>,
	pub cv_summary: Option<String>,
}

/// Request to create or replace the employer profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpsertEmployerProfileRequest {
	pub company_name: String,
	pub about: String,
	pub website: Option<String>,
}

/// Success response for profile operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProfileSuccessResponse {
	pub message: String,
}

/// Error response for profile operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProfileErrorResponse {
	pub error: String,
	pub message: String,
}
