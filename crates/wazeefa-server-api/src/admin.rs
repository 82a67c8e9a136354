// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wazeefa_server_auth::User;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Admin view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AdminAccountResponse {
	pub id: String,
	pub display_name: String,
	pub email: String,
	/// Recognized role tag; `null` for accounts whose stored role is
	/// outside the known set and needs repair.
	pub role: Option<String>,
	pub locale: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	pub deleted_at: Option<DateTime<Utc>>,
}

impl From<User> for AdminAccountResponse {
	fn from(user: User) -> Self {
		Self {
			id: user.id.to_string(),
			display_name: user.display_name,
			email: user.email,
			role: user.role.map(|r| r.as_str().to_string()),
			locale: user.locale,
			created_at: user.created_at,
			updated_at: user.updated_at,
			deleted_at: user.deleted_at,
		}
	}
}

/// One page of users together with the overall count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserListResponse {
	pub users: Vec<AdminAccountResponse>,
	pub total: i64,
	pub limit: u32,
	pub offset: u32,
}

/// Paging controls for the user list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct UserListQuery {
	#[serde(default = "default_page_size")]
	pub limit: u32,
	#[serde(default)]
	pub offset: u32,
}

fn default_page_size() -> u32 {
	50
}

/// Body of a role-assignment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateRoleRequest {
	/// One of `admin`, `employer`, `employee`.
	pub role: String,
}

/// Portal-wide counters for `GET /api/admin/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PortalStatsResponse {
	pub total_users: i64,
	pub total_postings: i64,
	pub open_postings: i64,
	pub total_applications: i64,
}

/// Confirmation payload shared by the mutating admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AdminSuccessResponse {
	pub message: String,
}

/// Error payload shared by the admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AdminErrorResponse {
	pub error: String,
	pub message: String,
}
