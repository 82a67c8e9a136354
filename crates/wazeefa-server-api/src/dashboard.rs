// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Portal-wide counts for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AdminDashboard {
	pub total_users: i64,
	pub total_postings: i64,
	pub total_applications: i64,
}

/// The employer's workload summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EmployerDashboard {
	pub postings: i64,
	pub pending_applications: i64,
	pub unread_messages: i64,
}

/// The employee's activity summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EmployeeDashboard {
	pub applications: i64,
	pub unread_messages: i64,
}

/// Role-scoped dashboard payload. Exactly one section is present for a
/// recognized role; all three are absent when the stored role is
/// outside the known set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DashboardResponse {
	/// The caller's recognized role tag, absent when unrecognized.
	pub role: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub admin: Option<AdminDashboard>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employer: Option<EmployerDashboard>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employee: Option<EmployeeDashboard>,
}

/// Error response for dashboard operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DashboardErrorResponse {
	pub error: String,
	pub message: String,
}
