// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wazeefa_server_auth::{role_home, User};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterRequest {
	pub display_name: String,
	pub email: String,
	pub password: String,
	/// Requested role: `employer` or `employee`. Admin accounts are not
	/// self-registrable.
	pub role: String,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

/// The signed-in user in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthUserResponse {
	pub id: String,
	pub display_name: String,
	pub email: String,
	/// Recognized role tag, absent for accounts whose stored role is
	/// outside the known set.
	pub role: Option<String>,
	/// Where this user lands after login; `/` when the role is absent.
	pub home_path: String,
	pub locale: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl From<User> for AuthUserResponse {
	fn from(user: User) -> Self {
		Self {
			id: user.id.to_string(),
			display_name: user.display_name,
			email: user.email,
			role: user.role.map(|r| r.as_str().to_string()),
			home_path: role_home(user.role).to_string(),
			locale: user.locale,
			created_at: user.created_at,
		}
	}
}

/// Response for a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginResponse {
	pub message: String,
	pub user: AuthUserResponse,
}

/// Response for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MeResponse {
	pub authenticated: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<AuthUserResponse>,
}

/// Bare acknowledgement for auth endpoints with nothing else to return,
/// such as logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthSuccessResponse {
	pub message: String,
}

/// Error payload produced by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthErrorResponse {
	pub error: String,
	pub message: String,
}
