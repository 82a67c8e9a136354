// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request validation helpers shared across route handlers.

use uuid::Uuid;

use wazeefa_server_auth::{ApplicationId, PostingId, Role, UserId};

/// Error details for ID parsing failures.
#[derive(Debug, Clone)]
pub struct IdParseError {
	pub error: String,
	pub message: String,
}

impl IdParseError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			error: "invalid_id".to_string(),
			message: message.into(),
		}
	}
}

/// Parse a user ID from a path parameter.
pub fn parse_user_id(id_str: &str, error_message: &str) -> Result<UserId, IdParseError> {
	Uuid::parse_str(id_str)
		.map(UserId::new)
		.map_err(|_| IdParseError::new(error_message))
}

/// Parse a posting ID from a path parameter.
pub fn parse_posting_id(id_str: &str, error_message: &str) -> Result<PostingId, IdParseError> {
	Uuid::parse_str(id_str)
		.map(PostingId::new)
		.map_err(|_| IdParseError::new(error_message))
}

/// Parse an application ID from a path parameter.
pub fn parse_application_id(
	id_str: &str,
	error_message: &str,
) -> Result<ApplicationId, IdParseError> {
	Uuid::parse_str(id_str)
		.map(ApplicationId::new)
		.map_err(|_| IdParseError::new(error_message))
}

/// Error details for role parsing failures.
#[derive(Debug, Clone)]
pub struct RoleParseError {
	pub error: String,
	pub message: String,
}

impl RoleParseError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			error: "invalid_role".to_string(),
			message: message.into(),
		}
	}
}

/// Parse a portal role tag, tolerating surrounding whitespace and case.
pub fn parse_portal_role(role_str: &str, error_message: &str) -> Result<Role, RoleParseError> {
	Role::parse(role_str.trim().to_lowercase().as_str())
		.ok_or_else(|| RoleParseError::new(error_message))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_user_id_valid() {
		let id = Uuid::new_v4();
		let parsed = parse_user_id(&id.to_string(), "bad id").unwrap();
		assert_eq!(parsed.into_inner(), id);
	}

	#[test]
	fn test_parse_user_id_invalid() {
		let err = parse_user_id("not-a-uuid", "bad id").unwrap_err();
		assert_eq!(err.error, "invalid_id");
		assert_eq!(err.message, "bad id");
	}

	#[test]
	fn test_parse_posting_id_invalid() {
		let err = parse_posting_id("", "bad posting id").unwrap_err();
		assert_eq!(err.message, "bad posting id");
	}

	#[test]
	fn test_parse_application_id_valid() {
		let id = Uuid::new_v4();
		let parsed = parse_application_id(&id.to_string(), "bad id").unwrap();
		assert_eq!(parsed.into_inner(), id);
	}

	#[test]
	fn test_parse_portal_role_accepts_known_tags() {
		assert_eq!(parse_portal_role("admin", "bad").unwrap(), Role::Admin);
		assert_eq!(parse_portal_role("employer", "bad").unwrap(), Role::Employer);
		assert_eq!(parse_portal_role("employee", "bad").unwrap(), Role::Employee);
	}

	#[test]
	fn test_parse_portal_role_is_case_insensitive() {
		assert_eq!(parse_portal_role(" Employer ", "bad").unwrap(), Role::Employer);
		assert_eq!(parse_portal_role("ADMIN", "bad").unwrap(), Role::Admin);
	}

	#[test]
	fn test_parse_portal_role_rejects_unknown() {
		let err = parse_portal_role("superstar", "unknown role").unwrap_err();
		assert_eq!(err.error, "invalid_role");
		assert_eq!(err.message, "unknown role");
	}
}
