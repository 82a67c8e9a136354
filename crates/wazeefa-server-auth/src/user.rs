// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The account record and the checks run at registration time.
//!
//! Handlers validate with [`validate_email`], [`validate_password`], and
//! [`validate_display_name`] before touching the database, and store
//! emails through [`normalize_email`] so uniqueness holds regardless of
//! how the address was typed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Role, UserId};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest password accepted at registration. Argon2 input is
/// unbounded; the cap keeps request bodies sane.
pub const MAX_PASSWORD_LEN: usize = 128;

/// An account on the portal.
///
/// `display_name` and `email` identify a real person and stay out of log
/// lines. `password_hash` must never reach a serialized API response;
/// the handlers build wire types that omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,

	/// Name shown to other portal users.
	pub display_name: String,

	/// Login email, stored normalized (trimmed, lowercased).
	pub email: String,

	/// Portal role. `None` means the stored role tag was outside the
	/// closed set; such users land on the generic home until an admin
	/// repairs the account.
	pub role: Option<Role>,

	/// Argon2id digest of the password.
	pub password_hash: String,

	/// Preferred locale tag ("en" or "ar"), server default when absent.
	pub locale: Option<String>,

	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,

	/// Set when the account is soft-deleted. Repository lookups filter
	/// these rows out, so most code never sees one.
	pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
	/// Whether this account holds the given role.
	pub fn has_role(&self, role: Role) -> bool {
		self.role == Some(role)
	}
}

/// Normalize an email for storage and lookup: trim and lowercase.
///
/// Uniqueness is enforced on the normalized form so `Sara@Example.com`
/// and `sara@example.com` are the same account.
pub fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

/// Validate an email address.
/// Rules are deliberately loose (one `@` with non-empty sides, a dot in
/// the domain); deliverability is the mail system's problem.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
	let email = email.trim();
	if email.is_empty() {
		return Err("Email is required");
	}
	if email.len() > 254 {
		return Err("Email is too long");
	}
	let Some((local, domain)) = email.split_once('@') else {
		return Err("Email must contain @");
	};
	if local.is_empty() || domain.is_empty() {
		return Err("Email is missing a local part or domain");
	}
	if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
		return Err("Email domain is not valid");
	}
	if email.contains(char::is_whitespace) {
		return Err("Email cannot contain whitespace");
	}
	Ok(())
}

/// Validate a registration password.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
	if password.len() < MIN_PASSWORD_LEN {
		return Err("Password is too short");
	}
	if password.len() > MAX_PASSWORD_LEN {
		return Err("Password is too long");
	}
	Ok(())
}

/// Validate a display name.
pub fn validate_display_name(name: &str) -> Result<(), &'static str> {
	let name = name.trim();
	if name.is_empty() {
		return Err("Display name is required");
	}
	if name.chars().count() > 100 {
		return Err("Display name is too long");
	}
	Ok(())
}
