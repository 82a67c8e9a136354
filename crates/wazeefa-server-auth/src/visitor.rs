// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The guard's view of a caller.
//!
//! A [`Visitor`] is produced once per request by the authentication
//! boundary and consumed by the route guard. It is deliberately tiny:
//! either nobody, or somebody with a parsed role. A session whose stored
//! role tag is outside the closed set becomes `SignedIn { role: None }`,
//! never an error and never a half-populated user.

use crate::types::Role;
use crate::user::User;

/// Who is making the request, as far as access control is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visitor {
	/// No valid session accompanied the request.
	Anonymous,

	/// A valid session was presented.
	SignedIn {
		/// The caller's role, if the stored tag parsed.
		role: Option<Role>,
		/// Display name, for greeting surfaces. Never used for decisions.
		name: Option<String>,
	},
}

impl Visitor {
	/// A signed-in visitor with the given role and display name.
	pub fn signed_in(role: Option<Role>, name: Option<String>) -> Self {
		Self::SignedIn { role, name }
	}

	/// The visitor a valid session for `user` produces.
	pub fn from_user(user: &User) -> Self {
		Self::SignedIn {
			role: user.role,
			name: Some(user.display_name.clone()),
		}
	}

	/// Returns true if no session was presented.
	pub fn is_anonymous(&self) -> bool {
		matches!(self, Self::Anonymous)
	}

	/// Returns true if a valid session was presented.
	pub fn is_signed_in(&self) -> bool {
		matches!(self, Self::SignedIn { .. })
	}

	/// The caller's role, if signed in with a recognized role.
	pub fn role(&self) -> Option<Role> {
		match self {
			Self::Anonymous => None,
			Self::SignedIn { role, .. } => *role,
		}
	}

	/// Returns true if the visitor holds `role`.
	pub fn has_role(&self, role: Role) -> bool {
		self.role() == Some(role)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use crate::types::UserId;

	fn make_test_user(role: Option<Role>) -> User {
		User {
			id: UserId::generate(),
			display_name: "Sara".to_string(),
			email: "sara@example.com".to_string(),
			role,
			password_hash: "$argon2id$stub".to_string(),
			locale: None,
			created_at: Utc::now(),
			updated_at: Utc::now(),
			deleted_at: None,
		}
	}

	#[test]
	fn anonymous_has_no_role() {
		let visitor = Visitor::Anonymous;
		assert!(visitor.is_anonymous());
		assert!(!visitor.is_signed_in());
		assert_eq!(visitor.role(), None);
		for role in Role::all() {
			assert!(!visitor.has_role(*role));
		}
	}

	#[test]
	fn from_user_carries_role_and_name() {
		let visitor = Visitor::from_user(&make_test_user(Some(Role::Employer)));
		assert!(visitor.is_signed_in());
		assert_eq!(visitor.role(), Some(Role::Employer));
		assert!(visitor.has_role(Role::Employer));
		assert!(!visitor.has_role(Role::Admin));
		assert_eq!(
			visitor,
			Visitor::signed_in(Some(Role::Employer), Some("Sara".to_string()))
		);
	}

	#[test]
	fn unrecognized_role_is_signed_in_without_role() {
		let visitor = Visitor::from_user(&make_test_user(None));
		assert!(visitor.is_signed_in());
		assert!(!visitor.is_anonymous());
		assert_eq!(visitor.role(), None);
		for role in Role::all() {
			assert!(!visitor.has_role(*role));
		}
	}
}
