// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier newtypes and the portal role set.
//!
//! Each entity kind carries its own UUID wrapper so a posting id cannot
//! drift into a parameter expecting a user id. The wrappers serialize
//! transparently as UUID strings. [`Role`] is a closed set: a tag
//! outside it parses to `None` and the caller chooses the fallback,
//! which keeps accounts with unrecognized roles signed in rather than
//! locked out.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
	($($(#[$meta:meta])* $name:ident),+ $(,)?) => {$(
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Wrap an existing UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Mint a fresh random id.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Unwrap to the bare UUID.
			pub fn into_inner(self) -> Uuid {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				self.0.fmt(f)
			}
		}
	)+};
}

entity_id! {
	/// A registered account of any role.
	UserId,
	/// A login session row.
	SessionId,
	/// A job posting.
	PostingId,
	/// A job seeker's application against one posting.
	ApplicationId,
	/// One message inside an application thread.
	MessageId,
}

/// The portal's closed role set.
///
/// Stored role tags outside this set decode to `None`; such accounts
/// stay signed in and land on the generic home instead of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Runs the portal: manages accounts, sees portal-wide stats.
	Admin,
	/// Publishes postings and reviews the applications they attract.
	Employer,
	/// Browses postings, applies, and messages employers.
	Employee,
}

impl Role {
	pub fn all() -> &'static [Role] {
		&[Role::Admin, Role::Employer, Role::Employee]
	}

	/// Decode a stored tag, `None` for anything outside the set.
	pub fn parse(tag: &str) -> Option<Self> {
		match tag {
			"admin" => Some(Role::Admin),
			"employer" => Some(Role::Employer),
			"employee" => Some(Role::Employee),
			_ => None,
		}
	}

	/// The tag stored in the database and sent over the wire.
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Admin => "admin",
			Role::Employer => "employer",
			Role::Employee => "employee",
		}
	}

	/// Where a signed-in account of this role lands after login.
	pub fn home_path(&self) -> &'static str {
		match self {
			Role::Admin => "/admin",
			Role::Employer => "/employer",
			Role::Employee => "/employee",
		}
	}

	/// Whether the signup form may create an account with this role.
	/// Admin accounts are seeded out of band.
	pub fn self_registrable(&self) -> bool {
		!matches!(self, Role::Admin)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
