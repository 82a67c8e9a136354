// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Prefix-based route access control.
//!
//! This module provides:
//! - [`RouteTable`] - ordered (prefix, requirement) rules, longest prefix wins
//! - [`AccessDecision`] - the three possible outcomes of a guard check
//! - [`role_home`] - the canonical landing path for a role
//!
//! The guard is a pure function: same path and visitor always produce the
//! same decision, and there is no error channel. It never touches locale,
//! sessions storage, or the clock. Callers translate decisions into HTTP
//! responses; the table itself performs no navigation.

use serde::Serialize;

use crate::types::Role;
use crate::visitor::Visitor;

/// Landing path for visitors with no recognized role.
pub const GENERIC_HOME: &str = "/";

/// What a route prefix requires of its visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
	/// Anyone may view, signed in or not. Used to carve public pages out
	/// of an otherwise protected prefix.
	Public,

	/// Only visitors holding this role may view.
	Role(Role),
}

/// Outcome of a guard check. Exactly one of these is produced per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
	/// Serve the requested path.
	Allow,

	/// Send the visitor to the login page; `next` is the originally
	/// requested path so they can be returned there after signing in.
	RedirectToLogin { next: String },

	/// Send the visitor to their own role's landing page.
	RedirectToRoleHome { home: &'static str },
}

impl AccessDecision {
	/// Returns true if the request should be served.
	pub fn is_allow(&self) -> bool {
		matches!(self, Self::Allow)
	}
}

/// The landing path for a visitor's role.
///
/// A signed-in visitor whose stored role is outside the closed set has no
/// role-specific area; they land on [`GENERIC_HOME`]. This is the single
/// fallback used everywhere a role maps to a destination.
pub fn role_home(role: Option<Role>) -> &'static str {
	match role {
		Some(role) => role.home_path(),
		None => GENERIC_HOME,
	}
}

/// An ordered route-access table.
///
/// Built once at startup and shared immutably. Rules are matched by
/// longest path-prefix; matching is segment-aware, so `/admin` covers
/// `/admin` and `/admin/users` but not `/administrator`. Paths matching
/// no rule are public.
#[derive(Debug, Clone)]
pub struct RouteTable {
	/// Sorted longest-prefix-first so the first match wins.
	rules: Vec<(String, RouteAccess)>,
}

impl RouteTable {
	/// Builds a table from (prefix, requirement) rules.
	///
	/// Prefixes are normalized (leading slash added, trailing slashes
	/// stripped) and sorted by descending length. When the same prefix is
	/// registered twice the first registration wins.
	pub fn new(rules: impl IntoIterator<Item = (String, RouteAccess)>) -> Self {
		let mut seen = std::collections::HashSet::new();
		let mut rules: Vec<(String, RouteAccess)> = rules
			.into_iter()
			.map(|(prefix, access)| (normalize_prefix(&prefix), access))
			.filter(|(prefix, _)| seen.insert(prefix.clone()))
			.collect();

		rules.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

		Self { rules }
	}

	/// The stock portal table: one protected area per role.
	pub fn defaults() -> Self {
		Self::new([
			("/admin".to_string(), RouteAccess::Role(Role::Admin)),
			("/employer".to_string(), RouteAccess::Role(Role::Employer)),
			("/employee".to_string(), RouteAccess::Role(Role::Employee)),
		])
	}

	/// Number of rules in the table.
	pub fn len(&self) -> usize {
		self.rules.len()
	}

	/// Returns true if the table has no rules (everything is public).
	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// The rules in match order (longest prefix first).
	pub fn rules(&self) -> impl Iterator<Item = (&str, RouteAccess)> {
		self.rules.iter().map(|(p, a)| (p.as_str(), *a))
	}

	/// The requirement governing `path`, if any rule covers it.
	pub fn requirement_for(&self, path: &str) -> Option<RouteAccess> {
		let path = strip_query(path);
		self.rules
			.iter()
			.find(|(prefix, _)| prefix_covers(prefix, path))
			.map(|(_, access)| *access)
	}

	/// Decides whether `visitor` may view `path`.
	///
	/// The contract, in order:
	/// 1. No rule covers the path → [`AccessDecision::Allow`].
	/// 2. The covering rule is [`RouteAccess::Public`] → `Allow`.
	/// 3. The rule requires a role and the visitor is anonymous →
	///    [`AccessDecision::RedirectToLogin`] carrying the original path.
	/// 4. The visitor is signed in with exactly the required role → `Allow`.
	/// 5. Otherwise → [`AccessDecision::RedirectToRoleHome`] targeting the
	///    *visitor's* home, which is [`GENERIC_HOME`] when their role is
	///    unrecognized. A recognizable-but-wrong role and an unrecognizable
	///    role both land here; neither is ever allowed through.
	pub fn evaluate(&self, path: &str, visitor: &Visitor) -> AccessDecision {
		let required = match self.requirement_for(path) {
			None | Some(RouteAccess::Public) => return AccessDecision::Allow,
			Some(RouteAccess::Role(role)) => role,
		};

		match visitor {
			Visitor::Anonymous => AccessDecision::RedirectToLogin {
				next: path.to_string(),
			},
			Visitor::SignedIn { role, .. } => {
				if *role == Some(required) {
					AccessDecision::Allow
				} else {
					AccessDecision::RedirectToRoleHome {
						home: role_home(*role),
					}
				}
			}
		}
	}
}

impl Default for RouteTable {
	fn default() -> Self {
		Self::defaults()
	}
}

/// Normalizes a rule prefix: leading slash, no trailing slashes.
fn normalize_prefix(prefix: &str) -> String {
	let trimmed = prefix.trim().trim_end_matches('/');
	if trimmed.is_empty() {
		return "/".to_string();
	}
	if trimmed.starts_with('/') {
		trimmed.to_string()
	} else {
		format!("/{trimmed}")
	}
}

/// Drops any query string or fragment before prefix matching.
fn strip_query(path: &str) -> &str {
	path.split(['?', '#']).next().unwrap_or(path)
}

/// Segment-aware prefix test: the rule `/admin` covers `/admin` and
/// `/admin/users` but not `/administrator`.
fn prefix_covers(prefix: &str, path: &str) -> bool {
	if prefix == "/" {
		return true;
	}
	match path.strip_prefix(prefix) {
		Some(rest) => rest.is_empty() || rest.starts_with('/'),
		None => false,
	}
}
