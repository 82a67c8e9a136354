// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route protection rules.
//!
//! Rules are plain strings here; the server parses the role tags when it
//! builds its route table and warns about tags it does not recognize. An
//! empty rule list means "use the built-in table", not "everything is
//! public".

use serde::Deserialize;

/// One route protection rule.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRuleConfig {
	/// Path prefix the rule covers, e.g. `/admin`.
	pub prefix: String,
	/// Required role tag, e.g. `admin`, or `public` for a carve-out.
	pub role: String,
}

/// Resolved route protection rules.
#[derive(Debug, Clone, Default)]
pub struct RoutesConfig {
	pub rules: Vec<RouteRuleConfig>,
}

/// Route-rule overrides collected from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutesConfigLayer {
	pub rules: Option<Vec<RouteRuleConfig>>,
}

impl RoutesConfigLayer {
	pub fn merge(&mut self, other: Self) {
		// A rule list replaces wholesale; merging entries across sources
		// would make the effective table impossible to reason about.
		self.rules = other.rules.or(self.rules.take());
	}

	pub fn resolve(self) -> RoutesConfig {
		RoutesConfig {
			rules: self.rules.unwrap_or_default(),
		}
	}
}
