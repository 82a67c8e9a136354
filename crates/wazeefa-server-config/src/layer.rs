// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration: one layer per source, merged in precedence order.

use serde::Deserialize;

use crate::sections::{
	AuthConfigLayer, DatabaseConfigLayer, HttpConfigLayer, JobsConfigLayer, LocaleConfigLayer,
	LoggingConfigLayer, RoutesConfigLayer,
};

/// A partial server configuration from a single source.
///
/// Every section is optional so a source can set only what it knows
/// about. Merging is field-wise: a later layer's `Some` wins, its `None`
/// leaves the earlier value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub auth: Option<AuthConfigLayer>,
	#[serde(default)]
	pub locale: Option<LocaleConfigLayer>,
	#[serde(default)]
	pub routes: Option<RoutesConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub jobs: Option<JobsConfigLayer>,
}

impl ConfigLayer {
	/// Merge `other` over this layer. `other` has higher precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_section(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.auth, other.auth, AuthConfigLayer::merge);
		merge_section(&mut self.locale, other.locale, LocaleConfigLayer::merge);
		merge_section(&mut self.routes, other.routes, RoutesConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_section(&mut self.jobs, other.jobs, JobsConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(base), Some(other)) => merge(base, other),
		(None, Some(other)) => *base = Some(other),
		_ => {}
	}
}
