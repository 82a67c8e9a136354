// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite location and pool sizing.

use serde::Deserialize;

/// Resolved database settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
	pub url: String,
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			url: "sqlite:./wazeefa.db".to_string(),
			max_connections: 5,
		}
	}
}

/// Database overrides collected from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfigLayer {
	pub url: Option<String>,
	pub max_connections: Option<u32>,
}

impl DatabaseConfigLayer {
	pub fn merge(&mut self, other: Self) {
		self.url = other.url.or(self.url.take());
		self.max_connections = other.max_connections.or(self.max_connections.take());
	}

	pub fn resolve(self) -> DatabaseConfig {
		let defaults = DatabaseConfig::default();
		DatabaseConfig {
			url: self.url.unwrap_or(defaults.url),
			max_connections: self.max_connections.unwrap_or(defaults.max_connections),
		}
	}
}
