// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listener address and external base URL.

use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Resolved HTTP listener settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
	/// Externally visible base URL, used when building absolute links.
	pub base_url: String,
}

impl Default for HttpConfig {
	fn default() -> Self {
		HttpConfigLayer::default().resolve()
	}
}

/// HTTP overrides collected from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfigLayer {
	pub host: Option<String>,
	pub port: Option<u16>,
	pub base_url: Option<String>,
}

impl HttpConfigLayer {
	pub fn merge(&mut self, other: Self) {
		self.host = other.host.or(self.host.take());
		self.port = other.port.or(self.port.take());
		self.base_url = other.base_url.or(self.base_url.take());
	}

	pub fn resolve(self) -> HttpConfig {
		let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
		let port = self.port.unwrap_or(DEFAULT_PORT);
		let base_url = self
			.base_url
			.unwrap_or_else(|| format!("http://localhost:{port}"));
		HttpConfig {
			host,
			port,
			base_url,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_layer_resolves_to_loopback() {
		let config = HttpConfigLayer::default().resolve();
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 8080);
		assert_eq!(config.base_url, "http://localhost:8080");
	}

	#[test]
	fn derived_base_url_follows_the_port() {
		let config = HttpConfigLayer {
			port: Some(3900),
			..Default::default()
		}
		.resolve();
		assert_eq!(config.base_url, "http://localhost:3900");
	}

	#[test]
	fn explicit_base_url_is_left_alone() {
		let config = HttpConfigLayer {
			port: Some(3900),
			base_url: Some("https://jobs.wazeefa.example".to_string()),
			..Default::default()
		}
		.resolve();
		assert_eq!(config.base_url, "https://jobs.wazeefa.example");
	}

	#[test]
	fn merge_replaces_only_set_fields() {
		let mut base = HttpConfigLayer {
			host: Some("0.0.0.0".to_string()),
			port: Some(80),
			base_url: None,
		};
		base.merge(HttpConfigLayer {
			host: None,
			port: Some(8443),
			base_url: Some("https://wazeefa.example".to_string()),
		});
		assert_eq!(base.host.as_deref(), Some("0.0.0.0"));
		assert_eq!(base.port, Some(8443));
		assert_eq!(base.base_url.as_deref(), Some("https://wazeefa.example"));
	}
}
