// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the wazeefa server.
//!
//! Settings arrive from three places: built-in defaults, an optional
//! TOML file, and `WAZEEFA_SERVER_*` environment variables, each
//! expressed as a [`ConfigLayer`]. Higher-ranked layers merge over
//! lower ones field by field, and [`load`] folds the stack into a
//! concrete [`ServerConfig`].
//!
//! ```ignore
//! let config = wazeefa_server_config::load()?;
//! tracing::info!("binding {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, FileSource, SourceRank};

use tracing::{debug, info};

/// Every setting the server needs, with the layer stack applied.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub auth: AuthConfig,
	pub locale: LocaleConfig,
	pub routes: RoutesConfig,
	pub logging: LoggingConfig,
	pub jobs: JobsConfig,
}

impl ServerConfig {
	/// The `host:port` string the HTTP listener binds to.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Loads configuration from the standard sources.
///
/// Environment variables override the config file, which overrides the
/// built-in defaults. The file lives at `/etc/wazeefa/server.toml`
/// unless `WAZEEFA_SERVER_CONFIG` points elsewhere.
pub fn load() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(FileSource::system()),
		Box::new(EnvSource),
	])
}

/// Loads with an explicit config file path instead of the system one.
pub fn load_from_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(FileSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.rank());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "merging configuration source");
		merged.merge(source.load()?);
	}

	resolve(merged)
}

/// Resolves the merged layer stack into concrete section structs and
/// runs cross-field validation.
fn resolve(layer: ConfigLayer) -> Result<ServerConfig, ConfigError> {
	let config = ServerConfig {
		http: layer.http.unwrap_or_default().resolve(),
		database: layer.database.unwrap_or_default().resolve(),
		auth: layer.auth.unwrap_or_default().resolve(),
		locale: layer.locale.unwrap_or_default().resolve(),
		routes: layer.routes.unwrap_or_default().resolve(),
		logging: layer.logging.unwrap_or_default().resolve(),
		jobs: layer.jobs.unwrap_or_default().resolve(),
	};

	validate(&config.auth)?;

	info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		default_locale = %config.locale.default_locale,
		route_rules = config.routes.rules.len(),
		signups_disabled = config.auth.signups_disabled,
		"configuration resolved"
	);

	Ok(config)
}

fn validate(auth: &AuthConfig) -> Result<(), ConfigError> {
	if auth.dev_mode && auth.environment == "production" {
		return Err(ConfigError::Validation(
			"dev mode cannot be enabled in production: unset WAZEEFA_SERVER_AUTH_DEV_MODE \
			 or point WAZEEFA_SERVER_ENV at a non-production environment"
				.to_string(),
		));
	}

	if auth.session_ttl_hours <= 0 {
		return Err(ConfigError::Validation(format!(
			"session_ttl_hours must be positive, got {}",
			auth.session_ttl_hours
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dev_mode_refused_in_production() {
		let auth = AuthConfig {
			dev_mode: true,
			environment: "production".to_string(),
			..Default::default()
		};
		let err = validate(&auth).unwrap_err();
		assert!(err.to_string().contains("dev mode"));
	}

	#[test]
	fn dev_mode_fine_outside_production() {
		let auth = AuthConfig {
			dev_mode: true,
			environment: "development".to_string(),
			..Default::default()
		};
		assert!(validate(&auth).is_ok());
	}

	#[test]
	fn non_positive_session_ttl_refused() {
		let auth = AuthConfig {
			session_ttl_hours: 0,
			..Default::default()
		};
		assert!(validate(&auth).is_err());

		let auth = AuthConfig {
			session_ttl_hours: -4,
			..Default::default()
		};
		assert!(validate(&auth).is_err());
	}

	#[test]
	fn socket_addr_joins_host_and_port() {
		let config = ServerConfig {
			http: HttpConfig {
				host: "10.1.2.3".to_string(),
				port: 3200,
				base_url: "http://jobs.wazeefa.example".to_string(),
			},
			..Default::default()
		};
		assert_eq!(config.socket_addr(), "10.1.2.3:3200");
	}

	#[test]
	fn empty_layer_resolves_to_defaults() {
		let config = resolve(ConfigLayer::default()).unwrap();
		assert_eq!(config.http.port, 8080);
		assert_eq!(config.database.url, "sqlite:./wazeefa.db");
		assert_eq!(config.locale.default_locale, "en");
		assert!(config.routes.rules.is_empty());
		assert_eq!(config.auth.session_ttl_hours, 720);
	}

	#[test]
	fn file_layer_overrides_defaults() {
		use std::io::Write;

		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			"[http]\nport = 9291\n\n[auth]\nsession_ttl_hours = 48\n"
		)
		.unwrap();

		let config = load_from_file(file.path()).unwrap();
		assert_eq!(config.http.port, 9291);
		assert_eq!(config.auth.session_ttl_hours, 48);
		assert_eq!(config.database.url, "sqlite:./wazeefa.db");
	}
}
