// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where configuration comes from: baked-in defaults, an optional TOML
//! file, and `WAZEEFA_SERVER_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::sections::{
	AuthConfigLayer, DatabaseConfigLayer, HttpConfigLayer, JobsConfigLayer, LocaleConfigLayer,
	LogFormat, LoggingConfigLayer, RoutesConfigLayer,
};

/// Ordering of sources; a higher value overrides a lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceRank {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// One place configuration can come from.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn rank(&self) -> SourceRank;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// The lowest layer: an empty layer, so every section resolves to its
/// built-in default.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn rank(&self) -> SourceRank {
		SourceRank::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(ConfigLayer::default())
	}
}

/// A TOML file. Absent files are fine; malformed ones are not.
pub struct FileSource {
	path: PathBuf,
}

impl FileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// The standard deployment location, overridable through the
	/// `WAZEEFA_SERVER_CONFIG` environment variable.
	pub fn system() -> Self {
		match env_var("WAZEEFA_SERVER_CONFIG") {
			Some(path) => Self::new(path),
			None => Self::new("/etc/wazeefa/server.toml"),
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		"config-file"
	}

	fn rank(&self) -> SourceRank {
		SourceRank::ConfigFile
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let content = match std::fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				debug!(path = %self.path.display(), "no config file, continuing without one");
				return Ok(ConfigLayer::default());
			}
			Err(e) => {
				return Err(ConfigError::FileRead {
					path: self.path.clone(),
					source: e,
				});
			}
		};

		let layer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		debug!(path = %self.path.display(), "config file loaded");
		Ok(layer)
	}
}

/// `WAZEEFA_SERVER_*` environment variables, one group per section.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn rank(&self) -> SourceRank {
		SourceRank::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(ConfigLayer {
			http: Some(http_env_layer()?),
			database: Some(database_env_layer()?),
			auth: Some(auth_env_layer()?),
			locale: Some(locale_env_layer()),
			routes: Some(routes_env_layer()),
			logging: Some(logging_env_layer()),
			jobs: Some(jobs_env_layer()?),
		})
	}
}

/// A set-and-nonempty environment variable. Empty strings count as
/// unset so `FOO= wazeefa-server` does not shadow lower layers with a
/// blank value.
fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_flag(name: &str) -> Option<bool> {
	env_var(name).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Parses an environment variable into any `FromStr` type, naming the
/// offending variable when the value does not parse.
fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
	let Some(raw) = env_var(name) else {
		return Ok(None);
	};
	raw.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
		key: name.to_string(),
		message: format!("cannot parse '{raw}' as {}", std::any::type_name::<T>()),
	})
}

fn http_env_layer() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("WAZEEFA_SERVER_HOST"),
		port: env_parse("WAZEEFA_SERVER_PORT")?,
		base_url: env_var("WAZEEFA_SERVER_BASE_URL"),
	})
}

fn database_env_layer() -> Result<DatabaseConfigLayer, ConfigError> {
	Ok(DatabaseConfigLayer {
		url: env_var("WAZEEFA_SERVER_DATABASE_URL"),
		max_connections: env_parse("WAZEEFA_SERVER_DATABASE_MAX_CONNECTIONS")?,
	})
}

fn auth_env_layer() -> Result<AuthConfigLayer, ConfigError> {
	Ok(AuthConfigLayer {
		dev_mode: env_flag("WAZEEFA_SERVER_AUTH_DEV_MODE"),
		environment: env_var("WAZEEFA_SERVER_ENV"),
		session_ttl_hours: env_parse("WAZEEFA_SERVER_SESSION_TTL_HOURS")?,
		signups_disabled: env_flag("WAZEEFA_SERVER_SIGNUPS_DISABLED"),
	})
}

fn locale_env_layer() -> LocaleConfigLayer {
	LocaleConfigLayer {
		default_locale: env_var("WAZEEFA_SERVER_DEFAULT_LOCALE"),
	}
}

/// Route rules from the environment arrive as a JSON array:
/// `[{"prefix":"/admin","role":"admin"}]`
fn routes_env_layer() -> RoutesConfigLayer {
	let rules = env_var("WAZEEFA_SERVER_ROUTE_RULES").and_then(|json| {
		match serde_json::from_str(&json) {
			Ok(rules) => Some(rules),
			Err(e) => {
				warn!(error = %e, "ignoring unparseable WAZEEFA_SERVER_ROUTE_RULES");
				None
			}
		}
	});
	RoutesConfigLayer { rules }
}

fn logging_env_layer() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("WAZEEFA_SERVER_LOG_LEVEL"),
		format: env_var("WAZEEFA_SERVER_LOG_FORMAT").map(|v| {
			if v.eq_ignore_ascii_case("json") {
				LogFormat::Json
			} else {
				LogFormat::Pretty
			}
		}),
	}
}

fn jobs_env_layer() -> Result<JobsConfigLayer, ConfigError> {
	Ok(JobsConfigLayer {
		session_sweep_interval_secs: env_parse("WAZEEFA_SERVER_SESSION_SWEEP_INTERVAL_SECS")?,
		posting_expiry_interval_secs: env_parse("WAZEEFA_SERVER_POSTING_EXPIRY_INTERVAL_SECS")?,
	})
}
