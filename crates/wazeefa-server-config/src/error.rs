// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse {path} as TOML")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	#[error("configuration validation failed: {0}")]
	Validation(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_value_names_the_key() {
		let err = ConfigError::InvalidValue {
			key: "WAZEEFA_SERVER_PORT".to_string(),
			message: "invalid u16 value 'many'".to_string(),
		};
		let msg = err.to_string();
		assert!(msg.contains("WAZEEFA_SERVER_PORT"));
		assert!(msg.contains("many"));
	}

	#[test]
	fn file_read_keeps_io_source() {
		let err = ConfigError::FileRead {
			path: PathBuf::from("/etc/wazeefa/server.toml"),
			source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
		};
		assert!(std::error::Error::source(&err).is_some());
	}
}
