// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Version information for the server binary.

/// Crate version as compiled into the binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Formats the version banner printed by the `version` subcommand.
pub fn format_version_info() -> String {
	format!("wazeefa-server {VERSION}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_version_info_contains_crate_version() {
		let info = format_version_info();
		assert!(info.starts_with("wazeefa-server "));
		assert!(info.contains(VERSION));
	}
}
