// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Portal-wide default locale.

use serde::Deserialize;

/// Resolved locale settings.
///
/// The default locale is used for visitors with no stored preference.
/// An unsupported code here does not fail the load; effective-locale
/// resolution falls back to English at request time.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
	pub default_locale: String,
}

impl Default for LocaleConfig {
	fn default() -> Self {
		Self {
			default_locale: "en".to_string(),
		}
	}
}

/// Locale overrides collected from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleConfigLayer {
	pub default_locale: Option<String>,
}

impl LocaleConfigLayer {
	pub fn merge(&mut self, other: Self) {
		self.default_locale = other.default_locale.or(self.default_locale.take());
	}

	pub fn resolve(self) -> LocaleConfig {
		LocaleConfig {
			default_locale: self.default_locale.unwrap_or_else(|| "en".to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_layer_resolves_to_english() {
		let config = LocaleConfigLayer::default().resolve();
		assert_eq!(config.default_locale, "en");
	}

	#[test]
	fn arabic_default_passes_through() {
		let layer = LocaleConfigLayer {
			default_locale: Some("ar".to_string()),
		};
		assert_eq!(layer.resolve().default_locale, "ar");
	}
}
