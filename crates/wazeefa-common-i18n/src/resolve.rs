// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Effective-locale selection.

use crate::locale::{is_supported, DEFAULT_LOCALE};

/// Picks the locale a request should run under.
///
/// The user's stored preference wins when it names a supported locale;
/// otherwise the server's configured default is considered; otherwise
/// English. The result is always a supported code, so callers can index
/// translation tables without re-checking.
///
/// ```
/// use wazeefa_common_i18n::resolve_locale;
///
/// assert_eq!(resolve_locale(Some("ar"), "en"), "ar");
/// assert_eq!(resolve_locale(None, "ar"), "ar");
/// assert_eq!(resolve_locale(Some("nope"), "nope"), "en");
/// ```
pub fn resolve_locale(user_locale: Option<&str>, server_default: &str) -> &'static str {
	user_locale
		.filter(|candidate| is_supported(candidate))
		.or_else(|| is_supported(server_default).then_some(server_default))
		.map_or(DEFAULT_LOCALE, as_static)
}

// The supported set is closed, so the 'static spelling of a code can be
// recovered from any borrowed copy of it.
fn as_static(locale: &str) -> &'static str {
	match locale {
		"en" => "en",
		"ar" => "ar",
		_ => DEFAULT_LOCALE,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stored_preference_wins_over_default() {
		assert_eq!(resolve_locale(Some("ar"), "en"), "ar");
		assert_eq!(resolve_locale(Some("en"), "ar"), "en");
	}

	#[test]
	fn default_applies_without_a_preference() {
		assert_eq!(resolve_locale(None, "ar"), "ar");
		assert_eq!(resolve_locale(None, "en"), "en");
	}

	#[test]
	fn unsupported_preference_falls_through_to_default() {
		assert_eq!(resolve_locale(Some("fr"), "ar"), "ar");
		assert_eq!(resolve_locale(Some(""), "en"), "en");
	}

	#[test]
	fn english_is_the_last_resort() {
		assert_eq!(resolve_locale(Some("tlh"), "klingon"), "en");
		assert_eq!(resolve_locale(None, ""), "en");
	}

	#[test]
	fn region_tags_are_not_normalized_here() {
		// Exact stored codes only; normalization happens at parse time
		// in `Locale::parse`.
		assert_eq!(resolve_locale(Some("ar-SA"), "en"), "en");
	}
}
