// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supported locales and text direction.

use std::fmt;

/// Fallback locale when no valid preference is available.
pub const DEFAULT_LOCALE: &str = "en";

/// Which way a locale's script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	Ltr,
	Rtl,
}

impl Direction {
	/// The value used in HTML `dir` attributes and API payloads.
	pub fn as_str(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A supported display language.
///
/// The set is closed: English and Arabic. Anything else is rejected at
/// parse time rather than carried around as a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
	En,
	Ar,
}

impl Locale {
	/// Parse a locale code, tolerating case variants and region tags
	/// (`"en-US"`, `"ar_EG"`). Returns `None` for unsupported codes.
	pub fn parse(code: &str) -> Option<Self> {
		let base = code
			.split(['-', '_'])
			.next()
			.unwrap_or(code)
			.to_ascii_lowercase();
		match base.as_str() {
			"en" => Some(Locale::En),
			"ar" => Some(Locale::Ar),
			_ => None,
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			Locale::En => "en",
			Locale::Ar => "ar",
		}
	}

	/// Direction is a pure function of the locale; it is never stored
	/// or set independently.
	pub fn direction(&self) -> Direction {
		match self {
			Locale::En => Direction::Ltr,
			Locale::Ar => Direction::Rtl,
		}
	}

	/// The other member of the two-element locale set.
	pub fn toggled(&self) -> Self {
		match self {
			Locale::En => Locale::Ar,
			Locale::Ar => Locale::En,
		}
	}
}

impl Default for Locale {
	fn default() -> Self {
		Locale::En
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}

/// Metadata describing a supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
	pub code: &'static str,
	pub english_name: &'static str,
	pub native_name: &'static str,
	pub direction: Direction,
}

/// The closed set of portal locales.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		code: "en",
		english_name: "English",
		native_name: "English",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "ar",
		english_name: "Arabic",
		native_name: "العربية",
		direction: Direction::Rtl,
	},
];

/// Check whether a locale code is supported (exact code only, no
/// region-tag normalization).
pub fn is_supported(code: &str) -> bool {
	LOCALES.iter().any(|l| l.code == code)
}

/// Check whether a locale code renders right-to-left.
///
/// Unsupported codes are LTR; the caller is expected to have resolved
/// the locale first.
pub fn is_rtl(code: &str) -> bool {
	locale_info(code).map(|l| l.direction == Direction::Rtl).unwrap_or(false)
}

/// Look up metadata for a supported locale code.
pub fn locale_info(code: &str) -> Option<&'static LocaleInfo> {
	LOCALES.iter().find(|l| l.code == code)
}

/// List all supported locales.
pub fn available_locales() -> &'static [LocaleInfo] {
	LOCALES
}
