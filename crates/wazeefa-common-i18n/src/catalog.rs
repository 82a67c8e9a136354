// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation catalogs and key resolution.
//!
//! Catalogs are nested JSON documents embedded at compile time, one per
//! locale. Keys are dot-separated paths into the nesting; a key that does
//! not resolve to a string comes back verbatim so the UI renders the raw
//! key instead of a blank.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::locale::Locale;

static EN_CATALOG: Lazy<Value> = Lazy::new(|| load_catalog("en", include_str!("../locales/en.json")));
static AR_CATALOG: Lazy<Value> = Lazy::new(|| load_catalog("ar", include_str!("../locales/ar.json")));

fn load_catalog(code: &str, raw: &str) -> Value {
	match serde_json::from_str(raw) {
		Ok(value) => value,
		Err(e) => {
			// An unparseable embedded catalog degrades every lookup to
			// key-verbatim instead of failing the process.
			tracing::error!(locale = code, error = %e, "embedded locale catalog failed to parse");
			Value::Null
		}
	}
}

fn catalog(locale: Locale) -> &'static Value {
	match locale {
		Locale::En => &EN_CATALOG,
		Locale::Ar => &AR_CATALOG,
	}
}

/// Walk a dot-separated key through a nested catalog.
///
/// Returns `None` when any path segment is missing or the final value is
/// not textual.
pub(crate) fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
	let mut node = catalog(locale);
	for segment in key.split('.') {
		node = node.as_object()?.get(segment)?;
	}
	node.as_str()
}

/// Translate a key for a locale code.
///
/// An unknown key is returned verbatim; an unsupported locale code falls
/// back to the default locale. This function never fails.
///
/// # Example
///
/// ```
/// use wazeefa_common_i18n::t;
///
/// assert_eq!(t("en", "common.app_name"), "Wazeefa");
/// assert_eq!(t("ar", "common.app_name"), "وظيفة");
/// assert_eq!(t("en", "nonexistent.key"), "nonexistent.key");
/// ```
pub fn t(locale: &str, key: &str) -> String {
	let locale = Locale::parse(locale).unwrap_or_default();
	match lookup(locale, key) {
		Some(text) => text.to_string(),
		None => key.to_string(),
	}
}

/// Translate a key and substitute `{{name}}` placeholders.
///
/// Every occurrence of each supplied parameter is replaced; placeholders
/// without a supplied parameter are left untouched.
///
/// # Example
///
/// ```
/// use wazeefa_common_i18n::t_fmt;
///
/// let greeting = t_fmt("en", "greeting.hello", &[("name", "Sara")]);
/// assert_eq!(greeting, "Hello, Sara!");
/// ```
pub fn t_fmt(locale: &str, key: &str, params: &[(&str, &str)]) -> String {
	interpolate(&t(locale, key), params)
}

/// Replace `{{name}}` placeholders in a template.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
	let mut out = template.to_string();
	for (name, value) in params {
		let placeholder = format!("{{{{{name}}}}}");
		out = out.replace(&placeholder, value);
	}
	out
}
