// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use wazeefa_common_i18n::{available_locales, Locale};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A supported locale in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableLocaleResponse {
	pub code: String,
	pub english_name: String,
	pub native_name: String,
	pub direction: String,
}

/// The active locale plus the full supported set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LocaleResponse {
	pub locale: String,
	pub direction: String,
	pub available: Vec<AvailableLocaleResponse>,
}

impl From<Locale> for LocaleResponse {
	fn from(locale: Locale) -> Self {
		Self {
			locale: locale.code().to_string(),
			direction: locale.direction().as_str().to_string(),
			available: available_locales()
				.iter()
				.map(|info| AvailableLocaleResponse {
					code: info.code.to_string(),
					english_name: info.english_name.to_string(),
					native_name: info.native_name.to_string(),
					direction: info.direction.as_str().to_string(),
				})
				.collect(),
		}
	}
}

/// Request to set the preferred language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SetLocaleRequest {
	pub locale: String,
}

/// Response after setting or toggling the language.
///
/// `changed` is `false` when the requested code is unsupported and the
/// active locale was left alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SetLocaleResponse {
	pub locale: String,
	pub direction: String,
	pub changed: bool,
}

