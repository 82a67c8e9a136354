// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bilingual string catalogs for the job portal.
//!
//! Two locales are compiled in: English (`en`, left-to-right) and
//! Arabic (`ar`, right-to-left). Each catalog is a nested JSON document
//! embedded at build time and addressed through dotted keys, so
//! `auth.login_failed` names one string per language.
//!
//! Lookups are total. A key missing from the catalog comes back
//! verbatim, leaving a visible `auth.login_failed` in the UI instead of
//! a blank or an error, and [`t_fmt`] keeps any `{{name}}` placeholder
//! it was given no value for. Keys group by surface: `common.` for
//! shared chrome, `auth.` for login and registration, `api.` for
//! generic error bodies, and `posting.` / `application.` / `message.` /
//! `profile.` for feature responses.
//!
//! ```
//! use wazeefa_common_i18n::{is_rtl, t, t_fmt};
//!
//! assert_eq!(t("en", "common.app_name"), "Wazeefa");
//! assert_eq!(t_fmt("en", "greeting.hello", &[("name", "Sara")]), "Hello, Sara!");
//! let dir = if is_rtl("ar") { "rtl" } else { "ltr" };
//! assert_eq!(dir, "rtl");
//! ```

mod catalog;
mod locale;
mod resolve;
mod state;

pub use catalog::{interpolate, t, t_fmt};
pub use locale::{
	available_locales, is_rtl, is_supported, locale_info, Direction, Locale, LocaleInfo,
	DEFAULT_LOCALE, LOCALES,
};
pub use resolve::resolve_locale;
pub use state::{LocaleState, MemoryPreferenceStore, PreferenceError, PreferenceStore};
