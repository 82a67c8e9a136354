// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-context locale state with a persisted preference.
//!
//! `LocaleState` owns the active language for one user context (a request,
//! a browser session) and writes language changes through a
//! [`PreferenceStore`]. Persistence is best-effort: a failed write is
//! logged and the in-memory switch stands for the rest of the session.

use std::sync::Mutex;

use crate::catalog::{interpolate, t};
use crate::locale::{Direction, Locale};

/// Error from a preference store write.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
	#[error("preference store error: {0}")]
	Store(String),
}

/// A durable small-value store remembering one locale code across visits.
///
/// Implementations include a cookie jar for anonymous visitors and the
/// user row for signed-in ones. `save` is fire-and-forget from the
/// caller's point of view.
pub trait PreferenceStore: Send + Sync {
	/// Read the persisted locale code, if any.
	fn load(&self) -> Option<String>;

	/// Persist a locale code.
	fn save(&self, code: &str) -> Result<(), PreferenceError>;
}

/// In-memory store, used in tests and as a default for ephemeral contexts.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
	value: Mutex<Option<String>>,
	fail_saves: bool,
}

impl MemoryPreferenceStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store seeded with an existing preference.
	pub fn with_value(code: impl Into<String>) -> Self {
		Self {
			value: Mutex::new(Some(code.into())),
			fail_saves: false,
		}
	}

	/// A store whose writes always fail, for exercising best-effort
	/// persistence.
	pub fn failing() -> Self {
		Self {
			value: Mutex::new(None),
			fail_saves: true,
		}
	}
}

impl PreferenceStore for MemoryPreferenceStore {
	fn load(&self) -> Option<String> {
		self.value.lock().ok().and_then(|v| v.clone())
	}

	fn save(&self, code: &str) -> Result<(), PreferenceError> {
		if self.fail_saves {
			return Err(PreferenceError::Store("store unavailable".to_string()));
		}
		match self.value.lock() {
			Ok(mut slot) => {
				*slot = Some(code.to_string());
				Ok(())
			}
			Err(_) => Err(PreferenceError::Store("preference lock poisoned".to_string())),
		}
	}
}

/// The active display language and its derived direction.
///
/// Exactly two configurations are reachable: English/LTR and Arabic/RTL.
/// `set_language` and `toggle_language` are the only transitions.
pub struct LocaleState {
	language: Locale,
	store: Box<dyn PreferenceStore>,
}

impl LocaleState {
	/// Create state from the persisted preference, defaulting to English
	/// when the preference is missing or invalid.
	pub fn new(store: Box<dyn PreferenceStore>) -> Self {
		let language = store
			.load()
			.as_deref()
			.and_then(Locale::parse)
			.unwrap_or_default();
		Self { language, store }
	}

	pub fn language(&self) -> Locale {
		self.language
	}

	pub fn direction(&self) -> Direction {
		self.language.direction()
	}

	/// Switch to `code` if it names a supported locale and persist the
	/// choice. Unsupported codes leave the state unchanged.
	///
	/// Returns `true` when the code was accepted.
	pub fn set_language(&mut self, code: &str) -> bool {
		let Some(locale) = Locale::parse(code) else {
			tracing::debug!(code, "ignoring unsupported locale");
			return false;
		};
		self.language = locale;
		if let Err(e) = self.store.save(locale.code()) {
			// Best-effort: the in-memory switch stands.
			tracing::warn!(error = %e, locale = locale.code(), "failed to persist locale preference");
		}
		true
	}

	/// Flip between the two supported languages.
	pub fn toggle_language(&mut self) -> Locale {
		let next = self.language.toggled();
		self.set_language(next.code());
		self.language
	}

	/// Resolve a translation key against the active language.
	pub fn resolve(&self, key: &str) -> String {
		t(self.language.code(), key)
	}

	/// Resolve a translation key and substitute `{{name}}` placeholders.
	pub fn resolve_with(&self, key: &str, params: &[(&str, &str)]) -> String {
		interpolate(&self.resolve(key), params)
	}
}

impl std::fmt::Debug for LocaleState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LocaleState")
			.field("language", &self.language)
			.finish_non_exhaustive()
	}
}
