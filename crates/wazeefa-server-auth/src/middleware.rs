// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session extraction and per-request authentication context.
//!
//! The middleware in the server crate leans on this module: it pulls a
//! session token out of the `Cookie` or `Authorization` header, resolves
//! it against the session store, and attaches the outcome to the request
//! as an [`AuthContext`] extension.
//!
//! Resolution always completes. A missing cookie, an expired session, or
//! a token that matches no row all come back as an unauthenticated
//! context rather than an error; route policy decides what that means
//! for the request.
//!
//! Tokens are hashed before any store lookup and never logged.

use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::session::DEFAULT_SESSION_TTL_HOURS;
use crate::types::{Role, SessionId};
use crate::user::User;
use crate::visitor::Visitor;

/// Cookie under which the browser carries the session token.
pub const SESSION_COOKIE_NAME: &str = "wazeefa_session";

/// A signed-in user attached to the current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
	/// The authenticated user row.
	pub user: User,
	/// Backing session, absent when dev mode injected the user.
	pub session_id: Option<SessionId>,
}

impl CurrentUser {
	/// A user authenticated by a stored session.
	pub fn session_backed(user: User, session_id: SessionId) -> Self {
		Self {
			user,
			session_id: Some(session_id),
		}
	}

	/// A user injected without credentials, as dev mode does.
	pub fn without_session(user: User) -> Self {
		Self {
			user,
			session_id: None,
		}
	}

	/// Whether a stored session backs this user.
	pub fn is_session_auth(&self) -> bool {
		self.session_id.is_some()
	}

	/// The user's parsed role, if recognized.
	pub fn role(&self) -> Option<Role> {
		self.user.role
	}

	/// The user's preferred locale, if set.
	pub fn locale(&self) -> Option<&str> {
		self.user.locale.as_deref()
	}

	/// Route policy's view of this user.
	pub fn visitor(&self) -> Visitor {
		Visitor::from_user(&self.user)
	}
}

/// What session resolution concluded about the current request.
///
/// Stored as a request extension so every layer past the middleware
/// reads the same answer. Holding a user and being authenticated are
/// the same thing here; there is no way to construct one without the
/// other.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	current_user: Option<CurrentUser>,
}

impl AuthContext {
	/// The anonymous context.
	pub fn unauthenticated() -> Self {
		Self::default()
	}

	/// A context carrying a resolved user.
	pub fn authenticated(current_user: CurrentUser) -> Self {
		Self {
			current_user: Some(current_user),
		}
	}

	pub fn is_authenticated(&self) -> bool {
		self.current_user.is_some()
	}

	/// The resolved user, when there is one.
	pub fn user(&self) -> Option<&CurrentUser> {
		self.current_user.as_ref()
	}

	/// Consumes the context, yielding the resolved user.
	pub fn into_user(self) -> Option<CurrentUser> {
		self.current_user
	}

	/// The resolved user, or [`AuthRequired`] for anonymous requests.
	pub fn require_user(&self) -> Result<&CurrentUser, AuthRequired> {
		self.current_user.as_ref().ok_or(AuthRequired)
	}

	/// Projects the context down to what route policy needs:
	/// [`Visitor::Anonymous`] when no session was presented, otherwise
	/// the user's parsed role and display name.
	pub fn visitor(&self) -> Visitor {
		match self.user() {
			Some(current) => current.visitor(),
			None => Visitor::Anonymous,
		}
	}
}

/// Rejection for handlers that insist on a signed-in caller.
#[derive(Debug, Clone, Copy, Error)]
#[error("authentication required")]
pub struct AuthRequired;

/// Tunables for the authentication middleware, resolved from server
/// configuration at startup.
#[derive(Debug, Clone)]
pub struct AuthOptions {
	/// Skip credential checks and run every request as the dev user.
	pub dev_mode: bool,
	/// Cookie the session token travels in.
	pub session_cookie_name: String,
	/// Lifetime of newly issued sessions, in hours.
	pub session_ttl_hours: i64,
	/// Refuse new registrations while still letting existing users in.
	pub signups_disabled: bool,
}

impl Default for AuthOptions {
	fn default() -> Self {
		Self {
			dev_mode: false,
			session_cookie_name: SESSION_COOKIE_NAME.to_string(),
			session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
			signups_disabled: false,
		}
	}
}

/// Finds the session token in the `Cookie` header under the default
/// cookie name.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
	find_cookie(headers, SESSION_COOKIE_NAME)
}

/// Finds the value of a cookie by name.
///
/// Splits the header on `;` and trims each pair before matching.
pub fn find_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	let cookies = headers.get(COOKIE)?.to_str().ok()?;
	cookies.split(';').find_map(|pair| {
		let (name, value) = pair.trim().split_once('=')?;
		(name == cookie_name).then(|| value.to_string())
	})
}

/// Pulls a bearer token out of the `Authorization` header.
///
/// Matches `Bearer <token>` with the scheme case-sensitive. API clients
/// present the same opaque session token a browser would carry in the
/// cookie.
#[instrument(level = "trace", skip_all)]
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
	headers
		.get(AUTHORIZATION)?
		.to_str()
		.ok()?
		.strip_prefix("Bearer ")
		.map(String::from)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use http::header::HeaderValue;

	use crate::types::UserId;

	fn user_with_role(name: &str, email: &str, role: Option<Role>) -> User {
		User {
			id: UserId::generate(),
			display_name: name.to_string(),
			email: email.to_string(),
			role,
			password_hash: "$argon2id$placeholder".to_string(),
			locale: Some("ar".to_string()),
			created_at: Utc::now(),
			updated_at: Utc::now(),
			deleted_at: None,
		}
	}

	fn cookie_headers(cookie_line: &'static str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(COOKIE, HeaderValue::from_static(cookie_line));
		headers
	}

	fn auth_headers(value: &'static str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
		headers
	}

	#[test]
	fn session_backed_user_records_its_session() {
		let sid = SessionId::generate();
		let current = CurrentUser::session_backed(
			user_with_role("Huda Kamal", "huda@example.net", Some(Role::Employee)),
			sid,
		);
		assert!(current.is_session_auth());
		assert_eq!(current.session_id, Some(sid));
	}

	#[test]
	fn dev_mode_user_has_no_session() {
		let current = CurrentUser::without_session(user_with_role(
			"Huda Kamal",
			"huda@example.net",
			Some(Role::Admin),
		));
		assert!(!current.is_session_auth());
		assert_eq!(current.session_id, None);
	}

	#[test]
	fn accessors_read_through_to_the_user_row() {
		let current = CurrentUser::session_backed(
			user_with_role("Samir Haddad", "samir@example.net", Some(Role::Employer)),
			SessionId::generate(),
		);
		assert_eq!(current.role(), Some(Role::Employer));
		assert_eq!(current.locale(), Some("ar"));
	}

	#[test]
	fn visitor_carries_role_and_display_name() {
		let current = CurrentUser::session_backed(
			user_with_role("Huda Kamal", "huda@example.net", Some(Role::Employee)),
			SessionId::generate(),
		);
		assert_eq!(
			current.visitor(),
			Visitor::signed_in(Some(Role::Employee), Some("Huda Kamal".to_string()))
		);
	}

	#[test]
	fn visitor_keeps_unrecognized_role_as_none() {
		let current = CurrentUser::session_backed(
			user_with_role("Huda Kamal", "huda@example.net", None),
			SessionId::generate(),
		);
		assert!(current.visitor().is_signed_in());
		assert_eq!(current.visitor().role(), None);
	}

	#[test]
	fn anonymous_context_holds_nobody() {
		let ctx = AuthContext::unauthenticated();
		assert!(!ctx.is_authenticated());
		assert!(ctx.user().is_none());
		assert!(ctx.require_user().is_err());
		assert_eq!(ctx.visitor(), Visitor::Anonymous);
	}

	#[test]
	fn authenticated_context_exposes_its_user() {
		let user = user_with_role("Samir Haddad", "samir@example.net", Some(Role::Employee));
		let ctx = AuthContext::authenticated(CurrentUser::session_backed(
			user,
			SessionId::generate(),
		));
		assert!(ctx.is_authenticated());
		assert!(ctx.require_user().is_ok());

		let visitor = ctx.visitor();
		assert!(visitor.is_signed_in());
		assert_eq!(visitor.role(), Some(Role::Employee));

		let owned = ctx.into_user().unwrap();
		assert_eq!(owned.role(), Some(Role::Employee));
	}

	#[test]
	fn default_context_is_anonymous() {
		assert_eq!(AuthContext::default().visitor(), Visitor::Anonymous);
	}

	#[test]
	fn default_options_are_safe() {
		let options = AuthOptions::default();
		assert!(!options.dev_mode);
		assert!(!options.signups_disabled);
		assert_eq!(options.session_cookie_name, SESSION_COOKIE_NAME);
		assert_eq!(options.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
	}

	#[test]
	fn lone_session_cookie_is_found() {
		let headers = cookie_headers("wazeefa_session=4e1a99");
		assert_eq!(session_cookie(&headers), Some("4e1a99".to_string()));
	}

	#[test]
	fn session_cookie_is_found_among_others() {
		let headers = cookie_headers("theme=dark; wazeefa_session=77c0ff33; wazeefa_locale=ar");
		assert_eq!(session_cookie(&headers), Some("77c0ff33".to_string()));
	}

	#[test]
	fn missing_cookie_header_yields_none() {
		assert_eq!(session_cookie(&HeaderMap::new()), None);
	}

	#[test]
	fn unrelated_cookies_alone_yield_none() {
		let headers = cookie_headers("theme=dark; wazeefa_locale=ar");
		assert_eq!(session_cookie(&headers), None);
	}

	#[test]
	fn padding_around_cookie_pairs_is_ignored() {
		let headers = cookie_headers("  wazeefa_session=padded01  ; theme=dark ");
		assert_eq!(session_cookie(&headers), Some("padded01".to_string()));
	}

	#[test]
	fn find_cookie_honors_the_requested_name() {
		let headers = cookie_headers("portal_sid=alt-token; wazeefa_session=primary");
		assert_eq!(
			find_cookie(&headers, "portal_sid"),
			Some("alt-token".to_string())
		);
	}

	#[test]
	fn bearer_token_follows_the_scheme() {
		let headers = auth_headers("Bearer 4ab1c2d3e4f5");
		assert_eq!(bearer_token(&headers), Some("4ab1c2d3e4f5".to_string()));
	}

	#[test]
	fn missing_authorization_header_yields_none() {
		assert_eq!(bearer_token(&HeaderMap::new()), None);
	}

	#[test]
	fn non_bearer_schemes_yield_none() {
		let headers = auth_headers("Basic YWRtaW46aHVudGVyMg==");
		assert_eq!(bearer_token(&headers), None);
	}

	#[test]
	fn bearer_scheme_match_is_case_sensitive() {
		let headers = auth_headers("bearer nope123");
		assert_eq!(bearer_token(&headers), None);
	}

	#[test]
	fn bearer_without_a_token_yields_none() {
		let headers = auth_headers("Bearer");
		assert_eq!(bearer_token(&headers), None);
	}
}
