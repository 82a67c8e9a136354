// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session issuance and token handling.
//!
//! A session token is 32 random bytes, hex-encoded, handed to the client
//! exactly once at login. The database stores only the SHA-256 hash of the
//! token, so a leaked sessions table contains nothing a client could replay.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{SessionId, UserId};

/// Number of random bytes in a session token (hex-encoded to 64 chars).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Default session lifetime: 30 days.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 720;

/// A login session.
///
/// The token hash is deliberately not a field here; it is written as a
/// separate column by the session repository and never travels with the
/// session when one is serialized into a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
	/// Unique identifier for this session.
	pub id: SessionId,

	/// The user this session belongs to.
	pub user_id: UserId,

	/// When the session was created.
	pub created_at: DateTime<Utc>,

	/// When the session stops being accepted.
	pub expires_at: DateTime<Utc>,

	/// When the session was last seen on a request, if ever.
	pub last_used_at: Option<DateTime<Utc>>,
}

impl Session {
	/// Creates a new session for `user_id` expiring `ttl_hours` from now.
	pub fn new(user_id: UserId, ttl_hours: i64) -> Self {
		let now = Utc::now();
		Self {
			id: SessionId::generate(),
			user_id,
			created_at: now,
			expires_at: now + Duration::hours(ttl_hours),
			last_used_at: None,
		}
	}

	/// Returns true if the session has expired as of `now`.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now >= self.expires_at
	}

	/// Returns true if the session has expired.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(Utc::now())
	}
}

/// Mints a fresh session token from the OS RNG.
pub fn mint_session_token() -> String {
	let mut bytes = [0u8; SESSION_TOKEN_BYTES];
	OsRng.fill_bytes(&mut bytes);
	hex::encode(bytes)
}

/// Hashes a session token for storage or lookup.
pub fn hash_session_token(token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}
