// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argon2id password hashing.
//!
//! # Security Note
//!
//! Production builds use `Argon2::default()` (Argon2id, ~19 MiB memory,
//! 2 iterations). Test builds swap in deliberately weak parameters so the
//! suite stays fast; those parameters MUST NOT leak into production code.

use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
	Argon2,
};
#[cfg(test)]
use argon2::{Algorithm, Params, Version};
use thiserror::Error;

/// Errors from password hashing and verification.
#[derive(Debug, Error)]
pub enum PasswordError {
	/// Hashing failed. The underlying message is dropped so password
	/// material cannot ride along in an error chain.
	#[error("password hashing failed")]
	Hash,

	/// The stored hash is not a valid PHC string.
	#[error("stored password hash is malformed")]
	MalformedHash,
}

/// Argon2 configured for the build context.
#[inline]
fn hasher() -> Argon2<'static> {
	#[cfg(test)]
	{
		// Weak on purpose: 1 MiB and a single pass keep the suite fast.
		// Never reachable outside test builds.
		let params = Params::new(1024, 1, 1, None)
			.expect("test parameters are within argon2 bounds");
		Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
	}

	#[cfg(not(test))]
	{
		Argon2::default()
	}
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
	let salt = SaltString::generate(&mut OsRng);
	hasher()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|_| PasswordError::Hash)
}

/// Verifies a password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash
/// itself cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
	let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;
	Ok(
		hasher()
			.verify_password(password.as_bytes(), &parsed_hash)
			.is_ok(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_and_verify_round_trip() {
		let password = "correct horse battery staple";

		let hash = hash_password(password).unwrap();
		assert!(hash.starts_with("$argon2"));

		assert!(verify_password(password, &hash).unwrap());
		assert!(!verify_password("wrong password", &hash).unwrap());
	}

	#[test]
	fn same_password_hashes_differently() {
		let password = "correct horse battery staple";

		// A fresh salt every call means no two hashes ever collide, yet
		// both must still verify.
		let hash1 = hash_password(password).unwrap();
		let hash2 = hash_password(password).unwrap();

		assert_ne!(hash1, hash2);
		assert!(verify_password(password, &hash1).unwrap());
		assert!(verify_password(password, &hash2).unwrap());
	}

	#[test]
	fn malformed_hash_is_an_error_not_a_mismatch() {
		let err = verify_password("anything", "not-a-phc-string").unwrap_err();
		assert!(matches!(err, PasswordError::MalformedHash));
	}

	#[test]
	fn unicode_passwords_round_trip() {
		let password = "كلمة السر الطويلة جداً";
		let hash = hash_password(password).unwrap();
		assert!(verify_password(password, &hash).unwrap());
	}
}
