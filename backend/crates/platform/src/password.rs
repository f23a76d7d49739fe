//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of clear text on drop
//! - Constant-time verification
//! - Optional application-wide pepper
//!
//! Hashing is CPU-bound; async callers should run it on
//! `tokio::task::spawn_blocking` so only their own task is held up.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Upper bound on password length, keeps hashing cost bounded
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// Well-formed Argon2id hash (default parameters) that no password matches.
/// Verified against when the account does not exist so that a missing
/// user costs the same as a wrong password.
const DUMMY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// NUL and other control characters (tab and newline are allowed)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`, and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate and NFKC-normalize a password.
    ///
    /// Only emptiness, length and control characters are checked; any
    /// other content is the caller's business.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        // Count Unicode code points (not bytes)
        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create without validation
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id with a fresh random salt
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);

        // 128-bit salt from the OS CSPRNG
        let salt = SaltString::generate(&mut OsRng);

        // OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters, salt and hash,
/// so verification needs nothing but the stored value.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Argon2 compares in constant time. A hash that fails to parse
    /// never verifies.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        verify_phc(&self.hash, password, pepper)
    }

    /// Burn the same amount of work as a real verification, always failing.
    pub fn verify_dummy(password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        verify_phc(DUMMY_PHC, password, pepper);
        false
    }
}

fn verify_phc(phc: &str, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(phc) else {
        return false;
    };

    let mut password_bytes = password.peppered(pepper);
    let ok = Argon2::default()
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();
    password_bytes.zeroize();
    ok
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
