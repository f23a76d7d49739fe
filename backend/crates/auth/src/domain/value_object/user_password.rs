//! User Password Value Object
//!
//! Delegates to `platform::password` for the cryptographic work.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("S3cret!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use std::fmt;

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Non-empty, at most 1024 characters, no control characters
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id digest in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh salt.
    ///
    /// CPU-heavy; run inside `spawn_blocking` from async code.
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper).map(Self)
    }

    /// Restore from a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification; `pepper` must match the one used to hash
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Spend one verification's worth of work and fail.
    ///
    /// Used when the identity does not exist.
    pub fn verify_dummy(raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        HashedPassword::verify_dummy(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            RawPassword::new(String::new()),
            Err(PasswordPolicyError::Empty)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("S3cret!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("wrong".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
        assert!(!UserPassword::verify_dummy(&raw, None));
    }

    #[test]
    fn test_phc_roundtrip() {
        let raw = RawPassword::new("S3cret!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("S3cret!".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("S3cret"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
