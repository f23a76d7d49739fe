//! User Name Value Object
//!
//! The unique key of an identity. Input is NFKC-normalized and trimmed;
//! case is preserved, so `Alice` and `alice` are different users.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum user name length in characters
pub const MAX_USER_NAME_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("User name contains invalid characters")]
    InvalidCharacter,
}

/// Validated user name
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: &str) -> Result<Self, UserNameError> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let char_count = trimmed.chars().count();
        if char_count > MAX_USER_NAME_LENGTH {
            return Err(UserNameError::TooLong {
                max: MAX_USER_NAME_LENGTH,
                actual: char_count,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
