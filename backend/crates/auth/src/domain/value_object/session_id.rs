//! Session ID Value Object
//!
//! 256 bits from the OS CSPRNG, base64url encoded (43 characters).
//! This is the server-side key of a session row; the cookie carries it
//! together with an HMAC signature.

use std::fmt;

const SESSION_ID_BYTES: usize = 32;
const SESSION_ID_LEN: usize = 43;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(platform::crypto::random_token(SESSION_ID_BYTES))
    }

    /// Accept only strings shaped like a generated ID
    pub fn parse(s: &str) -> Option<Self> {
        let well_formed = s.len() == SESSION_ID_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        well_formed.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix, safe to put in logs
    pub fn log_prefix(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({}…)", self.log_prefix())
    }
}
