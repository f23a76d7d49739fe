//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random URL-safe token carrying `len` bytes of entropy
pub fn random_token(len: usize) -> String {
    to_base64url(&random_bytes(len))
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as unpadded base64url (cookie and URL safe)
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url to bytes
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

/// HMAC-SHA256 signer with a fixed server-side key
///
/// The key is zeroized on drop and never printed.
#[derive(Clone)]
pub struct HmacSigner {
    key: Zeroizing<Vec<u8>>,
}

impl HmacSigner {
    pub fn new(key: &[u8]) -> Self {
        Self {
            key: Zeroizing::new(key.to_vec()),
        }
    }

    /// Signer with a fresh random 256-bit key
    pub fn random() -> Self {
        Self {
            key: Zeroizing::new(random_bytes(32)),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length
        <HmacSha256 as Mac>::new_from_slice(&self.key).unwrap_or_else(|_| unreachable!())
    }

    /// Compute HMAC-SHA256 over `data`
    pub fn sign(&self, data: &[u8]) -> [u8; 32] {
        let mut mac = self.mac();
        mac.update(data);
        mac.finalize().into_bytes().into()
    }

    /// Verify a signature in constant time
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        let mut mac = self.mac();
        mac.update(data);
        mac.verify_slice(signature).is_ok()
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
