//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64, random tokens)
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Environment access

pub mod cookie;
pub mod crypto;
pub mod env;
pub mod password;
