//! Platform - Shared infrastructure utilities
//!
//! Cross-cutting building blocks used by the domain crates:
//! - `client` - client IP / User-Agent extraction from request headers
//! - `crypto` - random material, hashing, encodings
//! - `password` - Argon2id password hashing with zeroized cleartext handling

pub mod client;
pub mod crypto;
pub mod password;
