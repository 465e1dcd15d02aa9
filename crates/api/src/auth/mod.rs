//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`cookie`] -- The session cookie carrying the access token.

pub mod cookie;
pub mod jwt;
pub mod password;
