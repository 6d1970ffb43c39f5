//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with fixed cost parameters)
//! - Signed token issuance and verification (JWT, HS256)
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod jwt;
pub mod password;
