//! Token validation.
//!
//! Session issuance (login, refresh, passwords) is delegated to the
//! identity provider; this service only validates the HS256 tokens it
//! mints.

pub mod jwt;
