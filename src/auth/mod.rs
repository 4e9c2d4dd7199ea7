//! Credential hashing for the account store

pub mod password;

pub use password::*;
