//! Tracker module containing account management and expense ledger operations

pub mod accounts;
pub mod core;
pub mod expenses;

pub use accounts::*;
pub use core::*;
pub use expenses::*;
