//! Data models for the WDMMG API.
//!
//! - [`primitives`] - Id newtypes and lenient number/string decoding
//! - [`account`] - Account records
//! - [`transaction`] - Transaction records
//! - [`date`] - Date inputs and ranges used to filter transactions
//!
//! Records keep any field they do not model in an `extra` map, so nothing
//! the server sends is lost.

pub mod primitives;
pub mod account;
pub mod transaction;
pub mod date;

pub use primitives::*;
pub use account::*;
pub use transaction::*;
pub use date::*;
