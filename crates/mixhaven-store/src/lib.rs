//! # MixHaven Store
//!
//! Embedded persistence for the MixHaven bot.
//!
//! Three logical tables live in a single sled database: `users` (vouch
//! statistics), `rates` (exchange rate table) and `tickets` (support ticket
//! records, indexed by channel).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod database;
pub mod error;
pub mod models;

pub use database::*;
pub use error::*;
pub use models::*;
