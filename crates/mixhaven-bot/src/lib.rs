//! # MixHaven Bot
//!
//! Discord bot for the MixHaven exchange community.
//!
//! This is the main binary crate that wires configuration, storage and the
//! command framework together and runs the gateway client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod events;

pub use bot::*;
pub use error::*;
