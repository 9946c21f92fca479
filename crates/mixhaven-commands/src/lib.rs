//! # MixHaven Commands
//!
//! Discord command implementations using the Poise framework.
//!
//! Exchange quotes, the vouch ledger, the ticket panel and the staff ticket
//! commands all live here, together with the role checks and embed styling
//! they share. Gateway events that are not commands (vouch embeds posted by
//! members, panel interactions) are handled by [`vouch::handle_message`] and
//! the [`ticket_panel`] module.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod checks;
pub mod embeds;
pub mod exchange;
pub mod framework;
pub mod general;
pub mod ids;
pub mod ticket_panel;
pub mod tickets;
pub mod vouch;

pub use framework::*;
