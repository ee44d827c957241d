//! Reads and publishes long-form nostr articles on many relays at once.
//!
//! Every relay gets its own bounded operation ([`single_relay`]); the
//! coordinators in [`pool`] run them side by side and merge what they
//! return, so one slow or broken relay never holds up the rest.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod note;
pub mod outcome;
pub mod pool;
pub mod session;
pub mod signer;
pub mod single_relay;

#[cfg(test)]
mod mock;

pub use crate::{
  client::Client,
  config::Config,
  error::{Error, RelayError},
  outcome::{race_with_timeout, Outcome},
  session::{RelayConnection, RelayConnector, RelayMessage, WebSocketConnector},
  signer::{EventDraft, Keys, Signer},
};
