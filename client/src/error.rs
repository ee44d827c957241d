use std::time::Duration;

/// What can go wrong while talking to a single relay.
///
/// These never escape a single-relay operation: they are folded into an
/// [`Outcome`](crate::outcome::Outcome) so one bad relay can't fail a fan-out.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
  /// The relay could not be reached or refused the websocket handshake.
  #[error("error connecting to relay {url}: {reason}")]
  ConnectionFailure { url: String, reason: String },
  #[error("relay timed out: {url}")]
  ConnectionTimeout { url: String },
  /// The relay rejected what we sent, closed on us or answered garbage.
  #[error("{0}")]
  ProtocolFailure(String),
  #[error("subscription timed out after {0:?}")]
  SubscriptionTimeout(Duration),
  #[error("publish acknowledgement timed out after {0:?}")]
  PublishTimeout(Duration),
}

impl RelayError {
  pub fn is_timeout(&self) -> bool {
    matches!(
      self,
      Self::ConnectionTimeout { .. } | Self::SubscriptionTimeout(_) | Self::PublishTimeout(_)
    )
  }
}

impl From<tokio_tungstenite::tungstenite::Error> for RelayError {
  fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
    Self::ProtocolFailure(err.to_string())
  }
}

/// Caller-level errors. Unlike [`RelayError`] these are not network
/// flakiness but a call that can't be served at all.
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("no relays configured")]
  NoRelays,
  #[error("signer error: {0}")]
  Signer(String),
  #[error("invalid configuration: {0}")]
  Config(String),
  #[error(transparent)]
  Event(#[from] nostr_sdk::event::Error),
}
