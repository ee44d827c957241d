use std::str::FromStr;

use async_trait::async_trait;
use secp256k1::SecretKey;

use nostr_sdk::{
  event::{kind::EventKind, tag::Tag, Event, PubKey, Timestamp},
  schnorr,
};

use crate::error::Error;

/// An event that hasn't been given an author, id or signature yet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventDraft {
  pub kind: EventKind,
  pub tags: Vec<Tag>,
  pub content: String,
  pub created_at: Timestamp,
}

/// Whoever holds the author's key: a local key pair, a browser extension,
/// a remote bunker. Both calls may fail.
#[async_trait]
pub trait Signer: Send + Sync {
  async fn get_public_key(&self) -> Result<PubKey, Error>;
  async fn sign_event(&self, draft: EventDraft) -> Result<Event, Error>;
}

/// A secp256k1 key pair kept in memory.
#[derive(Debug, Clone)]
pub struct Keys {
  secret_key: SecretKey,
  public_key: PubKey,
}

impl Keys {
  pub fn generate() -> Result<Self, Error> {
    Self::new(schnorr::generate_keys().private_key)
  }

  /// Keys from a hex encoded secret key.
  pub fn from_hex(secret_key: &str) -> Result<Self, Error> {
    let secret_key =
      SecretKey::from_str(secret_key.trim()).map_err(|err| Error::Signer(err.to_string()))?;
    Self::new(secret_key)
  }

  fn new(secret_key: SecretKey) -> Result<Self, Error> {
    let public_key = schnorr::x_only_public_key(&secret_key.secret_bytes())
      .map_err(|err| Error::Signer(err.to_string()))?;

    Ok(Self {
      secret_key,
      public_key,
    })
  }

  pub fn public_key(&self) -> &str {
    &self.public_key
  }
}

#[async_trait]
impl Signer for Keys {
  async fn get_public_key(&self) -> Result<PubKey, Error> {
    Ok(self.public_key.clone())
  }

  async fn sign_event(&self, draft: EventDraft) -> Result<Event, Error> {
    let mut event = Event::new_without_signature(
      self.public_key.clone(),
      draft.created_at,
      draft.kind,
      draft.tags,
      draft.content,
    );
    event
      .sign_event(&self.secret_key.secret_bytes())
      .map_err(|err| Error::Signer(err.to_string()))?;
    Ok(event)
  }
}
