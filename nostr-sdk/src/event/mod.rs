use std::str::FromStr;

use secp256k1::{schnorr, Secp256k1};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// Event Modules
pub mod id;
pub mod kind;
pub mod tag;

use self::id::EventId;
use self::kind::EventKind;
use self::tag::Tag;
use crate::schnorr::SchnorrError;

pub type PubKey = String;
pub type Timestamp = u64;

/// [`Event`] error
#[derive(thiserror::Error, Debug)]
pub enum Error {
  /// Error serializing or deserializing JSON data
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error("Invalid data")]
  InvalidData,
  #[error(transparent)]
  Signature(#[from] SchnorrError),
}

///
/// Event is the only object that exists in the Nostr protocol.
///
/// Example of a long-form article (id's and other hashes are not valid for the information presented):
///   ```json
///   {
///     "id": "397c2192b92c8e0be9b606423d394c97078e47366ce30979a2b971168b88abb7",
///     "pubkey": "8071afec6d98299978ef26dc6a87f62b0c0f3eab66047b5dbe46e83c29a6a391",
///     "created_at": 1679579201,
///     "kind": 30023,
///     "tags": [
///       ["d", "slug"],
///       ["title", "title"],
///       ["t", "t1", "t2", "t3"],
///       ["client", "longpub"]
///     ],
///     "content": "content",
///     "sig": "1cae7d6f869ce00e960cab0e8d54b6dd68a56159dc835eb05bbcbe39faea0b3b2286e7b6966c2de7dc5bb18a0e45252ff889cff3b42ffded91508a2568add82e"
///   }
///   ```
///
/// Two events are the same event when their `id` is the same.
///
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Event {
  /// 32-bytes SHA256 of the serialized event data
  pub id: String,
  /// 32-bytes hex-encoded public key of the event creator
  pub pubkey: PubKey,
  /// Unix timestamp in seconds
  pub created_at: Timestamp,
  /// Kind of event
  pub kind: EventKind,
  /// An array of arrays with more info about the event.
  /// The kind of event will change its tags and contents.
  pub tags: Vec<Tag>,
  /// Arbitrary string. Meaning depends on the kind of the event.
  pub content: String,
  /// 64-bytes hex signature of the id field
  #[serde(default)]
  pub sig: String,
}

impl Event {
  pub fn new_without_signature(
    pubkey: PubKey,
    created_at: Timestamp,
    kind: EventKind,
    tags: Vec<Tag>,
    content: String,
  ) -> Self {
    let id = EventId::new(&pubkey, created_at, kind, &tags, &content);
    Self {
      id: id.0,
      pubkey,
      created_at,
      kind,
      tags,
      content,
      ..Default::default()
    }
  }

  pub fn sign_event(&mut self, seckey: &[u8]) -> Result<(), Error> {
    let secp = Secp256k1::new();
    let signed = crate::schnorr::sign_schnorr(&secp, self.id.clone(), seckey)?;
    self.sig = signed.to_string();
    Ok(())
  }

  pub fn check_event_id(&self) -> bool {
    EventId::new(
      &self.pubkey,
      self.created_at,
      self.kind,
      &self.tags,
      &self.content,
    )
    .0 == self.id
  }

  pub fn check_event_signature(&self) -> bool {
    let secp = Secp256k1::new();
    let sig = match schnorr::Signature::from_str(&self.sig) {
      Ok(signature) => signature,
      Err(_) => return false,
    };

    crate::schnorr::verify_schnorr(&secp, self.id.clone(), sig, self.pubkey.clone())
      .unwrap_or(false)
  }

  /// Values of the first tag called `name`.
  pub fn tag_values(&self, name: &str) -> Vec<String> {
    self
      .tags
      .iter()
      .find(|tag| tag.name() == Some(name))
      .map(|tag| tag.values().to_vec())
      .unwrap_or_default()
  }

  /// First value of the first tag called `name`.
  pub fn tag_value(&self, name: &str) -> Option<String> {
    self.tag_values(name).into_iter().next()
  }

  /// Deserializes from [`Value`]
  pub fn from_value(msg: Value) -> Result<Self, Error> {
    serde_json::from_value(msg).map_err(Error::Json)
  }

  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    json!(self)
  }

  /// Deserialize [`Event`] from JSON string
  pub fn from_json<S>(msg: S) -> Result<Self, Error>
  where
    S: Into<String>,
  {
    let msg: &str = &msg.into();

    if msg.is_empty() {
      return Err(Error::InvalidData);
    }

    let value: Value = serde_json::from_str(msg)?;
    Self::from_value(value)
  }

  /// Get [`Event`] in JSON string
  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }
}
