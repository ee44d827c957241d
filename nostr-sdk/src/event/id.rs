use bitcoin_hashes::{sha256, Hash};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{kind::EventKind, tag::Tag, PubKey, Timestamp};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EventId(pub String);

impl EventId {
  ///
  /// This is the way used to serialize and get the SHA256. This will equal to `event.id`.
  /// 32-bytes lowercase hex-encoded sha256 of the the serialized event data:
  ///
  /// `[0, <pubkey>, <created_at>, <kind>, <tags>, <content>]`
  ///
  /// <https://github.com/nostr-protocol/nips/blob/master/01.md>
  ///
  pub(crate) fn new(
    pubkey: &PubKey,
    created_at: Timestamp,
    kind: EventKind,
    tags: &[Tag],
    content: &str,
  ) -> Self {
    let data = json!([0, pubkey, created_at, kind, tags, content]).to_string();

    let hash = sha256::Hash::hash(data.as_bytes());
    Self(hash.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  #[test]
  fn creates_id_from_canonical_serialization() {
    let mock_pub_key: PubKey = String::from("mockpubkey");
    let mock_created_at: Timestamp = 161500343030;
    let mock_tags = vec![Tag::from(vec!["d", "slug"]), Tag::from(vec!["t", "a", "b"])];
    let mock_content = "mock \"quoted\"\ncontent";

    let event_id = EventId::new(
      &mock_pub_key,
      mock_created_at,
      EventKind::LongFormContent,
      &mock_tags,
      mock_content,
    );

    let expected = r#"[0,"mockpubkey",161500343030,30023,[["d","slug"],["t","a","b"]],"mock \"quoted\"\ncontent"]"#;
    let expected = EventId(sha256::Hash::hash(expected.as_bytes()).to_string());

    assert_eq!(expected, event_id);
  }

  #[test]
  fn different_content_gives_different_id() {
    let pubkey: PubKey = String::from("mockpubkey");
    let first = EventId::new(&pubkey, 1, EventKind::Text, &[], "a");
    let second = EventId::new(&pubkey, 1, EventKind::Text, &[], "b");

    assert_ne!(first, second);
  }
}
