use serde::{Deserialize, Serialize};

use crate::event::{id::EventId, kind::EventKind, PubKey, Timestamp};

///
/// Filters are data structures that clients send to relays
/// to request data from other clients.
/// The attributes of a Filter work as `&&` (in other words, all the conditions set must be present
/// in the event in order to pass the filter).
/// P.S.: a "REQ" communication from the client can have multiple filters. In this case, all filters will be
/// used as `||` operator: anything that matches any of the filters will be sent.
///
/// - ids: a list of events of prefixes
/// - authors: a list of publickeys or prefixes, the pubkey of an event must be one of these
/// - kinds: a list of kind numbers
/// - #e: a list of event ids that are referenced in an "e" tag,
/// - #p: a list of pubkeys that are referenced in an "p" tag,
/// - since: a timestamp. Events must be newer than this to pass
/// - until: a timestamp. Events must be older than this to pass
/// - limit: maximum number of events to be returned in the initial query (it can be ignored afterwards)
///
/// Unset attributes are left out of the JSON sent to the relay.
///
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Filter {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ids: Option<Vec<EventId>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub authors: Option<Vec<PubKey>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub kinds: Option<Vec<EventKind>>,
  #[serde(rename = "#e", alias = "e", skip_serializing_if = "Option::is_none")]
  pub e: Option<Vec<String>>,
  #[serde(rename = "#p", alias = "p", skip_serializing_if = "Option::is_none")]
  pub p: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub since: Option<Timestamp>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub until: Option<Timestamp>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u64>,
}

impl Filter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn authors(mut self, authors: Vec<PubKey>) -> Self {
    self.authors = Some(authors);
    self
  }

  pub fn kinds(mut self, kinds: Vec<EventKind>) -> Self {
    self.kinds = Some(kinds);
    self
  }

  pub fn limit(mut self, limit: u64) -> Self {
    self.limit = Some(limit);
    self
  }

  pub fn as_str(&self) -> String {
    serde_json::to_string(self).unwrap_or_default()
  }

  pub fn from_string(data: String) -> Result<Self, serde_json::error::Error> {
    serde_json::from_str(&data)
  }
}
