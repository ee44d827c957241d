use serde_json::{json, Value};

use crate::event::Event;

use super::{checked_array, parse_json, Error};

/// Used to send events requested by clients.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayToClientCommEvent {
  pub subscription_id: String,
  pub event: Event,
}

impl RelayToClientCommEvent {
  /// Create new [`RelayToClientCommEvent`] message
  pub fn new_event(subscription_id: String, event: Event) -> Self {
    Self {
      subscription_id,
      event,
    }
  }

  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    json!(["EVENT", self.subscription_id, self.event])
  }

  /// Deserialize from [`Value`]
  ///
  /// `["EVENT", <subscription_id>, <event JSON>]`
  pub fn from_value(msg: Value) -> Result<Self, Error> {
    let v = checked_array(&msg, "EVENT", 3)?;
    let subscription_id = serde_json::from_value(v[1].clone())?;
    let event: Event = serde_json::from_value(v[2].clone())?;
    Ok(Self::new_event(subscription_id, event))
  }

  /// Get [`RelayToClientCommEvent`] as JSON string
  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }

  /// Get [`RelayToClientCommEvent`] from JSON string
  pub fn from_json<S>(msg: S) -> Result<Self, Error>
  where
    S: Into<String>,
  {
    Self::from_value(parse_json(msg)?)
  }
}
