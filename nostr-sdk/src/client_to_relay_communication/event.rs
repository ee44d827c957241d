use serde_json::{json, Value};

use crate::event::Event;

use super::{checked_array, parse_json, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToRelayCommEvent {
  pub event: Event,
}

impl ClientToRelayCommEvent {
  pub fn new_event(event: Event) -> Self {
    Self { event }
  }

  /// Get event communication as JSON string
  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }

  /// Deserialize [`ClientToRelayCommEvent`] from JSON string
  pub fn from_json<S>(msg: S) -> Result<Self, Error>
  where
    S: Into<String>,
  {
    Self::from_value(parse_json(msg)?)
  }

  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    json!(["EVENT", self.event])
  }

  /// Deserialize from [`Value`]
  pub fn from_value(msg: Value) -> Result<Self, Error> {
    // ["EVENT", <event JSON>]
    let v = checked_array(&msg, "EVENT", 2)?;
    let event: Event = serde_json::from_value(v[1].clone())?;
    Ok(Self::new_event(event))
  }
}

impl From<Event> for ClientToRelayCommEvent {
  fn from(event: Event) -> Self {
    Self::new_event(event)
  }
}

impl Default for ClientToRelayCommEvent {
  fn default() -> Self {
    Self::new_event(Event::default())
  }
}
