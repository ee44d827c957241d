use serde_json::{json, Value};

use super::{checked_array, parse_json, Error};

/// Answer of the relay to an `EVENT` sent by the client (NIP-20).
///
/// `["OK", <event_id>, <true|false>, <message>]`
///
/// `accepted == false` means the relay rejected the event and
/// `message` tells why (e.g. `"blocked: you are banned"`).
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelayToClientCommOk {
  pub event_id: String,
  pub accepted: bool,
  pub message: String,
}

impl RelayToClientCommOk {
  pub fn new_ok(event_id: String, accepted: bool, message: String) -> Self {
    Self {
      event_id,
      accepted,
      message,
    }
  }

  pub fn as_value(&self) -> Value {
    json!(["OK", self.event_id, self.accepted, self.message])
  }

  pub fn from_value(msg: Value) -> Result<Self, Error> {
    let v = checked_array(&msg, "OK", 4)?;
    let event_id = serde_json::from_value(v[1].clone())?;
    let accepted = v[2].as_bool().ok_or(Error::InvalidData)?;
    let message = serde_json::from_value(v[3].clone())?;
    Ok(Self::new_ok(event_id, accepted, message))
  }

  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }

  pub fn from_json<S>(msg: S) -> Result<Self, Error>
  where
    S: Into<String>,
  {
    Self::from_value(parse_json(msg)?)
  }
}
