use serde_json::{json, Value};

use super::{checked_array, parse_json, Error};

/// Used to send human-readable error messages
/// or other things to clients.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelayToClientCommNotice {
  pub message: String, // NIP01 defines no rules for this message
}

impl RelayToClientCommNotice {
  /// Create new `NOTICE` message
  pub fn new_notice(message: String) -> Self {
    Self { message }
  }

  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    json!(["NOTICE", self.message])
  }

  /// Deserialize from [`Value`]
  ///
  /// `["NOTICE", <message>]`
  pub fn from_value(msg: Value) -> Result<Self, Error> {
    let v = checked_array(&msg, "NOTICE", 2)?;
    let message = serde_json::from_value(v[1].clone())?;
    Ok(Self::new_notice(message))
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
