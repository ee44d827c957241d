use serde_json::{json, Value};

use super::{checked_array, parse_json, Error};

/// Sent when the relay refuses or ends a subscription on its own.
///
/// `["CLOSED", <subscription_id>, <message>]`
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelayToClientCommClosed {
  pub subscription_id: String,
  pub message: String,
}

impl RelayToClientCommClosed {
  pub fn new_closed(subscription_id: String, message: String) -> Self {
    Self {
      subscription_id,
      message,
    }
  }

  pub fn as_value(&self) -> Value {
    json!(["CLOSED", self.subscription_id, self.message])
  }

  pub fn from_value(msg: Value) -> Result<Self, Error> {
    let v = checked_array(&msg, "CLOSED", 3)?;
    let subscription_id = serde_json::from_value(v[1].clone())?;
    let message = serde_json::from_value(v[2].clone())?;
    Ok(Self::new_closed(subscription_id, message))
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
