use serde_json::{json, Value};

use super::{checked_array, parse_json, Error};

/// Stops a subscription: `["CLOSE", <subscription_id>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToRelayCommClose {
  pub subscription_id: String,
}

impl ClientToRelayCommClose {
  pub fn new_close(subscription_id: String) -> Self {
    Self { subscription_id }
  }

  pub fn as_value(&self) -> Value {
    json!(["CLOSE", self.subscription_id])
  }

  pub fn from_value(msg: Value) -> Result<Self, Error> {
    let v = checked_array(&msg, "CLOSE", 2)?;
    let subscription_id = serde_json::from_value(v[1].clone())?;
    Ok(Self::new_close(subscription_id))
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

impl Default for ClientToRelayCommClose {
  fn default() -> Self {
    Self::new_close(String::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  #[test]
  fn test_client_to_relay_comm_close_as_json() {
    let close = ClientToRelayCommClose::new_close("mock_subscription_id".to_string());

    assert_eq!(close.as_json(), r#"["CLOSE","mock_subscription_id"]"#);
    assert_eq!(ClientToRelayCommClose::default().as_json(), r#"["CLOSE",""]"#);
  }

  #[test]
  fn test_client_to_relay_comm_close_from_json() {
    let result = ClientToRelayCommClose::from_json(r#"["CLOSE","mock_subscription_id"]"#).unwrap();

    assert_eq!(
      result,
      ClientToRelayCommClose::new_close("mock_subscription_id".to_string())
    );
    assert!(ClientToRelayCommClose::from_json(r#"["",""]"#).is_err());
    assert!(ClientToRelayCommClose::from_json(r#"["CLOSE"]"#).is_err());
    assert!(ClientToRelayCommClose::from_json("[]").is_err());
    assert!(ClientToRelayCommClose::from_json("").is_err());
  }
}
