use serde_json::{json, Value};

use super::{checked_array, parse_json, Error};

/// Used to indicate the End Of Stored Events (EOSE)
/// and the beginning of events newly received in
/// real-time.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayToClientCommEose {
  pub subscription_id: String,
}

impl RelayToClientCommEose {
  // Create new `EOSE` message
  pub fn new_eose(subscription_id: String) -> Self {
    Self { subscription_id }
  }

  pub fn as_value(&self) -> Value {
    json!(["EOSE", self.subscription_id])
  }

  // ["EOSE", <subscription_id>]
  pub fn from_value(msg: Value) -> Result<Self, Error> {
    let v = checked_array(&msg, "EOSE", 2)?;
    let subscription_id = serde_json::from_value(v[1].clone())?;
    Ok(Self::new_eose(subscription_id))
  }

  /// Get [`RelayToClientCommEose`] as JSON string
  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }

  /// Get [`RelayToClientCommEose`] from JSON
  pub fn from_json<S>(msg: S) -> Result<Self, Error>
  where
    S: Into<String>,
  {
    Self::from_value(parse_json(msg)?)
  }
}

impl Default for RelayToClientCommEose {
  fn default() -> Self {
    Self::new_eose(String::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  #[test]
  fn test_eose_serializes_without_the_struct_key_names() {
    let eose = RelayToClientCommEose::new_eose(String::from("mock_subscription_id"));

    assert_eq!(eose.as_json(), r#"["EOSE","mock_subscription_id"]"#);
  }

  #[test]
  fn test_eose_deserializes_correctly() {
    let serialized = json!(["EOSE", "mock_subscription_id"]).to_string();

    assert_eq!(
      RelayToClientCommEose::from_json(serialized).unwrap(),
      RelayToClientCommEose::new_eose(String::from("mock_subscription_id"))
    );
  }

  #[test]
  fn test_eose_rejects_other_messages() {
    assert!(RelayToClientCommEose::from_json(r#"["EOSE"]"#).is_err());
    assert!(RelayToClientCommEose::from_json(r#"["NOTICE","sub"]"#).is_err());
    assert!(RelayToClientCommEose::from_json(r#"{"EOSE":"sub"}"#).is_err());
    assert!(RelayToClientCommEose::from_json(r#"["EOSE",1]"#).is_err());
  }
}
