//! Helpers shared by the `client -> relay` and `relay -> client` messages.

use serde_json::Value;

/// Error reading a protocol message
#[derive(thiserror::Error, Debug)]
pub enum Error {
  /// Error serializing or deserializing JSON data
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error("Invalid data")]
  InvalidData,
}

/// Splits a message into its array elements after checking
/// the message code and the exact number of elements.
pub(crate) fn checked_array(msg: &Value, code: &str, len: usize) -> Result<Vec<Value>, Error> {
  let v = coded_array(msg, code)?;

  if v.len() != len {
    return Err(Error::InvalidData);
  }

  Ok(v.clone())
}

/// Same as [`checked_array`] for messages with a variable tail,
/// like `REQ` and its filters.
pub(crate) fn checked_array_min(msg: &Value, code: &str, min_len: usize) -> Result<Vec<Value>, Error> {
  let v = coded_array(msg, code)?;

  if v.len() < min_len {
    return Err(Error::InvalidData);
  }

  Ok(v.clone())
}

fn coded_array<'a>(msg: &'a Value, code: &str) -> Result<&'a Vec<Value>, Error> {
  let v = msg.as_array().ok_or(Error::InvalidData)?;

  match v.first() {
    Some(first) if first == code => Ok(v),
    _ => Err(Error::InvalidData),
  }
}

/// Parses a JSON string, refusing empty input.
pub(crate) fn parse_json<S>(msg: S) -> Result<Value, Error>
where
  S: Into<String>,
{
  let msg: &str = &msg.into();

  if msg.is_empty() {
    return Err(Error::InvalidData);
  }

  Ok(serde_json::from_str(msg)?)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  #[test]
  fn checked_array_wants_code_and_exact_length() {
    let msg = json!(["EOSE", "sub"]);

    assert_eq!(checked_array(&msg, "EOSE", 2).unwrap(), vec![json!("EOSE"), json!("sub")]);
    assert!(matches!(checked_array(&msg, "EOSE", 3), Err(Error::InvalidData)));
    assert!(matches!(checked_array(&msg, "CLOSE", 2), Err(Error::InvalidData)));
    assert!(matches!(checked_array(&json!([]), "EOSE", 0), Err(Error::InvalidData)));
    assert!(matches!(checked_array(&json!({"EOSE": "sub"}), "EOSE", 2), Err(Error::InvalidData)));
  }

  #[test]
  fn checked_array_min_accepts_longer_messages() {
    let msg = json!(["REQ", "sub", {}, {}]);

    assert_eq!(checked_array_min(&msg, "REQ", 3).unwrap().len(), 4);
    assert!(matches!(checked_array_min(&json!(["REQ", "sub"]), "REQ", 3), Err(Error::InvalidData)));
  }

  #[test]
  fn parse_json_refuses_empty_and_broken_input() {
    assert!(matches!(parse_json(""), Err(Error::InvalidData)));
    assert!(matches!(parse_json("[\"EOSE\""), Err(Error::Json(_))));
    assert_eq!(parse_json(r#"["NOTICE","hi"]"#).unwrap(), json!(["NOTICE", "hi"]));
  }
}
