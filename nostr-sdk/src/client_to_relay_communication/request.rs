use serde_json::{json, Value};

use crate::filter::Filter;

use super::{checked_array_min, parse_json, Error};

/// Opens a subscription on the relay.
///
/// `["REQ", <subscription_id>, <filter JSON>, <filter JSON>, ...]`
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToRelayCommRequest {
  pub subscription_id: String,
  pub filters: Vec<Filter>,
}

impl ClientToRelayCommRequest {
  pub fn new_request(subscription_id: String, filters: Vec<Filter>) -> Self {
    Self {
      subscription_id,
      filters,
    }
  }

  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    let mut data = vec![json!("REQ"), json!(self.subscription_id)];
    data.extend(self.filters.iter().map(|filter| json!(filter)));
    Value::Array(data)
  }

  /// Deserialize from [`Value`]
  pub fn from_value(msg: Value) -> Result<Self, Error> {
    // ["REQ", <subscription_id>, <filter JSON>...]
    let v = checked_array_min(&msg, "REQ", 3)?;
    let subscription_id: String = serde_json::from_value(v[1].clone())?;
    let filters = v[2..]
      .iter()
      .map(|filter| serde_json::from_value(filter.clone()))
      .collect::<Result<Vec<Filter>, _>>()?;

    Ok(Self::new_request(subscription_id, filters))
  }

  /// Get [`ClientToRelayCommRequest`] as JSON string
  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }

  /// Get [`ClientToRelayCommRequest`] from JSON string
  pub fn from_json<S>(msg: S) -> Result<Self, Error>
  where
    S: Into<String>,
  {
    Self::from_value(parse_json(msg)?)
  }
}

impl Default for ClientToRelayCommRequest {
  fn default() -> Self {
    Self::new_request(String::new(), vec![])
  }
}

#[cfg(test)]
mod tests {
  use crate::event::kind::EventKind;

  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  struct ReqSut {
    mock_client_request: ClientToRelayCommRequest,
    mock_filter: Filter,
  }

  impl ReqSut {
    fn new() -> Self {
      let mock_filter = Filter::new()
        .authors(vec![String::from(
          "8071afec6d98299978ef26dc6a87f62b0c0f3eab66047b5dbe46e83c29a6a391",
        )])
        .kinds(vec![EventKind::LongFormContent]);

      let mock_client_request = ClientToRelayCommRequest::new_request(
        "mock_subscription_id".to_string(),
        vec![mock_filter.clone()],
      );

      Self {
        mock_client_request,
        mock_filter,
      }
    }
  }

  #[test]
  fn test_client_to_relay_comm_request_default() {
    let result = ClientToRelayCommRequest::default();

    assert_eq!(result.subscription_id, "");
    assert!(result.filters.is_empty());
    assert_eq!(result.as_json(), r#"["REQ",""]"#);
  }

  #[test]
  fn test_client_to_relay_comm_request_sends_filters_as_objects() {
    let mock = ReqSut::new();

    let result: Value = serde_json::from_str(&mock.mock_client_request.as_json()).unwrap();

    assert_eq!(
      result,
      json!([
        "REQ",
        "mock_subscription_id",
        {
          "authors": ["8071afec6d98299978ef26dc6a87f62b0c0f3eab66047b5dbe46e83c29a6a391"],
          "kinds": [30023]
        }
      ])
    );
  }

  #[test]
  fn test_client_to_relay_comm_request_with_many_filters() {
    let mock = ReqSut::new();
    let mut request = mock.mock_client_request.clone();
    request.filters.push(Filter::new().limit(1));

    let result = ClientToRelayCommRequest::from_json(request.as_json()).unwrap();

    assert_eq!(result.filters, vec![mock.mock_filter, Filter::new().limit(1)]);
    assert_eq!(result, request);
  }

  #[test]
  fn test_client_to_relay_comm_request_from_json_rejects_malformed() {
    let without_filters = json!(["REQ", "mock_subscription_id"]).to_string();
    let wrong_code = json!(["CLOSE", "mock_subscription_id", {}]).to_string();
    let filter_not_an_object = json!(["REQ", "mock_subscription_id", "{}"]).to_string();

    assert!(matches!(
      ClientToRelayCommRequest::from_json(without_filters),
      Err(Error::InvalidData)
    ));
    assert!(matches!(
      ClientToRelayCommRequest::from_json(wrong_code),
      Err(Error::InvalidData)
    ));
    assert!(matches!(
      ClientToRelayCommRequest::from_json(filter_not_an_object),
      Err(Error::Json(_))
    ));
  }
}
