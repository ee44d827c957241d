use serde::{Deserialize, Serialize};
use std::fmt;

/// A tag is an ordered list of strings. The first one is the tag name
/// and the remaining ones are its values.
///
///   Example:
///
///   `["d", <identifier of an addressable event>]`
///   ```json
///   ["d", "my-first-article"]
///   ```
///
///   `["t", <hashtag>, <hashtag>, ...]`
///   ```json
///   ["t", "nostr", "rust"]
///   ```
///
/// The same name may be used by more than one tag of an event.
///
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Tag(pub Vec<String>);

impl Tag {
  pub fn new<S>(name: S, values: Vec<String>) -> Self
  where
    S: Into<String>,
  {
    let mut tag = vec![name.into()];
    tag.extend(values);
    Self(tag)
  }

  /// Tag name (`"d"`, `"t"`, `"title"`, ...). `None` for an empty tag.
  pub fn name(&self) -> Option<&str> {
    self.0.first().map(String::as_str)
  }

  /// Everything after the tag name.
  pub fn values(&self) -> &[String] {
    if self.0.is_empty() {
      return &[];
    }
    &self.0[1..]
  }

  pub fn as_vec(&self) -> Vec<String> {
    self.0.clone()
  }
}

impl<S> From<Vec<S>> for Tag
where
  S: Into<String>,
{
  fn from(data: Vec<S>) -> Self {
    Self(data.into_iter().map(|v| v.into()).collect())
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", serde_json::json!(self.0))
  }
}
