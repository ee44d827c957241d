use std::{env, time::Duration};

use url::Url;

use nostr_sdk::event::PubKey;

use crate::error::Error;

pub const DEFAULT_RELAY: &str = "wss://nostr-pub.wellorder.net";
const DEFAULT_TIMEOUT_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
  pub connect: Duration,
  pub subscribe: Duration,
  pub publish: Duration,
}

impl Default for Timeouts {
  fn default() -> Self {
    Self {
      connect: Duration::from_millis(DEFAULT_TIMEOUT_MS),
      subscribe: Duration::from_millis(DEFAULT_TIMEOUT_MS),
      publish: Duration::from_millis(DEFAULT_TIMEOUT_MS),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub relays: Vec<String>,
  pub author: Option<PubKey>,
  pub secret_key: Option<String>,
  pub timeouts: Timeouts,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      relays: vec![DEFAULT_RELAY.to_string()],
      author: None,
      secret_key: None,
      timeouts: Timeouts::default(),
    }
  }
}

impl Config {
  ///
  /// Reads the configuration from the environment (and `.env`):
  ///
  /// - `LONGPUB_RELAYS`: comma separated `ws://`/`wss://` urls
  /// - `LONGPUB_AUTHOR`: hex public key whose articles are fetched
  /// - `LONGPUB_SECRET_KEY`: hex secret key used to sign
  /// - `LONGPUB_CONNECT_TIMEOUT_MS`, `LONGPUB_SUBSCRIBE_TIMEOUT_MS`,
  ///   `LONGPUB_PUBLISH_TIMEOUT_MS`
  ///
  pub fn from_env() -> Result<Self, Error> {
    dotenv::dotenv().ok();
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| {
      lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    };
    let defaults = Self::default();

    let relays = match var("LONGPUB_RELAYS") {
      Some(relays) => parse_relays(&relays)?,
      None => defaults.relays,
    };

    let timeouts = Timeouts {
      connect: timeout(var("LONGPUB_CONNECT_TIMEOUT_MS"), "LONGPUB_CONNECT_TIMEOUT_MS")?,
      subscribe: timeout(var("LONGPUB_SUBSCRIBE_TIMEOUT_MS"), "LONGPUB_SUBSCRIBE_TIMEOUT_MS")?,
      publish: timeout(var("LONGPUB_PUBLISH_TIMEOUT_MS"), "LONGPUB_PUBLISH_TIMEOUT_MS")?,
    };

    Ok(Self {
      relays,
      author: var("LONGPUB_AUTHOR"),
      secret_key: var("LONGPUB_SECRET_KEY"),
      timeouts,
    })
  }
}

fn parse_relays(relays: &str) -> Result<Vec<String>, Error> {
  let relays = relays
    .split(',')
    .map(str::trim)
    .filter(|relay| !relay.is_empty())
    .map(|relay| {
      let url = Url::parse(relay).map_err(|err| Error::Config(format!("relay {relay}: {err}")))?;
      match url.scheme() {
        "ws" | "wss" => Ok(relay.to_string()),
        scheme => Err(Error::Config(format!("relay {relay}: unsupported scheme {scheme}"))),
      }
    })
    .collect::<Result<Vec<String>, Error>>()?;

  if relays.is_empty() {
    return Err(Error::Config(String::from("LONGPUB_RELAYS has no relay")));
  }

  Ok(relays)
}

fn timeout(value: Option<String>, key: &str) -> Result<Duration, Error> {
  let Some(value) = value else {
    return Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS));
  };

  match value.parse::<u64>() {
    Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
    _ => Err(Error::Config(format!(
      "{key} must be a positive number of milliseconds, got {value}"
    ))),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
    let vars: HashMap<String, String> = vars
      .iter()
      .map(|(key, value)| (key.to_string(), value.to_string()))
      .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn defaults_without_variables() {
    assert_eq!(config(&[]).unwrap(), Config::default());
    assert_eq!(Config::default().relays, vec![String::from("wss://nostr-pub.wellorder.net")]);
    assert_eq!(Config::default().timeouts.subscribe, Duration::from_millis(4000));
  }

  #[test]
  fn reads_every_variable() {
    let result = config(&[
      ("LONGPUB_RELAYS", "wss://a.example.com, ws://127.0.0.1:8080/ ,"),
      ("LONGPUB_AUTHOR", "8071afec6d98299978ef26dc6a87f62b0c0f3eab66047b5dbe46e83c29a6a391"),
      ("LONGPUB_SECRET_KEY", " 3b940b5586823dfd02ae3b461bb4336b5ecbaefd6627aa922efc048fec0c881c "),
      ("LONGPUB_CONNECT_TIMEOUT_MS", "100"),
      ("LONGPUB_SUBSCRIBE_TIMEOUT_MS", "200"),
      ("LONGPUB_PUBLISH_TIMEOUT_MS", "300"),
    ])
    .unwrap();

    assert_eq!(
      result,
      Config {
        relays: vec![
          String::from("wss://a.example.com"),
          String::from("ws://127.0.0.1:8080/")
        ],
        author: Some(String::from(
          "8071afec6d98299978ef26dc6a87f62b0c0f3eab66047b5dbe46e83c29a6a391"
        )),
        secret_key: Some(String::from(
          "3b940b5586823dfd02ae3b461bb4336b5ecbaefd6627aa922efc048fec0c881c"
        )),
        timeouts: Timeouts {
          connect: Duration::from_millis(100),
          subscribe: Duration::from_millis(200),
          publish: Duration::from_millis(300),
        },
      }
    );
  }

  #[test]
  fn rejects_relays_that_are_not_websockets() {
    assert!(matches!(
      config(&[("LONGPUB_RELAYS", "wss://ok.example.com,https://web.example.com")]),
      Err(Error::Config(_))
    ));
    assert!(matches!(
      config(&[("LONGPUB_RELAYS", "not a url")]),
      Err(Error::Config(_))
    ));
    assert!(matches!(
      config(&[("LONGPUB_RELAYS", " , ")]),
      Err(Error::Config(_))
    ));
  }

  #[test]
  fn rejects_bad_timeouts() {
    assert!(matches!(
      config(&[("LONGPUB_CONNECT_TIMEOUT_MS", "0")]),
      Err(Error::Config(_))
    ));
    assert!(matches!(
      config(&[("LONGPUB_PUBLISH_TIMEOUT_MS", "soon")]),
      Err(Error::Config(_))
    ));
  }
}
