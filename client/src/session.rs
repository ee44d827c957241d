use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info};
use tokio::net::TcpStream;
use tokio_tungstenite::{
  connect_async,
  tungstenite::{self, protocol::Message},
  MaybeTlsStream, WebSocketStream,
};
use url::Url;

use nostr_sdk::{
  client_to_relay_communication::{
    close::ClientToRelayCommClose, event::ClientToRelayCommEvent, request::ClientToRelayCommRequest,
  },
  event::Event,
  filter::Filter,
  relay_to_client_communication::{
    closed::RelayToClientCommClosed, eose::RelayToClientCommEose, event::RelayToClientCommEvent,
    notice::RelayToClientCommNotice, ok::RelayToClientCommOk,
  },
};

use crate::error::RelayError;

/// A message a relay sent us, already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
  Event {
    subscription_id: String,
    event: Event,
  },
  EndOfStoredEvents(String),
  Ok {
    event_id: String,
    accepted: bool,
    message: String,
  },
  Closed {
    subscription_id: String,
    message: String,
  },
  Notice(String),
  /// Anything we don't understand, kept raw for the logs.
  Unknown(String),
}

impl RelayMessage {
  pub fn parse(msg: &str) -> Self {
    if let Ok(eose) = RelayToClientCommEose::from_json(msg) {
      return Self::EndOfStoredEvents(eose.subscription_id);
    }

    if let Ok(event) = RelayToClientCommEvent::from_json(msg) {
      return Self::Event {
        subscription_id: event.subscription_id,
        event: event.event,
      };
    }

    if let Ok(ok) = RelayToClientCommOk::from_json(msg) {
      return Self::Ok {
        event_id: ok.event_id,
        accepted: ok.accepted,
        message: ok.message,
      };
    }

    if let Ok(closed) = RelayToClientCommClosed::from_json(msg) {
      return Self::Closed {
        subscription_id: closed.subscription_id,
        message: closed.message,
      };
    }

    if let Ok(notice) = RelayToClientCommNotice::from_json(msg) {
      return Self::Notice(notice.message);
    }

    Self::Unknown(msg.to_string())
  }
}

/// Opens connections to relays.
#[async_trait]
pub trait RelayConnector: Send + Sync {
  type Connection: RelayConnection;

  async fn connect(&self, url: &str) -> Result<Self::Connection, RelayError>;
}

///
/// One open connection to one relay.
///
/// Messages are pulled with [`RelayConnection::next_message`]; `Ok(None)`
/// means the relay closed the connection. Dropping a connection releases
/// the transport, which is what happens to an operation cancelled mid-flight.
///
#[async_trait]
pub trait RelayConnection: Send {
  async fn subscribe(&mut self, subscription_id: &str, filters: &[Filter]) -> Result<(), RelayError>;
  async fn unsubscribe(&mut self, subscription_id: &str) -> Result<(), RelayError>;
  async fn publish(&mut self, event: &Event) -> Result<(), RelayError>;
  async fn next_message(&mut self) -> Result<Option<RelayMessage>, RelayError>;
  async fn close(&mut self) -> Result<(), RelayError>;
}

/// Connects to relays over websockets (`ws://` or `wss://`).
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketConnector;

#[async_trait]
impl RelayConnector for WebSocketConnector {
  type Connection = WebSocketConnection;

  async fn connect(&self, url: &str) -> Result<Self::Connection, RelayError> {
    let failure = |reason: String| RelayError::ConnectionFailure {
      url: url.to_string(),
      reason,
    };

    let parsed = Url::parse(url).map_err(|err| failure(err.to_string()))?;
    if !matches!(parsed.scheme(), "ws" | "wss") {
      return Err(failure(format!("unsupported scheme {}", parsed.scheme())));
    }

    debug!("Connecting to {}", url);
    let (stream, _) = connect_async(parsed.as_str())
      .await
      .map_err(|err| failure(err.to_string()))?;
    info!("Connected to {}", url);

    Ok(WebSocketConnection {
      url: url.to_string(),
      stream,
    })
  }
}

pub struct WebSocketConnection {
  url: String,
  stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketConnection {
  async fn send(&mut self, msg: String) -> Result<(), RelayError> {
    debug!("Sending to {}: {}", self.url, msg);
    self.stream.send(Message::Text(msg)).await?;
    Ok(())
  }
}

#[async_trait]
impl RelayConnection for WebSocketConnection {
  async fn subscribe(&mut self, subscription_id: &str, filters: &[Filter]) -> Result<(), RelayError> {
    let request =
      ClientToRelayCommRequest::new_request(subscription_id.to_string(), filters.to_vec());
    self.send(request.as_json()).await
  }

  async fn unsubscribe(&mut self, subscription_id: &str) -> Result<(), RelayError> {
    let close = ClientToRelayCommClose::new_close(subscription_id.to_string());
    self.send(close.as_json()).await
  }

  async fn publish(&mut self, event: &Event) -> Result<(), RelayError> {
    let event = ClientToRelayCommEvent::new_event(event.clone());
    self.send(event.as_json()).await
  }

  async fn next_message(&mut self) -> Result<Option<RelayMessage>, RelayError> {
    while let Some(msg) = self.stream.next().await {
      match msg? {
        Message::Text(text) => return Ok(Some(RelayMessage::parse(&text))),
        Message::Binary(data) => {
          let text = String::from_utf8_lossy(&data);
          return Ok(Some(RelayMessage::parse(&text)));
        }
        Message::Close(_) => {
          debug!("{} closed the connection", self.url);
          return Ok(None);
        }
        // pings are answered by tungstenite itself
        _ => continue,
      }
    }

    Ok(None)
  }

  async fn close(&mut self) -> Result<(), RelayError> {
    match self.stream.close(None).await {
      Ok(()) | Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
        debug!("Disconnected from {}", self.url);
        Ok(())
      }
      Err(err) => Err(err.into()),
    }
  }
}
