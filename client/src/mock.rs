//! Scripted in-memory relays for driving the relay operations in tests.

use std::{
  collections::{HashMap, VecDeque},
  sync::{Arc, Mutex},
  time::Duration,
};

use async_trait::async_trait;

use nostr_sdk::{event::Event, filter::Filter};

use crate::{
  error::RelayError,
  session::{RelayConnection, RelayConnector, RelayMessage},
};

/// What a scripted relay sends back, in order, once it is asked something.
#[derive(Debug, Clone)]
pub enum Reply {
  Event(Event),
  /// Events of a subscription we didn't open.
  ForeignEvent(Event),
  Eose,
  Ok { accepted: bool, message: String },
  Closed(String),
  Notice(String),
  /// Relay drops the connection.
  HangUp,
}

#[derive(Debug, Clone, Default)]
pub struct MockRelay {
  connect_delay: Duration,
  refuse: Option<String>,
  stall_cleanup: bool,
  replies: Vec<(Duration, Reply)>,
}

impl MockRelay {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn connect_after(mut self, delay: Duration) -> Self {
    self.connect_delay = delay;
    self
  }

  pub fn refusing(mut self, reason: &str) -> Self {
    self.refuse = Some(reason.to_string());
    self
  }

  /// Unsubscribe and close are recorded but never return.
  pub fn stalling_cleanup(mut self) -> Self {
    self.stall_cleanup = true;
    self
  }

  /// Queues `reply`, sent `delay` after the previous one.
  pub fn reply(mut self, delay: Duration, reply: Reply) -> Self {
    self.replies.push((delay, reply));
    self
  }

  /// Stored events followed by EOSE, all at once.
  pub fn stored(self, events: Vec<Event>) -> Self {
    self.stored_after(Duration::ZERO, events)
  }

  pub fn stored_after(mut self, delay: Duration, events: Vec<Event>) -> Self {
    let mut delay = delay;
    for event in events {
      self.replies.push((delay, Reply::Event(event)));
      delay = Duration::ZERO;
    }
    self.replies.push((delay, Reply::Eose));
    self
  }
}

/// Everything the scripted relays were asked to do, per url.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MockLog {
  pub connects: Vec<String>,
  pub subscriptions: Vec<(String, String)>,
  pub unsubscriptions: Vec<(String, String)>,
  pub published: Vec<(String, String)>,
  pub closes: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct MockConnector {
  relays: HashMap<String, MockRelay>,
  log: Arc<Mutex<MockLog>>,
}

impl MockConnector {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn relay(mut self, url: &str, relay: MockRelay) -> Self {
    self.relays.insert(url.to_string(), relay);
    self
  }

  pub fn log(&self) -> MockLog {
    self.log.lock().map(|log| log.clone()).unwrap_or_default()
  }

  fn record(&self, f: impl FnOnce(&mut MockLog)) {
    if let Ok(mut log) = self.log.lock() {
      f(&mut log);
    }
  }
}

#[async_trait]
impl RelayConnector for MockConnector {
  type Connection = MockConnection;

  async fn connect(&self, url: &str) -> Result<Self::Connection, RelayError> {
    let relay = self
      .relays
      .get(url)
      .cloned()
      .ok_or_else(|| RelayError::ConnectionFailure {
        url: url.to_string(),
        reason: String::from("unknown host"),
      })?;

    tokio::time::sleep(relay.connect_delay).await;
    if let Some(reason) = relay.refuse {
      return Err(RelayError::ConnectionFailure {
        url: url.to_string(),
        reason,
      });
    }
    self.record(|log| log.connects.push(url.to_string()));

    Ok(MockConnection {
      url: url.to_string(),
      connector: self.clone(),
      replies: VecDeque::new(),
      script: relay.replies,
      stall_cleanup: relay.stall_cleanup,
      subscription_id: String::new(),
      event_id: String::new(),
    })
  }
}

pub struct MockConnection {
  url: String,
  connector: MockConnector,
  script: Vec<(Duration, Reply)>,
  replies: VecDeque<(Duration, Reply)>,
  stall_cleanup: bool,
  subscription_id: String,
  event_id: String,
}

impl MockConnection {
  fn start_script(&mut self) {
    self.replies = std::mem::take(&mut self.script).into();
  }

  async fn cleanup(&self) {
    if self.stall_cleanup {
      std::future::pending::<()>().await;
    }
  }
}

#[async_trait]
impl RelayConnection for MockConnection {
  async fn subscribe(&mut self, subscription_id: &str, _filters: &[Filter]) -> Result<(), RelayError> {
    self.subscription_id = subscription_id.to_string();
    let url = self.url.clone();
    let id = subscription_id.to_string();
    self
      .connector
      .record(|log| log.subscriptions.push((url, id)));
    self.start_script();
    Ok(())
  }

  async fn unsubscribe(&mut self, subscription_id: &str) -> Result<(), RelayError> {
    let url = self.url.clone();
    let id = subscription_id.to_string();
    self
      .connector
      .record(|log| log.unsubscriptions.push((url, id)));
    self.cleanup().await;
    Ok(())
  }

  async fn publish(&mut self, event: &Event) -> Result<(), RelayError> {
    self.event_id = event.id.clone();
    let url = self.url.clone();
    let id = event.id.clone();
    self.connector.record(|log| log.published.push((url, id)));
    self.start_script();
    Ok(())
  }

  async fn next_message(&mut self) -> Result<Option<RelayMessage>, RelayError> {
    let Some((delay, reply)) = self.replies.pop_front() else {
      // nothing left to say: keep the connection open forever
      std::future::pending::<()>().await;
      return Ok(None);
    };

    tokio::time::sleep(delay).await;
    let msg = match reply {
      Reply::Event(event) => RelayMessage::Event {
        subscription_id: self.subscription_id.clone(),
        event,
      },
      Reply::ForeignEvent(event) => RelayMessage::Event {
        subscription_id: String::from("someone-else"),
        event,
      },
      Reply::Eose => RelayMessage::EndOfStoredEvents(self.subscription_id.clone()),
      Reply::Ok { accepted, message } => RelayMessage::Ok {
        event_id: self.event_id.clone(),
        accepted,
        message,
      },
      Reply::Closed(message) => RelayMessage::Closed {
        subscription_id: self.subscription_id.clone(),
        message,
      },
      Reply::Notice(message) => RelayMessage::Notice(message),
      Reply::HangUp => return Ok(None),
    };

    Ok(Some(msg))
  }

  async fn close(&mut self) -> Result<(), RelayError> {
    let url = self.url.clone();
    self.connector.record(|log| log.closes.push(url));
    self.cleanup().await;
    Ok(())
  }
}
