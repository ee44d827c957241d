use std::time::Duration;

use log::{debug, info, warn};
use uuid::Uuid;

use nostr_sdk::{event::Event, filter::Filter};

use crate::{
  error::RelayError,
  outcome::{race_with_timeout, Outcome},
  session::{RelayConnection, RelayConnector, RelayMessage},
};

///
/// Fetches the stored events matching `filters` from one relay.
///
/// Every event of our subscription is kept in arrival order until the relay
/// sends EOSE. If `subscribe_timeout` runs out first the outcome is
/// [`Outcome::TimedOut`] and whatever arrived until then is thrown away.
/// The subscription and connection are closed on every path once connected.
///
pub async fn fetch_from_one<C>(
  connector: &C,
  url: &str,
  connect_timeout: Duration,
  subscribe_timeout: Duration,
  filters: &[Filter],
) -> Outcome<Vec<Event>>
where
  C: RelayConnector,
{
  let mut connection = match connect(connector, url, connect_timeout).await {
    Ok(connection) => connection,
    Err(outcome) => return outcome,
  };
  let subscription_id = Uuid::new_v4().to_string();

  let stored = race_with_timeout(
    stored_events(&mut connection, url, &subscription_id, filters),
    subscribe_timeout,
  )
  .await;

  let unsubscribed = race_with_timeout(connection.unsubscribe(&subscription_id), connect_timeout).await;
  if !unsubscribed.is_success() {
    debug!("Closing subscription {} on {}: {}", subscription_id, url, unsubscribed);
  }
  disconnect(connection, url, connect_timeout).await;

  if let Outcome::Success(events) = &stored {
    info!("{} events from {}", events.len(), url);
  }
  settle(url, stored, RelayError::SubscriptionTimeout(subscribe_timeout))
}

///
/// Sends `event` to one relay and waits for its `OK`.
///
/// A rejection becomes [`Outcome::Failure`] with the reason the relay gave.
/// No acknowledgement within `publish_timeout` is [`Outcome::TimedOut`].
///
pub async fn publish_to_one<C>(
  connector: &C,
  url: &str,
  event: &Event,
  connect_timeout: Duration,
  publish_timeout: Duration,
) -> Outcome<()>
where
  C: RelayConnector,
{
  let mut connection = match connect(connector, url, connect_timeout).await {
    Ok(connection) => connection,
    Err(outcome) => return outcome,
  };

  let acknowledged = race_with_timeout(acknowledgement(&mut connection, url, event), publish_timeout).await;
  disconnect(connection, url, connect_timeout).await;

  if acknowledged.is_success() {
    info!("Event {} accepted by {}", event.id, url);
  }
  settle(url, acknowledged, RelayError::PublishTimeout(publish_timeout))
}

/// Logs `outcome` unless it is a success. `timed_out` says which bound ran out.
fn settle<T>(url: &str, outcome: Outcome<T>, timed_out: RelayError) -> Outcome<T> {
  match &outcome {
    Outcome::Success(_) => {}
    Outcome::Failure(reason) => warn!("{}: {}", url, reason),
    Outcome::TimedOut => debug!("{}: {}", url, timed_out),
  }
  outcome
}

async fn stored_events<R>(
  connection: &mut R,
  url: &str,
  subscription_id: &str,
  filters: &[Filter],
) -> Result<Vec<Event>, RelayError>
where
  R: RelayConnection,
{
  connection.subscribe(subscription_id, filters).await?;

  let mut events = vec![];
  loop {
    match connection.next_message().await? {
      Some(RelayMessage::Event {
        subscription_id: id,
        event,
      }) if id == subscription_id => events.push(event),
      Some(RelayMessage::EndOfStoredEvents(id)) if id == subscription_id => return Ok(events),
      Some(RelayMessage::Closed {
        subscription_id: id,
        message,
      }) if id == subscription_id => {
        return Err(RelayError::ProtocolFailure(format!(
          "subscription closed by relay: {message}"
        )))
      }
      Some(RelayMessage::Notice(message)) => info!("NOTICE from {}: {}", url, message),
      Some(other) => debug!("Ignoring message from {}: {:?}", url, other),
      None => {
        return Err(RelayError::ProtocolFailure(String::from(
          "connection closed before end of stored events",
        )))
      }
    }
  }
}

async fn acknowledgement<R>(connection: &mut R, url: &str, event: &Event) -> Result<(), RelayError>
where
  R: RelayConnection,
{
  connection.publish(event).await?;

  loop {
    match connection.next_message().await? {
      Some(RelayMessage::Ok {
        event_id,
        accepted,
        message,
      }) if event_id == event.id => {
        return match accepted {
          true => Ok(()),
          false if message.is_empty() => Err(RelayError::ProtocolFailure(String::from(
            "event rejected by relay",
          ))),
          false => Err(RelayError::ProtocolFailure(message)),
        }
      }
      Some(RelayMessage::Notice(message)) => info!("NOTICE from {}: {}", url, message),
      Some(other) => debug!("Ignoring message from {}: {:?}", url, other),
      None => {
        return Err(RelayError::ProtocolFailure(String::from(
          "connection closed before acknowledgement",
        )))
      }
    }
  }
}

/// Opens a connection within `timeout`. Anything else is the final outcome
/// of the operation.
async fn connect<C, T>(connector: &C, url: &str, timeout: Duration) -> Result<C::Connection, Outcome<T>>
where
  C: RelayConnector,
{
  let connected = race_with_timeout(connector.connect(url), timeout).await;
  let timed_out = RelayError::ConnectionTimeout {
    url: url.to_string(),
  };

  match settle(url, connected, timed_out) {
    Outcome::Success(connection) => Ok(connection),
    Outcome::Failure(reason) => Err(Outcome::Failure(reason)),
    Outcome::TimedOut => Err(Outcome::TimedOut),
  }
}

/// Closes `connection`, waiting at most `timeout` for the relay.
async fn disconnect<R>(mut connection: R, url: &str, timeout: Duration)
where
  R: RelayConnection,
{
  let closed = race_with_timeout(connection.close(), timeout).await;
  if !closed.is_success() {
    debug!("Closing connection to {}: {}", url, closed);
  }
}
