use std::time::Duration;

use futures_util::{future::join_all, stream::FuturesUnordered, StreamExt};
use log::{debug, info};

use nostr_sdk::{event::Event, filter::Filter};

use crate::{
  aggregate::{newest_event, unique_events},
  error::Error,
  outcome::Outcome,
  session::RelayConnector,
  single_relay::{fetch_from_one, publish_to_one},
};

/// Outcome of an operation against the relay at `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome<T> {
  pub url: String,
  pub outcome: Outcome<T>,
}

/// Relay urls without repetitions, in the order they were first given.
fn distinct_relays(relays: &[String]) -> Result<Vec<&str>, Error> {
  let mut distinct: Vec<&str> = vec![];
  for relay in relays {
    if !distinct.contains(&relay.as_str()) {
      distinct.push(relay);
    }
  }

  if distinct.is_empty() {
    return Err(Error::NoRelays);
  }

  Ok(distinct)
}

///
/// Fetches from every relay at once and merges what the successful ones
/// returned, without duplicates.
///
/// Relays that fail or time out add nothing. When none succeeds the result
/// is an empty list, not an error.
///
pub async fn fetch_from_all<C>(
  connector: &C,
  relays: &[String],
  filters: &[Filter],
  connect_timeout: Duration,
  subscribe_timeout: Duration,
) -> Result<Vec<Event>, Error>
where
  C: RelayConnector,
{
  let relays = distinct_relays(relays)?;
  debug!("Fetching from {} relays", relays.len());

  let outcomes = join_all(
    relays
      .iter()
      .map(|url| fetch_from_one(connector, url, connect_timeout, subscribe_timeout, filters)),
  )
  .await;

  let answered = outcomes.iter().filter(|outcome| outcome.is_success()).count();
  let events = unique_events(outcomes.into_iter().filter_map(Outcome::success));
  info!(
    "{} of {} relays answered with {} distinct events",
    answered,
    relays.len(),
    events.len()
  );

  Ok(events)
}

/// Publishes `event` to every relay at once. One outcome per relay, in relay order.
pub async fn publish_to_all<C>(
  connector: &C,
  relays: &[String],
  event: &Event,
  connect_timeout: Duration,
  publish_timeout: Duration,
) -> Result<Vec<RelayOutcome<()>>, Error>
where
  C: RelayConnector,
{
  let relays = distinct_relays(relays)?;
  debug!("Publishing {} to {} relays", event.id, relays.len());

  let outcomes = join_all(relays.iter().map(|url| async move {
    RelayOutcome {
      url: url.to_string(),
      outcome: publish_to_one(connector, url, event, connect_timeout, publish_timeout).await,
    }
  }))
  .await;

  Ok(outcomes)
}

///
/// Races every relay and takes the newest event of the first one that
/// answers successfully.
///
/// The relays still running when the winner arrives are dropped, which
/// cancels them. `None` when no relay succeeds or the winner had nothing.
///
pub async fn fetch_first_available<C>(
  connector: &C,
  relays: &[String],
  filters: &[Filter],
  connect_timeout: Duration,
  subscribe_timeout: Duration,
) -> Result<Option<Event>, Error>
where
  C: RelayConnector,
{
  let relays = distinct_relays(relays)?;

  let mut pending: FuturesUnordered<_> = relays
    .iter()
    .map(|url| async move {
      let outcome = fetch_from_one(connector, url, connect_timeout, subscribe_timeout, filters).await;
      (*url, outcome)
    })
    .collect();

  while let Some((url, outcome)) = pending.next().await {
    if let Outcome::Success(events) = outcome {
      info!("{} answered first, dropping {} other relays", url, pending.len());
      return Ok(newest_event([events]));
    }
  }

  debug!("No relay answered");
  Ok(None)
}
