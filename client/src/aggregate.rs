use std::collections::HashMap;

use nostr_sdk::event::Event;

///
/// Flattens the event lists of many relays keeping one event per `id`.
///
/// An event keeps the position where its `id` was first seen, but the
/// stored copy is the last one seen (relays can send the same event again).
///
pub fn unique_events<I, S>(sequences: I) -> Vec<Event>
where
  I: IntoIterator<Item = S>,
  S: IntoIterator<Item = Event>,
{
  let mut positions: HashMap<String, usize> = HashMap::new();
  let mut events: Vec<Event> = vec![];

  for event in sequences.into_iter().flatten() {
    match positions.get(&event.id) {
      Some(&index) => events[index] = event,
      None => {
        positions.insert(event.id.clone(), events.len());
        events.push(event);
      }
    }
  }

  events
}

/// Event with the greatest `created_at`. On ties the first one wins.
pub fn newest_event<I, S>(sequences: I) -> Option<Event>
where
  I: IntoIterator<Item = S>,
  S: IntoIterator<Item = Event>,
{
  sequences
    .into_iter()
    .flatten()
    .fold(None, |newest: Option<Event>, event| match newest {
      Some(current) if event.created_at <= current.created_at => Some(current),
      _ => Some(event),
    })
}
