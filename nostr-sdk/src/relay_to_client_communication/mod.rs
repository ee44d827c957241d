/// The `relay -> client` communications a client has to understand.
///
///  - `["EVENT", subscription_id, event_JSON]`: an event matching a subscription
///  - `["EOSE", subscription_id]`: end of the stored events of a subscription
///  - `["OK", event_id, accepted, message]`: answer to a published event
///  - `["CLOSED", subscription_id, message]`: the relay ended a subscription on its own
///  - `["NOTICE", message]`: human-readable message
///
// internal modules
pub mod closed;
pub mod eose;
pub mod event;
pub mod notice;
pub mod ok;

pub use crate::message::Error;
pub(crate) use crate::message::{checked_array, parse_json};
