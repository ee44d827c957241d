/// The three types of `client -> relay` communications.
///
///  - `["EVENT", event_JSON]`: used to publish events
///
///  - `["REQ", subscription_id, filters_JSON...]`: used to request events and subscribe to new updates.
///       A REQ message may contain multiple filters. In this case, events that match any of the filters are to be returned,
///       i.e., multiple filters are to be interpreted as `||` conditions.
///
///  - `["CLOSE", subscription_id]`: used to stop previous subscriptions. `subscription_id` is a random string used to represent a subscription.
///
// Internal `client_to_relay_communication` modules
pub mod close;
pub mod event;
pub mod request;

pub use crate::message::Error;
pub(crate) use crate::message::{checked_array, checked_array_min, parse_json};
