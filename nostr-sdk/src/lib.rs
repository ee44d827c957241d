pub mod client_to_relay_communication;
pub mod event;
pub mod filter;
mod message;
pub mod relay_to_client_communication;
pub mod schnorr;
