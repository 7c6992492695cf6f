//! Hazardmap Client - HTTP adapter for the EONET hazard API
//!
//! This crate implements the `EventSource` port against the remote
//! read-only API: one request for the category list, one for events.

pub mod eonet;
pub mod query;

pub use eonet::EonetClient;
pub use query::{categories_url, events_url};
