//! Hazardmap Core - Domain models, filters, configuration, and ports
//!
//! This crate contains the event/category records returned by the hazard API,
//! the geometry selection rules shared by every renderer, and the port through
//! which the rest of the system reads events.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod selection;

pub use error::{HazardError, Result};
pub use selection::{latest_geometry, latest_geometry_date};
