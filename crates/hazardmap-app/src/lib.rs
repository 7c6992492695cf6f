//! Hazardmap App - Application coordinator
//!
//! Owns the application state and the map, reacts to commands from a
//! front-end, and pushes rendered views to a [`hazardmap_ui::Surface`].

pub mod coordinator;
pub mod debounce;
pub mod state;

pub use coordinator::{Command, Coordinator, CoordinatorHandle, CoordinatorOptions};
pub use debounce::Debouncer;
pub use state::{AppState, Phase};
