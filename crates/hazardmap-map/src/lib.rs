//! Hazardmap Map - Event-to-layer mapping and map view state
//!
//! This crate turns events into drawable map layers (circle markers and
//! polygons), keeps the index from event id to live layer, and tracks the
//! viewport for zoom-to-event requests.

pub mod coords;
pub mod layer;
pub mod state;
pub mod style;
pub mod tiles;
pub mod viewport;

pub use coords::{LatLng, LatLngBounds};
pub use layer::{LayerShape, MapLayer, Tooltip};
pub use state::{MapState, RenderStats, SkipReason};
pub use tiles::TileSource;
pub use viewport::{ViewChange, Viewport};
