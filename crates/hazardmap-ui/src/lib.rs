//! Hazardmap UI - View models for the filter controls, summary, and detail card
//!
//! Every renderer here is a pure function from application state to a view
//! model. The `Surface` port is where those view models get displayed.

pub mod banner;
pub mod controls;
pub mod detail;
pub mod summary;
pub mod surface;

pub use banner::{BannerTone, StatusBanner};
pub use controls::{render_controls, CategoryPill, ControlEvent, ControlsView, SelectOption};
pub use detail::{render_event_card, EventCard, EventCardView, SourceLink};
pub use summary::{render_counts_by_category, CountRow, CountsView};
pub use surface::Surface;
