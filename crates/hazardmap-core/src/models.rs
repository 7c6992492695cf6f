pub mod category;
pub mod event;
pub mod filter;
pub mod geometry;

pub use category::{Category, CategoryId};
pub use event::{Event, EventStatus, Source};
pub use filter::{EventFilter, FilterSelection, FilterUpdate, Limit, StatusFilter};
pub use geometry::{format_timestamp, parse_timestamp, GeometryKind, GeometrySample};
