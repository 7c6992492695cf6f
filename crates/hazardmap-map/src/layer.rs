use crate::coords::{LatLng, LatLngBounds};
use crate::style::{self, PathStyle, StylePatch};
use hazardmap_core::latest_geometry_date;
use hazardmap_core::models::{format_timestamp, Event};

/// Opaque handle to a layer currently on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LayerHandle(pub(crate) usize);

/// Drawable shape of a layer
#[derive(Debug, Clone, PartialEq)]
pub enum LayerShape {
    /// Circle marker at a single position
    Marker { center: LatLng },
    /// Filled polygon; the first ring is the outline, the rest are holes
    Polygon { rings: Vec<Vec<LatLng>>, bounds: LatLngBounds },
}

/// Tooltip direction relative to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipDirection {
    Top,
}

/// Hover tooltip attached to a layer
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub category: String,
    pub date_label: String,
    /// Follows the pointer while hovering
    pub sticky: bool,
    pub direction: TooltipDirection,
}

impl Tooltip {
    pub fn for_event(event: &Event) -> Self {
        Self {
            title: event.display_title().to_string(),
            category: event.primary_category_title().to_string(),
            date_label: latest_geometry_date(event)
                .map(|ts| format_timestamp(&ts))
                .unwrap_or_else(|| "Unknown date".to_string()),
            sticky: true,
            direction: TooltipDirection::Top,
        }
    }

    /// Two-line plain text form: title, then "category • date"
    pub fn text(&self) -> String {
        format!("{}\n{} • {}", self.title, self.category, self.date_label)
    }
}

/// A live layer on the map, bound to one event
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub event_id: String,
    pub shape: LayerShape,
    pub style: PathStyle,
    pub tooltip: Tooltip,
    pub hovered: bool,
    /// Between `flash` and `end_flash`
    pub flashing: bool,
}

impl MapLayer {
    pub fn marker(event_id: impl Into<String>, center: LatLng, tooltip: Tooltip) -> Self {
        Self {
            event_id: event_id.into(),
            shape: LayerShape::Marker { center },
            style: style::MARKER,
            tooltip,
            hovered: false,
            flashing: false,
        }
    }

    /// Polygon layer; `None` when there are no vertices to bound
    pub fn polygon(
        event_id: impl Into<String>,
        rings: Vec<Vec<LatLng>>,
        tooltip: Tooltip,
    ) -> Option<Self> {
        let bounds = LatLngBounds::from_points(rings.iter().flatten())?;
        Some(Self {
            event_id: event_id.into(),
            shape: LayerShape::Polygon { rings, bounds },
            style: style::POLYGON,
            tooltip,
            hovered: false,
            flashing: false,
        })
    }

    /// Bounds of a polygon layer
    pub fn bounds(&self) -> Option<LatLngBounds> {
        match &self.shape {
            LayerShape::Polygon { bounds, .. } => Some(*bounds),
            LayerShape::Marker { .. } => None,
        }
    }

    /// Position of a marker layer
    pub fn center(&self) -> Option<LatLng> {
        match &self.shape {
            LayerShape::Marker { center } => Some(*center),
            LayerShape::Polygon { .. } => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self.shape, LayerShape::Marker { .. })
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        let patch = match (self.is_marker(), hovered) {
            (true, true) => style::MARKER_HOVER,
            (true, false) => style::MARKER_OUT,
            (false, true) => style::POLYGON_HOVER,
            (false, false) => StylePatch::from(style::POLYGON),
        };
        self.style.apply(&patch);
    }

    pub(crate) fn flash(&mut self) {
        self.flashing = true;
        self.style.apply(&style::FLASH);
    }

    /// Revert the flash to the type's default stroke
    pub(crate) fn end_flash(&mut self) {
        self.flashing = false;
        let patch = if self.is_marker() {
            StylePatch { color: Some(style::MARKER.color), ..Default::default() }
        } else {
            StylePatch::from(style::POLYGON)
        };
        self.style.apply(&patch);
    }
}
