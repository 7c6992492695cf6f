//! The persistent map: layer group, layer index, and viewport.

use crate::coords::{parse_point, parse_rings};
use crate::layer::{LayerHandle, MapLayer, Tooltip};
use crate::tiles::TileSource;
use crate::viewport::{ViewChange, Viewport};
use hazardmap_core::latest_geometry;
use hazardmap_core::models::{Event, GeometryKind};
use std::collections::HashMap;

/// Padding in pixels kept around polygon bounds when zooming to them
pub const FIT_PADDING: f64 = 30.0;
/// Zoom cap when fitting polygon bounds
pub const FIT_MAX_ZOOM: f64 = 7.0;
/// Minimum zoom when centering on a marker
pub const MARKER_MIN_ZOOM: f64 = 6.0;

/// Why an event produced no layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    MissingId,
    NoGeometry,
    NoCoordinates,
    InvalidPoint,
    NoValidRings,
    UnsupportedKind,
}

/// Outcome of one render pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rendered: usize,
    pub skipped: HashMap<SkipReason, usize>,
}

impl RenderStats {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Map instance created once at startup and re-rendered in place
#[derive(Debug, Clone, Default)]
pub struct MapState {
    pub viewport: Viewport,
    pub tiles: TileSource,
    layers: Vec<MapLayer>,
    index: HashMap<String, LayerHandle>,
    last_view_change: Option<ViewChange>,
}

impl MapState {
    pub fn new(tiles: TileSource) -> Self {
        Self { tiles, ..Default::default() }
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    /// Layer registered for an event id
    pub fn layer(&self, event_id: &str) -> Option<&MapLayer> {
        self.index.get(event_id).and_then(|h| self.layers.get(h.0))
    }

    /// Most recent zoom/center request, for surfaces that animate it
    pub fn last_view_change(&self) -> Option<ViewChange> {
        self.last_view_change
    }

    /// Remove every layer and forget the index
    pub fn clear(&mut self) {
        self.layers.clear();
        self.index.clear();
    }

    /// Replace all layers with one layer per drawable event.
    ///
    /// The layer index is rebuilt from scratch; events that cannot be drawn
    /// are counted in the returned stats and otherwise ignored.
    pub fn render(&mut self, events: &[Event]) -> RenderStats {
        self.clear();
        let mut stats = RenderStats::default();

        for event in events {
            match build_layer(event) {
                Ok(layer) => {
                    let handle = LayerHandle(self.layers.len());
                    self.index.insert(layer.event_id.clone(), handle);
                    self.layers.push(layer);
                    stats.rendered += 1;
                }
                Err(reason) => {
                    tracing::trace!(event_id = ?event.id, ?reason, "Event not drawn");
                    *stats.skipped.entry(reason).or_insert(0) += 1;
                }
            }
        }

        tracing::debug!(
            rendered = stats.rendered,
            skipped = stats.skipped_total(),
            "Rendered events on map"
        );
        stats
    }

    /// Move the view to an event's layer; `None` when it has no layer
    pub fn zoom_to_event(&mut self, event_id: &str) -> Option<ViewChange> {
        let layer = self.layer(event_id)?;

        let change = if let Some(bounds) = layer.bounds() {
            self.viewport.fit_bounds(&bounds, FIT_PADDING, FIT_MAX_ZOOM)
        } else {
            let center = layer.center()?;
            let zoom = self.viewport.zoom.max(MARKER_MIN_ZOOM);
            self.viewport.set_view(center, zoom, true)
        };

        self.last_view_change = Some(change);
        Some(change)
    }

    /// Highlight an event's stroke; returns false when it has no layer
    pub fn flash_event(&mut self, event_id: &str) -> bool {
        self.with_layer(event_id, MapLayer::flash)
    }

    /// Restore the default stroke after a flash
    pub fn end_flash(&mut self, event_id: &str) -> bool {
        self.with_layer(event_id, MapLayer::end_flash)
    }

    /// Apply or remove the hover style
    pub fn set_hover(&mut self, event_id: &str, hovered: bool) -> bool {
        self.with_layer(event_id, |layer| layer.set_hovered(hovered))
    }

    fn with_layer(&mut self, event_id: &str, f: impl FnOnce(&mut MapLayer)) -> bool {
        let Some(handle) = self.index.get(event_id) else {
            return false;
        };
        match self.layers.get_mut(handle.0) {
            Some(layer) => {
                f(layer);
                true
            }
            None => false,
        }
    }
}

/// Map one event to a layer using its latest geometry sample
pub fn build_layer(event: &Event) -> Result<MapLayer, SkipReason> {
    let id = match event.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(SkipReason::MissingId),
    };
    let latest = latest_geometry(event).ok_or(SkipReason::NoGeometry)?;
    let coordinates = match &latest.coordinates {
        Some(c) if !c.is_null() => c,
        _ => return Err(SkipReason::NoCoordinates),
    };

    let tooltip = Tooltip::for_event(event);
    match latest.kind {
        GeometryKind::Point => {
            let center = parse_point(coordinates).ok_or(SkipReason::InvalidPoint)?;
            Ok(MapLayer::marker(id, center, tooltip))
        }
        GeometryKind::Polygon => {
            let rings = parse_rings(coordinates);
            MapLayer::polygon(id, rings, tooltip).ok_or(SkipReason::NoValidRings)
        }
        GeometryKind::Other(_) => Err(SkipReason::UnsupportedKind),
    }
}
