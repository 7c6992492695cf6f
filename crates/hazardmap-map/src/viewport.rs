//! Map viewport: center, zoom, and the Web Mercator math behind fit-to-bounds.

use crate::coords::{LatLng, LatLngBounds};
use std::f64::consts::PI;

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A requested view movement, kept for surfaces that animate transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewChange {
    pub center: LatLng,
    pub zoom: f64,
    pub animate: bool,
}

/// Current view of the map canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Canvas size in pixels (width, height)
    pub size: (f64, f64),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: LatLng::new(20.0, 0.0),
            zoom: 2.0,
            min_zoom: 0.0,
            max_zoom: 19.0,
            size: (1024.0, 768.0),
        }
    }
}

impl Viewport {
    /// Center on a position at the given zoom (clamped to the map's range)
    pub fn set_view(&mut self, center: LatLng, zoom: f64, animate: bool) -> ViewChange {
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        ViewChange { center: self.center, zoom: self.zoom, animate }
    }

    /// Fit bounds inside the canvas minus `padding` pixels on each side.
    ///
    /// The zoom is snapped down to an integer level and capped at `max_zoom`.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64, max_zoom: f64) -> ViewChange {
        let zoom = self.bounds_zoom(bounds, padding).min(max_zoom);
        let center = bounds_center(bounds);
        self.set_view(center, zoom, true)
    }

    /// Largest integer zoom at which `bounds` fits the padded canvas
    pub fn bounds_zoom(&self, bounds: &LatLngBounds, padding: f64) -> f64 {
        let (sw_x, sw_y) = project(&bounds.south_west);
        let (ne_x, ne_y) = project(&bounds.north_east);
        let span_x = (ne_x - sw_x).abs() * TILE_SIZE;
        let span_y = (ne_y - sw_y).abs() * TILE_SIZE;

        let avail_x = (self.size.0 - 2.0 * padding).max(1.0);
        let avail_y = (self.size.1 - 2.0 * padding).max(1.0);

        let scale_x = if span_x > 0.0 { avail_x / span_x } else { f64::INFINITY };
        let scale_y = if span_y > 0.0 { avail_y / span_y } else { f64::INFINITY };
        let scale = scale_x.min(scale_y);

        if !scale.is_finite() {
            return self.max_zoom;
        }
        scale.log2().floor().clamp(self.min_zoom, self.max_zoom)
    }
}

/// Spherical Mercator projection onto the unit square (x right, y down)
fn project(p: &LatLng) -> (f64, f64) {
    let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p.lng + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x, y)
}

fn unproject(x: f64, y: f64) -> LatLng {
    let lng = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Center of the bounds in projected space
fn bounds_center(bounds: &LatLngBounds) -> LatLng {
    let (sw_x, sw_y) = project(&bounds.south_west);
    let (ne_x, ne_y) = project(&bounds.north_east);
    unproject((sw_x + ne_x) / 2.0, (sw_y + ne_y) / 2.0)
}
