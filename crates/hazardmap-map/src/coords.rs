//! Coordinate parsing and validation.
//!
//! The API delivers coordinates as (longitude, latitude); everything in this
//! crate past the parse functions is (latitude, longitude).

use geo::BoundingRect;
use serde_json::Value;

/// Position in map order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for geo::Point<f64> {
    fn from(p: LatLng) -> Self {
        geo::Point::new(p.lng, p.lat)
    }
}

/// Axis-aligned bounds in map order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Bounding box of a set of positions, `None` when empty
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let cloud: geo::MultiPoint<f64> =
            points.into_iter().map(|p| geo::Point::from(*p)).collect();
        cloud.bounding_rect().map(|rect| Self {
            south_west: LatLng::new(rect.min().y, rect.min().x),
            north_east: LatLng::new(rect.max().y, rect.max().x),
        })
    }
}

/// Latitude within [-90, 90] and longitude within [-180, 180], both finite
pub fn is_valid_lat_lng(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}

/// Parse a Point payload `[lng, lat, ...]`.
///
/// Returns `None` when the payload has fewer than two entries, a non-numeric
/// entry, or a position outside the valid latitude/longitude range.
pub fn parse_point(coordinates: &Value) -> Option<LatLng> {
    let values = coordinates.as_array()?;
    if values.len() < 2 {
        return None;
    }
    let lng = values[0].as_f64()?;
    let lat = values[1].as_f64()?;
    is_valid_lat_lng(lat, lng).then(|| LatLng::new(lat, lng))
}

/// Parse a Polygon payload `[[[lng, lat], ...], ...]` into rings.
///
/// A ring that is not an array, is empty, or holds a vertex that is not a pair
/// of finite numbers is dropped; the remaining rings keep their order.
pub fn parse_rings(coordinates: &Value) -> Vec<Vec<LatLng>> {
    let Some(rings) = coordinates.as_array() else {
        return Vec::new();
    };
    rings.iter().filter_map(parse_ring).collect()
}

fn parse_ring(ring: &Value) -> Option<Vec<LatLng>> {
    let vertices = ring.as_array()?;
    if vertices.is_empty() {
        return None;
    }
    vertices.iter().map(parse_vertex).collect()
}

fn parse_vertex(vertex: &Value) -> Option<LatLng> {
    let pair = vertex.as_array()?;
    if pair.len() < 2 {
        return None;
    }
    let lng = pair[0].as_f64()?;
    let lat = pair[1].as_f64()?;
    (lng.is_finite() && lat.is_finite()).then(|| LatLng::new(lat, lng))
}
