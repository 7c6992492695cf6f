//! Geometry samples attached to hazard events.
//!
//! A sample is kept close to the wire shape: the date stays a raw string and the
//! coordinates stay an untyped JSON value. Parsing happens lazily, and every
//! parse failure degrades to `None` instead of an error, so a single malformed
//! sample never poisons a whole event list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Geometry type of a sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeometryKind {
    Point,
    Polygon,
    /// Any type the map cannot draw (kept for display and counting)
    Other(String),
}

impl From<String> for GeometryKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Point" => GeometryKind::Point,
            "Polygon" => GeometryKind::Polygon,
            _ => GeometryKind::Other(value),
        }
    }
}

impl From<GeometryKind> for String {
    fn from(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Point => "Point".to_string(),
            GeometryKind::Polygon => "Polygon".to_string(),
            GeometryKind::Other(name) => name,
        }
    }
}

/// A missing type is an unnamed kind the map cannot draw
impl Default for GeometryKind {
    fn default() -> Self {
        GeometryKind::Other(String::new())
    }
}

/// One observed shape/location of an event at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySample {
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "deserialize_kind")]
    pub kind: GeometryKind,

    /// Nested numeric structure in (longitude, latitude) order
    #[serde(default, deserialize_with = "deserialize_coordinates")]
    pub coordinates: Option<Value>,
}

// Wrong-typed fields degrade to absent
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => Some(raw),
        _ => None,
    })
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<GeometryKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => GeometryKind::from(name),
        _ => GeometryKind::default(),
    })
}

fn deserialize_coordinates<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Array(_)) => Some(value),
        _ => None,
    })
}

impl GeometrySample {
    /// Create a Point sample from (longitude, latitude)
    pub fn point(date: impl Into<String>, lng: f64, lat: f64) -> Self {
        Self {
            date: Some(date.into()),
            kind: GeometryKind::Point,
            coordinates: Some(serde_json::json!([lng, lat])),
        }
    }

    /// Create a Polygon sample from rings of (longitude, latitude) pairs
    pub fn polygon(date: impl Into<String>, rings: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            date: Some(date.into()),
            kind: GeometryKind::Polygon,
            coordinates: Some(serde_json::json!(rings)),
        }
    }

    /// Parsed sample date; `None` when missing or unparsable
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_timestamp)
    }
}

/// Parse an API timestamp.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS` (read as UTC), and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Display form used by tooltips and the detail card
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}
