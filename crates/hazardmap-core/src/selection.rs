//! Selection of the temporally latest geometry sample of an event.

use crate::models::{Event, GeometrySample};
use chrono::{DateTime, Utc};

/// Latest geometry sample of an event, or `None` if it has no geometry.
///
/// Samples are ordered by parsed date; an unparsable or missing date orders
/// before every parsable one. Among equal dates the sample appearing last in
/// arrival order wins. The event's own sequence is not reordered.
pub fn latest_geometry(event: &Event) -> Option<&GeometrySample> {
    // max_by_key yields the last maximum, which gives the stable tie-break
    event.geometry.iter().max_by_key(|sample| sample.timestamp())
}

/// Date of the latest geometry sample, if that date parses
pub fn latest_geometry_date(event: &Event) -> Option<DateTime<Utc>> {
    latest_geometry(event).and_then(GeometrySample::timestamp)
}
