//! Integration tests for event-to-layer rendering
//!
//! These tests feed events decoded from API-shaped JSON through the map and
//! check which ones become layers.

use hazardmap_core::models::Event;
use hazardmap_map::{LatLng, LayerShape, MapState, SkipReason};
use serde_json::json;

fn event(id: &str, kind: &str, coordinates: serde_json::Value) -> Event {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Event {}", id),
        "status": "open",
        "categories": [{"id": 8, "title": "Wildfires"}],
        "geometry": [{"date": "2024-06-01T00:00:00Z", "type": kind, "coordinates": coordinates}]
    }))
    .unwrap()
}

#[test]
fn test_point_range_validation() {
    let events = vec![
        event("lat-out", "Point", json!([0.0, 91.0])),
        event("lng-out", "Point", json!([200.0, 45.0])),
        event("ok", "Point", json!([120.0, 45.0])),
    ];

    let mut map = MapState::default();
    let stats = map.render(&events);

    assert_eq!(stats.rendered, 1);
    assert_eq!(stats.skipped[&SkipReason::InvalidPoint], 2);
    assert!(map.layer("lat-out").is_none());
    assert!(map.layer("lng-out").is_none());

    let layer = map.layer("ok").unwrap();
    assert_eq!(layer.shape, LayerShape::Marker { center: LatLng::new(45.0, 120.0) });
    assert_eq!(layer.tooltip.category, "Wildfires");
}

#[test]
fn test_polygon_all_rings_malformed() {
    let events = vec![event("bad", "Polygon", json!([1, "two", {"three": 3}]))];

    let mut map = MapState::default();
    let stats = map.render(&events);

    assert_eq!(stats.rendered, 0);
    assert_eq!(stats.skipped[&SkipReason::NoValidRings], 1);
    assert!(map.layer("bad").is_none());
}

#[test]
fn test_polygon_keeps_only_valid_rings() {
    let events = vec![event(
        "mixed",
        "Polygon",
        json!([
            [[-120.0, 35.0], [-119.0, 35.0], [-119.0, 36.0], [-120.0, 35.0]],
            "corrupted"
        ]),
    )];

    let mut map = MapState::default();
    map.render(&events);

    let layer = map.layer("mixed").unwrap();
    match &layer.shape {
        LayerShape::Polygon { rings, bounds } => {
            assert_eq!(rings.len(), 1);
            assert_eq!(rings[0][0], LatLng::new(35.0, -120.0));
            assert_eq!(bounds.south_west, LatLng::new(35.0, -120.0));
            assert_eq!(bounds.north_east, LatLng::new(36.0, -119.0));
        }
        other => panic!("Expected polygon, got {:?}", other),
    }
}

#[test]
fn test_index_matches_layers_after_rerender() {
    let first = vec![
        event("a", "Point", json!([1.0, 1.0])),
        event("b", "Point", json!([2.0, 2.0])),
    ];
    let second = vec![event("b", "Point", json!([3.0, 3.0]))];

    let mut map = MapState::default();
    map.render(&first);
    map.render(&second);

    assert_eq!(map.layers().len(), 1);
    assert!(map.layer("a").is_none());
    assert_eq!(map.layer("b").unwrap().center(), Some(LatLng::new(3.0, 3.0)));
}

#[test]
fn test_malformed_samples_do_not_fail_the_response() {
    let events: Vec<Event> = serde_json::from_value(json!([
        {
            "id": "good",
            "title": "Good fire",
            "geometry": [{"date": "2024-06-01T00:00:00Z", "type": "Point", "coordinates": [10.0, 20.0]}]
        },
        {
            "id": "untyped",
            "title": "No type",
            "geometry": [{"date": "2024-06-01T00:00:00Z", "coordinates": [11.0, 21.0]}]
        },
        {
            "id": "epoch",
            "title": "Numeric date",
            "geometry": [{"date": 1704067200000u64, "type": "Point", "coordinates": [12.0, 22.0]}]
        }
    ]))
    .unwrap();
    assert_eq!(events.len(), 3);

    let mut map = MapState::default();
    let stats = map.render(&events);

    assert_eq!(stats.rendered, 2);
    assert_eq!(stats.skipped[&SkipReason::UnsupportedKind], 1);
    assert!(map.layer("good").is_some());
    assert!(map.layer("untyped").is_none());
    assert_eq!(map.layer("epoch").unwrap().tooltip.date_label, "Unknown date");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_point_rendered_iff_in_range(lat in -180.0f64..180.0, lng in -360.0f64..360.0) {
            let mut map = MapState::default();
            map.render(&[event("p", "Point", json!([lng, lat]))]);

            let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng);
            prop_assert_eq!(map.layer("p").is_some(), in_range);
        }
    }
}
