use hazardmap_core::latest_geometry_date;
use hazardmap_core::models::event::UNCATEGORIZED;
use hazardmap_core::models::{format_timestamp, Event};
use serde::Serialize;

pub const SELECT_PROMPT: &str = "Click an event on the map to see details here.";
pub const NO_SOURCES: &str = "No sources listed.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    pub label: String,
    pub url: Option<String>,
}

/// Detail card for the selected event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub title: String,
    pub tags: Vec<String>,
    pub status: String,
    pub latest_geometry: String,
    pub geometry_count: usize,
    /// Event id the zoom action targets
    pub zoom_target: Option<String>,
    pub sources: Vec<SourceLink>,
}

impl EventCard {
    /// Placeholder text shown instead of an empty source list
    pub fn sources_placeholder(&self) -> Option<&'static str> {
        self.sources.is_empty().then_some(NO_SOURCES)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventCardView {
    /// Muted prompt shown while nothing is selected
    Placeholder { message: String },
    Card(EventCard),
}

impl EventCardView {
    pub fn card(&self) -> Option<&EventCard> {
        match self {
            EventCardView::Card(card) => Some(card),
            EventCardView::Placeholder { .. } => None,
        }
    }
}

pub fn render_event_card(event: Option<&Event>) -> EventCardView {
    let Some(event) = event else {
        return EventCardView::Placeholder { message: SELECT_PROMPT.to_string() };
    };

    let mut tags: Vec<String> = event.categories.iter().map(|c| c.display_title()).collect();
    if tags.is_empty() {
        tags.push(UNCATEGORIZED.to_string());
    }

    EventCardView::Card(EventCard {
        title: event.display_title().to_string(),
        tags,
        status: event.status.as_str().to_uppercase(),
        latest_geometry: latest_geometry_date(event)
            .map(|ts| format_timestamp(&ts))
            .unwrap_or_else(|| "Unknown".to_string()),
        geometry_count: event.geometry.len(),
        zoom_target: event.id.clone(),
        sources: event
            .sources
            .iter()
            .map(|s| SourceLink { label: s.label().to_string(), url: s.url.clone() })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazardmap_core::models::{Category, EventStatus, GeometrySample, Source};

    #[test]
    fn test_placeholder() {
        let view = render_event_card(None);
        assert_eq!(view, EventCardView::Placeholder { message: SELECT_PROMPT.to_string() });
        assert!(view.card().is_none());
    }

    #[test]
    fn test_full_card() {
        let event = Event::new("EONET_42", "Tropical Storm Kirk")
            .with_status(EventStatus::Closed)
            .with_category(Category::new(10, "Severe Storms"))
            .with_category(Category { id: 99, title: None })
            .with_geometry(GeometrySample::point("2024-10-01T00:00:00Z", -40.0, 15.0))
            .with_geometry(GeometrySample::point("2024-10-02T06:00:00Z", -42.0, 16.0))
            .with_source("JTWC", "https://jtwc.example/kirk");

        let view = render_event_card(Some(&event));
        let card = view.card().unwrap();

        assert_eq!(card.title, "Tropical Storm Kirk");
        assert_eq!(card.tags, vec!["Severe Storms", "Category 99"]);
        assert_eq!(card.status, "CLOSED");
        assert_eq!(card.latest_geometry, "2024-10-02 06:00 UTC");
        assert_eq!(card.geometry_count, 2);
        assert_eq!(card.zoom_target.as_deref(), Some("EONET_42"));
        assert_eq!(card.sources[0].label, "JTWC");
        assert!(card.sources_placeholder().is_none());
    }

    #[test]
    fn test_sparse_card() {
        let mut event = Event::new("E", "x");
        event.title = None;
        event.status = EventStatus::Unknown;
        event.sources.push(Source { id: None, url: Some("https://example.org".to_string()) });

        let view = render_event_card(Some(&event));
        let card = view.card().unwrap();

        assert_eq!(card.title, "Untitled event");
        assert_eq!(card.tags, vec!["Uncategorized"]);
        assert_eq!(card.status, "UNKNOWN");
        assert_eq!(card.latest_geometry, "Unknown");
        assert_eq!(card.geometry_count, 0);
        assert_eq!(card.sources[0].label, "source");
    }

    #[test]
    fn test_no_sources_placeholder() {
        let view = render_event_card(Some(&Event::new("E", "Quiet")));
        assert_eq!(view.card().unwrap().sources_placeholder(), Some(NO_SOURCES));
    }
}
