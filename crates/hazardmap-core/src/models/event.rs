use crate::models::{Category, GeometrySample};
use serde::{Deserialize, Deserializer, Serialize};

/// Label used when an event carries no primary category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Lifecycle status reported for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Open,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Open => "open",
            EventStatus::Closed => "closed",
            EventStatus::Unknown => "unknown",
        }
    }
}

/// External reference for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Source {
    /// Link text, falling back to "source"
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("source")
    }
}

/// Natural-hazard occurrence with its geometry samples over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: EventStatus,

    /// First entry is the primary category
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Samples in arrival order (not necessarily chronological)
    #[serde(default, alias = "geometries")]
    pub geometry: Vec<GeometrySample>,

    #[serde(default)]
    pub sources: Vec<Source>,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            status: EventStatus::Open,
            categories: Vec::new(),
            geometry: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_geometry(mut self, sample: GeometrySample) -> Self {
        self.geometry.push(sample);
        self
    }

    pub fn with_source(mut self, id: impl Into<String>, url: impl Into<String>) -> Self {
        self.sources.push(Source { id: Some(id.into()), url: Some(url.into()) });
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Title shown to the user
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled event")
    }

    pub fn primary_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Title of the primary category, or "Uncategorized"
    pub fn primary_category_title(&self) -> &str {
        self.primary_category()
            .and_then(|c| c.title.as_deref())
            .unwrap_or(UNCATEGORIZED)
    }

    /// True when `other` refers to the same event id
    pub fn same_id(&self, other: &Event) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

// `null` and unrecognised strings both map to Unknown
fn deserialize_status<'de, D>(deserializer: D) -> Result<EventStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<EventStatus>::deserialize(deserializer)?.unwrap_or_default())
}
