use serde::{Deserialize, Serialize};

/// Category identifier as issued by the hazard API
pub type CategoryId = u32;

/// Hazard category (e.g. "Wildfires", "Severe Storms")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub title: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, title: impl Into<String>) -> Self {
        Self { id, title: Some(title.into()) }
    }

    /// Title shown to the user, falling back to `Category {id}`
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => fallback_title(self.id),
        }
    }
}

/// Label used wherever a category id cannot be resolved to a title
pub fn fallback_title(id: CategoryId) -> String {
    format!("Category {}", id)
}
