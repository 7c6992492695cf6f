//! Port definitions

use crate::error::Result;
use crate::models::{Category, Event, EventFilter};
use async_trait::async_trait;

/// Port for reading hazard categories and events
#[async_trait]
pub trait EventSource: Send + Sync {
    /// List all hazard categories
    async fn fetch_categories(&self) -> Result<Vec<Category>>;

    /// List events matching the filter
    ///
    /// # Arguments
    /// * `filter` - Status, limit and category selection to query with
    async fn fetch_events(&self, filter: &EventFilter) -> Result<Vec<Event>>;
}
