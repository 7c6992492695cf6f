//! URL construction for the hazard API endpoints

use hazardmap_core::error::{HazardError, Result};
use hazardmap_core::models::EventFilter;
use reqwest::Url;

/// URL of the category listing endpoint
pub fn categories_url(base_url: &str) -> Result<Url> {
    endpoint(base_url, "categories")
}

/// URL of the event listing endpoint with the filter encoded as query parameters.
///
/// `status` is omitted when the filter has none, `limit` is always present,
/// and `category` is the comma-joined id list, omitted when empty.
pub fn events_url(base_url: &str, filter: &EventFilter) -> Result<Url> {
    let mut url = endpoint(base_url, "events")?;

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(status) = filter.status {
            pairs.append_pair("status", status.as_str());
        }
        pairs.append_pair("limit", &filter.limit.to_string());
        if let Some(categories) = filter.category_param() {
            pairs.append_pair("category", &categories);
        }
    }

    Ok(url)
}

fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| HazardError::ConfigInvalid {
        key: "api_base_url".to_string(),
        reason: format!("'{}' is not a valid URL: {}", base_url, e),
    })
}
