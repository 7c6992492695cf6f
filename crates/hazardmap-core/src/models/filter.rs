//! Filter values shared by the controls, the coordinator, and the API client.

use crate::error::{HazardError, Result};
use crate::models::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Status filter sent to the events endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::Open, StatusFilter::Closed, StatusFilter::All];

    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
            StatusFilter::All => "all",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(StatusFilter::Open),
            "closed" => Ok(StatusFilter::Closed),
            "all" => Ok(StatusFilter::All),
            _ => Err(HazardError::ConfigInvalid {
                key: "status".to_string(),
                reason: format!("Invalid status: {}. Use open, closed, or all", s),
            }),
        }
    }
}

/// Maximum number of events requested; restricted to [`Limit::CHOICES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Limit(u32);

impl Limit {
    pub const CHOICES: [u32; 3] = [25, 50, 100];

    pub fn new(value: u32) -> Result<Self> {
        if Self::CHOICES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(HazardError::ConfigInvalid {
                key: "limit".to_string(),
                reason: format!("Invalid limit: {}. Use one of {:?}", value, Self::CHOICES),
            })
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// All selectable limits, in display order
    pub fn choices() -> impl Iterator<Item = Limit> {
        Self::CHOICES.into_iter().map(Limit)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u32> for Limit {
    type Error = HazardError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Limit> for u32 {
    fn from(limit: Limit) -> Self {
        limit.0
    }
}

impl FromStr for Limit {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().parse::<u32>().map_err(|_| HazardError::ConfigInvalid {
            key: "limit".to_string(),
            reason: format!("Invalid limit: {}. Expected an integer", s),
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query filter for the events endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventFilter {
    /// `None` omits the `status` parameter entirely
    pub status: Option<StatusFilter>,
    pub limit: Limit,
    pub category_ids: BTreeSet<CategoryId>,
}

impl EventFilter {
    /// Comma-joined category ids, or `None` when no category is selected
    pub fn category_param(&self) -> Option<String> {
        if self.category_ids.is_empty() {
            return None;
        }
        let ids: Vec<String> = self.category_ids.iter().map(|id| id.to_string()).collect();
        Some(ids.join(","))
    }
}

/// Partial update produced by a control change; absent fields are left alone
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub status: Option<StatusFilter>,
    pub limit: Option<Limit>,
    pub category_ids: Option<BTreeSet<CategoryId>>,
}

impl FilterUpdate {
    pub fn status(status: StatusFilter) -> Self {
        Self { status: Some(status), ..Default::default() }
    }

    pub fn limit(limit: Limit) -> Self {
        Self { limit: Some(limit), ..Default::default() }
    }

    pub fn category_ids(ids: BTreeSet<CategoryId>) -> Self {
        Self { category_ids: Some(ids), ..Default::default() }
    }
}

/// Filter values currently chosen in the controls
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub status: StatusFilter,
    pub limit: Limit,
    pub category_ids: BTreeSet<CategoryId>,
}

impl FilterSelection {
    /// Merge a partial update; absent fields keep their value
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(limit) = update.limit {
            self.limit = limit;
        }
        if let Some(category_ids) = update.category_ids {
            self.category_ids = category_ids;
        }
    }

    /// Query for the events endpoint
    pub fn to_query(&self) -> EventFilter {
        EventFilter {
            status: Some(self.status),
            limit: self.limit,
            category_ids: self.category_ids.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!("open".parse::<StatusFilter>().unwrap(), StatusFilter::Open);
        assert_eq!("CLOSED".parse::<StatusFilter>().unwrap(), StatusFilter::Closed);
        assert_eq!(" all ".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert!("pending".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_limit_choices() {
        assert_eq!(Limit::new(25).unwrap().get(), 25);
        assert_eq!(Limit::default().get(), 50);
        assert!(Limit::new(30).is_err());
        assert!("abc".parse::<Limit>().is_err());
        assert_eq!("100".parse::<Limit>().unwrap().get(), 100);

        let all: Vec<u32> = Limit::choices().map(|l| l.get()).collect();
        assert_eq!(all, vec![25, 50, 100]);
    }

    #[test]
    fn test_limit_serde_rejects_unknown_values() {
        let ok: Limit = serde_json::from_str("25").unwrap();
        assert_eq!(ok.get(), 25);
        assert!(serde_json::from_str::<Limit>("7").is_err());
    }

    #[test]
    fn test_category_param() {
        let mut filter = EventFilter::default();
        assert_eq!(filter.category_param(), None);

        filter.category_ids.extend([12, 8, 10]);
        assert_eq!(filter.category_param().as_deref(), Some("8,10,12"));
    }

    #[test]
    fn test_selection_apply_merges_present_fields() {
        let mut selection = FilterSelection::default();
        selection.category_ids.insert(8);

        selection.apply(FilterUpdate::limit(Limit::new(100).unwrap()));
        assert_eq!(selection.limit.get(), 100);
        assert_eq!(selection.status, StatusFilter::Open);
        assert!(selection.category_ids.contains(&8));

        selection.apply(FilterUpdate::category_ids(BTreeSet::new()));
        assert!(selection.category_ids.is_empty());

        let query = selection.to_query();
        assert_eq!(query.status, Some(StatusFilter::Open));
        assert_eq!(query.limit.get(), 100);
    }

    #[test]
    fn test_filter_update_constructors() {
        let update = FilterUpdate::status(StatusFilter::Closed);
        assert_eq!(update.status, Some(StatusFilter::Closed));
        assert!(update.limit.is_none());
        assert!(update.category_ids.is_none());
    }
}
