//! Filter controls: status selector, limit selector, and category pills.
//!
//! The controls never change state themselves. A user interaction arrives as
//! a [`ControlEvent`]; [`ControlEvent::to_update`] turns it into the partial
//! update the coordinator merges.

use hazardmap_core::models::{Category, CategoryId, FilterSelection, FilterUpdate, Limit, StatusFilter};
use serde::Serialize;

/// One entry of a select box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption<T> {
    pub value: T,
    pub label: String,
    pub selected: bool,
}

/// Toggle pill for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPill {
    pub id: CategoryId,
    pub title: String,
    pub is_on: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    pub status_options: Vec<SelectOption<StatusFilter>>,
    pub limit_options: Vec<SelectOption<Limit>>,
    pub pills: Vec<CategoryPill>,
}

impl ControlsView {
    pub fn selected_status(&self) -> Option<StatusFilter> {
        self.status_options.iter().find(|o| o.selected).map(|o| o.value)
    }

    pub fn selected_limit(&self) -> Option<Limit> {
        self.limit_options.iter().find(|o| o.selected).map(|o| o.value)
    }

    pub fn pill(&self, id: CategoryId) -> Option<&CategoryPill> {
        self.pills.iter().find(|p| p.id == id)
    }
}

/// A change made through one of the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    StatusChanged(StatusFilter),
    LimitChanged(Limit),
    CategoryToggled(CategoryId),
}

impl ControlEvent {
    /// Partial update for this change, relative to the current selection.
    ///
    /// Toggling removes the id if present and adds it otherwise; every other
    /// selected id is carried over unchanged.
    pub fn to_update(&self, current: &FilterSelection) -> FilterUpdate {
        match *self {
            ControlEvent::StatusChanged(status) => FilterUpdate::status(status),
            ControlEvent::LimitChanged(limit) => FilterUpdate::limit(limit),
            ControlEvent::CategoryToggled(id) => {
                let mut next = current.category_ids.clone();
                if !next.remove(&id) {
                    next.insert(id);
                }
                FilterUpdate::category_ids(next)
            }
        }
    }
}

/// Build the controls for the current selection
pub fn render_controls(categories: &[Category], selection: &FilterSelection) -> ControlsView {
    let status_options = StatusFilter::ALL
        .iter()
        .map(|&value| SelectOption {
            value,
            label: value.as_str().to_uppercase(),
            selected: value == selection.status,
        })
        .collect();

    let limit_options = Limit::choices()
        .map(|value| SelectOption {
            value,
            label: value.to_string(),
            selected: value == selection.limit,
        })
        .collect();

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let pills = sorted
        .into_iter()
        .map(|c| CategoryPill {
            id: c.id,
            title: c.display_title(),
            is_on: selection.category_ids.contains(&c.id),
        })
        .collect();

    ControlsView { status_options, limit_options, pills }
}

// Case-insensitive first, raw title breaks ties; untitled sorts as ""
fn sort_key(category: &Category) -> (String, &str) {
    let raw = category.title.as_deref().unwrap_or("");
    (raw.to_lowercase(), raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category::new(10, "Severe Storms"),
            Category { id: 99, title: None },
            Category::new(8, "Wildfires"),
            Category::new(6, "drought"),
        ]
    }

    #[test]
    fn test_pills_sorted_by_title() {
        let view = render_controls(&categories(), &FilterSelection::default());
        let titles: Vec<&str> = view.pills.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Category 99", "drought", "Severe Storms", "Wildfires"]);
    }

    #[test]
    fn test_selection_is_reflected() {
        let mut selection = FilterSelection {
            status: StatusFilter::Closed,
            limit: Limit::new(100).unwrap(),
            ..Default::default()
        };
        selection.category_ids.insert(8);

        let view = render_controls(&categories(), &selection);
        assert_eq!(view.selected_status(), Some(StatusFilter::Closed));
        assert_eq!(view.selected_limit().map(|l| l.get()), Some(100));
        assert!(view.pill(8).unwrap().is_on);
        assert!(!view.pill(10).unwrap().is_on);

        let labels: Vec<&str> = view.status_options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["OPEN", "CLOSED", "ALL"]);
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = FilterSelection::default();
        selection.category_ids.extend([6, 8]);

        let removed = ControlEvent::CategoryToggled(8).to_update(&selection);
        assert_eq!(removed.category_ids.unwrap().into_iter().collect::<Vec<_>>(), vec![6]);

        let added = ControlEvent::CategoryToggled(10).to_update(&selection);
        assert_eq!(added.category_ids.unwrap().into_iter().collect::<Vec<_>>(), vec![6, 8, 10]);

        // the renderer does not mutate the selection
        assert_eq!(selection.category_ids.len(), 2);
    }

    #[test]
    fn test_status_and_limit_events() {
        let selection = FilterSelection::default();
        let update = ControlEvent::StatusChanged(StatusFilter::All).to_update(&selection);
        assert_eq!(update, FilterUpdate::status(StatusFilter::All));

        let limit = Limit::new(25).unwrap();
        let update = ControlEvent::LimitChanged(limit).to_update(&selection);
        assert_eq!(update, FilterUpdate::limit(limit));
    }
}
