use hazardmap_core::models::category::fallback_title;
use hazardmap_core::models::{Category, CategoryId, Event};
use serde::Serialize;
use std::collections::HashMap;

/// Number of categories shown in the summary chart
pub const MAX_ROWS: usize = 8;
pub const NO_EVENTS: &str = "No events loaded.";

/// One bar of the per-category chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub category_id: CategoryId,
    pub title: String,
    pub count: usize,
    /// Bar width relative to the largest displayed count (0-100)
    pub width_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountsView {
    Placeholder { message: String },
    Rows { rows: Vec<CountRow> },
}

impl CountsView {
    pub fn rows(&self) -> &[CountRow] {
        match self {
            CountsView::Rows { rows } => rows,
            CountsView::Placeholder { .. } => &[],
        }
    }
}

/// Tally events by primary category and keep the largest buckets.
///
/// Events without a primary category are left out of the tally. Rows are
/// sorted by descending count; equal counts keep first-seen order.
pub fn render_counts_by_category(events: &[Event], categories: &[Category]) -> CountsView {
    if events.is_empty() {
        return CountsView::Placeholder { message: NO_EVENTS.to_string() };
    }

    let mut order: Vec<(CategoryId, usize)> = Vec::new();
    let mut position: HashMap<CategoryId, usize> = HashMap::new();
    for event in events {
        let Some(primary) = event.primary_category() else {
            continue;
        };
        match position.get(&primary.id) {
            Some(&i) => order[i].1 += 1,
            None => {
                position.insert(primary.id, order.len());
                order.push((primary.id, 1));
            }
        }
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(MAX_ROWS);

    let titles: HashMap<CategoryId, String> =
        categories.iter().map(|c| (c.id, c.display_title())).collect();
    let max = order.iter().map(|(_, n)| *n).max().unwrap_or(1).max(1);

    let rows = order
        .into_iter()
        .map(|(id, count)| CountRow {
            category_id: id,
            title: titles.get(&id).cloned().unwrap_or_else(|| fallback_title(id)),
            count,
            width_percent: ((count as f64 / max as f64) * 100.0).round() as u32,
        })
        .collect();

    CountsView::Rows { rows }
}
