use hazardmap_core::models::{Category, Event, FilterSelection};

/// Whether a fetch is pending or in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}

/// Application state, written only by the coordinator
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub filter: FilterSelection,
    pub categories: Vec<Category>,
    /// Events from the last successful fetch
    pub events: Vec<Event>,
    pub selected_event: Option<Event>,
    pub phase: Phase,
}

impl AppState {
    pub fn new(filter: FilterSelection) -> Self {
        Self { filter, ..Default::default() }
    }

    pub fn find_event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id.as_deref() == Some(event_id))
    }

    /// Re-point the selection at the matching event of the current list.
    ///
    /// Returns false when the selected event is no longer present, in which
    /// case the selection is cleared.
    pub fn reconcile_selection(&mut self) -> bool {
        let Some(selected) = self.selected_event.take() else {
            return true;
        };
        match self.events.iter().find(|e| e.same_id(&selected)) {
            Some(current) => {
                self.selected_event = Some(current.clone());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_refreshes_present_event() {
        let mut state = AppState::default();
        state.selected_event = Some(Event::new("A", "Old title"));
        state.events = vec![Event::new("A", "New title")];

        assert!(state.reconcile_selection());
        assert_eq!(state.selected_event.unwrap().display_title(), "New title");
    }

    #[test]
    fn test_reconcile_clears_vanished_event() {
        let mut state = AppState::default();
        state.selected_event = Some(Event::new("A", "Gone"));
        state.events = vec![Event::new("B", "Other")];

        assert!(!state.reconcile_selection());
        assert!(state.selected_event.is_none());
    }

    #[test]
    fn test_find_event() {
        let mut state = AppState::default();
        state.events = vec![Event::new("A", "a"), Event::new("B", "b")];
        assert_eq!(state.find_event("B").unwrap().display_title(), "b");
        assert!(state.find_event("C").is_none());
    }
}
