//! Output port for rendered view models.

use crate::{ControlsView, CountsView, EventCardView, StatusBanner};
use hazardmap_map::MapState;

/// Where the coordinator sends everything it renders.
///
/// Implementations display the latest value for each region; every call
/// replaces what was shown before.
pub trait Surface: Send {
    fn set_banner(&mut self, banner: &StatusBanner);

    fn show_controls(&mut self, controls: &ControlsView);

    /// Called after the layers or the viewport change
    fn show_map(&mut self, map: &MapState);

    fn show_counts(&mut self, counts: &CountsView);

    fn show_event_card(&mut self, card: &EventCardView);
}
