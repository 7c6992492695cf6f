//! Application coordinator
//!
//! The coordinator is the single writer of [`AppState`] and [`MapState`].
//! Front-ends talk to it through a [`CoordinatorHandle`]; timers and fetch
//! tasks report back over the same channel, so every state change happens
//! inside [`Coordinator::step`].

use crate::debounce::Debouncer;
use crate::state::{AppState, Phase};
use hazardmap_core::config::{LayeredConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_FLASH_MS};
use hazardmap_core::models::{Event, FilterSelection};
use hazardmap_core::ports::EventSource;
use hazardmap_core::Result;
use hazardmap_map::MapState;
use hazardmap_ui::{
    render_controls, render_counts_by_category, render_event_card, ControlEvent, StatusBanner,
    Surface,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Request from a front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A filter control changed
    Control(ControlEvent),
    /// Show the detail card for an event
    Select(String),
    /// Move the map to an event and flash it
    Zoom(String),
    Hover { event_id: String, hovering: bool },
    Shutdown,
}

enum Message {
    Command(Command),
    /// Debounce timer fired for the given refetch generation
    Refetch(u64),
    EventsLoaded(Result<Vec<Event>>),
    FlashExpired(String),
}

/// Cloneable sender for commands
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl CoordinatorHandle {
    /// Queue a command; returns false once the coordinator is gone
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(Message::Command(command)).is_ok()
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Command(command) => write!(f, "Command({:?})", command),
            Message::Refetch(generation) => write!(f, "Refetch({})", generation),
            Message::EventsLoaded(Ok(events)) => write!(f, "EventsLoaded({} events)", events.len()),
            Message::EventsLoaded(Err(e)) => write!(f, "EventsLoaded(error: {})", e),
            Message::FlashExpired(id) => write!(f, "FlashExpired({})", id),
        }
    }
}

/// Timing and initial filter for a coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub debounce: Duration,
    pub flash: Duration,
    pub initial_filter: FilterSelection,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            flash: Duration::from_millis(DEFAULT_FLASH_MS),
            initial_filter: FilterSelection::default(),
        }
    }
}

impl From<&LayeredConfig> for CoordinatorOptions {
    fn from(config: &LayeredConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms.value),
            flash: Duration::from_millis(config.flash_ms.value),
            initial_filter: FilterSelection {
                status: config.status.value,
                limit: config.limit.value,
                ..Default::default()
            },
        }
    }
}

pub struct Coordinator<S, U>
where
    S: EventSource + 'static,
    U: Surface,
{
    source: Arc<S>,
    surface: U,
    state: AppState,
    map: MapState,
    debouncer: Debouncer,
    flash: Duration,
    refetch_pending: bool,
    refetch_generation: u64,
    in_flight: usize,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl<S, U> Coordinator<S, U>
where
    S: EventSource + 'static,
    U: Surface,
{
    pub fn new(source: S, surface: U, map: MapState, options: CoordinatorOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            surface,
            state: AppState::new(options.initial_filter),
            map,
            debouncer: Debouncer::new(options.debounce),
            flash: options.flash,
            refetch_pending: false,
            refetch_generation: 0,
            in_flight: 0,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle { tx: self.tx.clone() }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    /// Load categories, render the controls, and start the first events fetch.
    ///
    /// A categories failure is shown in the banner and returned; no events
    /// fetch is started in that case.
    pub async fn init(&mut self) -> Result<()> {
        self.surface.set_banner(&StatusBanner::loading_categories());
        self.surface.show_map(&self.map);
        self.surface.show_event_card(&render_event_card(None));

        let categories = match self.source.fetch_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                error!(error = %e, "Failed to load categories");
                self.surface.set_banner(&StatusBanner::error(&e));
                return Err(e);
            }
        };
        info!(category_count = categories.len(), "Loaded categories");
        self.state.categories = categories;

        self.show_controls();
        self.start_fetch();
        Ok(())
    }

    /// Handle every message until shutdown
    pub async fn run(&mut self) {
        while self.step().await {}
        self.debouncer.cancel();
        debug!("Coordinator stopped");
    }

    /// Wait for and handle one message; returns false on shutdown
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => self.handle_message(message),
            None => false,
        }
    }

    fn handle_message(&mut self, message: Message) -> bool {
        debug!(?message, "Handling message");
        match message {
            Message::Command(Command::Shutdown) => return false,
            Message::Command(command) => self.handle_command(command),
            Message::Refetch(generation) => {
                // A timer that fired just before a newer change was scheduled
                if generation != self.refetch_generation {
                    debug!(generation, current = self.refetch_generation, "Dropping stale refetch");
                    return true;
                }
                self.refetch_pending = false;
                self.start_fetch();
            }
            Message::EventsLoaded(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match result {
                    Ok(events) => self.apply_events(events),
                    Err(e) => {
                        error!(error = %e, status = ?e.status(), "Failed to load events");
                        self.surface.set_banner(&StatusBanner::load_error(&e));
                    }
                }
                self.update_phase();
            }
            Message::FlashExpired(event_id) => {
                if self.map.end_flash(&event_id) {
                    self.surface.show_map(&self.map);
                }
            }
        }
        true
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Control(control) => {
                let update = control.to_update(&self.state.filter);
                self.state.filter.apply(update);
                self.show_controls();
                self.schedule_refetch();
            }
            Command::Select(event_id) => match self.state.find_event(&event_id) {
                Some(event) => {
                    let event = event.clone();
                    self.surface.show_event_card(&render_event_card(Some(&event)));
                    self.state.selected_event = Some(event);
                }
                None => warn!(event_id = %event_id, "Ignoring selection of unknown event"),
            },
            Command::Zoom(event_id) => self.zoom_to(event_id),
            Command::Hover { event_id, hovering } => {
                if self.map.set_hover(&event_id, hovering) {
                    self.surface.show_map(&self.map);
                }
            }
            Command::Shutdown => {}
        }
    }

    fn schedule_refetch(&mut self) {
        self.refetch_pending = true;
        self.refetch_generation += 1;
        self.state.phase = Phase::Loading;
        let generation = self.refetch_generation;
        let tx = self.tx.clone();
        self.debouncer.schedule(move || {
            let _ = tx.send(Message::Refetch(generation));
        });
    }

    // Reads the filter at fire time, so coalesced changes all land in one request
    fn start_fetch(&mut self) {
        let filter = self.state.filter.to_query();
        debug!(
            status = ?filter.status,
            limit = filter.limit.get(),
            categories = ?filter.category_param(),
            "Fetching events"
        );

        self.in_flight += 1;
        self.state.phase = Phase::Loading;
        self.surface.set_banner(&StatusBanner::loading_events());

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_events(&filter).await;
            let _ = tx.send(Message::EventsLoaded(result));
        });
    }

    fn apply_events(&mut self, events: Vec<Event>) {
        self.state.events = events;
        let stats = self.map.render(&self.state.events);
        info!(
            event_count = self.state.events.len(),
            rendered = stats.rendered,
            skipped = stats.skipped_total(),
            "Loaded events"
        );
        self.surface.show_map(&self.map);

        let had_selection = self.state.selected_event.is_some();
        if self.state.reconcile_selection() {
            if had_selection {
                self.surface
                    .show_event_card(&render_event_card(self.state.selected_event.as_ref()));
            }
        } else {
            debug!("Selected event no longer present");
            self.surface.show_event_card(&render_event_card(None));
        }

        self.surface
            .show_counts(&render_counts_by_category(&self.state.events, &self.state.categories));
        self.surface.set_banner(&StatusBanner::hidden());
    }

    fn zoom_to(&mut self, event_id: String) {
        if self.map.zoom_to_event(&event_id).is_none() {
            warn!(event_id = %event_id, "No map layer to zoom to");
            return;
        }
        self.map.flash_event(&event_id);
        self.surface.show_map(&self.map);

        let tx = self.tx.clone();
        let flash = self.flash;
        tokio::spawn(async move {
            tokio::time::sleep(flash).await;
            let _ = tx.send(Message::FlashExpired(event_id));
        });
    }

    fn show_controls(&mut self) {
        let view = render_controls(&self.state.categories, &self.state.filter);
        self.surface.show_controls(&view);
    }

    fn update_phase(&mut self) {
        self.state.phase = if self.refetch_pending || self.in_flight > 0 {
            Phase::Loading
        } else {
            Phase::Idle
        };
    }
}
