//! Rendering capability
//!
//! The engine talks to the page only through [`MascotView`]. Browsers plug in
//! a DOM-backed view; simulations use [`TimelineView`], which records every
//! call against the virtual clock.

use serde::Serialize;

use super::timer::VirtualClock;
use super::types::DisplayState;

/// Thin rendering adapter called by the engine
pub trait MascotView {
    /// Build the widget. Called once by `initialize`.
    fn mount(&mut self) {}

    /// Put `text` in the speech bubble and make it visible
    fn show_text(&mut self, text: &str);

    /// Start the fade-out transition of the speech bubble
    fn begin_fade(&mut self);

    /// The fade-out finished and the bubble is empty
    fn fade_complete(&mut self) {}

    /// Swap the spider's state class
    fn apply_state(&mut self, previous: DisplayState, next: DisplayState);

    /// Hook the home page form events up to the engine
    fn bind_form_helpers(&mut self) {}

    /// Current value of the page's progress bar, `None` when there is none
    fn read_progress(&self) -> Option<u8> {
        None
    }

    /// Remove the widget; no further calls follow
    fn teardown(&mut self) {}
}

/// A recorded view call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    Mounted,
    Shown { text: String },
    FadeStarted,
    Hidden,
    StateChanged { from: DisplayState, to: DisplayState },
    FormHelpersBound,
    TornDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ViewEvent,
}

/// Records every render call with its virtual timestamp.
#[derive(Debug)]
pub struct TimelineView {
    clock: VirtualClock,
    entries: Vec<TimelineEntry>,
    progress: Option<u8>,
}

impl TimelineView {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            entries: Vec::new(),
            progress: None,
        }
    }

    /// Simulate the processing page's progress bar
    pub fn set_progress(&mut self, progress: Option<u8>) {
        self.progress = progress;
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Texts in the order they appeared on screen
    pub fn shown_texts(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|e| match &e.event {
                ViewEvent::Shown { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Start time of each shown text
    pub fn shown_at(&self) -> Vec<(u64, String)> {
        self.entries
            .iter()
            .filter_map(|e| match &e.event {
                ViewEvent::Shown { text } => Some((e.at_ms, text.clone())),
                _ => None,
            })
            .collect()
    }

    /// Target of each state change, in order
    pub fn state_changes(&self) -> Vec<DisplayState> {
        self.entries
            .iter()
            .filter_map(|e| match e.event {
                ViewEvent::StateChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, event: ViewEvent) {
        self.entries.push(TimelineEntry {
            at_ms: self.clock.now(),
            event,
        });
    }
}

impl MascotView for TimelineView {
    fn mount(&mut self) {
        self.record(ViewEvent::Mounted);
    }

    fn show_text(&mut self, text: &str) {
        self.record(ViewEvent::Shown {
            text: text.to_string(),
        });
    }

    fn begin_fade(&mut self) {
        self.record(ViewEvent::FadeStarted);
    }

    fn fade_complete(&mut self) {
        self.record(ViewEvent::Hidden);
    }

    fn apply_state(&mut self, previous: DisplayState, next: DisplayState) {
        self.record(ViewEvent::StateChanged {
            from: previous,
            to: next,
        });
    }

    fn bind_form_helpers(&mut self) {
        self.record(ViewEvent::FormHelpersBound);
    }

    fn read_progress(&self) -> Option<u8> {
        self.progress
    }

    fn teardown(&mut self) {
        self.record(ViewEvent::TornDown);
    }
}
