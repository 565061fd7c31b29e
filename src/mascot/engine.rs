//! Mascot Engine
//!
//! Owns the display state and the message FIFO. One message is on screen at
//! a time; each runs through Showing (its duration) then Fading (the fixed
//! fade window) before the next queued message starts.
//!
//! ```text
//!   show_message ──► Idle ──► Showing ──Hold──► Fading ──Fade──► Idle
//!                      ▲                                   │
//!                      └──────── dequeue next, if any ◄────┘
//! ```
//!
//! All scheduling goes through the injected [`TimerPort`] and all rendering
//! through the injected [`MascotView`], so the engine itself is pure and
//! can be driven by a virtual clock.

use std::collections::VecDeque;

use crate::config::MascotConfig;

use super::catalog::MessageCatalog;
use super::error::MascotResult;
use super::random::RandomSource;
use super::timer::{TimerId, TimerKind, TimerPort};
use super::types::{
    DisplayState, FormEvent, MessageCategory, PageContext, PendingMessage, ProgressBand,
};
use super::view::MascotView;

const URL_FOCUS_MESSAGE: &str = "Enter one URL per line or paste a list of URLs.";
const MULTIPLE_URLS_MESSAGE: &str = "Multiple URLs detected! I'll check them all.";
const SUBMIT_MESSAGE: &str = "Starting the indexing check now. I'll crawl through your URLs!";
const FILE_SELECTED_MESSAGE: &str = "File selected! Make sure it's a CSV with URLs.";

/// Message presentation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Showing { timer: TimerId },
    Fading { timer: TimerId },
}

/// The mascot's message and state engine
pub struct MascotEngine<V, T, R> {
    view: V,
    timers: T,
    random: R,
    catalog: MessageCatalog,
    config: MascotConfig,
    state: DisplayState,
    phase: Phase,
    queue: VecDeque<PendingMessage>,
    page: Option<PageContext>,
    initialized: bool,
    form_helpers_bound: bool,
    idle_timer: Option<TimerId>,
    progress_timer: Option<TimerId>,
    shut_down: bool,
}

impl<V, T, R> MascotEngine<V, T, R>
where
    V: MascotView,
    T: TimerPort,
    R: RandomSource,
{
    pub fn new(view: V, timers: T, random: R, config: MascotConfig, catalog: MessageCatalog) -> Self {
        Self {
            view,
            timers,
            random,
            catalog,
            config,
            state: DisplayState::Default,
            phase: Phase::Idle,
            queue: VecDeque::new(),
            page: None,
            initialized: false,
            form_helpers_bound: false,
            idle_timer: None,
            progress_timer: None,
            shut_down: false,
        }
    }

    /// Mount the widget, start idle chatter and apply the page behavior.
    ///
    /// Only the first call has an effect.
    pub fn initialize(&mut self, pathname: &str) {
        if self.initialized {
            tracing::debug!("Mascot already initialized, ignoring");
            return;
        }
        self.initialized = true;

        self.view.mount();
        self.idle_timer = Some(
            self.timers
                .schedule_repeating(TimerKind::IdleChatter, self.config.idle_interval_ms),
        );
        self.detect_page_and_set_behavior(pathname);

        tracing::info!("Mascot initialized on {}", pathname);
    }

    /// Replace the display state unconditionally
    pub fn set_state(&mut self, state: DisplayState) {
        let previous = self.state;
        self.view.apply_state(previous, state);
        self.state = state;
        tracing::debug!("Mascot state {} -> {}", previous, state);
    }

    /// Set the state from its name, rejecting unknown names without touching the view
    pub fn set_state_named(&mut self, name: &str) -> MascotResult<()> {
        let state = name.parse::<DisplayState>()?;
        self.set_state(state);
        Ok(())
    }

    /// Show a message now, or queue it behind the one on screen
    pub fn show_message(&mut self, text: impl Into<String>, duration_ms: u64) {
        let text = text.into();

        if self.shut_down {
            tracing::debug!("Mascot shut down, dropping message: {}", text);
            return;
        }

        if self.is_message_showing() {
            tracing::debug!("Queueing message ({} pending): {}", self.queue.len() + 1, text);
            self.queue.push_back(PendingMessage::new(text, duration_ms));
            return;
        }

        self.view.show_text(&text);
        let timer = self.timers.schedule(TimerKind::Hold, duration_ms);
        self.phase = Phase::Showing { timer };
        tracing::debug!("Showing message for {}ms: {}", duration_ms, text);
    }

    /// Show a message for the default duration
    pub fn say(&mut self, text: impl Into<String>) {
        let duration = self.config.default_duration_ms;
        self.show_message(text, duration);
    }

    /// Show a random message from the pool picked by the selection policy
    pub fn show_random_message(&mut self) {
        let draw = self.random.next_f64();
        let category = MessageCategory::resolve(draw, self.state);
        let text = self.catalog.random_message(category, &mut self.random);
        self.say(text);
    }

    /// A random message from a category, or the fallback greeting
    pub fn random_message(&mut self, category: MessageCategory) -> String {
        self.catalog.random_message(category, &mut self.random)
    }

    /// Classify the page and apply its initial state and greeting
    pub fn detect_page_and_set_behavior(&mut self, pathname: &str) -> PageContext {
        let page = PageContext::classify(pathname);
        self.page = Some(page);
        tracing::info!("Mascot page context: {} ({})", page, pathname);

        if page == PageContext::Home {
            self.add_form_helpers();
        }

        if let Some((state, greeting)) = page.greeting() {
            self.set_state(state);
            let duration = self.config.greeting_duration_ms;
            self.show_message(greeting, duration);
        }

        if page == PageContext::Processing && self.progress_timer.is_none() {
            self.progress_timer = Some(
                self.timers
                    .schedule_repeating(TimerKind::ProgressPoll, self.config.progress_poll_ms),
            );
        }

        page
    }

    /// Enable the home page form reactions
    pub fn add_form_helpers(&mut self) {
        if self.form_helpers_bound {
            return;
        }
        self.form_helpers_bound = true;
        self.view.bind_form_helpers();
    }

    /// React to a form event. Ignored unless form helpers are bound.
    pub fn handle_form_event(&mut self, event: FormEvent) {
        if !self.form_helpers_bound {
            tracing::trace!("Form helpers not bound, ignoring {:?}", event);
            return;
        }

        match event {
            FormEvent::UrlFocus => {
                self.set_state(DisplayState::Thinking);
                self.show_message(URL_FOCUS_MESSAGE, 4000);
            }
            FormEvent::UrlInput(value) => {
                if !value.is_empty() && value.contains('\n') {
                    self.show_message(MULTIPLE_URLS_MESSAGE, 3000);
                }
            }
            FormEvent::Submit => {
                self.set_state(DisplayState::Working);
                self.show_message(SUBMIT_MESSAGE, 3000);
            }
            FormEvent::FilesSelected(count) => {
                if count > 0 {
                    self.set_state(DisplayState::Happy);
                    self.show_message(FILE_SELECTED_MESSAGE, 3000);
                }
            }
        }
    }

    /// The spider was clicked
    pub fn on_mascot_click(&mut self) {
        self.show_random_message();
    }

    /// Dispatch a fired timer
    pub fn on_timer(&mut self, id: TimerId, kind: TimerKind) {
        if self.shut_down {
            return;
        }

        match kind {
            TimerKind::Hold => self.on_hold_elapsed(id),
            TimerKind::Fade => self.on_fade_elapsed(id),
            TimerKind::IdleChatter if self.idle_timer == Some(id) => self.on_idle_tick(),
            TimerKind::ProgressPoll if self.progress_timer == Some(id) => self.poll_progress(),
            TimerKind::IdleChatter | TimerKind::ProgressPoll => {
                tracing::trace!("Stale {:?} timer {:?}", kind, id);
            }
        }
    }

    /// Cancel every pending timer and drop queued messages
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if let Some(id) = self.idle_timer.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.progress_timer.take() {
            self.timers.cancel(id);
        }
        match self.phase {
            Phase::Showing { timer } | Phase::Fading { timer } => self.timers.cancel(timer),
            Phase::Idle => {}
        }

        self.phase = Phase::Idle;
        self.queue.clear();
        self.view.teardown();
        tracing::info!("Mascot shut down");
    }

    fn on_hold_elapsed(&mut self, id: TimerId) {
        if self.phase != (Phase::Showing { timer: id }) {
            tracing::trace!("Stale hold timer {:?}", id);
            return;
        }

        self.view.begin_fade();
        let timer = self.timers.schedule(TimerKind::Fade, self.config.fade_ms);
        self.phase = Phase::Fading { timer };
    }

    fn on_fade_elapsed(&mut self, id: TimerId) {
        if self.phase != (Phase::Fading { timer: id }) {
            tracing::trace!("Stale fade timer {:?}", id);
            return;
        }

        self.phase = Phase::Idle;
        self.view.fade_complete();

        if let Some(next) = self.queue.pop_front() {
            self.show_message(next.text, next.duration_ms);
        }
    }

    fn on_idle_tick(&mut self) {
        if self.is_message_showing() {
            return;
        }
        let threshold = 1.0 - self.config.idle_chance;
        if self.random.next_f64() > threshold {
            self.show_random_message();
        }
    }

    fn poll_progress(&mut self) {
        let Some(progress) = self.view.read_progress() else {
            tracing::trace!("No progress bar on page, skipping poll");
            return;
        };

        let band = ProgressBand::from_progress(progress);
        let duration = self.config.progress_message_ms;
        tracing::debug!("Progress {}% ({:?})", progress, band);

        if band == ProgressBand::Complete {
            self.set_state(DisplayState::Happy);
            self.show_message(band.message(), duration);

            if self.config.cancel_progress_on_complete {
                if let Some(id) = self.progress_timer.take() {
                    self.timers.cancel(id);
                    tracing::debug!("Progress complete, polling stopped");
                }
            }
        } else {
            self.show_message(band.message(), duration);
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// True while a message is on screen, including its fade window
    pub fn is_message_showing(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn queued(&self) -> impl Iterator<Item = &PendingMessage> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn page(&self) -> Option<PageContext> {
        self.page
    }

    pub fn is_polling_progress(&self) -> bool {
        self.progress_timer.is_some()
    }

    pub fn config(&self) -> &MascotConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn random(&self) -> &R {
        &self.random
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mascot::random::ScriptedRandom;
    use crate::mascot::timer::{VirtualClock, VirtualTimers};
    use crate::mascot::view::{TimelineView, ViewEvent};
    use crate::mascot::MascotError;

    type TestEngine = MascotEngine<TimelineView, VirtualTimers, ScriptedRandom>;

    fn engine(draws: Vec<f64>) -> TestEngine {
        let clock = VirtualClock::new();
        MascotEngine::new(
            TimelineView::new(clock.clone()),
            VirtualTimers::new(clock),
            ScriptedRandom::new(draws),
            MascotConfig::default(),
            MessageCatalog::builtin(),
        )
    }

    fn fire_all(engine: &mut TestEngine, until: u64) {
        while let Some((id, kind)) = engine.timers_mut().pop_due(until) {
            engine.on_timer(id, kind);
        }
    }

    #[test]
    fn test_second_message_is_queued() {
        let mut engine = engine(vec![0.0]);
        engine.show_message("A", 1000);
        engine.show_message("B", 1000);

        assert!(engine.is_message_showing());
        assert_eq!(engine.queue_len(), 1);
        assert_eq!(engine.view().shown_texts(), vec!["A"]);
    }

    #[test]
    fn test_flag_clears_when_queue_drains() {
        let mut engine = engine(vec![0.0]);
        engine.show_message("A", 1000);
        fire_all(&mut engine, 1300);

        assert!(!engine.is_message_showing());
        assert_eq!(engine.queue_len(), 0);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_set_state_named_rejects_unknown() {
        let mut engine = engine(vec![0.0]);
        let result = engine.set_state_named("bogus");

        assert_eq!(result, Err(MascotError::InvalidState("bogus".to_string())));
        assert_eq!(engine.state(), DisplayState::Default);
        assert!(engine.view().state_changes().is_empty());

        engine.set_state_named("happy").unwrap();
        assert_eq!(engine.state(), DisplayState::Happy);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut engine = engine(vec![0.0]);
        engine.initialize("/results");
        engine.initialize("/results");

        let mounts = engine
            .view()
            .entries()
            .iter()
            .filter(|e| e.event == ViewEvent::Mounted)
            .count();
        assert_eq!(mounts, 1);
        assert_eq!(engine.view().shown_texts().len(), 1);
    }

    #[test]
    fn test_form_events_ignored_off_home_page() {
        let mut engine = engine(vec![0.0]);
        engine.initialize("/reports");
        engine.handle_form_event(FormEvent::Submit);

        assert_eq!(engine.state(), DisplayState::Happy);
        assert_eq!(engine.queue_len(), 0);
    }

    #[test]
    fn test_form_helpers_on_home_page() {
        let mut engine = engine(vec![0.0]);
        engine.initialize("/");

        engine.handle_form_event(FormEvent::UrlFocus);
        assert_eq!(engine.state(), DisplayState::Thinking);

        engine.handle_form_event(FormEvent::UrlInput("https://a.example".to_string()));
        assert_eq!(engine.queue_len(), 1);

        engine.handle_form_event(FormEvent::UrlInput(
            "https://a.example\nhttps://b.example".to_string(),
        ));
        assert_eq!(engine.state(), DisplayState::Thinking);

        engine.handle_form_event(FormEvent::FilesSelected(0));
        assert_eq!(engine.state(), DisplayState::Thinking);

        engine.handle_form_event(FormEvent::FilesSelected(1));
        assert_eq!(engine.state(), DisplayState::Happy);

        engine.handle_form_event(FormEvent::Submit);
        assert_eq!(engine.state(), DisplayState::Working);

        fire_all(&mut engine, 60_000);
        assert_eq!(
            engine.view().shown_texts(),
            vec![
                "Welcome! Enter URLs to check or upload a CSV file.",
                URL_FOCUS_MESSAGE,
                MULTIPLE_URLS_MESSAGE,
                FILE_SELECTED_MESSAGE,
                SUBMIT_MESSAGE,
            ]
        );
    }

    #[test]
    fn test_idle_chatter_respects_chance() {
        // 0.7 is not above the threshold, 0.9 is; then category draw 0.0 and index draw 0.0
        let mut engine = engine(vec![0.7, 0.9, 0.0, 0.0]);
        engine.initialize("/health");

        fire_all(&mut engine, 30_000);
        assert!(!engine.is_message_showing());

        fire_all(&mut engine, 60_000);
        assert_eq!(
            engine.view().shown_texts(),
            vec!["Hi there! I'm Indexy, your URL indexing assistant."]
        );
    }

    #[test]
    fn test_poll_after_completion_is_ignored() {
        let mut engine = engine(vec![0.0]);
        engine.initialize("/processing");
        engine.view_mut().set_progress(Some(100));

        let mut poll = None;
        while let Some((id, kind)) = engine.timers_mut().pop_due(5000) {
            if kind == TimerKind::ProgressPoll {
                poll = Some(id);
            }
            engine.on_timer(id, kind);
        }
        let poll = poll.unwrap();
        assert!(!engine.is_polling_progress());

        // A tick already in flight when polling was cancelled
        engine.on_timer(poll, TimerKind::ProgressPoll);

        let queued: Vec<&str> = engine.queued().map(|m| m.text.as_str()).collect();
        assert_eq!(queued, vec!["All done! Your results will be displayed shortly."]);
    }

    #[test]
    fn test_unknown_idle_timer_is_ignored() {
        let mut engine = engine(vec![0.9, 0.0, 0.0]);
        engine.initialize("/health");
        engine.on_timer(TimerId(99), TimerKind::IdleChatter);

        assert!(!engine.is_message_showing());
        assert!(engine.view().shown_texts().is_empty());
    }

    #[test]
    fn test_results_page_greeting() {
        let mut engine = engine(vec![0.0]);
        engine.initialize("/results");

        assert_eq!(engine.page(), Some(PageContext::Results));
        assert_eq!(engine.state(), DisplayState::Happy);
        assert_eq!(engine.view().state_changes(), vec![DisplayState::Happy]);
        assert_eq!(
            engine.view().shown_texts(),
            vec!["Here are your results! Indexed URLs are shown in green."]
        );
        assert!(!engine.is_polling_progress());
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let mut engine = engine(vec![0.0]);
        engine.initialize("/processing");
        engine.show_message("queued", 1000);
        engine.shutdown();

        assert_eq!(engine.timers().pending_count(), 0);
        assert_eq!(engine.queue_len(), 0);
        assert!(!engine.is_message_showing());

        engine.show_message("late", 1000);
        assert_eq!(engine.view().shown_texts().len(), 1);
    }
}
