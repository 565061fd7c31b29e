//! Virtual-clock simulation
//!
//! Runs a [`MascotEngine`] against [`VirtualTimers`] and a [`TimelineView`]
//! so whole page sessions can be replayed deterministically.

use crate::config::MascotConfig;

use super::catalog::MessageCatalog;
use super::engine::MascotEngine;
use super::random::RandomSource;
use super::timer::{VirtualClock, VirtualTimers};
use super::view::TimelineView;

pub type SimEngine<R> = MascotEngine<TimelineView, VirtualTimers, R>;

/// A mascot engine on a fake clock
pub struct Simulation<R> {
    engine: SimEngine<R>,
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(config: MascotConfig, catalog: MessageCatalog, random: R) -> Self {
        let clock = VirtualClock::new();
        let engine = MascotEngine::new(
            TimelineView::new(clock.clone()),
            VirtualTimers::new(clock),
            random,
            config,
            catalog,
        );
        Self { engine }
    }

    /// Current simulated time in milliseconds
    pub fn now(&self) -> u64 {
        self.engine.timers().now()
    }

    /// Fire every timer due up to and including `at`, then park the clock there
    pub fn advance_to(&mut self, at: u64) {
        while let Some((id, kind)) = self.engine.timers_mut().pop_due(at) {
            self.engine.on_timer(id, kind);
        }
        self.engine.timers_mut().settle(at);
    }

    pub fn advance_by(&mut self, ms: u64) {
        let target = self.now() + ms;
        self.advance_to(target);
    }

    /// Set the progress bar to each value in turn, one poll interval apart.
    ///
    /// Each value is in place just before the matching poll fires.
    pub fn feed_progress(&mut self, values: &[u8]) {
        let interval = self.engine.config().progress_poll_ms;
        for value in values {
            self.engine.view_mut().set_progress(Some(*value));
            self.advance_by(interval);
        }
    }

    /// Run until nothing is showing or queued, bounded by `limit_ms`
    pub fn drain(&mut self, limit_ms: u64) {
        let deadline = self.now() + limit_ms;
        while self.engine.is_message_showing() {
            match self.engine.timers().next_due() {
                Some(due) if due <= deadline => self.advance_to(due),
                _ => break,
            }
        }
    }

    pub fn engine(&self) -> &SimEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimEngine<R> {
        &mut self.engine
    }

    pub fn timeline(&self) -> &TimelineView {
        self.engine.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mascot::random::{ScriptedRandom, SeededRandom};
    use crate::mascot::types::{DisplayState, MessageCategory, ProgressBand};
    use crate::mascot::view::ViewEvent;

    fn sim() -> Simulation<ScriptedRandom> {
        Simulation::new(
            MascotConfig::default(),
            MessageCatalog::builtin(),
            ScriptedRandom::new(vec![0.0]),
        )
    }

    /// Draws are recorded so the category draw of each call can be checked
    struct RecordingRandom {
        inner: SeededRandom,
        draws: Vec<f64>,
    }

    impl RandomSource for RecordingRandom {
        fn next_f64(&mut self) -> f64 {
            let draw = self.inner.next_f64();
            self.draws.push(draw);
            draw
        }
    }

    #[test]
    fn test_messages_display_in_submission_order() {
        let mut sim = sim();
        let texts: Vec<String> = (0..8).map(|i| format!("message {}", i)).collect();
        for (i, text) in texts.iter().enumerate() {
            sim.engine_mut().show_message(text.clone(), 500 + i as u64 * 100);
        }

        sim.drain(60_000);

        assert_eq!(sim.timeline().shown_texts(), texts);
        assert!(!sim.engine().is_message_showing());
    }

    #[test]
    fn test_never_two_messages_visible() {
        let mut sim = sim();
        sim.engine_mut().show_message("one", 700);
        sim.advance_to(200);
        sim.engine_mut().show_message("two", 300);
        sim.engine_mut().show_message("three", 900);
        sim.advance_to(800);
        sim.engine_mut().show_message("four", 100);
        sim.drain(60_000);

        let mut visible = 0;
        for entry in sim.timeline().entries() {
            match entry.event {
                ViewEvent::Shown { .. } => {
                    visible += 1;
                    assert_eq!(visible, 1, "overlap at {}ms", entry.at_ms);
                }
                ViewEvent::Hidden => visible -= 1,
                _ => {}
            }
        }
        assert_eq!(visible, 0);
    }

    #[test]
    fn test_queued_message_timing() {
        let mut sim = sim();
        sim.engine_mut().show_message("A", 1000);
        sim.engine_mut().show_message("B", 1000);

        sim.advance_to(500);
        assert_eq!(sim.timeline().shown_texts(), vec!["A"]);
        assert!(sim.engine().is_message_showing());

        sim.advance_to(1299);
        assert_eq!(sim.timeline().shown_texts(), vec!["A"]);

        sim.advance_to(1301);
        assert_eq!(
            sim.timeline().shown_at(),
            vec![(0, "A".to_string()), (1300, "B".to_string())]
        );

        sim.advance_to(2600);
        assert!(!sim.engine().is_message_showing());
        let last = sim.timeline().entries().last().unwrap();
        assert_eq!(last.event, ViewEvent::Hidden);
        assert_eq!(last.at_ms, 2600);
    }

    #[test]
    fn test_random_selection_policy() {
        let mut sim = Simulation::new(
            MascotConfig::default(),
            MessageCatalog::builtin(),
            RecordingRandom {
                inner: SeededRandom::new(2024),
                draws: Vec::new(),
            },
        );
        // Something on screen so every random pick lands in the queue
        sim.engine_mut().show_message("hold", 1_000_000);

        for i in 0..1000 {
            let state = DisplayState::ALL[i % DisplayState::ALL.len()];
            sim.engine_mut().set_state(state);

            let before = sim.engine().view().entries().len();
            sim.engine_mut().show_random_message();
            assert_eq!(sim.engine().view().entries().len(), before);

            // category draw, then index draw
            let draws = &sim.engine().random().draws;
            let category = MessageCategory::resolve(draws[draws.len() - 2], state);

            let text = &sim.engine().queued().last().unwrap().text;
            assert!(
                sim.engine().catalog().messages(category).contains(text),
                "{:?} not in {}",
                text,
                category
            );
        }
        assert_eq!(sim.engine().queue_len(), 1000);
    }

    #[test]
    fn test_processing_page_progress() {
        let mut sim = sim();
        sim.engine_mut().initialize("/processing");
        assert_eq!(sim.engine().state(), DisplayState::Working);

        sim.feed_progress(&[10, 45, 85]);
        assert_eq!(sim.engine().state(), DisplayState::Working);

        sim.feed_progress(&[100]);
        assert_eq!(sim.engine().state(), DisplayState::Happy);
        assert!(!sim.engine().is_polling_progress());

        sim.drain(60_000);
        assert_eq!(
            sim.timeline().state_changes(),
            vec![DisplayState::Working, DisplayState::Happy]
        );
        assert_eq!(
            sim.timeline().shown_texts(),
            vec![
                "I'm checking your URLs now. This might take a moment for large batches.",
                ProgressBand::Starting.message(),
                ProgressBand::InProgress.message(),
                ProgressBand::AlmostDone.message(),
                ProgressBand::Complete.message(),
            ]
        );

        // No further polling after completion
        let shown = sim.timeline().shown_texts().len();
        sim.feed_progress(&[100, 100]);
        assert_eq!(sim.timeline().shown_texts().len(), shown);
    }

    #[test]
    fn test_missing_progress_bar_is_noop() {
        let mut sim = sim();
        sim.engine_mut().initialize("/processing");
        sim.advance_to(20_000);

        assert_eq!(sim.timeline().shown_texts().len(), 1);
        assert!(sim.engine().is_polling_progress());
    }
}
