//! Real-time runner
//!
//! Drives a [`MascotEngine`] on tokio time. Timer tasks only send the fired
//! timer back over a channel; the engine itself lives on the calling task,
//! so every mutation happens in one place, one callback at a time.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::MascotConfig;
use crate::mascot::{
    MascotEngine, MascotView, MessageCatalog, RandomSource, TimerId, TimerKind, TimerPort,
};

type Fired = (TimerId, TimerKind);

/// Timers backed by tokio tasks
pub struct TokioTimers {
    tx: mpsc::UnboundedSender<Fired>,
    next_id: u64,
    handles: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimers {
    pub fn new(tx: mpsc::UnboundedSender<Fired>) -> Self {
        Self {
            tx,
            next_id: 1,
            handles: HashMap::new(),
        }
    }

    /// Timers that have not fired or been cancelled
    pub fn active_count(&self) -> usize {
        self.handles.values().filter(|h| !h.is_finished()).count()
    }

    fn allocate(&mut self) -> TimerId {
        // Forget one-shot timers that already fired
        self.handles.retain(|_, handle| !handle.is_finished());

        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl TimerPort for TokioTimers {
    fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        let id = self.allocate();
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let _ = tx.send((id, kind));
        });

        self.handles.insert(id, handle);
        id
    }

    fn schedule_repeating(&mut self, kind: TimerKind, every_ms: u64) -> TimerId {
        let id = self.allocate();
        let tx = self.tx.clone();
        let every = Duration::from_millis(every_ms.max(1));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
            loop {
                interval.tick().await;
                if tx.send((id, kind)).is_err() {
                    break;
                }
            }
        });

        self.handles.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.handles.remove(&id) {
            handle.abort();
        }
    }
}

pub type RealtimeEngine<V, R> = MascotEngine<V, TokioTimers, R>;

/// Run a mascot session on `pathname` for `run_for`, or until Ctrl-C.
///
/// Returns the engine after shutdown so callers can inspect its view.
pub async fn run_realtime<V, R>(
    view: V,
    random: R,
    config: MascotConfig,
    catalog: MessageCatalog,
    pathname: &str,
    run_for: Duration,
) -> RealtimeEngine<V, R>
where
    V: MascotView,
    R: RandomSource,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut engine = MascotEngine::new(view, TokioTimers::new(tx), random, config, catalog);
    engine.initialize(pathname);

    let deadline = tokio::time::sleep(run_for);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            Some((id, kind)) = rx.recv() => engine.on_timer(id, kind),
            _ = &mut deadline => {
                tracing::info!("Session finished after {:?}", run_for);
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    engine.shutdown();
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mascot::{ScriptedRandom, TimelineView, VirtualClock};

    fn fast_config() -> MascotConfig {
        MascotConfig {
            default_duration_ms: 20,
            fade_ms: 5,
            greeting_duration_ms: 30,
            idle_interval_ms: 60_000,
            progress_poll_ms: 40,
            progress_message_ms: 20,
            ..MascotConfig::default()
        }
    }

    #[tokio::test]
    async fn test_realtime_session_shows_greeting_then_queue() {
        let mut view = TimelineView::new(VirtualClock::new());
        view.set_progress(Some(100));

        let engine = run_realtime(
            view,
            ScriptedRandom::new(vec![0.0]),
            fast_config(),
            MessageCatalog::builtin(),
            "/processing",
            Duration::from_millis(400),
        )
        .await;

        let texts = engine.view().shown_texts();
        assert_eq!(
            texts,
            vec![
                "I'm checking your URLs now. This might take a moment for large batches.",
                "All done! Your results will be displayed shortly.",
            ]
        );
        assert!(!engine.is_polling_progress());
        assert_eq!(engine.timers().active_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TokioTimers::new(tx);

        let cancelled = timers.schedule(TimerKind::Hold, 10);
        let kept = timers.schedule(TimerKind::Fade, 20);
        timers.cancel(cancelled);

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired, (kept, TimerKind::Fade));
    }
}
