//! Timer capability
//!
//! The engine never sleeps. It asks a [`TimerPort`] for delayed callbacks and
//! the host feeds fired timers back through `MascotEngine::on_timer`.
//! [`VirtualTimers`] is a fake clock for simulations and tests.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Handle for a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// A message's display duration elapsed; start fading
    Hold,
    /// The fade-out finished; clear the flag and drain the queue
    Fade,
    /// Periodic idle chatter check
    IdleChatter,
    /// Periodic read of the processing page's progress bar
    ProgressPoll,
}

/// Scheduling capability injected into the engine
pub trait TimerPort {
    /// Fire once after `delay_ms`
    fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId;

    /// Fire every `every_ms` until cancelled
    fn schedule_repeating(&mut self, kind: TimerKind, every_ms: u64) -> TimerId;

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Shared simulated time in milliseconds
#[derive(Debug, Clone, Default)]
pub struct VirtualClock(Rc<Cell<u64>>);

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }

    fn set(&self, ms: u64) {
        self.0.set(ms);
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TimerId,
    kind: TimerKind,
    every_ms: Option<u64>,
}

/// Timers on a [`VirtualClock`]. Nothing fires until [`pop_due`](Self::pop_due) is called.
#[derive(Debug)]
pub struct VirtualTimers {
    clock: VirtualClock,
    next_id: u64,
    next_seq: u64,
    // (due_ms, seq) keeps same-instant timers in scheduling order
    pending: BTreeMap<(u64, u64), Scheduled>,
}

impl VirtualTimers {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            next_id: 1,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Number of timers still pending
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a timer of this kind is pending
    pub fn has_pending(&self, kind: TimerKind) -> bool {
        self.pending.values().any(|s| s.kind == kind)
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Remove the earliest timer due at or before `until`, moving the clock
    /// to its due time. Repeating timers are re-armed.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, TimerKind)> {
        let key = *self.pending.keys().next()?;
        if key.0 > until {
            return None;
        }

        let scheduled = self.pending.remove(&key)?;
        self.clock.set(key.0.max(self.clock.now()));

        if let Some(every) = scheduled.every_ms {
            self.insert(key.0 + every, scheduled.clone());
        }

        Some((scheduled.id, scheduled.kind))
    }

    /// Move the clock forward without firing anything
    pub fn settle(&mut self, at: u64) {
        if at > self.clock.now() {
            self.clock.set(at);
        }
    }

    fn insert(&mut self, due: u64, scheduled: Scheduled) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((due, seq), scheduled);
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl TimerPort for VirtualTimers {
    fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        let id = self.allocate();
        let due = self.clock.now() + delay_ms;
        self.insert(
            due,
            Scheduled {
                id,
                kind,
                every_ms: None,
            },
        );
        id
    }

    fn schedule_repeating(&mut self, kind: TimerKind, every_ms: u64) -> TimerId {
        let id = self.allocate();
        let every = every_ms.max(1);
        let due = self.clock.now() + every;
        self.insert(
            due,
            Scheduled {
                id,
                kind,
                every_ms: Some(every),
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|_, s| s.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_order() {
        let mut timers = VirtualTimers::new(VirtualClock::new());
        let late = timers.schedule(TimerKind::Fade, 300);
        let early = timers.schedule(TimerKind::Hold, 100);

        assert_eq!(timers.pop_due(50), None);
        assert_eq!(timers.pop_due(1000), Some((early, TimerKind::Hold)));
        assert_eq!(timers.now(), 100);
        assert_eq!(timers.pop_due(1000), Some((late, TimerKind::Fade)));
        assert_eq!(timers.now(), 300);
        assert_eq!(timers.pop_due(1000), None);
    }

    #[test]
    fn test_repeating_rearms_until_cancelled() {
        let mut timers = VirtualTimers::new(VirtualClock::new());
        let id = timers.schedule_repeating(TimerKind::ProgressPoll, 5000);

        assert_eq!(timers.pop_due(20_000), Some((id, TimerKind::ProgressPoll)));
        assert_eq!(timers.now(), 5000);
        assert_eq!(timers.next_due(), Some(10_000));

        timers.cancel(id);
        assert_eq!(timers.pending_count(), 0);
        assert_eq!(timers.pop_due(20_000), None);
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut timers = VirtualTimers::new(VirtualClock::new());
        let first = timers.schedule(TimerKind::Hold, 10);
        let second = timers.schedule(TimerKind::IdleChatter, 10);

        assert_eq!(timers.pop_due(10).map(|(id, _)| id), Some(first));
        assert_eq!(timers.pop_due(10).map(|(id, _)| id), Some(second));
    }
}
