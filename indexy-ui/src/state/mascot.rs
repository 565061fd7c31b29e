//! Browser Mascot
//!
//! Wires the mascot engine to Leptos signals and gloo timers.

use gloo_timers::callback::{Interval, Timeout};
use indexy::config::Config;
use indexy::mascot::{
    parse_progress_width, DisplayState, MascotEngine, MascotView, ThreadRandom, TimerId,
    TimerKind, TimerPort,
};
use leptos::*;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use crate::components::MascotWidget;
use crate::dom;

pub type BrowserMascot = MascotEngine<LeptosView, GlooTimers, ThreadRandom>;
pub type SharedMascot = Rc<RefCell<BrowserMascot>>;
pub type MascotHandle = Weak<RefCell<BrowserMascot>>;

/// Reactive state the widget renders from
#[derive(Clone, Copy)]
pub struct MascotSignals {
    /// Speech bubble text
    pub speech: RwSignal<String>,
    /// Whether the speech bubble is shown
    pub visible: RwSignal<bool>,
    /// Current display state
    pub state: RwSignal<DisplayState>,
    /// Pupil translation in pixels
    pub pupils: RwSignal<(f64, f64)>,
    /// False once the mascot has been torn down
    pub mounted: RwSignal<bool>,
}

impl MascotSignals {
    pub fn new() -> Self {
        Self {
            speech: create_rw_signal(String::new()),
            visible: create_rw_signal(false),
            state: create_rw_signal(DisplayState::Default),
            pupils: create_rw_signal((0.0, 0.0)),
            mounted: create_rw_signal(false),
        }
    }
}

impl Default for MascotSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f` against the engine if it is still alive and not already borrowed
pub fn with_mascot(handle: &MascotHandle, f: impl FnOnce(&mut BrowserMascot)) {
    let Some(mascot) = handle.upgrade() else {
        return;
    };
    match mascot.try_borrow_mut() {
        Ok(mut engine) => f(&mut engine),
        Err(_) => tracing::warn!("Mascot busy, dropping callback"),
    };
}

/// Build the engine for this page. Call `initialize` on the result.
pub fn create_mascot(signals: MascotSignals, config: &Config) -> SharedMascot {
    Rc::new_cyclic(|weak: &MascotHandle| {
        let handle = weak.clone();
        let dispatch: Dispatch = Rc::new(move |id, kind| {
            with_mascot(&handle, |engine| engine.on_timer(id, kind));
        });

        RefCell::new(MascotEngine::new(
            LeptosView::new(signals, weak.clone()),
            GlooTimers::new(dispatch),
            ThreadRandom,
            config.mascot.clone(),
            config.messages.catalog(),
        ))
    })
}

/// Renders the mascot through signals and reads the page's DOM
pub struct LeptosView {
    signals: MascotSignals,
    handle: MascotHandle,
}

impl LeptosView {
    pub fn new(signals: MascotSignals, handle: MascotHandle) -> Self {
        Self { signals, handle }
    }
}

impl MascotView for LeptosView {
    fn mount(&mut self) {
        let signals = self.signals;
        let handle = self.handle.clone();
        signals.mounted.set(true);
        mount_to_body(move || view! { <MascotWidget signals=signals handle=handle /> });
    }

    fn show_text(&mut self, text: &str) {
        self.signals.speech.set(text.to_string());
        self.signals.visible.set(true);
    }

    fn begin_fade(&mut self) {
        self.signals.visible.set(false);
    }

    fn apply_state(&mut self, _previous: DisplayState, next: DisplayState) {
        self.signals.state.set(next);
    }

    fn bind_form_helpers(&mut self) {
        dom::bind_form_helpers(self.handle.clone());
    }

    fn read_progress(&self) -> Option<u8> {
        dom::progress_bar_width().and_then(|width| parse_progress_width(&width))
    }

    fn teardown(&mut self) {
        self.signals.visible.set(false);
        self.signals.mounted.set(false);
    }
}

type Dispatch = Rc<dyn Fn(TimerId, TimerKind)>;

enum Pending {
    Once(Timeout),
    Every(Interval),
}

/// Browser timers. Fired callbacks are dispatched back into the engine.
pub struct GlooTimers {
    dispatch: Dispatch,
    next_id: u64,
    pending: HashMap<TimerId, Pending>,
    // One-shot timers that already ran; pruned on the next schedule
    fired: Rc<RefCell<HashSet<TimerId>>>,
}

impl GlooTimers {
    fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            next_id: 1,
            pending: HashMap::new(),
            fired: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    fn allocate(&mut self) -> TimerId {
        let fired: Vec<TimerId> = self.fired.borrow_mut().drain().collect();
        for id in fired {
            self.pending.remove(&id);
        }

        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl TimerPort for GlooTimers {
    fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        let id = self.allocate();
        let dispatch = Rc::clone(&self.dispatch);
        let fired = Rc::clone(&self.fired);

        let timeout = Timeout::new(clamp_ms(delay_ms), move || {
            dispatch(id, kind);
            fired.borrow_mut().insert(id);
        });

        self.pending.insert(id, Pending::Once(timeout));
        id
    }

    fn schedule_repeating(&mut self, kind: TimerKind, every_ms: u64) -> TimerId {
        let id = self.allocate();
        let dispatch = Rc::clone(&self.dispatch);

        let interval = Interval::new(clamp_ms(every_ms), move || dispatch(id, kind));

        self.pending.insert(id, Pending::Every(interval));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        // Dropping a gloo timer clears it
        match self.pending.remove(&id) {
            Some(Pending::Once(timeout)) => drop(timeout),
            Some(Pending::Every(interval)) => drop(interval),
            None => {}
        }
    }
}

fn clamp_ms(ms: u64) -> u32 {
    u32::try_from(ms).unwrap_or(u32::MAX)
}
