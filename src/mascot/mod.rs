//! Indexy Mascot
//!
//! The friendly spider that comments on what the user is doing.
//!
//! - **types**: DisplayState, MessageCategory, PageContext, ProgressBand
//! - **catalog**: Canned message pools
//! - **engine**: Message FIFO and display state machine
//! - **timer**: Scheduling capability and the virtual clock
//! - **view**: Rendering capability and the recording timeline
//! - **random**: Uniform draw sources
//! - **sim**: Deterministic page-session simulation
//! - **gaze**: Pupil tracking for the follow-cursor effect
//!
//! # Example
//!
//! ```rust
//! use indexy::config::MascotConfig;
//! use indexy::mascot::{MessageCatalog, ScriptedRandom, Simulation};
//!
//! let mut sim = Simulation::new(
//!     MascotConfig::default(),
//!     MessageCatalog::builtin(),
//!     ScriptedRandom::new(vec![0.0]),
//! );
//! sim.engine_mut().show_message("A", 1000);
//! sim.engine_mut().show_message("B", 1000);
//! sim.advance_to(2600);
//!
//! assert_eq!(sim.timeline().shown_texts(), vec!["A", "B"]);
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod gaze;
pub mod random;
pub mod sim;
pub mod timer;
pub mod types;
pub mod view;

pub use catalog::{MessageCatalog, FALLBACK_MESSAGE};
pub use engine::{MascotEngine, Phase};
pub use error::{MascotError, MascotResult};
pub use gaze::{pupil_offset, pupil_transform};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use sim::{SimEngine, Simulation};
pub use timer::{TimerId, TimerKind, TimerPort, VirtualClock, VirtualTimers};
pub use types::{
    parse_progress_width, DisplayState, FormEvent, MessageCategory, PageContext, PendingMessage,
    ProgressBand,
};
pub use view::{MascotView, TimelineEntry, TimelineView, ViewEvent};
