//! # Indexy
//!
//! The front-of-house for the URL Indexing Checker: Indexy the spider
//! mascot, the page chrome shared by every page, and the indexing chart.
//!
//! ## Modules
//!
//! - [`mascot`]: Message FIFO and display state machine, UI-independent
//! - [`chrome`]: URL batch validation, form loading state, date display
//! - [`chart`]: Doughnut chart model for indexing results
//! - [`config`]: TOML configuration with environment overrides
//! - `runtime`: Real-time tokio runner (feature `cli`)
//! - `logging`: tracing subscriber setup (feature `cli`)
//!
//! ## Quick Start
//!
//! ```rust
//! use indexy::config::MascotConfig;
//! use indexy::mascot::{DisplayState, MessageCatalog, SeededRandom, Simulation};
//!
//! let mut sim = Simulation::new(
//!     MascotConfig::default(),
//!     MessageCatalog::builtin(),
//!     SeededRandom::new(42),
//! );
//!
//! sim.engine_mut().initialize("/processing");
//! sim.feed_progress(&[10, 45, 85, 100]);
//!
//! assert_eq!(sim.engine().state(), DisplayState::Happy);
//! ```

pub mod chart;
pub mod chrome;
pub mod config;
pub mod mascot;

#[cfg(feature = "cli")]
pub mod logging;
#[cfg(feature = "cli")]
pub mod runtime;

// Re-export top-level types for convenience
pub use mascot::{
    DisplayState, FormEvent, MascotEngine, MascotError, MascotResult, MascotView, MessageCatalog,
    MessageCategory, PageContext, PendingMessage, RandomSource, Simulation, TimerId, TimerKind,
    TimerPort,
};

pub use chart::{ChartError, DoughnutSegment, IndexingSummary};

pub use chrome::{ChromeError, ChromeResult};

pub use config::{
    ChromeConfig, Config, ConfigError, LoggingConfig, MascotConfig, MessagesConfig,
};

#[cfg(feature = "cli")]
pub use runtime::{run_realtime, TokioTimers};
