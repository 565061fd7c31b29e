//! State Management
//!
//! The page's mascot engine and the signals it renders through.

pub mod mascot;

pub use mascot::{create_mascot, with_mascot, BrowserMascot, MascotHandle, MascotSignals, SharedMascot};
