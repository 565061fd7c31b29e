//! UI Components
//!
//! The mascot widget plus the chart and loading helpers used on server-rendered pages.

pub mod chart;
pub mod loading;
pub mod mascot;

pub use chart::render_indexing_chart;
pub use loading::submit_loading_html;
pub use mascot::MascotWidget;
