//! Indexy Page Script
//!
//! Browser side of the URL Indexing Checker, built with Leptos (WASM).
//!
//! # Features
//!
//! - Indexy the spider mascot with page-aware chatter
//! - Progress reactions on the processing page
//! - Form helpers on the home page
//! - URL count validation, loading buttons and the results doughnut chart
//!
//! # Architecture
//!
//! The pages are rendered by the server. This script mounts the mascot
//! widget next to the existing markup and drives the `indexy` engine with
//! browser timers.

mod app;
mod chrome;
mod components;
mod dom;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    app::start();
}
