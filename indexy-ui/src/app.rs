//! App Boot
//!
//! Starts the mascot and page enhancements once the document is ready.

use indexy::config::Config;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::PageTransitionEvent;

use crate::chrome::init_chrome;
use crate::components::render_indexing_chart;
use crate::dom::listen;
use crate::state::{create_mascot, MascotSignals, SharedMascot};

/// Boot everything for the current page
pub fn start() {
    let config = Config::default();

    init_chrome(&config.chrome);
    render_indexing_chart();

    let mascot = start_mascot(&config);

    // The page owns the engine; shut it down when the page goes away for good
    let window = leptos::window();
    let keep = Rc::clone(&mascot);
    listen(&window, "pagehide", move |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .map(PageTransitionEvent::persisted);
        if !shutdown_on_pagehide(persisted) {
            tracing::debug!("Page kept in back/forward cache, mascot stays alive");
            return;
        }
        if let Ok(mut engine) = keep.try_borrow_mut() {
            engine.shutdown();
        }
    });
}

/// A page frozen into the back/forward cache comes back as-is, so only a
/// page that is really unloading tears the mascot down
fn shutdown_on_pagehide(persisted: Option<bool>) -> bool {
    !persisted.unwrap_or(false)
}

fn start_mascot(config: &Config) -> SharedMascot {
    let signals = MascotSignals::new();
    let mascot = create_mascot(signals, config);
    let path = crate::dom::pathname();

    match mascot.try_borrow_mut() {
        Ok(mut engine) => engine.initialize(&path),
        Err(_) => tracing::error!("Mascot borrowed during boot"),
    }

    tracing::info!("Indexy started on {}", path);
    mascot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_on_pagehide() {
        assert!(shutdown_on_pagehide(Some(false)));
        assert!(!shutdown_on_pagehide(Some(true)));
        // Not a page transition event: treat as unload
        assert!(shutdown_on_pagehide(None));
    }
}
