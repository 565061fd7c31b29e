//! DOM attach points
//!
//! The pages are rendered by the server; this module finds the elements the
//! script hooks into and binds listeners on them.

use indexy::mascot::FormEvent;
use leptos::document;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::state::mascot::{with_mascot, MascotHandle};

/// First element matching `selector`, if any
pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

/// Every element matching `selector`
pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nodes) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Current location path
pub fn pathname() -> String {
    leptos::window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string())
}

/// CSS width of `#progress-bar`, `None` when the page has no progress bar
pub fn progress_bar_width() -> Option<String> {
    let element = document().get_element_by_id("progress-bar")?;
    let element = element.dyn_into::<HtmlElement>().ok()?;
    element.style().get_property_value("width").ok()
}

/// Names of the files selected in a file input
pub fn selected_file_names(input: &HtmlInputElement) -> Vec<String> {
    let Some(files) = input.files() else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|file| file.name())
        .collect()
}

/// Attach a listener that lives as long as the page
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        tracing::warn!("Failed to bind {} listener: {:?}", event, e);
    }
    closure.forget();
}

/// Bind the home page form events to the mascot
pub fn bind_form_helpers(handle: MascotHandle) {
    let form = query("form");
    let url_input = query("textarea[name=\"urls\"]")
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok());
    let file_input = query("input[type=\"file\"]")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

    if let (Some(form), Some(url_input)) = (form, url_input) {
        let focus_handle = handle.clone();
        listen(&url_input, "focus", move |_| {
            with_mascot(&focus_handle, |m| m.handle_form_event(FormEvent::UrlFocus));
        });

        let input_handle = handle.clone();
        let textarea = url_input.clone();
        listen(&url_input, "input", move |_| {
            let value = textarea.value();
            with_mascot(&input_handle, |m| m.handle_form_event(FormEvent::UrlInput(value)));
        });

        let submit_handle = handle.clone();
        listen(&form, "submit", move |_| {
            with_mascot(&submit_handle, |m| m.handle_form_event(FormEvent::Submit));
        });
    }

    if let Some(file_input) = file_input {
        let input = file_input.clone();
        listen(&file_input, "change", move |_| {
            let count = input.files().map(|files| files.length() as usize).unwrap_or(0);
            with_mascot(&handle, |m| m.handle_form_event(FormEvent::FilesSelected(count)));
        });
    }

    tracing::debug!("Form helpers bound");
}
