//! Page Chrome
//!
//! Small enhancements for the server-rendered pages: alerts that dismiss
//! themselves, the URL count limit, the check form's loading button and the
//! CSV picker label.

use gloo_timers::callback::Timeout;
use indexy::chrome::{custom_validity, file_label_text, is_check_form};
use indexy::config::ChromeConfig;
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::components::submit_loading_html;
use crate::dom::{listen, query, query_all, selected_file_names};

/// Bind every chrome behavior the current page has elements for
pub fn init_chrome(config: &ChromeConfig) {
    auto_dismiss_alerts(config.alert_dismiss_ms);
    limit_url_count(config.max_url_lines);
    show_submit_loading();
    label_file_picker();
}

fn auto_dismiss_alerts(after_ms: u64) {
    let alerts = query_all(".alert");
    if alerts.is_empty() {
        return;
    }

    let delay = u32::try_from(after_ms).unwrap_or(u32::MAX);
    Timeout::new(delay, move || {
        for alert in &alerts {
            let _ = alert.class_list().remove_1("show");
            alert.remove();
        }
        tracing::debug!("Dismissed {} alerts", alerts.len());
    })
    .forget();
}

fn limit_url_count(max: usize) {
    let Some(textarea) = query("#urls").and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok()) else {
        return;
    };

    let target = textarea.clone();
    listen(&textarea, "input", move |_| {
        target.set_custom_validity(&custom_validity(&target.value(), max));
    });
}

fn show_submit_loading() {
    for form in query_all("form") {
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        if !is_check_form(form.get_attribute("action").as_deref()) {
            continue;
        }

        let target = form.clone();
        listen(&form, "submit", move |_| {
            let button = target
                .query_selector("button[type=\"submit\"]")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
            if let Some(button) = button {
                button.set_disabled(true);
                button.set_inner_html(&submit_loading_html());
            }
        });
    }
}

fn label_file_picker() {
    let Some(input) = query("#url-file").and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) else {
        return;
    };

    let target = input.clone();
    listen(&input, "change", move |_| {
        let label = target
            .parent_element()
            .and_then(|parent| parent.query_selector(".custom-file-upload").ok().flatten());
        if let Some(label) = label {
            label.set_text_content(Some(&file_label_text(&selected_file_names(&target))));
        }
    });
}
