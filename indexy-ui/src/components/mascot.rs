//! Mascot Widget
//!
//! Indexy the spider: eight legs, two following eyes and a speech bubble.

use indexy::mascot::{pupil_offset, pupil_transform};
use leptos::*;

use crate::state::mascot::{with_mascot, MascotHandle, MascotSignals};

/// The mascot, fixed to a corner of the page
#[component]
pub fn MascotWidget(signals: MascotSignals, handle: MascotHandle) -> impl IntoView {
    let spider_ref = create_node_ref::<html::Div>();

    // Eyes follow the pointer
    let _ = window_event_listener(ev::mousemove, move |e| {
        let Some(spider) = spider_ref.get_untracked() else {
            return;
        };
        let rect = spider.get_bounding_client_rect();
        let center = (
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
        );

        let window = leptos::window();
        let viewport = (
            window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
        );

        let pointer = (e.client_x() as f64, e.client_y() as f64);
        signals.pupils.set(pupil_offset(pointer, center, viewport));
    });

    let on_click = move |_| {
        with_mascot(&handle, |m| m.on_mascot_click());
    };

    view! {
        <div class="mascot-container" class:hidden=move || !signals.mounted.get()>
            <div
                node_ref=spider_ref
                class=move || format!("mascot-spider {}", signals.state.get().css_class())
                on:click=on_click
            >
                <div class="mascot-legs">
                    {(1..=8)
                        .map(|i| view! { <div class=format!("mascot-leg mascot-leg-{}", i) /> })
                        .collect_view()}
                </div>
                <div class="mascot-body">
                    <div class="mascot-eyes">
                        <Eye signals=signals />
                        <Eye signals=signals />
                    </div>
                </div>
            </div>

            <div class=move || {
                if signals.visible.get() { "mascot-speech visible" } else { "mascot-speech" }
            }>
                {move || signals.speech.get()}
            </div>
        </div>
    }
}

#[component]
fn Eye(signals: MascotSignals) -> impl IntoView {
    view! {
        <div class="mascot-eye">
            <div
                class="mascot-pupil"
                style=move || format!("transform: {}", pupil_transform(signals.pupils.get()))
            />
        </div>
    }
}
