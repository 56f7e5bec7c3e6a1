//! DOM wiring for citation nodes produced by the renderer.
//!
//! The renderer emits citation nodes as inert markup addressable by the
//! `data-source-url` / `data-source-num` attribute pair. This module makes
//! them interactive: a lazily created tooltip showing a truncated form of
//! the source URL, shown on pointer enter and hidden on leave, and a click
//! handler that opens the source in a new browsing context without leaking
//! the opener.

use sourcemark::escape::truncate_url;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

/// Attach hover and click behavior to every citation node in `container`.
///
/// Citation nodes without a bound `data-source-url` are skipped, as are
/// nodes that already carry a tooltip (calling this twice on the same
/// container is harmless). A host environment that refuses to open a URL is
/// logged to the console, never surfaced as an error.
#[wasm_bindgen]
pub fn attach_interactions(container: &Element) -> Result<(), JsValue> {
    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("container has no owner document"))?;

    let refs = container.query_selector_all(".source-ref")?;

    for i in 0..refs.length() {
        let Some(node) = refs.item(i) else { continue };
        let Ok(span) = node.dyn_into::<Element>() else {
            continue;
        };

        // No bound URL: nothing to wire.
        let Some(url) = span.get_attribute("data-source-url") else {
            continue;
        };
        if url.is_empty() {
            continue;
        }

        // Already wired by an earlier call.
        if span.query_selector(".source-tooltip")?.is_some() {
            continue;
        }

        let tooltip = document.create_element("div")?;
        tooltip.set_class_name("source-tooltip");
        tooltip.set_text_content(Some(&truncate_url(&url)));
        // Full URL stays reachable for assistive tech and hover inspection.
        tooltip.set_attribute("title", &url)?;
        span.append_child(&tooltip)?;

        let show = {
            let tooltip = tooltip.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                let _ = tooltip.class_list().add_1("visible");
            })
        };
        let hide = {
            let tooltip = tooltip.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                let _ = tooltip.class_list().remove_1("visible");
            })
        };
        let open = {
            let url = url.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                open_source(&url);
            })
        };

        span.add_event_listener_with_callback("mouseenter", show.as_ref().unchecked_ref())?;
        span.add_event_listener_with_callback("mouseleave", hide.as_ref().unchecked_ref())?;
        span.add_event_listener_with_callback("click", open.as_ref().unchecked_ref())?;

        // Listeners live as long as the node does.
        show.forget();
        hide.forget();
        open.forget();
    }

    Ok(())
}

/// Open a source URL in a new browsing context. Refusal is logged, not
/// thrown: a blocked popup must never break the chat view.
fn open_source(url: &str) {
    let Some(window) = web_sys::window() else {
        web_sys::console::warn_1(&JsValue::from_str("no window to open source URL in"));
        return;
    };

    if let Err(err) = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
        web_sys::console::warn_2(
            &JsValue::from_str(&format!("failed to open source URL: {url}")),
            &err,
        );
    }
}
