//! Browser tests for the wasm rendering surface and citation interaction
//! wiring.
#![cfg(target_arch = "wasm32")]

use sourcemark_wasm::{WasmRenderOptions, attach_interactions, render_markdown};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

/// Render `text` against `sources` and return a detached container holding
/// the result, the way the chat host inserts a message.
fn rendered_container(text: &str, sources: &[&str]) -> Element {
    let urls: Vec<String> = sources.iter().map(|s| s.to_string()).collect();
    let js_sources = serde_wasm_bindgen::to_value(&urls).unwrap();
    let html = render_markdown(text, js_sources, None).unwrap();

    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_inner_html(&html);
    container
}

// =============================================================================
// render_markdown
// =============================================================================

#[wasm_bindgen_test]
fn render_accepts_null_sources() {
    let html = render_markdown("plain [1]", JsValue::NULL, None).unwrap();
    assert!(!html.contains("[1]"));
    assert!(!html.contains("source-ref"));
}

#[wasm_bindgen_test]
fn render_rejects_non_array_sources() {
    let result = render_markdown("text", JsValue::from_f64(42.0), None);
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn render_with_options_autolinks() {
    let mut options = WasmRenderOptions::new();
    options.set_autolink_bare_urls(true);
    let html = render_markdown("see https://a.example/p", JsValue::NULL, Some(options)).unwrap();
    assert!(html.contains("<a href=\"https://a.example/p\""));
}

#[wasm_bindgen_test]
fn rendered_citations_are_addressable() {
    let container = rendered_container("See [1] and [2].", &["https://a.example", "https://b.example"]);
    let refs = container.query_selector_all(".source-ref").unwrap();
    assert_eq!(refs.length(), 2);
}

// =============================================================================
// attach_interactions
// =============================================================================

#[wasm_bindgen_test]
fn attach_creates_truncated_tooltips() {
    let long_url = format!("https://a.example/{}", "p".repeat(100));
    let container = rendered_container("See [1].", &[&long_url]);

    attach_interactions(&container).unwrap();

    let tooltip = container.query_selector(".source-tooltip").unwrap().unwrap();
    let text = tooltip.text_content().unwrap();
    assert_eq!(text.chars().count(), 60);
    assert!(text.ends_with("..."));
    // Full URL retained for accessibility.
    assert_eq!(tooltip.get_attribute("title").unwrap(), long_url);
}

#[wasm_bindgen_test]
fn attach_skips_nodes_without_bound_url() {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_inner_html("<span class=\"source-ref\" data-source-num=\"1\">1</span>");

    attach_interactions(&container).unwrap();

    assert!(container.query_selector(".source-tooltip").unwrap().is_none());
}

#[wasm_bindgen_test]
fn attach_twice_creates_one_tooltip() {
    let container = rendered_container("[1]", &["https://a.example"]);

    attach_interactions(&container).unwrap();
    attach_interactions(&container).unwrap();

    let tooltips = container.query_selector_all(".source-tooltip").unwrap();
    assert_eq!(tooltips.length(), 1);
}

#[wasm_bindgen_test]
fn hover_toggles_tooltip_visibility() {
    let container = rendered_container("[1]", &["https://a.example"]);
    attach_interactions(&container).unwrap();

    let span = container.query_selector(".source-ref").unwrap().unwrap();
    let tooltip = container.query_selector(".source-tooltip").unwrap().unwrap();

    let enter = web_sys::Event::new("mouseenter").unwrap();
    span.dispatch_event(&enter).unwrap();
    assert!(tooltip.class_list().contains("visible"));

    let leave = web_sys::Event::new("mouseleave").unwrap();
    span.dispatch_event(&leave).unwrap();
    assert!(!tooltip.class_list().contains("visible"));
}
