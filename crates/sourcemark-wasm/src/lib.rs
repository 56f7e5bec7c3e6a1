//! # sourcemark-wasm
//!
//! WebAssembly bindings for sourcemark - render cited chat answers in the
//! browser.
//!
//! The core renderer is pure and DOM-free; this crate adds the two things a
//! browser host needs: a JS-callable `render_markdown` entry point and
//! [`attach_interactions`], the one DOM side effect that wires tooltip and
//! click-to-open behavior onto the citation nodes a render produced.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { render_markdown, attach_interactions, WasmRenderOptions } from './pkg/sourcemark_wasm.js';
//!
//! await init();
//!
//! const container = document.querySelector('.message');
//! container.innerHTML = render_markdown(answer.response, answer.sources, null);
//! attach_interactions(container);
//! ```

mod interactions;

pub use interactions::attach_interactions;

use sourcemark::{RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-compatible rendering options
///
/// A JS-friendly wrapper around [`RenderOptions`] that can be constructed
/// and configured from JavaScript.
#[wasm_bindgen]
pub struct WasmRenderOptions {
    autolink_bare_urls: bool,
    suppress_link_adjacent_citations: bool,
}

#[wasm_bindgen]
impl WasmRenderOptions {
    /// Create new options with defaults (both flags off)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            autolink_bare_urls: false,
            suppress_link_adjacent_citations: false,
        }
    }

    /// Enable/disable autolinking of bare `http(s)://` URLs
    #[wasm_bindgen]
    pub fn set_autolink_bare_urls(&mut self, enabled: bool) {
        self.autolink_bare_urls = enabled;
    }

    /// Get the autolink setting
    #[wasm_bindgen(getter)]
    pub fn autolink_bare_urls(&self) -> bool {
        self.autolink_bare_urls
    }

    /// Enable/disable suppression of citation markers that directly follow
    /// a markdown link
    #[wasm_bindgen]
    pub fn set_suppress_link_adjacent_citations(&mut self, enabled: bool) {
        self.suppress_link_adjacent_citations = enabled;
    }

    /// Get the adjacency-suppression setting
    #[wasm_bindgen(getter)]
    pub fn suppress_link_adjacent_citations(&self) -> bool {
        self.suppress_link_adjacent_citations
    }
}

impl Default for WasmRenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert WASM options to core options
impl From<&WasmRenderOptions> for RenderOptions {
    fn from(opts: &WasmRenderOptions) -> Self {
        RenderOptions::builder()
            .autolink_bare_urls(opts.autolink_bare_urls)
            .suppress_link_adjacent_citations(opts.suppress_link_adjacent_citations)
            .build()
    }
}

/// Render markdown text with citation sources to an HTML string.
///
/// # Arguments
///
/// * `text` - markdown text as emitted by the model
/// * `sources` - JS array of source URL strings (`[1]` refers to the first);
///   `null`/`undefined` means no sources, which deletes every marker
/// * `options` - rendering options (optional, uses defaults if None)
///
/// # Errors
///
/// Only a malformed `sources` value (not an array of strings) produces an
/// error. Rendering itself never fails: bad markdown degrades to escaped
/// plain text, exactly as in the core crate.
#[wasm_bindgen]
pub fn render_markdown(
    text: &str,
    sources: JsValue,
    options: Option<WasmRenderOptions>,
) -> Result<String, JsValue> {
    let sources: Vec<String> = if sources.is_undefined() || sources.is_null() {
        Vec::new()
    } else {
        serde_wasm_bindgen::from_value(sources)
            .map_err(|e| JsValue::from_str(&format!("sources must be an array of strings: {e}")))?
    };

    let rust_options = options
        .as_ref()
        .map(RenderOptions::from)
        .unwrap_or_default();

    Ok(render_with_options(text, &sources, &rust_options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_to_off() {
        let opts = WasmRenderOptions::new();
        assert!(!opts.autolink_bare_urls());
        assert!(!opts.suppress_link_adjacent_citations());
    }

    #[test]
    fn test_options_convert_to_core() {
        let mut opts = WasmRenderOptions::new();
        opts.set_autolink_bare_urls(true);
        opts.set_suppress_link_adjacent_citations(true);

        let core = RenderOptions::from(&opts);
        assert!(core.autolink_bare_urls);
        assert!(core.suppress_link_adjacent_citations);
    }

    #[test]
    fn test_default_options_match_core_defaults() {
        let core = RenderOptions::from(&WasmRenderOptions::default());
        assert_eq!(core, RenderOptions::default());
    }
}
