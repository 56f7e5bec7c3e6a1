//! # sourcemark
//!
//! Safe markdown-to-HTML rendering with inline source-citation binding.
//!
//! This crate is the pure core of a question-answering chat client: it takes
//! the constrained markdown dialect a language model emits plus an ordered
//! list of source URLs, and produces a markup string in which every numeric
//! citation marker (`[n]`) has been bound to its source as an interactive
//! citation node. The browser-facing side (inserting the markup, wiring
//! tooltips and click-to-open) lives in the companion `sourcemark-wasm`
//! crate; nothing here touches a DOM.
//!
//! ## Contract
//!
//! - All user-originated text is entity-escaped; only renderer-generated
//!   tags appear unescaped in the output.
//! - Rendering never fails: malformed input degrades to correctly escaped
//!   plain text with line breaks, never to an error and never to raw HTML.
//! - Citation nodes are addressable via the stable `data-source-url` /
//!   `data-source-num` attribute pair.
//!
//! ## Example
//!
//! ```
//! let sources = vec!["https://a.example".to_string()];
//! let html = sourcemark::render("See **this** [1].", &sources);
//!
//! assert!(html.contains("<strong>this</strong>"));
//! assert!(html.contains("data-source-url=\"https://a.example\""));
//! ```

mod context;
mod stages;

pub mod error;
pub mod escape;

pub use error::RenderError;

use bon::Builder;
use serde::{Deserialize, Serialize};

use context::RenderContext;

/// Inputs above this size skip the pipeline and take the escaped fallback
/// path. Keeps pathological model output from tying up the UI thread.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

/// Rendering options.
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Convert bare `http(s)://` runs into links, the way the legacy chat
    /// frontend did. Disabled by default.
    #[builder(default)]
    pub autolink_bare_urls: bool,

    /// Drop a citation marker that directly follows a markdown link, so
    /// `[text](url) [1]` cannot read as a citation on the link itself.
    /// Disabled by default.
    #[builder(default)]
    pub suppress_link_adjacent_citations: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Render markdown text to markup, binding `[n]` citation markers against
/// `sources` (1-based: `[1]` refers to `sources[0]`).
///
/// Never fails and never returns unescaped input text; see the crate docs
/// for the full contract. Empty input renders to an empty string.
pub fn render(text: &str, sources: &[String]) -> String {
    render_with_options(text, sources, &RenderOptions::default())
}

/// [`render`] with explicit [`RenderOptions`].
pub fn render_with_options(text: &str, sources: &[String], options: &RenderOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    match try_render(text, sources, options) {
        Ok(html) => html,
        Err(err) => {
            tracing::warn!(error = %err, "render pipeline failed, falling back to escaped text");
            fallback(text)
        }
    }
}

fn try_render(
    text: &str,
    sources: &[String],
    options: &RenderOptions,
) -> Result<String, RenderError> {
    if text.len() > MAX_INPUT_SIZE {
        return Err(RenderError::InputTooLarge {
            limit: MAX_INPUT_SIZE,
            actual: text.len(),
        });
    }

    let mut ctx = RenderContext::new(sources, options);
    stages::run(text, &mut ctx)
}

/// Escaped plain-text rendering used whenever the pipeline cannot run.
fn fallback(text: &str) -> String {
    escape::escape_html(text).replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render("", &[]), "");
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(render("hello world", &[]), "<p>hello world</p>");
    }

    #[test]
    fn test_citation_bound() {
        let html = render("See [1].", &sources(&["https://a.example"]));
        assert!(html.contains("class=\"source-ref\""));
        assert!(html.contains("data-source-url=\"https://a.example\""));
    }

    #[test]
    fn test_defaults_match_builder() {
        assert_eq!(RenderOptions::default(), RenderOptions::builder().build());
        assert!(!RenderOptions::default().autolink_bare_urls);
        assert!(!RenderOptions::default().suppress_link_adjacent_citations);
    }

    #[test]
    fn test_oversized_input_takes_fallback() {
        let text = format!("<b>{}", "x".repeat(MAX_INPUT_SIZE));
        let html = render(&text, &[]);
        assert!(html.starts_with("&lt;b&gt;"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_fallback_preserves_line_breaks() {
        let text = format!("a\nb{}", "x".repeat(MAX_INPUT_SIZE));
        let html = render(&text, &[]);
        assert!(html.starts_with("a<br>b"));
    }
}
