//! Citation binding: `[n]` markers against the per-call source list.
//!
//! Markers resolve 1-based into the source list. A marker that cannot be
//! resolved (empty source list, unparseable or non-positive index, index out
//! of range, blank URL) is deleted from the output; that is a defined
//! degenerate case, not an error. `[n](` is a markdown link opening, never a
//! citation.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::{FragmentKind, RenderContext, TOKEN_END, TOKEN_START};
use crate::error::RenderError;
use crate::escape::escape_html;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("citation marker pattern"));

/// Replace every resolvable `[n]` with a protected citation node and delete
/// the rest. The regex crate has no lookahead, so the "not followed by `(`"
/// rule is a manual check at each match boundary.
pub(crate) fn bind_citations(
    text: &str,
    ctx: &mut RenderContext,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in MARKER.captures_iter(text) {
        let m = caps.get(0).expect("match group 0");

        // A following '(' makes this a markdown link; leave it for the
        // links stage by copying it through untouched.
        if text[m.end()..].starts_with('(') {
            continue;
        }

        out.push_str(&text[last..m.start()]);
        last = m.end();

        if ctx.options.suppress_link_adjacent_citations && follows_link(&out) {
            continue;
        }

        out.push_str(&render_marker(&caps[1], ctx));
    }

    out.push_str(&text[last..]);
    Ok(out)
}

/// True when the emitted text so far ends, ignoring spaces, with the `)`
/// that closes a markdown link target. Citations run before link conversion,
/// so adjacency is detected on the raw `[text](url)` form.
fn follows_link(emitted: &str) -> bool {
    emitted.trim_end_matches(' ').ends_with(')')
}

/// Resolve one marker. Returns the protected citation node, or an empty
/// string when the marker must be deleted.
fn render_marker(digits: &str, ctx: &mut RenderContext) -> String {
    if ctx.sources.is_empty() {
        return String::new();
    }

    // Absurdly long digit runs overflow usize; treat them as malformed.
    let Ok(num) = digits.parse::<usize>() else {
        return String::new();
    };
    if num == 0 {
        return String::new();
    }

    let Some(url) = ctx.sources.get(num - 1) else {
        return String::new();
    };
    if url.trim().is_empty() {
        return String::new();
    }

    // Source URLs come from the caller, not from the sentinel-stripped
    // input text, so they need the same treatment: a URL carrying the
    // private-use sentinels could otherwise forge a protected-fragment
    // token inside the attribute.
    let sanitized: String = url
        .chars()
        .filter(|&c| c != TOKEN_START && c != TOKEN_END)
        .collect();
    let href = escape_html(&sanitized);
    ctx.protect(
        FragmentKind::Inline,
        format!(
            "  <span class=\"source-ref\" data-source-url=\"{href}\" data-source-num=\"{num}\">{num}</span>  "
        ),
    )
}
