//! Pure HTML escaping and URL display utilities.
//!
//! Everything the renderer emits as literal text goes through [`escape_html`]
//! exactly once, at the top of the pipeline. Source URLs shown in tooltips are
//! shortened with [`truncate_url`].

/// Maximum number of characters shown for a source URL before truncation.
pub const MAX_TOOLTIP_CHARS: usize = 60;

/// Escape HTML-significant characters in text.
///
/// Escapes the five characters that matter for both element content and
/// attribute values: `&`, `<`, `>`, `"`, `'`.
///
/// # Examples
///
/// ```
/// use sourcemark::escape::escape_html;
///
/// assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
/// assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Length of escaped text as the reader sees it: each entity produced by
/// [`escape_html`] counts as the single character it stands for. A bare `&`
/// cannot appear in escaped text, so anything else starting with `&` counts
/// per char.
pub(crate) fn visible_len(escaped: &str) -> usize {
    const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

    let mut len = 0;
    let mut rest = escaped;
    while let Some(c) = rest.chars().next() {
        if let Some(entity) = ENTITIES.iter().find(|e| rest.starts_with(**e)) {
            rest = &rest[entity.len()..];
        } else {
            rest = &rest[c.len_utf8()..];
        }
        len += 1;
    }
    len
}

/// Shorten a URL for tooltip display.
///
/// URLs longer than [`MAX_TOOLTIP_CHARS`] visible characters are cut to 57
/// characters with `...` appended; shorter URLs pass through unchanged. The
/// cut is character-based so multi-byte URLs never split mid-codepoint.
pub fn truncate_url(url: &str) -> String {
    if url.chars().count() <= MAX_TOOLTIP_CHARS {
        return url.to_string();
    }

    let head: String = url.chars().take(MAX_TOOLTIP_CHARS - 3).collect();
    format!("{head}...")
}
