//! Inline stages: markdown links, bare-URL autolinking, and emphasis.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::context::{FragmentKind, RenderContext};
use crate::error::RenderError;
use crate::escape::visible_len;

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));

// Sentinel codepoints excluded so a bare URL never swallows a protected
// fragment token sitting right after it.
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s<\x{E000}\x{E001}]+").expect("bare url pattern")
});

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("italic pattern"));

/// Convert `[text](url)` into a protected anchor that opens in a new
/// browsing context without leaking the opener. Targets shorter than four
/// characters fail the shape check and stay literal text.
///
/// Text and URL were escaped by the escape stage, so both drop straight
/// into markup.
pub(crate) fn links(text: &str, ctx: &mut RenderContext) -> Result<String, RenderError> {
    let out = LINK.replace_all(text, |caps: &Captures<'_>| {
        let label = &caps[1];
        let url = &caps[2];
        // The shape check sees escaped text, so entities count as the one
        // character the author typed.
        if visible_len(url) < 4 {
            return caps[0].to_string();
        }
        ctx.protect(
            FragmentKind::Inline,
            format!(
                "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>"
            ),
        )
    });
    Ok(out.into_owned())
}

/// Optionally convert bare `http(s)://` runs into anchors. Markdown links,
/// code, and citations are already tokens by now, so nothing gets re-linked.
pub(crate) fn autolink(text: &str, ctx: &mut RenderContext) -> Result<String, RenderError> {
    if !ctx.options.autolink_bare_urls {
        return Ok(text.to_string());
    }

    let out = BARE_URL.replace_all(text, |caps: &Captures<'_>| {
        let url = &caps[0];
        ctx.protect(
            FragmentKind::Inline,
            format!(
                "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{url}</a>"
            ),
        )
    });
    Ok(out.into_owned())
}

/// `**text**` → strong emphasis. Code and links are tokens already, so bold
/// can never reach inside them.
pub(crate) fn bold(text: &str, _ctx: &mut RenderContext) -> Result<String, RenderError> {
    Ok(BOLD.replace_all(text, "<strong>$1</strong>").into_owned())
}

/// Single `*text*` not adjacent to another `*` → emphasis. The adjacency
/// rule keeps leftover bold delimiters from reading as italics; without
/// lookaround support it is a manual check on the characters flanking each
/// candidate match.
pub(crate) fn italic(text: &str, _ctx: &mut RenderContext) -> Result<String, RenderError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in ITALIC.captures_iter(text) {
        let m = caps.get(0).expect("match group 0");
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if before == Some('*') || after == Some('*') {
            continue;
        }

        out.push_str(&text[last..m.start()]);
        out.push_str("<em>");
        out.push_str(&caps[1]);
        out.push_str("</em>");
        last = m.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}
