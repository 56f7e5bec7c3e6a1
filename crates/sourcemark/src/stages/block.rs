//! Block stages: headings, horizontal rules, lists, and paragraph folding.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::context::{FragmentKind, RenderContext};
use crate::error::RenderError;

// Largest prefix first so `####` never half-matches as `#`.
static HEADINGS: LazyLock<[(Regex, &str, &str); 4]> = LazyLock::new(|| {
    [
        (Regex::new(r"(?m)^#### (.*)$").expect("h4 pattern"), "<h4>", "</h4>"),
        (Regex::new(r"(?m)^### (.*)$").expect("h3 pattern"), "<h3>", "</h3>"),
        (Regex::new(r"(?m)^## (.*)$").expect("h2 pattern"), "<h2>", "</h2>"),
        (Regex::new(r"(?m)^# (.*)$").expect("h1 pattern"), "<h1>", "</h1>"),
    ]
});

// Horizontal whitespace only: `\s` would eat the newline and merge the
// following blank line into the rule.
static RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:---|\*\*\*|___)[ \t]*$").expect("rule pattern")
});

static LIST_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^- .+\n?)+").expect("list pattern"));

static PARA_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("paragraph break pattern"));

static BLOCK_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(?:h[1-6]|ul|ol|pre|blockquote|hr)").expect("block open pattern")
});

/// Line-anchored `#`..`####` prefixes become heading elements.
pub(crate) fn headings(text: &str, _ctx: &mut RenderContext) -> Result<String, RenderError> {
    let mut out = text.to_string();
    for (pattern, open, close) in HEADINGS.iter() {
        out = pattern
            .replace_all(&out, format!("{open}$1{close}"))
            .into_owned();
    }
    Ok(out)
}

/// A line of `---`, `***`, or `___` (optional trailing whitespace) becomes a
/// rule element.
pub(crate) fn horizontal_rules(
    text: &str,
    _ctx: &mut RenderContext,
) -> Result<String, RenderError> {
    Ok(RULE.replace_all(text, "<hr>").into_owned())
}

/// Contiguous `- ` lines group into one unordered list, one item per line.
/// Item content already holding protected markup passes through unchanged.
pub(crate) fn lists(text: &str, _ctx: &mut RenderContext) -> Result<String, RenderError> {
    let out = LIST_RUN.replace_all(text, |caps: &Captures<'_>| {
        let mut items = String::new();
        for line in caps[0].lines() {
            let Some(content) = line.strip_prefix("- ") else {
                continue;
            };
            items.push_str("<li>");
            items.push_str(content);
            items.push_str("</li>");
        }
        format!("<ul>{items}</ul>")
    });
    Ok(out.into_owned())
}

/// Split on blank lines; block-level paragraphs pass through unwrapped,
/// everything else gets `\n` → `<br>` and a paragraph wrapper.
pub(crate) fn paragraphs(text: &str, ctx: &mut RenderContext) -> Result<String, RenderError> {
    let mut rendered = Vec::new();

    for para in PARA_BREAK.split(text) {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }

        let is_block = BLOCK_OPEN.is_match(para)
            || ctx.leading_fragment_kind(para) == Some(FragmentKind::Block);

        if is_block {
            rendered.push(para.to_string());
        } else {
            rendered.push(format!("<p>{}</p>", para.replace('\n', "<br>")));
        }
    }

    Ok(rendered.join("\n"))
}
