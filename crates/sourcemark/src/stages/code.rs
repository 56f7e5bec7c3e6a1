//! Code stages: fenced blocks and inline spans.
//!
//! These run first so that nothing inside code is ever treated as markdown.
//! Interiors were already entity-escaped by the escape stage, so both
//! stages only wrap and protect.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::context::{FragmentKind, RenderContext};
use crate::error::RenderError;

static FENCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([\s\S]*?)```").expect("fenced code pattern"));

static INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern"));

/// Convert every triple-backtick region into a protected code block.
pub(crate) fn code_blocks(
    text: &str,
    ctx: &mut RenderContext,
) -> Result<String, RenderError> {
    let out = FENCED.replace_all(text, |caps: &Captures<'_>| {
        let body = caps[1].trim();
        ctx.protect(
            FragmentKind::Block,
            format!("<pre><code>{body}</code></pre>"),
        )
    });
    Ok(out.into_owned())
}

/// Convert single-backtick spans (no newline, no embedded backtick) into
/// protected inline code.
pub(crate) fn inline_code(
    text: &str,
    ctx: &mut RenderContext,
) -> Result<String, RenderError> {
    let out = INLINE.replace_all(text, |caps: &Captures<'_>| {
        ctx.protect(FragmentKind::Inline, format!("<code>{}</code>", &caps[1]))
    });
    Ok(out.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderOptions;

    fn run_both(input: &str) -> String {
        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&[], &options);
        let blocked = code_blocks(input, &mut ctx).unwrap();
        let inlined = inline_code(&blocked, &mut ctx).unwrap();
        ctx.restore(inlined)
    }

    #[test]
    fn test_fenced_block_trimmed_and_wrapped() {
        let out = run_both("```\nlet x = 1;\n```");
        assert_eq!(out, "<pre><code>let x = 1;</code></pre>");
    }

    #[test]
    fn test_fenced_wins_over_inline() {
        let out = run_both("```a `b` c```");
        assert_eq!(out, "<pre><code>a `b` c</code></pre>");
    }

    #[test]
    fn test_inline_span() {
        let out = run_both("use `foo()` here");
        assert_eq!(out, "use <code>foo()</code> here");
    }

    #[test]
    fn test_inline_span_must_not_cross_newline() {
        let input = "a `b\nc` d";
        assert_eq!(run_both(input), input);
    }

    #[test]
    fn test_unclosed_fence_left_alone() {
        let input = "```abc";
        assert_eq!(run_both(input), input);
    }
}
