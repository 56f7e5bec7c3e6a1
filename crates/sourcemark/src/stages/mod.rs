//! The ordered rendering pipeline.
//!
//! Stage order is a hard contract: block code must run before inline code,
//! citations before links, headings before emphasis, and paragraph folding
//! last. Swapping any two stages changes output. Each stage is a total pure
//! transform over the whole working string; fragments a stage finishes are
//! parked in the [`RenderContext`] behind sentinel tokens so no later stage
//! can reinterpret their interiors.

mod block;
mod citations;
mod code;
mod inline;

use std::panic::{self, AssertUnwindSafe};

use crate::context::{RenderContext, TOKEN_END, TOKEN_START};
use crate::error::RenderError;
use crate::escape::escape_html;

pub(crate) type StageFn = fn(&str, &mut RenderContext) -> Result<String, RenderError>;

/// The pipeline, in execution order.
pub(crate) const STAGES: &[(&str, StageFn)] = &[
    ("escape", escape),
    ("code-blocks", code::code_blocks),
    ("inline-code", code::inline_code),
    ("citations", citations::bind_citations),
    ("links", inline::links),
    ("autolink", inline::autolink),
    ("headings", block::headings),
    ("rules", block::horizontal_rules),
    ("bold", inline::bold),
    ("italic", inline::italic),
    ("lists", block::lists),
    ("paragraphs", block::paragraphs),
];

/// Run every stage in order, then splice protected fragments back in.
pub(crate) fn run(text: &str, ctx: &mut RenderContext) -> Result<String, RenderError> {
    run_stages(text, ctx, STAGES)
}

/// A panic inside a stage is contained here and reported as a stage error,
/// so the caller's escaped-text fallback still applies.
fn run_stages(
    text: &str,
    ctx: &mut RenderContext,
    stages: &[(&str, StageFn)],
) -> Result<String, RenderError> {
    let mut working = text.to_string();
    for (name, stage) in stages {
        tracing::debug!(stage = name, len = working.len(), "running render stage");
        working = panic::catch_unwind(AssertUnwindSafe(|| stage(&working, ctx)))
            .map_err(|payload| RenderError::stage(*name, panic_message(payload)))??;
    }
    Ok(ctx.restore(working))
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}

/// Stage 0: entity-escape the whole input.
///
/// Everything downstream operates on escaped text and never re-escapes.
/// Private-use sentinel codepoints are stripped first so user input cannot
/// forge a protected-fragment token.
fn escape(text: &str, _ctx: &mut RenderContext) -> Result<String, RenderError> {
    let cleaned: String = text
        .chars()
        .filter(|&c| c != TOKEN_START && c != TOKEN_END)
        .collect();
    Ok(escape_html(&cleaned))
}
