//! Per-call rendering context.
//!
//! The context carries everything one `render` call needs: the borrowed
//! source list, the options, and the store of protected fragments. Nothing
//! here outlives the call, so overlapping renders can never observe each
//! other's sources.

use crate::RenderOptions;

/// Opens a protected-fragment token. Private-use codepoints are stripped
/// from user input before the pipeline runs, so a token in the working text
/// is always renderer-made.
pub(crate) const TOKEN_START: char = '\u{E000}';
/// Closes a protected-fragment token.
pub(crate) const TOKEN_END: char = '\u{E001}';

/// How a protected fragment behaves during paragraph folding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FragmentKind {
    /// Block-level markup (fenced code): passes through unwrapped.
    Block,
    /// Inline markup (inline code, citations, links): wrapped like text.
    Inline,
}

/// State threaded through the pipeline for a single render call.
pub(crate) struct RenderContext<'a> {
    pub(crate) sources: &'a [String],
    pub(crate) options: &'a RenderOptions,
    protected: Vec<(FragmentKind, String)>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(sources: &'a [String], options: &'a RenderOptions) -> Self {
        Self {
            sources,
            options,
            protected: Vec::new(),
        }
    }

    /// Store a finished markup fragment and return the sentinel token that
    /// stands in for it. Later stages see only the token, which contains no
    /// characters any stage matches on.
    pub(crate) fn protect(&mut self, kind: FragmentKind, fragment: String) -> String {
        let index = self.protected.len();
        self.protected.push((kind, fragment));
        format!("{TOKEN_START}{index}{TOKEN_END}")
    }

    /// Kind of the fragment whose token sits at the very start of `text`,
    /// if `text` starts with a token at all.
    pub(crate) fn leading_fragment_kind(&self, text: &str) -> Option<FragmentKind> {
        let rest = text.strip_prefix(TOKEN_START)?;
        let end = rest.find(TOKEN_END)?;
        let index: usize = rest[..end].parse().ok()?;
        self.protected.get(index).map(|(kind, _)| *kind)
    }

    /// Replace every token with its stored fragment.
    ///
    /// Fragments can embed tokens of their own (link text may hold inline
    /// code converted one stage earlier), so substitution repeats until the
    /// text is token-free. The bound matches the number of protecting
    /// stages: nesting cannot run deeper than that.
    pub(crate) fn restore(&self, text: String) -> String {
        let mut text = text;
        for _ in 0..8 {
            if !text.contains(TOKEN_START) {
                break;
            }
            text = self.substitute(&text);
        }
        text
    }

    fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(TOKEN_START) {
            out.push_str(&rest[..start]);
            let after = &rest[start + TOKEN_START.len_utf8()..];
            match after.find(TOKEN_END) {
                Some(end) => {
                    if let Some((_, fragment)) =
                        after[..end].parse::<usize>().ok().and_then(|i| self.protected.get(i))
                    {
                        out.push_str(fragment);
                    }
                    rest = &after[end + TOKEN_END.len_utf8()..];
                }
                None => {
                    // Unterminated sentinel: drop it and keep the remainder.
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}
