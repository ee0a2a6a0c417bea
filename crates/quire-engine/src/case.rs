//! Case transforms on the selection or the letter run under the caret.
//!
//! Three transforms are available:
//!
//! | Transform   | Effect                                                       |
//! |-------------|--------------------------------------------------------------|
//! | `Switch`    | swap ASCII upper and lower case                              |
//! | `Alternate` | alternate ASCII case by position, starting upper unless the first char is already upper |
//! | `Uniform`   | all ASCII lower if the first char is ASCII upper, else all ASCII upper |
//!
//! Only ASCII letters change. Transforms therefore never change the text
//! length in chars, so the selection (or the caret) is still valid afterwards
//! and is left where it was.

use tracing::debug;

use crate::buffer::{Edit, TextBuffer};
use crate::position::Span;
use crate::word::letter_run;

/// Which case transform to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseTransform {
    Switch,
    Alternate,
    Uniform,
}

impl CaseTransform {
    /// Transform `text`. The result has as many chars as the input.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Switch => text.chars().map(switch_ascii).collect(),
            Self::Alternate => alternate(text),
            Self::Uniform => uniform(text),
        }
    }
}

const fn switch_ascii(ch: char) -> char {
    if ch.is_ascii_lowercase() {
        ch.to_ascii_uppercase()
    } else if ch.is_ascii_uppercase() {
        ch.to_ascii_lowercase()
    } else {
        ch
    }
}

fn alternate(text: &str) -> String {
    // Parity of the positions that are upper-cased.
    let upper_parity = usize::from(text.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            if i % 2 == upper_parity {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            }
        })
        .collect()
}

fn uniform(text: &str) -> String {
    let lower = text.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if lower {
        text.to_ascii_lowercase()
    } else {
        text.to_ascii_uppercase()
    }
}

/// Result of [`transform_case`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseEdit {
    /// The range that was rewritten.
    pub span: Span,
    /// Buffer edits performed. Empty when the text was already in the
    /// target case or the range was empty.
    pub edits: Vec<Edit>,
}

/// Apply `transform` to the selection, or to the letter run around `caret`
/// when nothing is selected.
pub fn transform_case(
    buf: &mut TextBuffer,
    caret: usize,
    selection: Option<Span>,
    transform: CaseTransform,
) -> CaseEdit {
    let span = selection
        .map(|s| s.clamp_to(buf.len_chars()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| letter_run(buf, caret));

    let before = buf.slice(span);
    let after = transform.apply(&before);
    if before == after {
        return CaseEdit {
            span,
            edits: Vec::new(),
        };
    }

    let edits = buf.replace(span, &after);
    debug!(?transform, start = span.start, end = span.end, "transformed case");
    CaseEdit { span, edits }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
