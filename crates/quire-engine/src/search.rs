//! Phrase search — every non-overlapping occurrence of a phrase.
//!
//! [`find_all`] scans the whole buffer left to right. Once a match consumes
//! `[start, end)` the scan resumes at `end`, so occurrences never overlap even
//! when the phrase could overlap itself: `"aa"` in `"aaaa"` matches at 0 and
//! 2, not at 0, 1 and 2.
//!
//! Searches are literal. An empty phrase is the "no active search" state and
//! matches nothing.
//!
//! # Case folding
//!
//! Case-insensitive searches compare char by char after folding both sides
//! with [`fold_case`]. Folding maps each char to exactly one char, so folded
//! and original text have the same length and returned offsets index the
//! original buffer directly. Chars whose lowercase form is longer than one
//! char (`İ`) are compared unfolded.
//!
//! The scan is O(|text| · |phrase|). Rebuilds are triggered by discrete user
//! actions, not per frame, so that bound is fine.

use crate::buffer::{Edit, TextBuffer};
use crate::position::Span;

// ---------------------------------------------------------------------------
// Occurrence
// ---------------------------------------------------------------------------

/// One match of the phrase: `[start, end)` in char offsets, with
/// `end = start + phrase length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

impl Occurrence {
    /// The matched range as a span.
    #[inline]
    #[must_use]
    pub const fn span(self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Length of the match in chars.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Always false: occurrences of an empty phrase are never produced.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

// ---------------------------------------------------------------------------
// Case folding
// ---------------------------------------------------------------------------

/// Fold a char for case-insensitive comparison. Always one char in, one char
/// out.
#[must_use]
pub fn fold_case(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}

/// Chars of `text`, folded when the search is case-insensitive.
fn prepare(text: impl Iterator<Item = char>, case_sensitive: bool) -> Vec<char> {
    if case_sensitive {
        text.collect()
    } else {
        text.map(fold_case).collect()
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Every non-overlapping occurrence of `phrase` in `buf`, in increasing
/// offset order.
#[must_use]
pub fn find_all(buf: &TextBuffer, phrase: &str, case_sensitive: bool) -> Vec<Occurrence> {
    if phrase.is_empty() {
        return Vec::new();
    }
    let haystack = prepare(buf.rope().chars(), case_sensitive);
    let needle = prepare(phrase.chars(), case_sensitive);
    scan(&haystack, &needle)
}

/// Left-to-right non-overlapping scan of `needle` in `haystack`.
fn scan(haystack: &[char], needle: &[char]) -> Vec<Occurrence> {
    let mut matches = Vec::new();
    if needle.is_empty() {
        return matches;
    }

    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        let Some(found) = haystack[pos..]
            .windows(needle.len())
            .position(|window| window == needle)
        else {
            break;
        };
        let start = pos + found;
        let end = start + needle.len();
        matches.push(Occurrence { start, end });
        // Resume after this match (non-overlapping).
        pos = end;
    }

    matches
}

// ---------------------------------------------------------------------------
// Replace
// ---------------------------------------------------------------------------

/// Result of [`replace_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Number of occurrences replaced.
    pub replaced: usize,
    /// Buffer edits performed, in application order.
    pub edits: Vec<Edit>,
}

/// Replace every occurrence of `phrase` with `replacement`.
///
/// Uses the same occurrences [`find_all`] reports, so a case-insensitive
/// replace hits exactly what a case-insensitive search highlights. Occurrences
/// are rewritten back to front so earlier offsets stay valid. Nothing happens
/// when `phrase` is empty or identical to `replacement`.
pub fn replace_all(
    buf: &mut TextBuffer,
    phrase: &str,
    replacement: &str,
    case_sensitive: bool,
) -> ReplaceOutcome {
    if phrase.is_empty() || phrase == replacement {
        return ReplaceOutcome::default();
    }

    let occurrences = find_all(buf, phrase, case_sensitive);
    let mut edits = Vec::with_capacity(occurrences.len() * 2);
    for occurrence in occurrences.iter().rev() {
        edits.extend(buf.replace(occurrence.span(), replacement));
    }

    ReplaceOutcome {
        replaced: occurrences.len(),
        edits,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
