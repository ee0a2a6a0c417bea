//! Match cursor — which occurrence is "current" as the user steps through
//! search results.
//!
//! The cursor is a clamped 1-based index into the occurrence list plus the
//! list's length. `0` means "no current occurrence" and only happens when
//! there are no occurrences at all.
//!
//! # Anchoring
//!
//! After every rebuild the cursor is re-anchored ([`MatchCursor::anchor`]):
//!
//! 1. If the selection is exactly the phrase, the occurrence starting at the
//!    selection start becomes current.
//! 2. Otherwise the cursor picks between the last occurrence ending at or
//!    before the caret (`prev`) and the first starting at or after it
//!    (`next`): `prev` wins when
//!    `caret - prev.start + len - 1 <= next.start - caret`. With only one of
//!    the two available, that one is current. A caret inside an occurrence
//!    belongs to neither, so the bracketing pair around it decides.
//!
//! # Stepping
//!
//! [`next`](MatchCursor::next) and [`prev`](MatchCursor::prev) clamp at the
//! ends of the list; there is no wraparound.

use std::fmt;

use tracing::trace;

use crate::search::Occurrence;

/// Position of the current occurrence within the occurrence list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCursor {
    /// 1-based index of the current occurrence, 0 when there is none.
    current: usize,
    /// Number of occurrences.
    total: usize,
}

impl MatchCursor {
    /// A cursor over an empty occurrence list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: 0,
            total: 0,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// 1-based index of the current occurrence (0 when there are none).
    #[inline]
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of occurrences.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// 0-based index of the current occurrence, for indexing the list.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.current.checked_sub(1)
    }

    /// The `"{current}/{total} results"` label shown next to the search
    /// field.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    // -- Anchoring ----------------------------------------------------------

    /// Choose the current occurrence after a rebuild.
    ///
    /// `selected_phrase_at` is the selection start when the selected text
    /// equals the phrase exactly, `None` otherwise. The caller does the
    /// comparison because it owns the phrase.
    pub fn anchor(
        &mut self,
        occurrences: &[Occurrence],
        caret: usize,
        selected_phrase_at: Option<usize>,
    ) {
        self.total = occurrences.len();
        self.current = if occurrences.is_empty() {
            0
        } else {
            nearest(occurrences, caret, selected_phrase_at) + 1
        };
        trace!(caret, current = self.current, total = self.total, "anchored match cursor");
    }

    /// Forget every occurrence.
    pub const fn reset(&mut self) {
        self.current = 0;
        self.total = 0;
    }

    // -- Stepping -----------------------------------------------------------

    /// Step to the next occurrence. Returns `false` (and does nothing) at
    /// the last occurrence or when there is at most one.
    pub fn next(&mut self) -> bool {
        if self.total > 1 && self.current < self.total {
            self.current += 1;
            trace!(current = self.current, total = self.total, "next match");
            true
        } else {
            false
        }
    }

    /// Step to the previous occurrence. Returns `false` (and does nothing) at
    /// the first occurrence or when there is at most one.
    pub fn prev(&mut self) -> bool {
        if self.total > 1 && self.current > 1 {
            self.current -= 1;
            trace!(current = self.current, total = self.total, "previous match");
            true
        } else {
            false
        }
    }
}

impl fmt::Display for MatchCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            f.write_str("0/0 results")
        } else {
            write!(f, "{}/{} results", self.current, self.total)
        }
    }
}

/// 0-based index of the occurrence to make current. `occurrences` must be
/// non-empty.
fn nearest(occurrences: &[Occurrence], caret: usize, selected_phrase_at: Option<usize>) -> usize {
    if let Some(i) =
        selected_phrase_at.and_then(|start| occurrences.iter().position(|o| o.start == start))
    {
        return i;
    }

    let prev = occurrences.iter().rposition(|o| o.end <= caret);
    let next = occurrences.iter().position(|o| o.start >= caret);

    match (prev, next) {
        (Some(p), Some(n)) => {
            let before = &occurrences[p];
            let after = &occurrences[n];
            if caret - before.start + before.len() - 1 <= after.start - caret {
                p
            } else {
                n
            }
        }
        (Some(p), None) => p,
        (None, Some(n)) => n,
        (None, None) => 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
