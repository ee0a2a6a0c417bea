//! Offset and position types.
//!
//! The engine has exactly one offset space: **char offsets** into the whole
//! buffer (Unicode scalar values, ropey's native index). A CRLF terminator
//! occupies two offsets like any other pair of chars. Every public signature
//! takes and returns these raw offsets.
//!
//! [`Position`] is the line-relative view of the same offset, used only at the
//! edges (status display, the command-line shell). It is never fed back into
//! the engine's own algorithms.
//!
//! [`Span`] is the half-open `[start, end)` range shared by selections,
//! occurrences, lines and highlight commands.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A line-relative position: (line, column), both 0-indexed.
///
/// `col` is the char offset from the start of the line, **not** a byte offset.
///
/// # Ordering
///
/// Positions are ordered lexicographically: line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

// Natural ordering: line first, then column.
impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// A half-open char range in a buffer: `[start, end)`.
///
/// `start` is inclusive, `end` is exclusive. An empty span has `start == end`.
/// Spans built through [`Span::new`] always satisfy `start <= end`; untrusted
/// pairs coming from the view go through [`Span::selection`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span::new requires start <= end");
        Self { start, end }
    }

    /// A zero-width span (a caret) at `offset`.
    #[inline]
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Interpret a `(start, end)` pair reported by the view as a selection.
    ///
    /// Malformed pairs (`start > end`) and empty pairs both mean "no
    /// selection" and yield `None`.
    #[inline]
    #[must_use]
    pub const fn selection(start: usize, end: usize) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Number of chars covered.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// True when the span covers zero chars.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True when `offset` falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub const fn contains(self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Both endpoints clamped to `len`.
    ///
    /// The fields are public, so a span can arrive with `start > end`. Such a
    /// span clamps to an empty one at `end`, which every consumer already
    /// reads as "no selection".
    #[inline]
    #[must_use]
    pub fn clamp_to(self, len: usize) -> Self {
        let end = self.end.min(len);
        if self.start > self.end {
            return Self::point(end);
        }
        Self {
            start: self.start.min(len),
            end,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}..{})", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Position -----------------------------------------------------------

    #[test]
    fn position_ordering_same_line() {
        let a = Position::new(1, 3);
        let b = Position::new(1, 7);
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn position_ordering_different_lines() {
        assert!(Position::new(0, 100) < Position::new(1, 0));
    }

    #[test]
    fn position_debug_format() {
        assert_eq!(format!("{:?}", Position::new(2, 5)), "Pos(2:5)");
    }

    #[test]
    fn position_display_is_1_indexed() {
        assert_eq!(format!("{}", Position::ZERO), "1:1");
        assert_eq!(format!("{}", Position::new(9, 14)), "10:15");
    }

    // -- Span construction --------------------------------------------------

    #[test]
    fn span_point_is_empty() {
        let s = Span::point(4);
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn span_len() {
        assert_eq!(Span::new(3, 8).len(), 5);
    }

    // -- Span::selection ----------------------------------------------------

    #[test]
    fn selection_well_formed() {
        assert_eq!(Span::selection(2, 5), Some(Span::new(2, 5)));
    }

    #[test]
    fn selection_empty_is_none() {
        assert_eq!(Span::selection(4, 4), None);
    }

    #[test]
    fn selection_malformed_is_none() {
        assert_eq!(Span::selection(9, 3), None);
    }

    // -- Span containment ---------------------------------------------------

    #[test]
    fn contains_is_half_open() {
        let s = Span::new(2, 5);
        assert!(!s.contains(1));
        assert!(s.contains(2));
        assert!(s.contains(4));
        assert!(!s.contains(5));
    }

    #[test]
    fn empty_span_contains_nothing() {
        assert!(!Span::point(5).contains(5));
    }

    #[test]
    fn clamp_to_length() {
        assert_eq!(Span::new(3, 20).clamp_to(10), Span::new(3, 10));
        assert_eq!(Span::new(12, 20).clamp_to(10), Span::new(10, 10));
    }

    #[test]
    fn clamp_to_empties_reversed_span() {
        let reversed = Span { start: 6, end: 2 };
        assert_eq!(reversed.clamp_to(10), Span::point(2));
        assert!(reversed.clamp_to(10).is_empty());
        assert_eq!(Span { start: 30, end: 20 }.clamp_to(10), Span::point(10));
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn span_formats() {
        let s = Span::new(1, 4);
        assert_eq!(format!("{s:?}"), "Span(1..4)");
        assert_eq!(format!("{s}"), "1..4");
    }
}
