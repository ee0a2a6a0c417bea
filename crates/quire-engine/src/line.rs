//! Line operations — line lookup, duplicate line, join lines.
//!
//! All functions work on raw char offsets. A line's terminator (`\n`, `\r`
//! or `\r\n`) belongs to the line it ends, and an offset sitting at a line's
//! content end still belongs to that line: the caret after the last visible
//! char is "on" the line, not on the next one.
//!
//! Mutating functions return a [`LineEdit`]: the caret the view should show
//! afterwards plus the buffer edits performed, which the owning document
//! forwards to its edit listeners.

use tracing::debug;

use crate::buffer::{Edit, Line, TextBuffer};
use crate::position::Span;

/// Outcome of a line mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    /// Caret offset after the operation.
    pub caret: usize,
    /// Edits applied to the buffer, in order. Empty for a no-op.
    pub edits: Vec<Edit>,
}

impl LineEdit {
    const fn unchanged(caret: usize) -> Self {
        Self {
            caret,
            edits: Vec::new(),
        }
    }

    /// True when the buffer was not touched.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.edits.is_empty()
    }
}

/// The line holding `offset` (clamped into the buffer).
#[must_use]
pub fn line_at(buf: &TextBuffer, offset: usize) -> Line {
    let index = buf.line_index_of(offset);
    buf.line(index).unwrap_or_else(|| {
        let len = buf.len_chars();
        Line {
            index,
            start: len,
            content_end: len,
            end: len,
        }
    })
}

/// Duplicate the selection, or the caret's line when nothing is selected.
///
/// - With a selection, a copy of the selected text goes right after the
///   selection end. Caret and selection stay where they are.
/// - Without one, a copy of the caret's line (terminator included) goes in
///   front of the line and the caret moves forward by the copy's length, so
///   it keeps its column on the pushed-down original. A last line with no
///   terminator is copied with the buffer's line ending appended.
pub fn duplicate_line(buf: &mut TextBuffer, caret: usize, selection: Option<Span>) -> LineEdit {
    let caret = buf.clamp(caret);

    if let Some(selection) = selection.map(|s| s.clamp_to(buf.len_chars())) {
        if !selection.is_empty() {
            let text = buf.slice(selection);
            let edit = buf.insert(selection.end, &text);
            debug!(start = selection.start, end = selection.end, "duplicated selection");
            return LineEdit {
                caret,
                edits: vec![edit],
            };
        }
    }

    let line = line_at(buf, caret);
    let mut text = buf.slice(line.span());
    if !line.has_terminator() {
        text.push_str(buf.line_ending().as_str());
    }
    let copied = text.chars().count();
    let edit = buf.insert(line.start, &text);
    let caret = caret + copied;

    debug!(line = line.index, caret, "duplicated line");
    LineEdit {
        caret,
        edits: vec![edit],
    }
}

/// Join the caret's line with the line below it.
///
/// The terminator ending the caret's line is removed and the caret moves to
/// the join point (the old content end). On the last line there is nothing
/// to join and the buffer is left alone.
pub fn join_lines(buf: &mut TextBuffer, caret: usize) -> LineEdit {
    let caret = buf.clamp(caret);
    let line = line_at(buf, caret);

    if line.index + 1 >= buf.line_count() {
        return LineEdit::unchanged(caret);
    }

    let Some(edit) = buf.remove(Span::new(line.content_end, line.end)) else {
        return LineEdit::unchanged(caret);
    };

    debug!(line = line.index, caret = line.content_end, "joined lines");
    LineEdit {
        caret: line.content_end,
        edits: vec![edit],
    }
}

/// Number of lines wholly inside the selection.
///
/// A line counts when it starts at or after the selection start, its visible
/// content ends at or before the selection end, and it starts before the
/// selection end (so an empty line just past the selection is not counted).
/// No selection means 0.
#[must_use]
pub fn num_whole_lines_selected(buf: &TextBuffer, selection: Option<Span>) -> usize {
    let Some(selection) = selection else {
        return 0;
    };
    let selection = selection.clamp_to(buf.len_chars());
    if selection.is_empty() {
        return 0;
    }

    let first = buf.line_index_of(selection.start);
    let last = buf.line_index_of(selection.end);
    (first..=last)
        .filter_map(|i| buf.line(i))
        .filter(|l| {
            l.start >= selection.start && l.content_end <= selection.end && l.start < selection.end
        })
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::LineEnding;
    use pretty_assertions::assert_eq;

    fn lines_of(buf: &TextBuffer) -> Vec<String> {
        buf.lines().map(|l| buf.slice(l.content())).collect()
    }

    // -- line_at ------------------------------------------------------------

    #[test]
    fn line_at_inside_line() {
        let buf = TextBuffer::from_text("ab\ncd\nef");
        assert_eq!(line_at(&buf, 4).index, 1);
    }

    #[test]
    fn line_at_content_end_stays_on_line() {
        let buf = TextBuffer::from_text("ab\ncd");
        let line = line_at(&buf, 2);
        assert_eq!(line.index, 0);
        assert_eq!(line.span(), Span::new(0, 3));
    }

    #[test]
    fn line_at_crlf_middle_stays_on_line() {
        let buf = TextBuffer::from_text("ab\r\ncd");
        assert_eq!(line_at(&buf, 3).index, 0);
        assert_eq!(line_at(&buf, 4).index, 1);
    }

    #[test]
    fn line_at_clamps() {
        let buf = TextBuffer::from_text("ab\ncd");
        assert_eq!(line_at(&buf, 99).index, 1);
    }

    #[test]
    fn line_at_empty_buffer() {
        let buf = TextBuffer::new();
        assert_eq!(line_at(&buf, 0).span(), Span::new(0, 0));
    }

    // -- duplicate_line -----------------------------------------------------

    #[test]
    fn duplicate_caret_line() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        let out = duplicate_line(&mut buf, 1, None);
        assert_eq!(lines_of(&buf), vec!["ab", "ab", "cd"]);
        assert_eq!(out.caret, 1 + "ab".len() + 1);
        assert_eq!(line_at(&buf, out.caret).index, 1);
    }

    #[test]
    fn duplicate_last_line_without_terminator() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        let out = duplicate_line(&mut buf, 4, None);
        assert_eq!(buf.contents(), "ab\ncd\ncd");
        assert_eq!(out.caret, 7);
        assert_eq!(buf.position_of(out.caret).col, 1);
    }

    #[test]
    fn duplicate_uses_buffer_line_ending() {
        let mut buf = TextBuffer::from_text("ab\r\ncd");
        assert_eq!(buf.line_ending(), LineEnding::CrLf);
        duplicate_line(&mut buf, 5, None);
        assert_eq!(buf.contents(), "ab\r\ncd\r\ncd");
    }

    #[test]
    fn duplicate_crlf_line_keeps_terminator() {
        let mut buf = TextBuffer::from_text("ab\r\ncd");
        let out = duplicate_line(&mut buf, 0, None);
        assert_eq!(buf.contents(), "ab\r\nab\r\ncd");
        assert_eq!(out.caret, 4);
    }

    #[test]
    fn duplicate_selection_inserts_after_it() {
        let mut buf = TextBuffer::from_text("hello world");
        let out = duplicate_line(&mut buf, 5, Some(Span::new(0, 5)));
        assert_eq!(buf.contents(), "hellohello world");
        assert_eq!(out.caret, 5);
        assert_eq!(out.edits.len(), 1);
    }

    #[test]
    fn duplicate_empty_selection_duplicates_line() {
        let mut buf = TextBuffer::from_text("x\ny");
        duplicate_line(&mut buf, 0, Some(Span::point(0)));
        assert_eq!(buf.contents(), "x\nx\ny");
    }

    #[test]
    fn duplicate_reversed_selection_duplicates_line() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        let out = duplicate_line(&mut buf, 2, Some(Span { start: 4, end: 1 }));
        assert_eq!(buf.contents(), "ab\nab\ncd");
        assert_eq!(out.caret, 5);
    }

    #[test]
    fn duplicate_in_empty_buffer() {
        let mut buf = TextBuffer::new();
        let out = duplicate_line(&mut buf, 0, None);
        assert_eq!(buf.contents(), "\n");
        assert_eq!(out.caret, 1);
    }

    // -- join_lines ---------------------------------------------------------

    #[test]
    fn join_merges_with_next_line() {
        let mut buf = TextBuffer::from_text("ab\ncd\nef");
        let out = join_lines(&mut buf, 1);
        assert_eq!(buf.contents(), "abcd\nef");
        assert_eq!(out.caret, 2);
    }

    #[test]
    fn join_crlf_removes_both_chars() {
        let mut buf = TextBuffer::from_text("ab\r\ncd");
        let out = join_lines(&mut buf, 0);
        assert_eq!(buf.contents(), "abcd");
        assert_eq!(out.caret, 2);
    }

    #[test]
    fn join_on_last_line_is_noop() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        let out = join_lines(&mut buf, 4);
        assert!(out.is_noop());
        assert_eq!(out.caret, 4);
        assert_eq!(buf.contents(), "ab\ncd");
    }

    #[test]
    fn join_single_line_is_noop() {
        let mut buf = TextBuffer::from_text("solo");
        assert!(join_lines(&mut buf, 2).is_noop());
    }

    #[test]
    fn join_then_reinsert_terminator_restores_text() {
        let original = "first line\nsecond line\nthird";
        let mut buf = TextBuffer::from_text(original);
        let out = join_lines(&mut buf, 3);
        buf.insert(out.caret, "\n");
        assert_eq!(buf.contents(), original);
    }

    // -- num_whole_lines_selected -------------------------------------------

    #[test]
    fn whole_lines_none_without_selection() {
        let buf = TextBuffer::from_text("a\nb");
        assert_eq!(num_whole_lines_selected(&buf, None), 0);
        assert_eq!(num_whole_lines_selected(&buf, Some(Span::point(1))), 0);
    }

    #[test]
    fn whole_lines_all() {
        let buf = TextBuffer::from_text("ab\n\ncd");
        assert_eq!(num_whole_lines_selected(&buf, Some(Span::new(0, 6))), 3);
    }

    #[test]
    fn whole_lines_content_without_terminator_counts() {
        let buf = TextBuffer::from_text("ab\ncd");
        assert_eq!(num_whole_lines_selected(&buf, Some(Span::new(0, 2))), 1);
    }

    #[test]
    fn whole_lines_partial_lines_do_not_count() {
        let buf = TextBuffer::from_text("abc\ndef\nghi");
        // "bc\ndef\ng": only "def" is whole.
        assert_eq!(num_whole_lines_selected(&buf, Some(Span::new(1, 9))), 1);
    }

    #[test]
    fn whole_lines_empty_line_past_selection_not_counted() {
        let buf = TextBuffer::from_text("ab\n\n");
        // Selecting "ab\n" ends at the empty line's start.
        assert_eq!(num_whole_lines_selected(&buf, Some(Span::new(0, 3))), 1);
    }

    #[test]
    fn whole_lines_reversed_selection_is_zero() {
        let buf = TextBuffer::from_text("ab\ncd\nef");
        assert_eq!(num_whole_lines_selected(&buf, Some(Span { start: 8, end: 0 })), 0);
    }
}
