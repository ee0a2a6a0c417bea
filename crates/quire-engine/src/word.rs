//! Word boundaries — double-click selection and modifier-key word jumps.
//!
//! Two queries, both pure functions of `(buffer, caret)`:
//!
//! | Query | Used for | Returns |
//! |-------|----------|---------|
//! | [`selection_bounds`] | double-click | the span to select |
//! | [`word_jump`] | Ctrl/Alt + Left/Right | the new caret offset |
//!
//! # Character classes
//!
//! Evaluated in priority order:
//!
//! 1. **Number** — ASCII digits and `.` (the decimal point counts as a digit,
//!    so a double-click on `3.14` selects the whole literal).
//! 2. **Letterlike** — ASCII letters, the accented Latin letters
//!    `U+00C0..=U+024F` (minus `×` and `÷`), `_` and `-`.
//! 3. **Stopping** — everything else. Space and line terminators always stop.
//!
//! Inside a word, ASCII digits continue the word (`var1` is one word), but
//! `.` does not (`a.b` is three tokens). A run of stopping chars only extends
//! over the *same* char, so double-clicking inside `====` selects the whole
//! run while `=>` splits.
//!
//! No query ever crosses a line terminator, and every result is a raw buffer
//! offset.

use tracing::trace;

use crate::buffer::{TextBuffer, is_line_terminator};
use crate::position::Span;

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Character class for boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// ASCII digits and `.`.
    Number,
    /// Letters, extended Latin, `_`, `-`.
    Letterlike,
    /// Everything else, including whitespace and line terminators.
    Stopping,
}

/// Classify a character.
#[must_use]
pub fn classify(ch: char) -> CharClass {
    if ch.is_ascii_digit() || ch == '.' {
        CharClass::Number
    } else if ch.is_ascii_alphabetic() || ch == '_' || ch == '-' || is_extended_latin(ch) {
        CharClass::Letterlike
    } else {
        CharClass::Stopping
    }
}

/// Accented Latin letters: Latin-1 Supplement letters plus Latin Extended-A
/// and -B.
fn is_extended_latin(ch: char) -> bool {
    ('\u{C0}'..='\u{24F}').contains(&ch) && ch != '\u{D7}' && ch != '\u{F7}'
}

/// Chars that continue a word once one has started: letterlike plus ASCII
/// digits.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_digit() || classify(ch) == CharClass::Letterlike
}

fn is_number_char(ch: char) -> bool {
    classify(ch) == CharClass::Number
}

fn is_letterlike(ch: char) -> bool {
    classify(ch) == CharClass::Letterlike
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction of a word jump.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum JumpDirection {
    Left,
    Right,
}

impl JumpDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The span a double-click at `caret` selects.
///
/// Looks at the chars on both sides of the caret:
///
/// - a number char on either side, with no letter on either side, selects the
///   surrounding number run (`3.14`);
/// - a letter on either side selects the surrounding word;
/// - otherwise the run of identical stopping chars next to the caret is
///   selected, preferring the char after the caret.
///
/// An empty line (or empty buffer) yields an empty span at the caret.
#[must_use]
pub fn selection_bounds(buf: &TextBuffer, caret: usize) -> Span {
    let caret = buf.clamp(caret);
    let before = caret
        .checked_sub(1)
        .and_then(|i| buf.char_at(i))
        .filter(|&c| !is_line_terminator(c));
    let after = buf.char_at(caret).filter(|&c| !is_line_terminator(c));

    let any = |pred: fn(char) -> bool| before.is_some_and(pred) || after.is_some_and(pred);

    let span = if any(is_number_char) && !any(is_letterlike) {
        expand(buf, caret, is_number_char)
    } else if any(is_letterlike) {
        expand(buf, caret, is_word_char)
    } else if let Some(anchor) = after.or(before) {
        expand_same(buf, caret, anchor)
    } else {
        Span::point(caret)
    };

    trace!(caret, start = span.start, end = span.end, "selection bounds");
    span
}

/// The caret offset a word jump from `caret` lands on.
///
/// Skips one token in `direction`: a number run, a word, a run of one
/// repeated stopping char, or a single line break (`\r\n` counts as one).
/// At the buffer edge the caret is returned unchanged.
#[must_use]
pub fn word_jump(buf: &TextBuffer, caret: usize, direction: JumpDirection) -> usize {
    let caret = buf.clamp(caret);
    let target = match direction {
        JumpDirection::Right => jump_right(buf, caret),
        JumpDirection::Left => jump_left(buf, caret),
    };
    trace!(caret, target, ?direction, "word jump");
    target
}

/// The run of letterlike chars around `caret` (digits stop it). This is the
/// target of case transforms when nothing is selected.
#[must_use]
pub fn letter_run(buf: &TextBuffer, caret: usize) -> Span {
    expand(buf, buf.clamp(caret), is_letterlike)
}

// ---------------------------------------------------------------------------
// Core algorithms
// ---------------------------------------------------------------------------

/// Grow a span outward from `caret` while `keep` holds on each side.
fn expand(buf: &TextBuffer, caret: usize, keep: fn(char) -> bool) -> Span {
    let len = buf.len_chars();
    let rope = buf.rope();

    let mut start = caret;
    while start > 0 && keep(rope.char(start - 1)) {
        start -= 1;
    }
    let mut end = caret;
    while end < len && keep(rope.char(end)) {
        end += 1;
    }
    Span::new(start, end)
}

/// Grow a span outward from `caret` over copies of `anchor`.
fn expand_same(buf: &TextBuffer, caret: usize, anchor: char) -> Span {
    let len = buf.len_chars();
    let rope = buf.rope();

    let mut start = caret;
    while start > 0 && rope.char(start - 1) == anchor {
        start -= 1;
    }
    let mut end = caret;
    while end < len && rope.char(end) == anchor {
        end += 1;
    }
    Span::new(start, end)
}

fn jump_right(buf: &TextBuffer, caret: usize) -> usize {
    let len = buf.len_chars();
    let rope = buf.rope();
    let Some(ch) = buf.char_at(caret) else {
        return caret;
    };

    if ch == '\r' && buf.char_at(caret + 1) == Some('\n') {
        return caret + 2;
    }
    if is_line_terminator(ch) {
        return caret + 1;
    }

    let mut idx = caret;
    match classify(ch) {
        CharClass::Number => {
            while idx < len && is_number_char(rope.char(idx)) {
                idx += 1;
            }
        }
        CharClass::Letterlike => {
            while idx < len && is_word_char(rope.char(idx)) {
                idx += 1;
            }
        }
        CharClass::Stopping => {
            while idx < len && rope.char(idx) == ch {
                idx += 1;
            }
        }
    }
    idx
}

fn jump_left(buf: &TextBuffer, caret: usize) -> usize {
    let rope = buf.rope();
    if caret == 0 {
        return 0;
    }
    let ch = rope.char(caret - 1);

    if ch == '\n' && caret >= 2 && rope.char(caret - 2) == '\r' {
        return caret - 2;
    }
    if is_line_terminator(ch) {
        return caret - 1;
    }

    let mut idx = caret;
    match classify(ch) {
        CharClass::Number => {
            while idx > 0 && is_number_char(rope.char(idx - 1)) {
                idx -= 1;
            }
        }
        CharClass::Letterlike => {
            while idx > 0 && is_word_char(rope.char(idx - 1)) {
                idx -= 1;
            }
        }
        CharClass::Stopping => {
            while idx > 0 && rope.char(idx - 1) == ch {
                idx -= 1;
            }
        }
    }
    idx
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(text: &str, caret: usize) -> (usize, usize) {
        let span = selection_bounds(&TextBuffer::from_text(text), caret);
        (span.start, span.end)
    }

    fn jump(text: &str, caret: usize, direction: JumpDirection) -> usize {
        word_jump(&TextBuffer::from_text(text), caret, direction)
    }

    // -- Classification -----------------------------------------------------

    #[test]
    fn classify_numbers() {
        assert_eq!(classify('0'), CharClass::Number);
        assert_eq!(classify('9'), CharClass::Number);
        assert_eq!(classify('.'), CharClass::Number);
    }

    #[test]
    fn classify_letterlike() {
        assert_eq!(classify('a'), CharClass::Letterlike);
        assert_eq!(classify('Z'), CharClass::Letterlike);
        assert_eq!(classify('_'), CharClass::Letterlike);
        assert_eq!(classify('-'), CharClass::Letterlike);
        assert_eq!(classify('é'), CharClass::Letterlike);
        assert_eq!(classify('Ł'), CharClass::Letterlike);
    }

    #[test]
    fn classify_stopping() {
        assert_eq!(classify(' '), CharClass::Stopping);
        assert_eq!(classify('\n'), CharClass::Stopping);
        assert_eq!(classify('\r'), CharClass::Stopping);
        assert_eq!(classify(','), CharClass::Stopping);
        assert_eq!(classify('×'), CharClass::Stopping);
        assert_eq!(classify('日'), CharClass::Stopping);
    }

    // -- selection_bounds: numbers ------------------------------------------

    #[test]
    fn double_click_inside_decimal_literal() {
        assert_eq!(bounds("price: 3.14kg", 9), (7, 11));
    }

    #[test]
    fn double_click_at_number_start() {
        assert_eq!(bounds("price: 3.14", 7), (7, 11));
    }

    #[test]
    fn double_click_at_buffer_end_after_number() {
        assert_eq!(bounds("x = 42", 6), (4, 6));
    }

    #[test]
    fn number_run_does_not_cross_lines() {
        assert_eq!(bounds("12\n34", 1), (0, 2));
        assert_eq!(bounds("12\n34", 4), (3, 5));
    }

    // -- selection_bounds: words --------------------------------------------

    #[test]
    fn double_click_word() {
        assert_eq!(bounds("hello world", 7), (6, 11));
    }

    #[test]
    fn double_click_word_end() {
        assert_eq!(bounds("hello world", 5), (0, 5));
    }

    #[test]
    fn word_absorbs_digits_underscore_hyphen() {
        assert_eq!(bounds("let my_var-2 = 1;", 6), (4, 12));
    }

    #[test]
    fn word_stops_at_dot() {
        assert_eq!(bounds("foo.bar", 1), (0, 3));
        assert_eq!(bounds("foo.bar", 5), (4, 7));
    }

    #[test]
    fn word_with_accents() {
        assert_eq!(bounds("un café noir", 5), (3, 7));
    }

    #[test]
    fn word_does_not_cross_lines() {
        assert_eq!(bounds("abc\ndef", 3), (0, 3));
        assert_eq!(bounds("abc\r\ndef", 5), (5, 8));
    }

    // -- selection_bounds: stopping runs ------------------------------------

    #[test]
    fn double_click_on_spaces_selects_run() {
        assert_eq!(bounds("a   b", 2), (1, 4));
    }

    #[test]
    fn stopping_run_is_same_char_only() {
        assert_eq!(bounds("x => y", 2), (2, 3));
        assert_eq!(bounds("====", 2), (0, 4));
    }

    #[test]
    fn stopping_at_line_end_uses_char_before() {
        assert_eq!(bounds("a  \nb", 3), (1, 3));
    }

    #[test]
    fn empty_line_selects_nothing() {
        assert_eq!(bounds("a\n\nb", 2), (2, 2));
        assert_eq!(bounds("", 0), (0, 0));
    }

    #[test]
    fn out_of_range_caret_is_clamped() {
        assert_eq!(bounds("hello", 99), (0, 5));
    }

    // -- word_jump: right ---------------------------------------------------

    #[test]
    fn jump_right_over_word() {
        assert_eq!(jump("hello world", 0, JumpDirection::Right), 5);
    }

    #[test]
    fn jump_right_over_space_run() {
        assert_eq!(jump("hello   world", 5, JumpDirection::Right), 8);
    }

    #[test]
    fn jump_right_over_decimal_as_one_unit() {
        assert_eq!(jump("pi=3.14159;", 3, JumpDirection::Right), 10);
    }

    #[test]
    fn jump_right_over_line_break() {
        assert_eq!(jump("ab\ncd", 2, JumpDirection::Right), 3);
        assert_eq!(jump("ab\r\ncd", 2, JumpDirection::Right), 4);
    }

    #[test]
    fn jump_right_at_end_is_noop() {
        assert_eq!(jump("abc", 3, JumpDirection::Right), 3);
        assert_eq!(jump("abc", 42, JumpDirection::Right), 3);
    }

    // -- word_jump: left ----------------------------------------------------

    #[test]
    fn jump_left_over_word() {
        assert_eq!(jump("hello world", 11, JumpDirection::Left), 6);
    }

    #[test]
    fn jump_left_from_mid_word() {
        assert_eq!(jump("hello world", 8, JumpDirection::Left), 6);
    }

    #[test]
    fn jump_left_over_decimal_as_one_unit() {
        assert_eq!(jump("x 3.14", 6, JumpDirection::Left), 2);
    }

    #[test]
    fn jump_left_over_line_break() {
        assert_eq!(jump("ab\ncd", 3, JumpDirection::Left), 2);
        assert_eq!(jump("ab\r\ncd", 4, JumpDirection::Left), 2);
    }

    #[test]
    fn jump_left_at_start_is_noop() {
        assert_eq!(jump("abc", 0, JumpDirection::Left), 0);
    }

    #[test]
    fn jumps_are_symmetric_over_a_token() {
        let text = "alpha beta";
        let right = jump(text, 6, JumpDirection::Right);
        assert_eq!(right, 10);
        assert_eq!(jump(text, right, JumpDirection::Left), 6);
    }

    #[test]
    fn direction_opposite() {
        assert_eq!(JumpDirection::Left.opposite(), JumpDirection::Right);
    }

    // -- letter_run ---------------------------------------------------------

    #[test]
    fn letter_run_stops_at_digits() {
        let buf = TextBuffer::from_text("abc123 def");
        assert_eq!(letter_run(&buf, 1), Span::new(0, 3));
    }

    #[test]
    fn letter_run_includes_hyphen() {
        let buf = TextBuffer::from_text("a well-known fact");
        assert_eq!(letter_run(&buf, 4), Span::new(2, 12));
    }
}
