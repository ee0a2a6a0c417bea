//! Text buffer — the shared foundation under search, word boundaries, and
//! line editing.
//!
//! A `TextBuffer` wraps a [`ropey::Rope`] and exposes the text as char
//! offsets plus a derived list of [`Line`]s. Every other engine component
//! reads through these accessors; nothing else keeps its own copy of the text
//! beyond the current operation.
//!
//! # Design choices
//!
//! - **ropey** gives O(log n) insert/remove at any offset and a line index
//!   that is maintained for free on every edit. The rope is built with only
//!   the `cr_lines` line-break set, so its idea of a line break is exactly
//!   `\n`, `\r` or `\r\n`, the same set [`is_line_terminator`] reports.
//!
//! - **Offsets are char offsets**, never bytes. A CRLF occupies two offsets.
//!
//! - **Lines cover the buffer.** Line `i` spans `[start, end)` including its
//!   terminator; consecutive lines are contiguous and the last line has no
//!   terminator (a buffer ending in `\n` has a trailing empty line).
//!
//! - **No undo here.** Each mutation returns an [`Edit`] describing what
//!   changed. The owner forwards it to [`EditListener`]s; undo/redo lives
//!   outside the engine.

use std::fmt;

use ropey::Rope;

use crate::position::{Position, Span};

// ---------------------------------------------------------------------------
// Line ending detection
// ---------------------------------------------------------------------------

/// Line ending style of a buffer.
///
/// Detected on construction by scanning for the first terminator. Used when
/// the engine has to synthesize a terminator (duplicating a last line that
/// has none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// A lone `\r`.
    Cr,
}

impl LineEnding {
    /// The string representation of this line ending.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Detect the dominant line ending by finding the first occurrence.
    /// Returns `Lf` if the text has no line endings.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                return Self::Lf;
            }
            if byte == b'\r' {
                return if bytes.get(i + 1) == Some(&b'\n') {
                    Self::CrLf
                } else {
                    Self::Cr
                };
            }
        }
        Self::Lf
    }

    /// Length of this line ending in chars.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        match self {
            Self::Lf | Self::Cr => 1,
            Self::CrLf => 2,
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
            Self::Cr => f.write_str("CR"),
        }
    }
}

/// True for the chars that end a line: `\n` and `\r`.
#[inline]
#[must_use]
pub const fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// One line of the buffer as char offsets.
///
/// `[start, content_end)` is the visible text, `[content_end, end)` is the
/// terminator (empty on the last line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    /// 0-indexed line number.
    pub index: usize,
    /// Offset of the first char of the line.
    pub start: usize,
    /// Offset just past the last non-terminator char.
    pub content_end: usize,
    /// Offset just past the terminator (the next line's `start`).
    pub end: usize,
}

impl Line {
    /// The whole line, terminator included.
    #[inline]
    #[must_use]
    pub const fn span(self) -> Span {
        Span::new(self.start, self.end)
    }

    /// The line's text without its terminator.
    #[inline]
    #[must_use]
    pub const fn content(self) -> Span {
        Span::new(self.start, self.content_end)
    }

    /// Chars in the line including the terminator.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// True for a line with no content and no terminator (only possible as
    /// the last line).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True when the line ends in `\n`, `\r` or `\r\n`.
    #[inline]
    #[must_use]
    pub const fn has_terminator(self) -> bool {
        self.content_end < self.end
    }
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// A single buffer mutation, as reported to [`EditListener`]s.
///
/// Each edit records the offset and the text involved, which is enough for
/// an outside undo stack to reconstruct both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// `text` was inserted at offset `at`.
    Insert { at: usize, text: String },
    /// `text` was removed starting at offset `at`.
    Delete { at: usize, text: String },
}

impl Edit {
    /// The edit that reverses this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert { at, text } => Self::Delete {
                at: *at,
                text: text.clone(),
            },
            Self::Delete { at, text } => Self::Insert {
                at: *at,
                text: text.clone(),
            },
        }
    }

    /// Replay this edit onto `buf`.
    pub fn apply(&self, buf: &mut TextBuffer) {
        match self {
            Self::Insert { at, text } => {
                buf.insert(*at, text);
            }
            Self::Delete { at, text } => {
                let len = text.chars().count();
                buf.remove(Span::new(*at, at + len));
            }
        }
    }
}

/// Receives a notification for every buffer mutation.
///
/// This is the seam for the editor's undo/redo stack and anything else that
/// needs to know the text changed. Implementations must not re-enter the
/// document that is notifying them.
pub trait EditListener {
    /// Called once per mutation, after the buffer has been updated.
    fn on_edit(&mut self, edit: &Edit);
}

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

/// The text of one document, backed by a rope.
///
/// All offsets are char offsets. Accessors that take an offset clamp it into
/// `[0, len_chars()]` rather than failing.
#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    line_ending: LineEnding,
}

impl TextBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            line_ending: LineEnding::Lf,
        }
    }

    /// Create a buffer from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            line_ending: LineEnding::detect(text),
            rope: Rope::from_str(text),
        }
    }

    // -- Text access --------------------------------------------------------

    /// The underlying rope. Cloning it is O(1) and shares storage, which is
    /// what the search session uses for its scan snapshot.
    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the buffer contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Clamp an offset into `[0, len_chars()]`.
    #[inline]
    #[must_use]
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.rope.len_chars())
    }

    /// The character at `offset`, or `None` at or past the end.
    #[inline]
    #[must_use]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    /// Text in `span`, with both endpoints clamped.
    #[must_use]
    pub fn slice(&self, span: Span) -> String {
        let span = span.clamp_to(self.len_chars());
        if span.is_empty() {
            return String::new();
        }
        self.rope.slice(span.start..span.end).to_string()
    }

    /// Collect all text into a `String`. Allocates.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Lines --------------------------------------------------------------

    /// Number of lines. An empty buffer has one (empty) line, and a buffer
    /// ending with a terminator has a trailing empty line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line by 0-indexed number, or `None` past the last line.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<Line> {
        if index >= self.rope.len_lines() {
            return None;
        }
        let start = self.rope.line_to_char(index);
        let slice = self.rope.line(index);
        let total = slice.len_chars();
        let end = start + total;

        let last = total.checked_sub(1).map(|i| slice.char(i));
        let before_last = total.checked_sub(2).map(|i| slice.char(i));
        let terminator = match (before_last, last) {
            (Some('\r'), Some('\n')) => 2,
            (_, Some('\n' | '\r')) => 1,
            _ => 0,
        };

        Some(Line {
            index,
            start,
            content_end: end - terminator,
            end,
        })
    }

    /// Index of the line holding `offset` (clamped). An offset sitting at a
    /// line's content end (the caret after the last visible char) belongs
    /// to that line.
    #[inline]
    #[must_use]
    pub fn line_index_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(self.clamp(offset))
    }

    /// Iterate over every line in order.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        (0..self.line_count()).filter_map(|i| self.line(i))
    }

    /// Line-relative position of `offset` (clamped).
    #[must_use]
    pub fn position_of(&self, offset: usize) -> Position {
        let offset = self.clamp(offset);
        let line = self.rope.char_to_line(offset);
        Position::new(line, offset - self.rope.line_to_char(line))
    }

    /// Raw offset of a line-relative position, or `None` if the line does
    /// not exist or the column runs past the line's terminator.
    #[must_use]
    pub fn offset_of(&self, pos: Position) -> Option<usize> {
        let line = self.line(pos.line)?;
        (pos.col <= line.len()).then_some(line.start + pos.col)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `at` (clamped). Returns the edit performed.
    pub fn insert(&mut self, at: usize, text: &str) -> Edit {
        let at = self.clamp(at);
        self.rope.insert(at, text);
        Edit::Insert {
            at,
            text: text.to_owned(),
        }
    }

    /// Remove the text in `span` (clamped). Returns `None` when nothing was
    /// removed.
    pub fn remove(&mut self, span: Span) -> Option<Edit> {
        let span = span.clamp_to(self.len_chars());
        if span.is_empty() {
            return None;
        }
        let text = self.rope.slice(span.start..span.end).to_string();
        self.rope.remove(span.start..span.end);
        Some(Edit::Delete {
            at: span.start,
            text,
        })
    }

    /// Replace the text in `span` (clamped) with `text`. Returns the edits
    /// performed, removal first.
    pub fn replace(&mut self, span: Span, text: &str) -> Vec<Edit> {
        let span = span.clamp_to(self.len_chars());
        let mut edits = Vec::with_capacity(2);
        edits.extend(self.remove(span));
        if !text.is_empty() {
            edits.push(self.insert(span.start, text));
        }
        edits
    }

    // -- Metadata -----------------------------------------------------------

    /// The detected (or configured) line ending style.
    #[inline]
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Override the line ending style used for synthesized terminators.
    #[inline]
    pub const fn set_line_ending(&mut self, ending: LineEnding) {
        self.line_ending = ending;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("line_ending", &self.line_ending)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
