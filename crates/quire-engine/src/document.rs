//! Document — one open text with its caret, selection and search session.
//!
//! This is the surface the view talks to. The view reports caret moves,
//! selections, clicks, key releases and text it changed itself. It calls
//! the search, line and word operations below and applies what comes back:
//! a caret, a selection, a [`HighlightPlan`].
//!
//! Every mutation the document makes is forwarded to its
//! [`EditListener`]s and marks the search session stale. When the search
//! panel is open the highlights are rebuilt right away.

use std::fmt;

use tracing::trace;

use crate::buffer::{Edit, EditListener, Line, TextBuffer};
use crate::case::{self, CaseTransform};
use crate::error::SelectBoundsError;
use crate::highlight::{CurrentMatch, HighlightPlan};
use crate::line::{self, LineEdit};
use crate::options::SearchOptions;
use crate::position::{Position, Span};
use crate::search;
use crate::session::SearchSession;
use crate::word::{self, JumpDirection};

/// One open text.
pub struct Document {
    buffer: TextBuffer,
    caret: usize,
    selection: Option<Span>,
    session: SearchSession,
    listeners: Vec<Box<dyn EditListener>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("buffer", &self.buffer)
            .field("caret", &self.caret)
            .field("selection", &self.selection)
            .field("session", &self.session)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("", &SearchOptions::default())
    }
}

impl Document {
    /// Create a document over `text` with the caret at the start.
    #[must_use]
    pub fn new(text: &str, options: &SearchOptions) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            caret: 0,
            selection: None,
            session: SearchSession::new(options),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for every edit this document makes.
    pub fn add_listener(&mut self, listener: Box<dyn EditListener>) {
        self.listeners.push(listener);
    }

    /// Push changed options into the session.
    pub fn configure(&mut self, options: &SearchOptions) {
        self.session.configure(options);
    }

    // -- Text, caret, selection ---------------------------------------------

    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The whole text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.contents()
    }

    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// The caret as (line, column).
    #[must_use]
    pub fn caret_position(&self) -> Position {
        self.buffer.position_of(self.caret)
    }

    /// The line holding the caret.
    #[must_use]
    pub fn caret_line(&self) -> Line {
        line::line_at(&self.buffer, self.caret)
    }

    #[must_use]
    pub const fn selection(&self) -> Option<Span> {
        self.selection
    }

    /// The selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        self.selection.map(|s| self.buffer.slice(s))
    }

    /// Move the caret (clamped) and drop the selection.
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = self.buffer.clamp(offset);
        self.selection = None;
    }

    /// Take a selection reported by the view. A malformed or empty pair
    /// means no selection. The caret goes to the selection end.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection =
            Span::selection(start, end).map(|s| s.clamp_to(self.buffer.len_chars()));
        self.selection = self.selection.filter(|s| !s.is_empty());
        if let Some(sel) = self.selection {
            self.caret = sel.end;
        }
    }

    /// Select `[start, end)` on the user's explicit request.
    ///
    /// # Errors
    ///
    /// [`SelectBoundsError::InvalidRange`] when `start >= end`,
    /// [`SelectBoundsError::OutOfBounds`] when either end is past the text.
    pub fn select_bounds(&mut self, start: usize, end: usize) -> Result<Span, SelectBoundsError> {
        let len = self.buffer.len_chars();
        if start >= end {
            return Err(SelectBoundsError::InvalidRange { start, end });
        }
        if end > len {
            return Err(SelectBoundsError::OutOfBounds { offset: end, len });
        }
        let span = Span::new(start, end);
        self.selection = Some(span);
        self.caret = end;
        Ok(span)
    }

    /// Number of lines wholly inside the selection.
    #[must_use]
    pub fn num_whole_lines_selected(&self) -> usize {
        line::num_whole_lines_selected(&self.buffer, self.selection)
    }

    // -- Search -------------------------------------------------------------

    #[must_use]
    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    /// Set the phrase from the search field and repaint.
    pub fn set_phrase(&mut self, phrase: &str) -> &HighlightPlan {
        self.session.set_phrase(phrase);
        self.rehighlight(CurrentMatch::Paint)
    }

    /// Flip case sensitivity and repaint. Returns the new value.
    pub fn toggle_case_sensitive(&mut self) -> bool {
        let case_sensitive = self.session.toggle_case_sensitive();
        self.rehighlight(CurrentMatch::Paint);
        case_sensitive
    }

    /// Step to the next occurrence and select it. No wraparound.
    pub fn next(&mut self) -> &HighlightPlan {
        self.session
            .refresh(&self.buffer, self.caret, self.selection);
        self.session.next();
        self.rehighlight(CurrentMatch::Select)
    }

    /// Step to the previous occurrence and select it. No wraparound.
    pub fn prev(&mut self) -> &HighlightPlan {
        self.session
            .refresh(&self.buffer, self.caret, self.selection);
        self.session.prev();
        self.rehighlight(CurrentMatch::Select)
    }

    /// Rebuild if stale and replace the highlight set. In
    /// [`CurrentMatch::Select`] mode the selection and caret move onto the
    /// current occurrence.
    pub fn rehighlight(&mut self, mode: CurrentMatch) -> &HighlightPlan {
        let selection = self
            .session
            .rehighlight(&self.buffer, self.caret, self.selection, mode)
            .selection;
        if let Some(sel) = selection {
            self.selection = Some(sel);
            self.caret = sel.end;
        }
        self.session.highlights()
    }

    #[must_use]
    pub fn count_label(&self) -> String {
        self.session.count_label()
    }

    /// Search history, newest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.session.history().to_vec()
    }

    /// Search for the `index`-th history entry again. Returns `false` when
    /// there is no such entry.
    pub fn recall_history(&mut self, index: usize) -> bool {
        let Some(phrase) = self.session.history().get(index).map(str::to_owned) else {
            return false;
        };
        self.set_phrase(&phrase);
        true
    }

    /// Open the search panel, seeding the phrase from the selection.
    pub fn open_search(&mut self) -> &HighlightPlan {
        self.session.set_visible(true);
        if let Some(selected) = self.selected_text() {
            self.session.set_phrase(&selected);
        }
        self.rehighlight(CurrentMatch::Paint)
    }

    /// Close the search panel and drop its results and highlights.
    pub fn close_search(&mut self) {
        self.session.set_visible(false);
        self.session.reset();
    }

    /// Replace every occurrence of `phrase` (under the session's case flag).
    /// Returns the number replaced.
    pub fn replace_all(&mut self, phrase: &str, replacement: &str) -> usize {
        let outcome = search::replace_all(
            &mut self.buffer,
            phrase,
            replacement,
            self.session.case_sensitive(),
        );
        self.caret = self.buffer.clamp(self.caret);
        self.selection = None;
        self.commit(&outcome.edits);
        outcome.replaced
    }

    // -- Line operations ----------------------------------------------------

    /// Duplicate the selection, or the caret's line.
    pub fn duplicate_line(&mut self) -> usize {
        let out = line::duplicate_line(&mut self.buffer, self.caret, self.selection);
        self.apply_line_edit(out)
    }

    /// Join the caret's line with the next one.
    pub fn join_lines(&mut self) -> usize {
        let out = line::join_lines(&mut self.buffer, self.caret);
        if !out.is_noop() {
            self.selection = None;
        }
        self.apply_line_edit(out)
    }

    fn apply_line_edit(&mut self, out: LineEdit) -> usize {
        self.caret = out.caret;
        self.commit(&out.edits);
        self.caret
    }

    // -- Words and case -----------------------------------------------------

    /// Select the word (or number, or stopping-char run) at `offset`.
    pub fn select_word_at(&mut self, offset: usize) -> Span {
        let span = word::selection_bounds(&self.buffer, offset);
        if span.is_empty() {
            self.set_caret(span.start);
        } else {
            self.selection = Some(span);
            self.caret = span.end;
        }
        span
    }

    /// Jump one word from `offset` and put the caret there.
    pub fn jump_word(&mut self, offset: usize, direction: JumpDirection) -> usize {
        let target = word::word_jump(&self.buffer, offset, direction);
        self.set_caret(target);
        target
    }

    /// Apply a case transform to the selection, or the letter run at the
    /// caret. Caret and selection stay put.
    pub fn transform_case(&mut self, transform: CaseTransform) -> Span {
        let out = case::transform_case(&mut self.buffer, self.caret, self.selection, transform);
        self.commit(&out.edits);
        out.span
    }

    // -- View callbacks -----------------------------------------------------

    /// A key was released. Repaints if the search panel is open and the
    /// results are stale. Returns whether it repainted.
    pub fn on_key_released(&mut self) -> bool {
        if self.session.is_visible() && self.session.is_stale(&self.buffer) {
            self.rehighlight(CurrentMatch::Paint);
            true
        } else {
            false
        }
    }

    /// The view changed the text itself. The view already recorded that
    /// edit, so listeners are not notified.
    pub fn on_text_changed(&mut self, text: &str) {
        if self.buffer.rope() == text {
            return;
        }
        let ending = self.buffer.line_ending();
        self.buffer = TextBuffer::from_text(text);
        if !text.contains(['\n', '\r']) {
            self.buffer.set_line_ending(ending);
        }
        self.caret = self.buffer.clamp(self.caret);
        self.selection = self
            .selection
            .map(|s| s.clamp_to(self.buffer.len_chars()))
            .filter(|s| !s.is_empty());
        self.session.mark_stale();
        if self.session.is_visible() {
            self.rehighlight(CurrentMatch::Paint);
        }
    }

    /// Mouse click with `count` clicks at `offset`: one places the caret, two
    /// select the word. Other counts are ignored.
    pub fn on_mouse_clicked(&mut self, count: u32, offset: usize) {
        trace!(count, offset, "mouse clicked");
        match count {
            1 => self.set_caret(offset),
            2 => {
                self.select_word_at(offset);
            }
            _ => {}
        }
    }

    // -- Internals ----------------------------------------------------------

    fn commit(&mut self, edits: &[Edit]) {
        if edits.is_empty() {
            return;
        }
        for edit in edits {
            for listener in &mut self.listeners {
                listener.on_edit(edit);
            }
        }
        self.session.mark_stale();
        if self.session.is_visible() {
            self.rehighlight(CurrentMatch::Paint);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
