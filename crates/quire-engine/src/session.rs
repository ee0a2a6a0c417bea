//! Search session — the per-document search state.
//!
//! A `SearchSession` owns everything the search panel shows for one
//! document: the phrase, the case flag, the occurrence list and match
//! cursor, the phrase history, the live highlight set and whether the panel
//! is open. It never owns the text; every operation that needs it borrows the
//! document's [`TextBuffer`].
//!
//! # Staleness
//!
//! Occurrences are rebuilt lazily. The session is stale when any of these
//! hold:
//!
//! - it has never been scanned (or was [`reset`](SearchSession::reset));
//! - the phrase or case flag differs from the last scan;
//! - a mutation went through the owning document ([`mark_stale`]);
//! - the buffer text differs from the snapshot taken at the last scan.
//!
//! The snapshot is a clone of the buffer's rope, which shares storage with
//! the buffer and costs O(1). Comparing it catches text replaced behind the
//! document's back (the view handing over a new text).
//!
//! [`mark_stale`]: SearchSession::mark_stale

use ropey::Rope;
use tracing::debug;

use crate::buffer::TextBuffer;
use crate::cursor::MatchCursor;
use crate::highlight::{self, CurrentMatch, HighlightPlan};
use crate::history::SearchHistory;
use crate::options::SearchOptions;
use crate::position::Span;
use crate::search::{self, Occurrence};

/// The search panel's user-visible fields.
///
/// The panel is shared between documents. When the active document changes
/// the outgoing session stores the panel's values and the incoming session's
/// values are loaded back into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFields {
    /// Text in the search field.
    pub phrase: String,
    /// Whether the panel is open.
    pub visible: bool,
    /// The `"{current}/{total} results"` label.
    pub count_label: String,
}

/// Per-document search state.
#[derive(Debug, Clone)]
pub struct SearchSession {
    phrase: String,
    case_sensitive: bool,
    occurrences: Vec<Occurrence>,
    cursor: MatchCursor,

    /// Text, phrase and case flag the occurrences were built from.
    last_scanned: Option<Rope>,
    scanned_phrase: String,
    scanned_case: bool,
    /// Set by mutations made through the owning document.
    dirty: bool,

    history: SearchHistory,
    highlights: HighlightPlan,
    visible: bool,
    max_highlight: usize,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(&SearchOptions::default())
    }
}

impl SearchSession {
    /// Create a session configured from `options`.
    #[must_use]
    pub fn new(options: &SearchOptions) -> Self {
        Self {
            phrase: String::new(),
            case_sensitive: options.match_case,
            occurrences: Vec::new(),
            cursor: MatchCursor::new(),
            last_scanned: None,
            scanned_phrase: String::new(),
            scanned_case: options.match_case,
            dirty: false,
            history: SearchHistory::with_capacity(options.history),
            highlights: HighlightPlan::cleared(),
            visible: false,
            max_highlight: options.max_highlight,
        }
    }

    /// Apply changed options. The case flag is only an initial value and is
    /// left alone.
    pub fn configure(&mut self, options: &SearchOptions) {
        self.max_highlight = options.max_highlight;
        self.history.set_capacity(options.history);
    }

    // -- Phrase and case ----------------------------------------------------

    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Replace the phrase. The next refresh rebuilds if it changed.
    pub fn set_phrase(&mut self, phrase: &str) {
        if self.phrase != phrase {
            phrase.clone_into(&mut self.phrase);
        }
    }

    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub const fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// Flip case sensitivity. Returns the new value.
    pub const fn toggle_case_sensitive(&mut self) -> bool {
        self.case_sensitive = !self.case_sensitive;
        self.case_sensitive
    }

    // -- Staleness ----------------------------------------------------------

    /// True when the occurrences no longer describe `buf` under the current
    /// phrase and case flag.
    #[must_use]
    pub fn is_stale(&self, buf: &TextBuffer) -> bool {
        self.dirty
            || self.scanned_phrase != self.phrase
            || self.scanned_case != self.case_sensitive
            || self.last_scanned.as_ref().is_none_or(|rope| rope != buf.rope())
    }

    /// Force a rebuild on the next refresh.
    pub const fn mark_stale(&mut self) {
        self.dirty = true;
    }

    /// Rebuild the occurrences from `buf` and re-anchor the cursor.
    ///
    /// A non-empty phrase is recorded in the history.
    pub fn rebuild(&mut self, buf: &TextBuffer, caret: usize, selection: Option<Span>) {
        self.occurrences = search::find_all(buf, &self.phrase, self.case_sensitive);
        self.history.record(&self.phrase);

        // The selection must be the phrase exactly, whatever the case flag.
        let selected_phrase_at = selection
            .map(|sel| sel.clamp_to(buf.len_chars()))
            .filter(|sel| !sel.is_empty() && buf.slice(*sel) == self.phrase)
            .map(|sel| sel.start);
        self.cursor
            .anchor(&self.occurrences, buf.clamp(caret), selected_phrase_at);

        self.last_scanned = Some(buf.rope().clone());
        self.scanned_phrase.clone_from(&self.phrase);
        self.scanned_case = self.case_sensitive;
        self.dirty = false;

        debug!(
            phrase_len = self.phrase.chars().count(),
            case_sensitive = self.case_sensitive,
            total = self.occurrences.len(),
            current = self.cursor.current(),
            "rebuilt occurrences"
        );
    }

    /// Rebuild if stale. Returns whether a rebuild happened.
    pub fn refresh(&mut self, buf: &TextBuffer, caret: usize, selection: Option<Span>) -> bool {
        if self.is_stale(buf) {
            self.rebuild(buf, caret, selection);
            true
        } else {
            false
        }
    }

    // -- Navigation ---------------------------------------------------------

    /// Step the cursor to the next occurrence. No wraparound.
    pub fn next(&mut self) -> bool {
        self.cursor.next()
    }

    /// Step the cursor to the previous occurrence. No wraparound.
    pub fn prev(&mut self) -> bool {
        self.cursor.prev()
    }

    // -- Highlighting -------------------------------------------------------

    /// Refresh if stale and replace the highlight set.
    ///
    /// Returns the new plan; the previous one is discarded.
    pub fn rehighlight(
        &mut self,
        buf: &TextBuffer,
        caret: usize,
        selection: Option<Span>,
        mode: CurrentMatch,
    ) -> &HighlightPlan {
        self.refresh(buf, caret, selection);
        self.highlights = highlight::plan(
            &self.occurrences,
            self.cursor.index(),
            mode,
            self.max_highlight,
        );
        &self.highlights
    }

    /// The live highlight set.
    #[must_use]
    pub const fn highlights(&self) -> &HighlightPlan {
        &self.highlights
    }

    // -- Projections --------------------------------------------------------

    #[must_use]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    #[must_use]
    pub const fn cursor(&self) -> &MatchCursor {
        &self.cursor
    }

    /// The current occurrence, if any.
    #[must_use]
    pub fn current(&self) -> Option<Occurrence> {
        self.cursor
            .index()
            .and_then(|i| self.occurrences.get(i).copied())
    }

    /// `"{current}/{total} results"`.
    #[must_use]
    pub fn count_label(&self) -> String {
        self.cursor.label()
    }

    #[must_use]
    pub const fn history(&self) -> &SearchHistory {
        &self.history
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Drop the scan results: snapshot, occurrences, cursor and highlights.
    /// Phrase, case flag and history survive.
    pub fn reset(&mut self) {
        self.occurrences.clear();
        self.cursor.reset();
        self.last_scanned = None;
        self.dirty = false;
        self.highlights = HighlightPlan::cleared();
    }

    /// Return to the freshly created state, history included.
    pub fn clear(&mut self) {
        self.reset();
        self.phrase.clear();
        self.scanned_phrase.clear();
        self.visible = false;
        self.history = SearchHistory::with_capacity(self.history.capacity());
    }

    /// The panel fields this session would show.
    #[must_use]
    pub fn fields(&self) -> SearchFields {
        SearchFields {
            phrase: self.phrase.clone(),
            visible: self.visible,
            count_label: self.count_label(),
        }
    }

    /// Store the panel's live values. The label is derived, so only the
    /// phrase and visibility are taken.
    pub fn store_fields(&mut self, fields: &SearchFields) {
        self.set_phrase(&fields.phrase);
        self.visible = fields.visible;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
