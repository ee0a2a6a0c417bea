//! Workspace — the set of open documents and which one is active.
//!
//! Documents are kept in tab order and addressed by [`DocId`], never by
//! position, so closing a tab cannot make another document's handle point
//! at the wrong text.
//!
//! # Search panel
//!
//! There is one search panel for the whole workspace. Its fields
//! ([`SearchFields`]) are a plain copy: when focus moves, the outgoing
//! document's session stores the panel's current values and the panel is
//! reloaded from the incoming document's session. Nothing else is shared
//! between documents.

use std::fmt;

use tracing::debug;

use crate::document::Document;
use crate::options::SearchOptions;
use crate::session::SearchFields;

/// Unique document identifier. Monotonically increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(usize);

impl DocId {
    /// The raw number, for display and logging.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// All open documents.
#[derive(Debug, Default)]
pub struct Workspace {
    docs: Vec<(DocId, Document)>,
    next_id: usize,
    active: Option<DocId>,
    panel: SearchFields,
    options: SearchOptions,
}

impl Workspace {
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            docs: Vec::new(),
            next_id: 1,
            active: None,
            panel: SearchFields::default(),
            options,
        }
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Open a document over `text` at the end of the tab order and focus it.
    pub fn open(&mut self, text: &str) -> DocId {
        let id = DocId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.docs.push((id, Document::new(text, &self.options)));
        debug!(%id, len = text.chars().count(), "opened document");
        self.focus(id);
        id
    }

    /// Close a document. Its search session is cleared and the document is
    /// handed back. If it was active, focus moves to the tab that takes its
    /// place (or the new last tab).
    pub fn close(&mut self, id: DocId) -> Option<Document> {
        let index = self.index_of(id)?;
        let (_, mut doc) = self.docs.remove(index);
        doc.session_mut().clear();
        debug!(%id, "closed document");

        if self.active == Some(id) {
            self.active = None;
            self.panel = SearchFields::default();
            let next = self
                .docs
                .get(index)
                .or_else(|| self.docs.last())
                .map(|(id, _)| *id);
            if let Some(next) = next {
                self.focus(next);
            }
        }
        Some(doc)
    }

    /// Make `id` the active document. Returns `false` for an unknown id.
    pub fn focus(&mut self, id: DocId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        if self.active == Some(id) {
            return true;
        }

        let panel = self.panel.clone();
        if let Some(outgoing) = self.active.and_then(|out| self.get_mut(out)) {
            outgoing.session_mut().store_fields(&panel);
        }
        self.active = Some(id);
        self.sync_panel();
        debug!(%id, "focused document");
        true
    }

    // -- Lookup -------------------------------------------------------------

    fn index_of(&self, id: DocId) -> Option<usize> {
        self.docs.iter().position(|(d, _)| *d == id)
    }

    #[must_use]
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.iter().find(|(d, _)| *d == id).map(|(_, doc)| doc)
    }

    pub fn get_mut(&mut self, id: DocId) -> Option<&mut Document> {
        self.docs
            .iter_mut()
            .find(|(d, _)| *d == id)
            .map(|(_, doc)| doc)
    }

    #[must_use]
    pub const fn active_id(&self) -> Option<DocId> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<&Document> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Document> {
        self.active.and_then(|id| self.get_mut(id))
    }

    /// Document ids in tab order.
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.iter().map(|(id, _)| *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    // -- Search panel -------------------------------------------------------

    /// The shared search panel's fields.
    #[must_use]
    pub const fn panel(&self) -> &SearchFields {
        &self.panel
    }

    /// Mutable panel fields, for the view to write what the user typed.
    pub const fn panel_mut(&mut self) -> &mut SearchFields {
        &mut self.panel
    }

    /// Reload the panel from the active document's session.
    pub fn sync_panel(&mut self) {
        self.panel = self
            .active()
            .map(|doc| doc.session().fields())
            .unwrap_or_default();
    }

    // -- Options ------------------------------------------------------------

    #[must_use]
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replace the options and push them into every open document.
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
        for (_, doc) in &mut self.docs {
            doc.configure(&options);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
