//! # quire-engine — search and navigation core for quire
//!
//! This crate holds the text-side logic of the editor. It never paints and
//! never touches the filesystem; the view reports carets, selections and
//! clicks, and applies the carets, selections and highlight commands that
//! come back.
//!
//! - **[`position`]** — `Position` (line, col) and `Span` types, char offsets
//! - **[`buffer`]** — `TextBuffer` wrapping a rope, lines, edits and edit listeners
//! - **[`line`]** — line lookup, duplicate line, join lines
//! - **[`word`]** — character classes, double-click bounds, word jumps
//! - **[`search`]** — non-overlapping phrase search and replace-all
//! - **[`cursor`]** — the current-occurrence cursor
//! - **[`highlight`]** — occurrences to highlight commands, under a budget
//! - **[`history`]** — recent search phrases
//! - **[`session`]** — per-document search state and lazy rebuilds
//! - **[`case`]** — switch / alternate / uniform case transforms
//! - **[`options`]** — search options and `--set` directives
//! - **[`document`]** — one open text and the view-facing operations
//! - **[`workspace`]** — open documents by id, focus and the shared search panel
//! - **[`error`]** — errors for the few operations that validate input
//!
//! Every offset in and out of the engine is a char offset into the whole
//! buffer.

pub mod buffer;
pub mod case;
pub mod cursor;
pub mod document;
pub mod error;
pub mod highlight;
pub mod history;
pub mod line;
pub mod options;
pub mod position;
pub mod search;
pub mod session;
pub mod word;
pub mod workspace;
