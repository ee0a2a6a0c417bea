//! Highlight policy — turn occurrences into paint commands for the view.
//!
//! The engine never paints. A rehighlight produces a [`HighlightPlan`]: a
//! flat list of `(span, style)` commands plus, optionally, a span the view
//! should move the real text selection onto. The view drops whatever it
//! painted for the previous plan before applying a new one, so at most one
//! highlight set is live per document.
//!
//! # Budget
//!
//! Up to `max` occurrences (default [`MAX_HIGHLIGHT_OCCURRENCES`]) every
//! occurrence gets a [`HighlightStyle::Match`] region. Past that only the
//! current occurrence is highlighted, which keeps re-highlighting cost
//! independent of the match count. A plan never holds more than `max + 1`
//! commands.
//!
//! # Current occurrence
//!
//! [`CurrentMatch`] decides how the current occurrence is shown:
//!
//! - `Paint` — an extra [`HighlightStyle::Current`] region on top of the
//!   base regions. Used while the user types in the search field, so focus
//!   stays in the field.
//! - `Select` — the view's selection moves onto the occurrence, and the
//!   occurrence gets no base region of its own.

use crate::position::Span;
use crate::search::Occurrence;

/// Default highlight budget.
pub const MAX_HIGHLIGHT_OCCURRENCES: usize = 2000;

/// Paint style of one highlight region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightStyle {
    /// Any occurrence of the phrase.
    Match,
    /// The current occurrence.
    Current,
}

/// A single region for the view to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightCommand {
    pub span: Span,
    pub style: HighlightStyle,
}

impl HighlightCommand {
    #[inline]
    #[must_use]
    pub const fn new(span: Span, style: HighlightStyle) -> Self {
        Self { span, style }
    }
}

/// How the current occurrence is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurrentMatch {
    /// Paint it in the current style.
    #[default]
    Paint,
    /// Move the text selection onto it.
    Select,
}

/// Output of one rehighlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightPlan {
    /// Regions to paint, replacing every previously painted region.
    pub commands: Vec<HighlightCommand>,
    /// New text selection, set only in [`CurrentMatch::Select`] mode when
    /// there is a current occurrence.
    pub selection: Option<Span>,
}

impl HighlightPlan {
    /// A plan that clears every highlight and leaves the selection alone.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            commands: Vec::new(),
            selection: None,
        }
    }

    /// True when the plan paints nothing and selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.selection.is_none()
    }

    /// The region painted in the current style, if any.
    #[must_use]
    pub fn current(&self) -> Option<Span> {
        self.commands
            .iter()
            .find(|c| c.style == HighlightStyle::Current)
            .map(|c| c.span)
    }
}

/// Build the highlight plan for `occurrences` with the 0-based `current`
/// index.
///
/// `current` outside the list is treated as "no current occurrence".
#[must_use]
pub fn plan(
    occurrences: &[Occurrence],
    current: Option<usize>,
    mode: CurrentMatch,
    max: usize,
) -> HighlightPlan {
    let current = current.and_then(|i| occurrences.get(i).map(|o| (i, o.span())));

    let mut commands = Vec::new();
    if occurrences.len() <= max {
        commands.reserve(occurrences.len() + 1);
        for (i, occurrence) in occurrences.iter().enumerate() {
            let is_current = current.is_some_and(|(c, _)| c == i);
            if mode == CurrentMatch::Select && is_current {
                continue;
            }
            commands.push(HighlightCommand::new(occurrence.span(), HighlightStyle::Match));
        }
        if mode == CurrentMatch::Paint {
            if let Some((_, span)) = current {
                commands.push(HighlightCommand::new(span, HighlightStyle::Current));
            }
        }
    } else if let Some((_, span)) = current {
        commands.push(HighlightCommand::new(span, HighlightStyle::Current));
    }

    let selection = match mode {
        CurrentMatch::Select => current.map(|(_, span)| span),
        CurrentMatch::Paint => None,
    };

    HighlightPlan {
        commands,
        selection,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn occ(n: usize, len: usize) -> Vec<Occurrence> {
        (0..n)
            .map(|i| Occurrence {
                start: i * (len + 1),
                end: i * (len + 1) + len,
            })
            .collect()
    }

    fn count(plan: &HighlightPlan, style: HighlightStyle) -> usize {
        plan.commands.iter().filter(|c| c.style == style).count()
    }

    // -- Paint --------------------------------------------------------------

    #[test]
    fn paint_marks_all_and_overlays_current() {
        let occurrences = occ(3, 2);
        let p = plan(&occurrences, Some(1), CurrentMatch::Paint, MAX_HIGHLIGHT_OCCURRENCES);
        assert_eq!(count(&p, HighlightStyle::Match), 3);
        assert_eq!(count(&p, HighlightStyle::Current), 1);
        assert_eq!(p.current(), Some(Span::new(3, 5)));
        assert_eq!(p.selection, None);
    }

    #[test]
    fn paint_without_current_has_no_overlay() {
        let p = plan(&occ(3, 2), None, CurrentMatch::Paint, MAX_HIGHLIGHT_OCCURRENCES);
        assert_eq!(count(&p, HighlightStyle::Match), 3);
        assert_eq!(p.current(), None);
    }

    #[test]
    fn no_occurrences_is_empty_plan() {
        let p = plan(&[], None, CurrentMatch::Select, MAX_HIGHLIGHT_OCCURRENCES);
        assert!(p.is_empty());
        assert_eq!(p, HighlightPlan::cleared());
    }

    #[test]
    fn current_out_of_range_is_ignored() {
        let p = plan(&occ(2, 2), Some(7), CurrentMatch::Select, MAX_HIGHLIGHT_OCCURRENCES);
        assert_eq!(count(&p, HighlightStyle::Match), 2);
        assert_eq!(p.selection, None);
    }

    // -- Select -------------------------------------------------------------

    #[test]
    fn select_skips_current_and_moves_selection() {
        let occurrences = occ(3, 2);
        let p = plan(&occurrences, Some(2), CurrentMatch::Select, MAX_HIGHLIGHT_OCCURRENCES);
        assert_eq!(count(&p, HighlightStyle::Match), 2);
        assert_eq!(count(&p, HighlightStyle::Current), 0);
        assert_eq!(p.selection, Some(Span::new(6, 8)));
        assert!(p.commands.iter().all(|c| c.span != Span::new(6, 8)));
    }

    // -- Budget -------------------------------------------------------------

    #[test]
    fn over_budget_paints_only_current() {
        let occurrences = occ(6, 1);
        let p = plan(&occurrences, Some(4), CurrentMatch::Paint, 5);
        assert_eq!(
            p.commands,
            vec![HighlightCommand::new(Span::new(8, 9), HighlightStyle::Current)]
        );
    }

    #[test]
    fn over_budget_select_still_moves_selection() {
        let occurrences = occ(6, 1);
        let p = plan(&occurrences, Some(0), CurrentMatch::Select, 5);
        assert_eq!(p.commands.len(), 1);
        assert_eq!(p.selection, Some(Span::new(0, 1)));
    }

    #[test]
    fn exactly_at_budget_paints_everything() {
        let p = plan(&occ(5, 1), Some(0), CurrentMatch::Paint, 5);
        assert_eq!(p.commands.len(), 6);
    }

    #[test]
    fn never_more_than_budget_plus_one() {
        let max = MAX_HIGHLIGHT_OCCURRENCES;
        for n in [0, 1, max - 1, max, max + 1, max * 2] {
            let occurrences = occ(n, 1);
            for mode in [CurrentMatch::Paint, CurrentMatch::Select] {
                let current = n.checked_sub(1);
                let p = plan(&occurrences, current, mode, max);
                assert!(p.commands.len() <= max + 1, "n={n} mode={mode:?}");
            }
        }
    }
}
