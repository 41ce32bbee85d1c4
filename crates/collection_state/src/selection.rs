//! Bulk selection over the current reference item list.
//!
//! Invariant: every selected id is present in the current item list. Reconciling against a new
//! list silently prunes ids that disappeared.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Selected ids tracked against an ordered reference list.
pub struct SelectionState {
    items: Vec<String>,
    selected: BTreeSet<String>,
    anchor: Option<String>,
}

impl SelectionState {
    /// Selection over `ids` with nothing selected.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::default();
        state.reconcile(ids);
        state
    }

    /// Ids of the current reference list, in order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected_ids(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Selected ids in reference-list order.
    pub fn selected_in_order(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|id| self.selected.contains(*id))
            .map(String::as_str)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// `true` iff every id in a non-empty list is selected.
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.selected.len() == self.items.len()
    }

    /// `true` when some but not all ids are selected (indeterminate checkbox).
    pub fn some_selected(&self) -> bool {
        !self.selected.is_empty() && !self.all_selected()
    }

    /// Last id toggled; the start point for [`SelectionState::extend_to`].
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Flips one id. Ids absent from the current list are ignored.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.contains_item(id) {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.anchor = Some(id.to_string());
        true
    }

    /// Selects exactly the current list.
    pub fn select_all(&mut self) -> bool {
        if self.all_selected() || self.items.is_empty() {
            return false;
        }
        self.selected = self.items.iter().cloned().collect();
        true
    }

    pub fn select_none(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Selects every id between `from` and `to` inclusive, in either order.
    ///
    /// Does nothing when either id is absent from the current list.
    pub fn select_range(&mut self, from: &str, to: &str) -> bool {
        let (Some(a), Some(b)) = (self.position(from), self.position(to)) else {
            return false;
        };
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let mut changed = false;
        for id in &self.items[start..=end] {
            changed |= self.selected.insert(id.clone());
        }
        changed
    }

    /// Shift-click behavior: selects from the anchor to `id`, or toggles `id` without an anchor.
    pub fn extend_to(&mut self, id: &str) -> bool {
        match self.anchor.clone() {
            Some(anchor) if self.contains_item(&anchor) => self.select_range(&anchor, id),
            _ => self.toggle(id),
        }
    }

    /// Replaces the reference list, pruning selected ids that are no longer present.
    ///
    /// Duplicate ids keep their first position.
    pub fn reconcile<I, S>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let items: Vec<String> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id: &String| seen.insert(id.clone()))
            .collect();
        if items == self.items {
            return false;
        }
        let present: BTreeSet<&str> = items.iter().map(String::as_str).collect();
        self.selected.retain(|id| present.contains(id.as_str()));
        if self
            .anchor
            .as_deref()
            .is_some_and(|anchor| !present.contains(anchor))
        {
            self.anchor = None;
        }
        self.items = items;
        true
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item == id)
    }

    fn contains_item(&self, id: &str) -> bool {
        self.position(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn range_then_reconcile_prunes_missing_ids() {
        let mut state = SelectionState::new(["A", "B", "C", "D"]);
        assert!(state.select_range("B", "D"));
        assert_eq!(state.selected_in_order(), vec!["B", "C", "D"]);

        assert!(state.reconcile(["A", "C"]));
        assert_eq!(state.selected_in_order(), vec!["C"]);
        assert!(!state.all_selected());
        assert!(state.some_selected());
    }

    #[test]
    fn range_is_order_independent_and_ignores_unknown_ids() {
        let mut state = SelectionState::new(["A", "B", "C", "D"]);
        assert!(state.select_range("C", "A"));
        assert_eq!(state.selected_in_order(), vec!["A", "B", "C"]);
        assert!(!state.select_range("A", "Z"));
        assert_eq!(state.selected_count(), 3);
    }

    #[test]
    fn select_all_is_idempotent_and_tracks_current_list() {
        let mut state = SelectionState::new(["A", "B"]);
        assert!(state.select_all());
        assert!(!state.select_all());
        assert!(state.all_selected());

        state.reconcile(["B", "C"]);
        assert!(!state.all_selected());
        assert!(state.select_all());
        assert_eq!(state.selected_in_order(), vec!["B", "C"]);
    }

    #[test]
    fn empty_list_is_never_all_selected() {
        let mut state = SelectionState::default();
        assert!(!state.select_all());
        assert!(!state.all_selected());
        assert!(!state.toggle("ghost"));
    }

    #[test]
    fn toggle_sets_anchor_for_extend() {
        let mut state = SelectionState::new(["A", "B", "C", "D", "E"]);
        assert!(state.toggle("B"));
        assert_eq!(state.anchor(), Some("B"));
        assert!(state.extend_to("D"));
        assert_eq!(state.selected_in_order(), vec!["B", "C", "D"]);

        assert!(state.toggle("B"));
        assert!(!state.is_selected("B"));
        state.reconcile(["C", "D", "E"]);
        assert_eq!(state.anchor(), None);
        assert!(state.extend_to("E"));
        assert_eq!(state.selected_in_order(), vec!["C", "D", "E"]);
    }

    #[test]
    fn select_none_reports_changes_only_once() {
        let mut state = SelectionState::new(["A"]);
        state.toggle("A");
        assert!(state.select_none());
        assert!(!state.select_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Toggle(u8),
        SelectAll,
        SelectNone,
        Range(u8, u8),
        Replace(Vec<u8>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..12).prop_map(Op::Toggle),
            Just(Op::SelectAll),
            Just(Op::SelectNone),
            (0u8..12, 0u8..12).prop_map(|(a, b)| Op::Range(a, b)),
            prop::collection::vec(0u8..12, 0..10).prop_map(Op::Replace),
        ]
    }

    proptest! {
        #[test]
        fn selected_ids_stay_within_current_list(ops in prop::collection::vec(op_strategy(), 0..50)) {
            let mut state = SelectionState::new((0u8..6).map(|n| n.to_string()));
            for op in ops {
                match op {
                    Op::Toggle(n) => { state.toggle(&n.to_string()); }
                    Op::SelectAll => { state.select_all(); }
                    Op::SelectNone => { state.select_none(); }
                    Op::Range(a, b) => { state.select_range(&a.to_string(), &b.to_string()); }
                    Op::Replace(ids) => {
                        state.reconcile(ids.into_iter().map(|id| id.to_string()));
                    }
                }
                for id in state.selected_ids() {
                    prop_assert!(state.items().contains(id));
                }
                prop_assert_eq!(
                    state.all_selected(),
                    !state.items().is_empty() && state.selected_count() == state.items().len()
                );
            }
        }
    }
}
