//! `use_bulk_selection`: selection tracked against a reactive id list.

use collection_state::SelectionState;
use leptos::*;

use crate::commit::commit;

#[derive(Clone, Copy)]
/// Handle returned by [`use_bulk_selection`].
pub struct SelectionHandle {
    pub state: RwSignal<SelectionState>,
}

/// Selection over `ids`. Whenever `ids` changes, selected ids that disappeared are pruned.
pub fn use_bulk_selection(ids: Signal<Vec<String>>) -> SelectionHandle {
    let state = create_rw_signal(SelectionState::new(ids.get_untracked()));

    create_effect(move |_| {
        let current = ids.get();
        commit(state, |s| s.reconcile(current));
    });

    SelectionHandle { state }
}

impl SelectionHandle {
    pub fn toggle(&self, id: &str) -> bool {
        commit(self.state, |s| s.toggle(id))
    }

    pub fn select_all(&self) -> bool {
        commit(self.state, SelectionState::select_all)
    }

    pub fn select_none(&self) -> bool {
        commit(self.state, SelectionState::select_none)
    }

    pub fn select_range(&self, from: &str, to: &str) -> bool {
        commit(self.state, |s| s.select_range(from, to))
    }

    /// Shift-click: range from the last toggled id.
    pub fn extend_to(&self, id: &str) -> bool {
        commit(self.state, |s| s.extend_to(id))
    }

    /// Tracked read of one id.
    pub fn is_selected(&self, id: &str) -> bool {
        self.state.with(|s| s.is_selected(id))
    }

    pub fn selected_ids(&self) -> Signal<Vec<String>> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|s| s.selected_in_order().into_iter().map(str::to_string).collect())
        })
    }

    pub fn selected_count(&self) -> Signal<usize> {
        let state = self.state;
        Signal::derive(move || state.with(SelectionState::selected_count))
    }

    pub fn all_selected(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SelectionState::all_selected))
    }

    /// `true` for the indeterminate checkbox state.
    pub fn some_selected(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SelectionState::some_selected))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn selection_prunes_when_page_changes() {
        let _ = create_runtime();
        let page = create_rw_signal(ids(&["A", "B", "C", "D"]));
        let selection = use_bulk_selection(page.into());

        assert!(selection.select_range("B", "D"));
        assert_eq!(selection.selected_ids().get_untracked(), ids(&["B", "C", "D"]));

        page.set(ids(&["A", "C"]));
        assert_eq!(selection.selected_ids().get_untracked(), ids(&["C"]));
        assert!(selection.some_selected().get_untracked());
        assert!(!selection.all_selected().get_untracked());
    }

    #[test]
    fn select_all_is_idempotent() {
        let _ = create_runtime();
        let page = create_rw_signal(ids(&["A", "B"]));
        let selection = use_bulk_selection(page.into());

        assert!(selection.select_all());
        assert!(!selection.select_all());
        assert_eq!(selection.selected_count().get_untracked(), 2);
        assert!(selection.select_none());
        assert!(!selection.toggle("Z"));
    }
}
