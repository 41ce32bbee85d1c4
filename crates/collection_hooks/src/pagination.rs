//! `use_pagination_state`: reactive wrapper over [`PaginationState`].

use collection_state::{InvalidArgument, PageItem, PaginationConfig, PaginationState};
use leptos::*;

use crate::commit::{commit, try_commit};

#[derive(Clone, Copy)]
/// Handle returned by [`use_pagination_state`].
pub struct PaginationHandle {
    /// Current pagination state.
    pub state: RwSignal<PaginationState>,
    page_size_options: StoredValue<Vec<usize>>,
    on_change: Option<Callback<PaginationState>>,
}

/// Creates pagination state from `config`.
///
/// An invalid configuration is logged and replaced by the defaults. `on_change` observes every
/// committed change.
pub fn use_pagination_state(
    config: PaginationConfig,
    on_change: Option<Callback<PaginationState>>,
) -> PaginationHandle {
    let initial = PaginationState::from_config(&config).unwrap_or_else(|err| {
        logging::warn!("pagination config rejected: {err}");
        PaginationState::default()
    });
    PaginationHandle {
        state: create_rw_signal(initial),
        page_size_options: store_value(config.page_size_options),
        on_change,
    }
}

impl PaginationHandle {
    pub fn page(&self) -> Signal<usize> {
        let state = self.state;
        Signal::derive(move || state.with(PaginationState::page))
    }

    pub fn page_size(&self) -> Signal<usize> {
        let state = self.state;
        Signal::derive(move || state.with(PaginationState::page_size))
    }

    pub fn total_pages(&self) -> Signal<usize> {
        let state = self.state;
        Signal::derive(move || state.with(PaginationState::total_pages))
    }

    pub fn has_next(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(PaginationState::has_next))
    }

    pub fn has_previous(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(PaginationState::has_previous))
    }

    /// Page-number strip with `siblings` pages on each side of the current one.
    pub fn page_items(&self, siblings: usize) -> Signal<Vec<PageItem>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.page_items(siblings)))
    }

    /// Page sizes offered by page-size pickers.
    pub fn page_size_options(&self) -> Vec<usize> {
        self.page_size_options.get_value()
    }

    pub fn set_page(&self, page: usize) -> bool {
        self.apply(|s| s.set_page(page))
    }

    pub fn next_page(&self) -> bool {
        self.apply(PaginationState::next_page)
    }

    pub fn previous_page(&self) -> bool {
        self.apply(PaginationState::previous_page)
    }

    pub fn set_total(&self, total: usize) -> bool {
        self.apply(|s| s.set_total(total))
    }

    pub fn reset(&self) -> bool {
        self.apply(PaginationState::reset)
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument::ZeroPageSize`] for `size == 0`.
    pub fn set_page_size(&self, size: usize) -> Result<bool, InvalidArgument> {
        let changed = try_commit(self.state, |s| s.set_page_size(size))?;
        if changed {
            self.notify();
        }
        Ok(changed)
    }

    fn apply(&self, mutate: impl FnOnce(&mut PaginationState) -> bool) -> bool {
        let changed = commit(self.state, mutate);
        if changed {
            self.notify();
        }
        changed
    }

    fn notify(&self) {
        if let (Some(on_change), Some(state)) = (self.on_change, self.state.try_get_untracked()) {
            on_change.call(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn navigation_clamps_and_reports_changes() {
        let _ = create_runtime();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let on_change = Callback::new({
            let seen = Rc::clone(&seen);
            move |state: PaginationState| seen.borrow_mut().push(state.page())
        });
        let pagination = use_pagination_state(
            PaginationConfig {
                page_size: 10,
                ..PaginationConfig::default()
            },
            Some(on_change),
        );

        assert!(pagination.set_total(95));
        assert_eq!(pagination.total_pages().get_untracked(), 10);
        assert!(pagination.set_page(42));
        assert_eq!(pagination.page().get_untracked(), 10);
        assert!(!pagination.next_page());
        assert!(pagination.previous_page());
        assert!(pagination.has_next().get_untracked());

        assert_eq!(*seen.borrow(), vec![1, 10, 9]);
    }

    #[test]
    fn invalid_page_size_is_returned_not_applied() {
        let _ = create_runtime();
        let pagination = use_pagination_state(PaginationConfig::default(), None);
        assert_eq!(
            pagination.set_page_size(0),
            Err(InvalidArgument::ZeroPageSize)
        );
        assert_eq!(pagination.page_size().get_untracked(), 20);
        assert_eq!(pagination.page_size_options(), vec![10, 20, 50, 100]);
    }

    #[test]
    fn zero_configured_page_size_falls_back_to_default() {
        let _ = create_runtime();
        let pagination = use_pagination_state(
            PaginationConfig {
                page_size: 0,
                ..PaginationConfig::default()
            },
            None,
        );
        assert_eq!(pagination.page_size().get_untracked(), 20);
    }
}
