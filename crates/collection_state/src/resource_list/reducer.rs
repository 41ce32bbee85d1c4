//! Reducer actions, side-effect intents, and transition logic for [`ResourceList`].

use std::collections::BTreeMap;

use collection_host::{FilterValue, QueryParams, SortDirection};

use super::{RequestTicket, ResourceList};
use crate::{error::InvalidArgument, filters};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_resource_list`].
pub enum ListAction {
    /// Jump to a page (clamped).
    SetPage(usize),
    NextPage,
    PreviousPage,
    /// Change the page size.
    SetPageSize(usize),
    /// Set or remove one filter.
    SetFilter {
        /// Filter key.
        key: String,
        /// New value; an empty value removes the key.
        value: FilterValue,
    },
    /// Shallow-merge several filters.
    SetFilters(BTreeMap<String, FilterValue>),
    /// Remove one filter.
    ClearFilter(String),
    /// Remove every filter.
    ClearFilters,
    /// Sort by a field.
    SetSort {
        /// Field to sort by.
        field: String,
        /// Sort direction.
        direction: SortDirection,
    },
    /// Flip or set the sort field (column-header click).
    ToggleSort(String),
    /// Drop the sort.
    ClearSort,
    /// Replace filters and sort with the state encoded in a query string.
    HydrateQuery(QueryParams),
    /// Re-derive the descriptor and fetch if it changed.
    Evaluate,
    /// Fetch the current descriptor unconditionally.
    Refetch,
    /// Tear down; later results are discarded.
    Dispose,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_resource_list`] for the host runtime to execute.
pub enum ListEffect {
    /// Run the fetch collaborator for this ticket and commit the result.
    Fetch(RequestTicket),
    /// Persist filter/sort state to the URL. Only emitted when URL sync is enabled.
    WriteQuery(QueryParams),
}

/// Applies a [`ListAction`] and collects resulting side effects.
///
/// Every action ends with a descriptor re-evaluation, so any change that alters the request
/// yields exactly one [`ListEffect::Fetch`]. Filter and sort changes reset pagination to page 1
/// unless disabled in configuration.
///
/// # Errors
///
/// Returns [`InvalidArgument`] for a zero page size, empty or reserved filter keys, or an empty
/// sort field. The list is unchanged in that case.
pub fn reduce_resource_list<T>(
    list: &mut ResourceList<T>,
    action: ListAction,
) -> Result<Vec<ListEffect>, InvalidArgument> {
    let mut effects = Vec::new();
    let mut filters_changed = false;

    match action {
        ListAction::SetPage(page) => {
            let changed = list.pagination.set_page(page);
            list.touch(changed);
        }
        ListAction::NextPage => {
            let changed = list.pagination.next_page();
            list.touch(changed);
        }
        ListAction::PreviousPage => {
            let changed = list.pagination.previous_page();
            list.touch(changed);
        }
        ListAction::SetPageSize(size) => {
            let changed = list.pagination.set_page_size(size)?;
            list.touch(changed);
        }
        ListAction::SetFilter { key, value } => {
            filters_changed = list.filters.set_field(&list.config.filters, key, value)?;
        }
        ListAction::SetFilters(partial) => {
            filters_changed = list.filters.set_fields(&list.config.filters, partial)?;
        }
        ListAction::ClearFilter(key) => {
            filters_changed = list.filters.clear_filter(&key);
        }
        ListAction::ClearFilters => {
            filters_changed = list.filters.clear_all();
        }
        ListAction::SetSort { field, direction } => {
            filters_changed = list.filters.set_sort(field, direction)?;
        }
        ListAction::ToggleSort(field) => {
            filters_changed = list.filters.toggle_sort(field)?;
        }
        ListAction::ClearSort => {
            filters_changed = list.filters.clear_sort();
        }
        ListAction::HydrateQuery(params) => {
            let hydrated = filters::from_query(&params, &list.config.filters);
            if hydrated != list.filters {
                list.filters = hydrated;
                list.touch(true);
                if list.config.reset_page_on_filter_change {
                    list.pagination.reset();
                }
            }
        }
        ListAction::Evaluate => {}
        ListAction::Refetch => {
            if let Some(ticket) = list.refetch() {
                effects.push(ListEffect::Fetch(ticket));
            }
            return Ok(effects);
        }
        ListAction::Dispose => {
            list.dispose();
            return Ok(effects);
        }
    }

    if filters_changed {
        list.touch(true);
        if list.config.reset_page_on_filter_change {
            list.pagination.reset();
        }
        if list.config.sync_url {
            effects.push(ListEffect::WriteQuery(filters::to_query(
                &list.filters,
                &list.config.filters,
            )));
        }
    }

    if let Some(ticket) = list.evaluate() {
        effects.push(ListEffect::Fetch(ticket));
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use collection_host::{ListPage, SortSpec};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::{FilterConfig, FilterField, ResourceListConfig};

    fn loaded_list(total: usize) -> ResourceList<usize> {
        let mut list = ResourceList::new(ResourceListConfig {
            filters: FilterConfig::default().with_field(FilterField::text("category")),
            ..ResourceListConfig::default()
        })
        .expect("list");
        let effects = reduce_resource_list(&mut list, ListAction::Evaluate).expect("evaluate");
        let ListEffect::Fetch(ticket) = &effects[0] else {
            panic!("expected fetch, got {effects:?}");
        };
        list.commit(ticket, Ok(ListPage::new(vec![0; 20], total)));
        list
    }

    fn fetched_page(effects: &[ListEffect]) -> Option<usize> {
        effects.iter().find_map(|effect| match effect {
            ListEffect::Fetch(ticket) => Some(ticket.descriptor.page),
            ListEffect::WriteQuery(_) => None,
        })
    }

    #[test]
    fn page_change_emits_one_fetch() {
        let mut list = loaded_list(95);
        let effects = reduce_resource_list(&mut list, ListAction::NextPage).expect("next");
        assert_eq!(fetched_page(&effects), Some(2));
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn no_op_page_change_emits_nothing() {
        let mut list = loaded_list(95);
        let revision = list.revision();
        let effects = reduce_resource_list(&mut list, ListAction::SetPage(1)).expect("set page");
        assert!(effects.is_empty());
        assert_eq!(list.revision(), revision);
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut list = loaded_list(95);
        reduce_resource_list(&mut list, ListAction::SetPage(3)).expect("page");
        let effects = reduce_resource_list(
            &mut list,
            ListAction::SetFilter {
                key: "category".to_string(),
                value: FilterValue::text("shoes"),
            },
        )
        .expect("filter");

        assert_eq!(list.pagination().page(), 1);
        assert_eq!(fetched_page(&effects), Some(1));
        let ListEffect::Fetch(ticket) = &effects[0] else {
            panic!("expected fetch");
        };
        assert_eq!(
            ticket.descriptor.filters.get("category"),
            Some(&FilterValue::text("shoes"))
        );
    }

    #[test]
    fn filter_values_take_the_declared_kind() {
        let mut list = loaded_list(95);
        let partial = BTreeMap::from([(
            "category".to_string(),
            FilterValue::list(["boots", "clogs"]),
        )]);
        reduce_resource_list(&mut list, ListAction::SetFilters(partial)).expect("filters");

        assert_eq!(
            list.filters().get("category"),
            Some(&FilterValue::text("boots,clogs"))
        );
    }

    #[test]
    fn page_reset_can_be_disabled() {
        let mut list: ResourceList<usize> = ResourceList::new(ResourceListConfig {
            reset_page_on_filter_change: false,
            ..ResourceListConfig::default()
        })
        .expect("list");
        let effects = reduce_resource_list(&mut list, ListAction::Evaluate).expect("evaluate");
        let ListEffect::Fetch(ticket) = &effects[0] else {
            panic!("expected fetch");
        };
        list.commit(ticket, Ok(ListPage::new(Vec::new(), 100)));
        reduce_resource_list(&mut list, ListAction::SetPage(4)).expect("page");

        reduce_resource_list(&mut list, ListAction::ToggleSort("name".to_string())).expect("sort");
        assert_eq!(list.pagination().page(), 4);
    }

    #[test]
    fn invalid_input_leaves_state_untouched() {
        let mut list = loaded_list(95);
        let revision = list.revision();
        assert_eq!(
            reduce_resource_list(&mut list, ListAction::SetPageSize(0)),
            Err(InvalidArgument::ZeroPageSize)
        );
        assert_eq!(
            reduce_resource_list(
                &mut list,
                ListAction::SetFilter {
                    key: "dir".to_string(),
                    value: FilterValue::text("x"),
                }
            ),
            Err(InvalidArgument::ReservedFilterKey("dir".to_string()))
        );
        assert_eq!(list.revision(), revision);
        assert!(!list.filters().has_active());
    }

    #[test]
    fn url_sync_emits_query_write_on_filter_change() {
        let mut list: ResourceList<usize> = ResourceList::new(ResourceListConfig {
            sync_url: true,
            ..ResourceListConfig::default()
        })
        .expect("list");
        let effects = reduce_resource_list(
            &mut list,
            ListAction::SetSort {
                field: "price".to_string(),
                direction: SortDirection::Desc,
            },
        )
        .expect("sort");

        assert!(effects.contains(&ListEffect::WriteQuery(QueryParams::parse(
            "sort=price&dir=desc"
        ))));
        assert_eq!(fetched_page(&effects), Some(1));
    }

    #[test]
    fn hydrate_query_replaces_filters() {
        let mut list = loaded_list(95);
        reduce_resource_list(&mut list, ListAction::SetPage(2)).expect("page");
        let effects = reduce_resource_list(
            &mut list,
            ListAction::HydrateQuery(QueryParams::parse("category=hats&sort=name&dir=desc")),
        )
        .expect("hydrate");

        assert_eq!(list.filters().get("category"), Some(&FilterValue::text("hats")));
        assert_eq!(
            list.filters().sort(),
            Some(SortSpec::new("name", SortDirection::Desc))
        );
        assert_eq!(list.pagination().page(), 1);
        assert_eq!(fetched_page(&effects), Some(1));
    }

    #[test]
    fn shrinking_total_triggers_follow_up_fetch_for_clamped_page() {
        let mut list = loaded_list(95);
        let effects = reduce_resource_list(&mut list, ListAction::SetPage(5)).expect("page");
        let ListEffect::Fetch(ticket) = &effects[0] else {
            panic!("expected fetch");
        };
        list.commit(ticket, Ok(ListPage::new(Vec::new(), 30)));

        assert_eq!(list.pagination().page(), 2);
        let effects = reduce_resource_list(&mut list, ListAction::Evaluate).expect("evaluate");
        assert_eq!(fetched_page(&effects), Some(2));
    }

    #[test]
    fn refetch_always_issues_and_dispose_stops_everything() {
        let mut list = loaded_list(95);
        let effects = reduce_resource_list(&mut list, ListAction::Refetch).expect("refetch");
        assert_eq!(fetched_page(&effects), Some(1));

        reduce_resource_list(&mut list, ListAction::Dispose).expect("dispose");
        let effects = reduce_resource_list(&mut list, ListAction::NextPage).expect("next");
        assert!(effects.is_empty());
    }
}
