use std::rc::Rc;

use collection_hooks::{
    use_bulk_selection, use_debounced, use_infinite_scroll, use_resource_list, use_virtual_list,
    ResourceListHandle, SelectionHandle,
};
use collection_host::{FilterValue, ListFetcher, QueryStore, SortDirection};
use collection_host_web::element_metrics;
use collection_state::{DebounceConfig, InfiniteScrollConfig, PageItem, VirtualListConfig};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    catalog::{catalog_fetcher, catalog_list_config, Product, CATEGORIES},
    router_store::RouterQueryStore,
};

const CATALOG_SIZE: usize = 240;
const FEED_ROW_HEIGHT: f64 = 48.0;
const FEED_LOAD_THRESHOLD: f64 = 200.0;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Collection State" />
        <Meta name="description" content="Paginated, filtered and virtualized collection demos." />

        <Router>
            <nav class="site-nav">
                <A href="/">"Catalog"</A>
                <A href="/feed">"Feed"</A>
            </nav>
            <main class="site-root">
                <Routes>
                    <Route path="" view=CatalogPage />
                    <Route path="/feed" view=FeedPage />
                    <Route path="/products/:id" view=ProductRoute />
                </Routes>
            </main>
        </Router>
    }
}

/// Paginated product table with URL-synchronized filters, sort and bulk selection.
#[component]
pub fn CatalogPage() -> impl IntoView {
    let store = RouterQueryStore::new();
    let search = store.search();
    let fetcher: Rc<dyn ListFetcher<Product>> = Rc::new(catalog_fetcher(CATALOG_SIZE));
    let query_store: Rc<dyn QueryStore> = Rc::new(store);
    let list = match use_resource_list(catalog_list_config(), fetcher, Some(query_store)) {
        Ok(list) => list,
        Err(err) => return view! { <p class="catalog-error">{err.to_string()}</p> }.into_view(),
    };

    // Back/forward navigation changes the query without going through the list.
    create_effect(move |previous: Option<()>| {
        search.with(|_| ());
        if previous.is_some() {
            list.rehydrate();
        }
    });

    let ids = Signal::derive(move || {
        list.state
            .with(|state| state.items().iter().map(|p| p.id.clone()).collect())
    });
    let selection = use_bulk_selection(ids);

    view! {
        <section class="catalog">
            <h1>"Catalog"</h1>
            <CatalogToolbar list=list />
            <BulkBar selection=selection />
            <CatalogTable list=list selection=selection />
            <Pager list=list />
        </section>
    }
    .into_view()
}

#[component]
fn CatalogToolbar(list: ResourceListHandle<Product>) -> impl IntoView {
    let filters = list.filters();
    let text_filter = move |key: &'static str| {
        filters.with(|f| {
            f.get(key)
                .and_then(FilterValue::as_text)
                .map(str::to_string)
                .unwrap_or_default()
        })
    };

    let query = create_rw_signal(filters.with_untracked(|f| {
        f.get("q")
            .and_then(FilterValue::as_text)
            .map(str::to_string)
            .unwrap_or_default()
    }));
    let settled = use_debounced(query.into(), DebounceConfig::default());
    create_effect(move |previous: Option<()>| {
        let q = settled.get();
        if previous.is_none() {
            return;
        }
        if let Err(err) = list.set_filter("q", q) {
            logging::warn!("search filter rejected: {err}");
        }
    });

    let page_sizes = list
        .state
        .with_untracked(|state| state.config().pagination.page_size_options.clone());

    view! {
        <div class="catalog-toolbar">
            <input
                type="search"
                placeholder="Search products"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <select
                prop:value=move || text_filter("category")
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if value.is_empty() {
                        list.clear_filter("category");
                    } else if let Err(err) = list.set_filter("category", value) {
                        logging::warn!("category filter rejected: {err}");
                    }
                }
            >
                <option value="">"All categories"</option>
                {CATEGORIES
                    .iter()
                    .copied()
                    .map(|category| view! { <option value=category>{category}</option> })
                    .collect_view()}
            </select>
            <select
                prop:value=move || list.pagination().with(|p| p.page_size().to_string())
                on:change=move |ev| {
                    let Ok(size) = event_target_value(&ev).parse::<usize>() else {
                        return;
                    };
                    if let Err(err) = list.set_page_size(size) {
                        logging::warn!("page size rejected: {err}");
                    }
                }
            >
                {page_sizes
                    .into_iter()
                    .map(|size| view! { <option value=size.to_string()>{size}" per page"</option> })
                    .collect_view()}
            </select>
            <button
                prop:disabled=move || !filters.with(|f| f.has_active())
                on:click=move |_| {
                    query.set(String::new());
                    list.clear_filters();
                }
            >
                "Clear filters"
            </button>
            <span class="catalog-status">
                {move || {
                    if let Some(err) = list.error().get() {
                        format!("Failed: {}", err.message)
                    } else if list.loading().get() {
                        "Loading…".to_string()
                    } else {
                        format!("{} products", list.total_items().get())
                    }
                }}
            </span>
        </div>
    }
}

#[component]
fn BulkBar(selection: SelectionHandle) -> impl IntoView {
    view! {
        <div class="bulk-bar" class:hidden=move || selection.selected_count().get() == 0>
            <span>{move || format!("{} selected", selection.selected_count().get())}</span>
            <button on:click=move |_| {
                selection.select_none();
            }>"Clear selection"</button>
        </div>
    }
}

#[component]
fn CatalogTable(list: ResourceListHandle<Product>, selection: SelectionHandle) -> impl IntoView {
    let sort_marker = move |field: &'static str| {
        move || {
            list.filters().with(|f| match f.sort() {
                Some(sort) if sort.field == field => match sort.direction {
                    SortDirection::Asc => " ▲",
                    SortDirection::Desc => " ▼",
                },
                _ => "",
            })
        }
    };
    let sort_by = move |field: &'static str| {
        move |_: ev::MouseEvent| {
            if let Err(err) = list.toggle_sort(field) {
                logging::warn!("sort rejected: {err}");
            }
        }
    };

    view! {
        <table class="catalog-table">
            <thead>
                <tr>
                    <th>
                        <input
                            type="checkbox"
                            prop:checked=move || selection.all_selected().get()
                            prop:indeterminate=move || selection.some_selected().get()
                            on:change=move |_| {
                                if selection.all_selected().get_untracked() {
                                    selection.select_none();
                                } else {
                                    selection.select_all();
                                }
                            }
                        />
                    </th>
                    <th><button on:click=sort_by("name")>"Name"{sort_marker("name")}</button></th>
                    <th><button on:click=sort_by("category")>"Category"{sort_marker("category")}</button></th>
                    <th><button on:click=sort_by("price")>"Price"{sort_marker("price")}</button></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || list.items().get()
                    key=|product| product.id.clone()
                    children=move |product: Product| {
                        let id = product.id.clone();
                        let checked_id = id.clone();
                        let price_label = product.price_label();
                        view! {
                            <tr>
                                <td>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selection.is_selected(&checked_id)
                                        on:click=move |ev: ev::MouseEvent| {
                                            if ev.shift_key() {
                                                selection.extend_to(&id);
                                            } else {
                                                selection.toggle(&id);
                                            }
                                        }
                                    />
                                </td>
                                <td>
                                    <A href=format!("/products/{}", product.id)>{product.name.clone()}</A>
                                </td>
                                <td>{product.category}</td>
                                <td>{price_label}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn Pager(list: ResourceListHandle<Product>) -> impl IntoView {
    let pagination = list.pagination();

    view! {
        <nav class="pager">
            <button
                prop:disabled=move || !pagination.with(|p| p.has_previous())
                on:click=move |_| list.previous_page()
            >
                "Previous"
            </button>
            {move || {
                let current = pagination.with(|p| p.page());
                pagination
                    .with(|p| p.page_items(1))
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(page) => view! {
                            <button class:current={page == current} on:click=move |_| list.set_page(page)>
                                {page}
                            </button>
                        }
                        .into_view(),
                        PageItem::Ellipsis => view! { <span class="pager-gap">"…"</span> }.into_view(),
                    })
                    .collect_view()
            }}
            <button
                prop:disabled=move || !pagination.with(|p| p.has_next())
                on:click=move |_| list.next_page()
            >
                "Next"
            </button>
            <span class="pager-range">
                {move || match pagination.with(|p| p.item_range()) {
                    Some((first, last)) => format!("{first}–{last}"),
                    None => String::new(),
                }}
            </span>
        </nav>
    }
}

/// Endless product feed: infinite loading feeding a virtualized list.
#[component]
pub fn FeedPage() -> impl IntoView {
    let fetcher: Rc<dyn ListFetcher<Product>> = Rc::new(catalog_fetcher(CATALOG_SIZE));
    let feed = match use_infinite_scroll(InfiniteScrollConfig::default(), fetcher, None) {
        Ok(feed) => feed,
        Err(err) => return view! { <p class="feed-error">{err.to_string()}</p> }.into_view(),
    };
    let items = feed.items();
    let count = Signal::derive(move || items.with(Vec::len));
    let rows = use_virtual_list(
        VirtualListConfig {
            estimated_item_size: FEED_ROW_HEIGHT,
            ..VirtualListConfig::default()
        },
        count,
    );

    let viewport = create_node_ref::<html::Div>();
    let measure = move || {
        if let Some(el) = viewport.get_untracked() {
            let metrics = element_metrics(&el);
            rows.on_scroll(metrics);
            feed.on_scroll(metrics, FEED_LOAD_THRESHOLD);
        }
    };
    viewport.on_load(move |_| measure());

    view! {
        <section class="feed">
            <h1>"Feed"</h1>
            <div
                class="feed-viewport"
                node_ref=viewport
                style="overflow-y: auto; height: 480px"
                on:scroll=move |_| measure()
            >
                <div style=move || format!("position: relative; height: {}px", rows.window.get().total_size())>
                    <div style=move || format!("transform: translateY({}px)", rows.window.get().offset_before())>
                        {move || {
                            let window = rows.window.get();
                            items.with(|items| {
                                window
                                    .indices()
                                    .filter_map(|index| items.get(index).cloned())
                                    .map(|product| {
                                        let price_label = product.price_label();
                                        view! {
                                            <div class="feed-row" style=format!("height: {FEED_ROW_HEIGHT}px")>
                                                <strong>{product.name}</strong>
                                                " "
                                                <span>{price_label}</span>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            })
                        }}
                    </div>
                </div>
            </div>
            <p class="feed-status">
                {move || {
                    if let Some(err) = feed.error().get() {
                        format!("Failed: {}", err.message)
                    } else if feed.loading().get() {
                        "Loading…".to_string()
                    } else if feed.has_more().get() {
                        format!("{} loaded", count.get())
                    } else {
                        format!("All {} loaded", count.get())
                    }
                }}
            </p>
            <button prop:disabled=move || !feed.has_more().get() on:click=move |_| {
                feed.load_more();
            }>"Load more"</button>
        </section>
    }
    .into_view()
}

#[component]
fn ProductRoute() -> impl IntoView {
    let params = use_params_map();
    let id = move || {
        params
            .with(|map| map.get("id").cloned())
            .unwrap_or_else(|| "unknown".to_string())
    };

    view! {
        <section class="product-detail">
            <h1>"Product"</h1>
            <p>{move || format!("SKU: {}", id())}</p>
            <A href=move || format!("/?q={}", id())>"Find in catalog"</A>
        </section>
    }
}
