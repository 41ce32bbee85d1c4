mod catalog;
mod router_store;
mod web_app;

pub use catalog::{catalog_fetcher, catalog_list_config, Product};
pub use router_store::RouterQueryStore;
pub use web_app::{CatalogPage, FeedPage, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
