//! [`QueryStore`] backed by the `leptos_router` location, so query writes stay visible to routes.

use std::rc::Rc;

use collection_host::{QueryParams, QueryStore};
use collection_host_web::BrowserQueryStore;
use leptos::*;
use leptos_router::{use_location, use_navigate, NavigateOptions};

#[derive(Clone)]
pub struct RouterQueryStore {
    pathname: Memo<String>,
    search: Memo<String>,
    hash: Memo<String>,
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
}

impl RouterQueryStore {
    /// Must be created under a `<Router>`.
    pub fn new() -> Self {
        let location = use_location();
        let navigate = use_navigate();
        Self {
            pathname: location.pathname,
            search: location.search,
            hash: location.hash,
            navigate: Rc::new(move |to, options| navigate(to, options)),
        }
    }

    /// Tracked raw query string; changes on back/forward navigation as well as on writes.
    pub fn search(&self) -> Memo<String> {
        self.search
    }
}

impl QueryStore for RouterQueryStore {
    fn read_query(&self) -> QueryParams {
        QueryParams::parse(&self.search.get_untracked())
    }

    fn write_query(&self, params: &QueryParams) -> Result<(), String> {
        if self.read_query() == *params {
            return Ok(());
        }
        let url = BrowserQueryStore::compose_url(
            &self.pathname.get_untracked(),
            params,
            &self.hash.get_untracked(),
        );
        (self.navigate)(
            &url,
            NavigateOptions {
                replace: true,
                scroll: false,
                ..NavigateOptions::default()
            },
        );
        Ok(())
    }
}
