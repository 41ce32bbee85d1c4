//! `window.location` / `history.replaceState` query persistence.

use collection_host::{QueryParams, QueryStore};

#[derive(Debug, Clone, Copy, Default)]
/// Query store over the current page URL.
///
/// Writes replace the current history entry, so filter edits never grow the back stack.
pub struct BrowserQueryStore;

impl BrowserQueryStore {
    /// Raw `location.search`, including the leading `?` when present.
    pub fn search(self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()?.location().search().ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    /// Builds the URL written for `params`: path, then query (omitted when empty), then hash.
    pub fn compose_url(path: &str, params: &QueryParams, hash: &str) -> String {
        let mut url = path.to_string();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.to_query_string());
        }
        url.push_str(hash);
        url
    }
}

impl QueryStore for BrowserQueryStore {
    fn read_query(&self) -> QueryParams {
        self.search()
            .map(|raw| QueryParams::parse(&raw))
            .unwrap_or_default()
    }

    fn write_query(&self, params: &QueryParams) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let location = window.location();
            let path = location
                .pathname()
                .map_err(|e| format!("location.pathname failed: {e:?}"))?;
            let hash = location.hash().unwrap_or_default();
            let url = Self::compose_url(&path, params, &hash);
            window
                .history()
                .map_err(|e| format!("history unavailable: {e:?}"))?
                .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
                .map_err(|e| format!("history.replaceState failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = params;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn url_keeps_path_and_hash() {
        let params = QueryParams::parse("category=shoes&sort=price&dir=asc");
        assert_eq!(
            BrowserQueryStore::compose_url("/catalog", &params, "#grid"),
            "/catalog?category=shoes&sort=price&dir=asc#grid"
        );
        assert_eq!(
            BrowserQueryStore::compose_url("/catalog", &QueryParams::new(), ""),
            "/catalog"
        );
    }

    #[test]
    fn native_fallback_reads_nothing_and_accepts_writes() {
        let store = BrowserQueryStore;
        assert!(store.read_query().is_empty());
        assert_eq!(store.write_query(&QueryParams::parse("q=1")), Ok(()));
    }
}
