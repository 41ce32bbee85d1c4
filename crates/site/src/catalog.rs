//! Demo product catalog served from memory.

use std::cmp::Ordering;

use collection_host::{MemoryListFetcher, RequestDescriptor, SortDirection};
use collection_state::ResourceListConfig;
use leptos::logging;

const CATALOG_CONFIG: &str = r#"{
    "pagination": { "page_size": 10, "page_size_options": [10, 25, 50] },
    "filters": {
        "fields": [
            { "key": "q" },
            { "key": "category" },
            { "key": "tags", "kind": "list" }
        ],
        "default_sort": { "field": "name", "direction": "asc" }
    },
    "sync_url": true
}"#;

pub const CATEGORIES: [&str; 4] = ["bags", "coats", "hats", "shoes"];
const TAGS: [&str; 3] = ["new", "sale", "eco"];
const ADJECTIVES: [&str; 6] = ["Amber", "Bright", "Coastal", "Dusty", "Evening", "Field"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: &'static str,
    pub price_cents: u32,
    pub tags: Vec<&'static str>,
}

impl Product {
    pub fn price_label(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

fn sample_products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|n| {
            let category = CATEGORIES[n % CATEGORIES.len()];
            let adjective = ADJECTIVES[(n / CATEGORIES.len()) % ADJECTIVES.len()];
            let tags = TAGS
                .iter()
                .enumerate()
                .filter(|(bit, _)| (n >> bit) & 1 == 1)
                .map(|(_, tag)| *tag)
                .collect();
            Product {
                id: format!("sku-{n:04}"),
                name: format!("{adjective} {} #{n}", &category[..category.len() - 1]),
                category,
                price_cents: 1_500 + ((n as u32 * 7_919) % 18_000),
                tags,
            }
        })
        .collect()
}

fn matches(product: &Product, request: &RequestDescriptor) -> bool {
    let query = request.filters.get("q").and_then(|value| value.as_text());
    if let Some(query) = query {
        let query = query.to_lowercase();
        if !product.name.to_lowercase().contains(&query) && !product.id.contains(&query) {
            return false;
        }
    }
    if let Some(category) = request.filters.get("category").and_then(|v| v.as_text()) {
        if product.category != category {
            return false;
        }
    }
    match request.filters.get("tags") {
        Some(tags) => tags
            .as_slice()
            .iter()
            .all(|tag| product.tags.contains(&tag.as_str())),
        None => true,
    }
}

fn ordering(a: &Product, b: &Product, request: &RequestDescriptor) -> Ordering {
    let Some(sort) = &request.sort else {
        return Ordering::Equal;
    };
    let ordered = match sort.field.as_str() {
        "price" => a.price_cents.cmp(&b.price_cents),
        "category" => a.category.cmp(b.category),
        _ => a.name.cmp(&b.name),
    }
    .then_with(|| a.id.cmp(&b.id));
    match sort.direction {
        SortDirection::Asc => ordered,
        SortDirection::Desc => ordered.reverse(),
    }
}

/// In-memory source of `count` generated products with filtering and sorting.
pub fn catalog_fetcher(count: usize) -> MemoryListFetcher<Product> {
    MemoryListFetcher::new(sample_products(count))
        .with_matcher(matches)
        .with_ordering(ordering)
}

/// Catalog list configuration; falls back to defaults with URL sync on if the document is rejected.
pub fn catalog_list_config() -> ResourceListConfig {
    ResourceListConfig::from_json(CATALOG_CONFIG).unwrap_or_else(|err| {
        logging::warn!("catalog config rejected: {err}");
        ResourceListConfig {
            sync_url: true,
            ..ResourceListConfig::default()
        }
    })
}
