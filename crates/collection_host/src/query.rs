//! Ordered query-string parameters and their form-urlencoded codec.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered list of query-string `key=value` pairs.
///
/// Order is preserved on both parse and serialize so that a deterministic writer produces a
/// deterministic string (equality checks, shareable links). Repeated keys are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string. A leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_start_matches('?');
        form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Serializes to a form-urlencoded string without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Appends a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order of appearance.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` when at least one pair uses `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Iterates over all pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keeps only pairs for which `keep(key, value)` is `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.pairs.retain(|(k, v)| keep(k, v));
    }

    /// Appends every pair from `other`.
    pub fn extend_from(&mut self, other: &Self) {
        self.pairs.extend(other.pairs.iter().cloned());
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_keeps_order_and_repeated_keys() {
        let params = QueryParams::parse("?b=2&a=1&b=3");
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("b", "2"), ("a", "1"), ("b", "3")]
        );
        assert_eq!(params.get("b"), Some("2"));
        assert_eq!(params.get_all("b").collect::<Vec<_>>(), vec!["2", "3"]);
        assert!(!params.contains_key("c"));
    }

    #[test]
    fn looked_up_value_outlives_the_key() {
        let params = QueryParams::parse("category=shoes&category=hats");
        let value = {
            let key = String::from("category");
            params.get(&key)
        };
        assert_eq!(value, Some("shoes"));
    }

    #[test]
    fn serializer_escapes_reserved_characters() {
        let mut params = QueryParams::new();
        params.push("q", "a&b=c d");
        let raw = params.to_query_string();
        assert_eq!(raw, "q=a%26b%3Dc+d");
        assert_eq!(QueryParams::parse(&raw), params);
    }

    #[test]
    fn empty_input_parses_to_empty_params() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
        assert_eq!(QueryParams::parse("flag").get("flag"), Some(""));
    }

    #[test]
    fn retain_drops_matching_pairs() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.retain(|key, _| key != "a");
        assert_eq!(params.to_string(), "b=2");
    }
}
