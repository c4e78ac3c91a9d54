//! Query parameter accumulation
//!
//! Within one `query` call a repeated key appends; across calls the first
//! occurrence of a key replaces whatever earlier calls set.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use url::Url;

use crate::builder::core::RequestBuilder;

/// Ordered multimap of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => *values = vec![value],
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// First value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Merge into the query already present on `url`.
    ///
    /// Values are appended after any the URL carries for the same key and
    /// the result is re-encoded with keys in sorted order.
    pub(crate) fn merge_into(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }

        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, v) in url.query_pairs() {
            merged.entry(k.into_owned()).or_default().push(v.into_owned());
        }
        for (k, values) in &self.entries {
            merged.entry(k.clone()).or_default().extend(values.iter().cloned());
        }

        url.query_pairs_mut().clear().extend_pairs(
            merged
                .iter()
                .flat_map(|(k, values)| values.iter().map(move |v| (k, v))),
        );
    }
}

impl RequestBuilder {
    /// Add query parameters from key/value pairs.
    ///
    /// The first occurrence of a key in this call replaces any values
    /// accumulated by earlier calls; later occurrences in the same call
    /// append.
    ///
    /// # Examples
    /// ```no_run
    /// use httptester::{ErrorSink, HttpClient, RequestBuilder};
    ///
    /// let builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
    ///     .query([("tag", "a"), ("tag", "b")])
    ///     .query([("page", "2")]);
    /// assert_eq!(builder.query_params().get_all("tag"), ["a", "b"]);
    /// ```
    #[must_use]
    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut seen = HashSet::new();
        for (key, value) in pairs {
            let key = key.into();
            if seen.contains(&key) {
                self.query.add(key, value);
            } else {
                self.query.set(key.clone(), value);
                seen.insert(key);
            }
        }
        self
    }
}
