//! Purpose: Model ordered key/value entries from forms and query strings.
//! Exports: `RawEntries`.
//! Role: Single decode boundary for `application/x-www-form-urlencoded` input.
//! Invariants: Entry order matches the source; keys may repeat.
//! Invariants: Decoding is infallible; rejection of bad input happens at validation.

use url::form_urlencoded;

/// Ordered (key, value) pairs as submitted. Keys may repeat; coalescing
/// into a [`ParsedObject`](crate::core::object::ParsedObject) happens later.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawEntries {
    pairs: Vec<(String, String)>,
}

impl RawEntries {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Decode an urlencoded payload. `+` decodes to space, percent-escapes
    /// decode lossily, a bare key yields an empty-string value.
    pub fn from_urlencoded(input: &str) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    pub fn from_bytes(input: &[u8]) -> Self {
        let pairs = form_urlencoded::parse(input)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}
