//! Query string tokenizing and encoding for payment URIs.
//!
//! Parsing is split into two independent stages: [`split_pairs`] breaks the
//! query on `&`, and [`split_key_value`] breaks one token on `=`. Values are
//! kept exactly as they appear in the URI; no percent-decoding happens here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::trace;

use crate::constants::{KEY_VALUE_SEPARATOR, PAIR_SEPARATOR};

/// Bytes escaped in query keys and values: everything except the RFC 3986
/// unreserved set. Spaces are handled separately and become `+`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Splits a query string (without the leading '?') into raw pair tokens.
///
/// Empty tokens are yielded as-is; [`split_key_value`] discards them.
///
/// ```
/// use bip21_uri::split_pairs;
///
/// let tokens: Vec<_> = split_pairs("amount=1&label=x&flag").collect();
/// assert_eq!(tokens, ["amount=1", "label=x", "flag"]);
/// ```
pub fn split_pairs(query: &str) -> impl Iterator<Item = &str> {
    query.split(PAIR_SEPARATOR)
}

/// Splits one pair token into its key and value.
///
/// Returns `None` when the token has no `=`. When the token has more than
/// one `=`, the value is only the text between the first and the second
/// one; the remainder is discarded.
///
/// ```
/// use bip21_uri::split_key_value;
///
/// assert_eq!(split_key_value("label=Luke-Jr"), Some(("label", "Luke-Jr")));
/// assert_eq!(split_key_value("a=b=c"), Some(("a", "b")));
/// assert_eq!(split_key_value("flag"), None);
/// ```
#[must_use]
pub fn split_key_value(token: &str) -> Option<(&str, &str)> {
    let mut pieces = token.split(KEY_VALUE_SEPARATOR);
    let key = pieces.next()?;
    let value = pieces.next()?;
    Some((key, value))
}

/// Query parameters decoded from a payment URI.
///
/// Keys are lowercased on insertion so lookups are case-insensitive; when a
/// key repeats, the last value wins. Iteration is ordered by key, but
/// callers should not rely on any particular order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty query params instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses query parameters from a query string (without leading '?').
    ///
    /// Never fails: tokens without `=` are dropped.
    ///
    /// ```
    /// use bip21_uri::QueryParams;
    ///
    /// let params = QueryParams::parse("Label=Luke-Jr&flag&foo=1&FOO=2");
    /// assert_eq!(params.get("label"), Some("Luke-Jr"));
    /// assert_eq!(params.get("foo"), Some("2"));
    /// assert_eq!(params.len(), 2);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut params = Self::new();

        for token in split_pairs(input) {
            match split_key_value(token) {
                Some((key, value)) => params.insert(key, value),
                None => trace!(token, "dropping query token without '='"),
            }
        }

        params
    }

    /// Inserts a parameter, lowercasing the key and replacing any previous
    /// value for it.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_lowercase(), value.to_string());
    }

    /// Returns the value for a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Removes and returns the value for a parameter, if present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.remove(&name.to_lowercase())
    }

    /// Returns true if the query is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the params, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.params
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_query(self.iter()))
    }
}

impl FromStr for QueryParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Escapes one query key or value: unreserved characters pass through,
/// spaces become `+`, everything else is `%XX` per UTF-8 byte.
///
/// ```
/// use bip21_uri::query_escape;
///
/// assert_eq!(query_escape("Luke-Jr"), "Luke-Jr");
/// assert_eq!(query_escape("a b&c"), "a+b%26c");
/// ```
#[must_use]
pub fn query_escape(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Encodes key/value pairs as `k1=v1&k2=v2`, escaping both sides.
///
/// Pairs are sorted by key; pairs sharing a key keep their given order.
#[must_use]
pub fn encode_query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut pairs: Vec<_> = pairs.into_iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let mut encoded = String::new();
    for (key, value) in pairs {
        if !encoded.is_empty() {
            encoded.push(PAIR_SEPARATOR);
        }
        encoded.push_str(&query_escape(key));
        encoded.push(KEY_VALUE_SEPARATOR);
        encoded.push_str(&query_escape(value));
    }
    encoded
}
