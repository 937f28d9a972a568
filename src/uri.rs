//! Payment request record and the URI codec.

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::debug;

use crate::amount::Amount;
use crate::constants::{
    AMOUNT_KEY, LABEL_KEY, MESSAGE_KEY, QUERY_SEPARATOR, SCHEME, SCHEME_SEPARATOR,
};
use crate::error::{BuildError, ParseError, ParseErrorKind};
use crate::query::{QueryParams, encode_query};

/// A payment request decoded from, or to be encoded into, a `bitcoin:` URI.
///
/// # Structure
///
/// ```text
/// bitcoin:<address>[?amount=<decimal>&label=<text>&message=<text>&<key>=<value>...]
/// ```
///
/// Fields are public so callers can assemble a request directly; validation
/// happens in [`build`](Self::build). Zero `amount` and empty `label` /
/// `message` mean "absent" and are never written.
///
/// # Examples
///
/// ```
/// use bip21_uri::PaymentRequest;
///
/// let request = PaymentRequest::parse(
///     "bitcoin:175tWpb8K1S7NmH4Zx6rewF9WQrcZv245W?amount=20.3&label=Luke-Jr",
/// ).unwrap();
/// assert_eq!(request.address, "175tWpb8K1S7NmH4Zx6rewF9WQrcZv245W");
/// assert_eq!(request.amount, 20.3);
/// assert_eq!(request.label, "Luke-Jr");
/// assert!(request.extensions.is_empty());
///
/// let uri = request.build().unwrap();
/// assert_eq!(uri, "bitcoin:175tWpb8K1S7NmH4Zx6rewF9WQrcZv245W?amount=20.3&label=Luke-Jr");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// URI scheme; must be `bitcoin` to build
    pub scheme: String,
    /// Payment target, not validated
    pub address: String,
    /// Requested amount; zero means unset
    pub amount: f64,
    /// Recipient label; empty means unset
    pub label: String,
    /// Payment message; empty means unset
    pub message: String,
    /// Every other query parameter, keyed by lowercase name
    pub extensions: BTreeMap<String, String>,
}

impl PaymentRequest {
    /// Creates a request for `address` with the supported scheme and no
    /// optional fields.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            scheme: SCHEME.to_string(),
            address: address.into(),
            amount: 0.0,
            label: String::new(),
            message: String::new(),
            extensions: BTreeMap::new(),
        }
    }

    /// Parses a payment request from a URI string.
    ///
    /// Query keys are matched case-insensitively and values are kept as
    /// written (no percent-decoding). Tokens without `=` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input does not contain exactly one `:`
    /// - The scheme is not `bitcoin`
    /// - The amount is not a decimal number, or is negative
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| {
            debug!(input, ?kind, "rejected payment URI");
            ParseError {
                input: input.to_string(),
                kind,
            }
        })
    }

    /// Serializes this request into a URI string.
    ///
    /// Parameters are percent-encoded; pairs are currently emitted in key
    /// order, but that order is not part of the contract.
    ///
    /// # Errors
    ///
    /// Returns `BuildError` if the scheme is not `bitcoin` or the amount is
    /// negative or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip21_uri::{ErrorKind, PaymentRequest};
    ///
    /// let request = PaymentRequest::new("ADDR1");
    /// assert_eq!(request.build().unwrap(), "bitcoin:ADDR1");
    ///
    /// let mut request = PaymentRequest::new("ADDR1");
    /// request.amount = -1.0;
    /// assert_eq!(request.build().unwrap_err().error_kind(), ErrorKind::NegativeAmount);
    /// ```
    pub fn build(&self) -> Result<String, BuildError> {
        if self.scheme != SCHEME {
            debug!(scheme = %self.scheme, "refusing to build URI with unsupported scheme");
            return Err(BuildError::InvalidScheme {
                found: self.scheme.clone(),
            });
        }

        let amount = Amount::new(self.amount).map_err(|e| {
            debug!(amount = self.amount, "refusing to build URI with invalid amount");
            BuildError::from(e)
        })?;

        let mut uri = format!("{SCHEME}{SCHEME_SEPARATOR}{}", self.address);

        let amount_str = (!amount.is_zero()).then(|| amount.to_string());
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(3 + self.extensions.len());
        if let Some(amount) = &amount_str {
            params.push((AMOUNT_KEY, amount.as_str()));
        }
        if !self.label.is_empty() {
            params.push((LABEL_KEY, self.label.as_str()));
        }
        if !self.message.is_empty() {
            params.push((MESSAGE_KEY, self.message.as_str()));
        }
        params.extend(self.extensions.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        if !params.is_empty() {
            uri.push(QUERY_SEPARATOR);
            uri.push_str(&encode_query(params));
        }

        Ok(uri)
    }

    /// Returns true if a non-zero amount is requested.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn has_amount(&self) -> bool {
        self.amount != 0.0
    }

    /// Returns the value of an extension parameter, matching the key
    /// case-insensitively.
    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(&key.to_lowercase()).map(String::as_str)
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let rest = Self::split_scheme(input)?;
        let (address, query) = Self::split_query(rest);

        let mut request = Self::new(address);
        let Some(query) = query else {
            return Ok(request);
        };

        let mut params = QueryParams::parse(query);

        if let Some(value) = params.remove(AMOUNT_KEY) {
            request.amount = Amount::parse(&value)?.value();
        }
        if let Some(label) = params.remove(LABEL_KEY) {
            request.label = label;
        }
        if let Some(message) = params.remove(MESSAGE_KEY) {
            request.message = message;
        }
        request.extensions = params.into_inner();

        Ok(request)
    }

    /// Strips the scheme, requiring exactly one ':' in the whole input.
    ///
    /// A ':' inside the address or a query value is rejected too.
    fn split_scheme(input: &str) -> Result<&str, ParseErrorKind> {
        let mut parts = input.split(SCHEME_SEPARATOR);
        let scheme = parts.next().unwrap_or_default();

        match (parts.next(), parts.next()) {
            (None, _) => Err(ParseErrorKind::InvalidScheme { found: None }),
            (Some(rest), None) if scheme == SCHEME => Ok(rest),
            _ => Err(ParseErrorKind::InvalidScheme {
                found: Some(scheme.to_string()),
            }),
        }
    }

    fn split_query(input: &str) -> (&str, Option<&str>) {
        match input.split_once(QUERY_SEPARATOR) {
            Some((address, query)) => (address, Some(query)),
            None => (input, None),
        }
    }
}

impl Default for PaymentRequest {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl FromStr for PaymentRequest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PaymentRequest {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&PaymentRequest> for String {
    type Error = BuildError;

    fn try_from(request: &PaymentRequest) -> Result<Self, Self::Error> {
        request.build()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PaymentRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let uri = self.build().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&uri)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PaymentRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
