//! Property-based tests for the payment URI codec.
//!
//! These tests generate random records and query strings and check the
//! parse/build contract against them.

use std::collections::BTreeMap;

use proptest::prelude::*;

use bip21_uri::{ErrorKind, PaymentRequest, WELL_KNOWN_KEYS, split_key_value};

/// Strategies for generating codec inputs.
mod strategies {
    use super::*;

    /// Generate an address (base58-like, no separators)
    pub fn address() -> impl Strategy<Value = String> {
        "[1-9A-HJ-NP-Za-km-z]{1,64}"
    }

    /// Generate a non-negative amount with satoshi precision
    pub fn amount() -> impl Strategy<Value = f64> {
        prop_oneof![
            1 => Just(0.0),
            4 => (1u64..=2_100_000_000_000_000).prop_map(|sats| sats as f64 / 100_000_000.0),
            1 => 0.0f64..1_000_000.0,
        ]
    }

    /// Generate a label or message, possibly empty.
    /// Only unreserved characters, which percent-encoding leaves untouched,
    /// so raw parsing gives back exactly what was built.
    pub fn text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9._~-]{0,24}"
    }

    /// Generate a lowercase extension key that is not well-known
    pub fn extension_key() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,15}".prop_filter("well-known key", |k| {
            !WELL_KNOWN_KEYS.contains(&k.as_str())
        })
    }

    /// Generate an extension map
    pub fn extensions() -> impl Strategy<Value = BTreeMap<String, String>> {
        prop::collection::btree_map(extension_key(), "[A-Za-z0-9._~-]{0,16}", 0..6)
    }

    /// Generate a full valid record
    pub fn request() -> impl Strategy<Value = PaymentRequest> {
        (address(), amount(), text(), text(), extensions()).prop_map(
            |(address, amount, label, message, extensions)| {
                let mut request = PaymentRequest::new(address);
                request.amount = amount;
                request.label = label;
                request.message = message;
                request.extensions = extensions;
                request
            },
        )
    }
}

use strategies::*;

proptest! {
    #[test]
    fn build_then_parse_roundtrips(request in request()) {
        let uri = request.build().unwrap();
        let parsed = PaymentRequest::parse(&uri).unwrap();
        prop_assert_eq!(parsed, request);
    }

    #[test]
    fn address_only_yields_defaults(address in address()) {
        let parsed = PaymentRequest::parse(&format!("bitcoin:{address}")).unwrap();
        prop_assert_eq!(parsed.address.as_str(), address.as_str());
        prop_assert!(parsed.label.is_empty());
        prop_assert!(parsed.message.is_empty());
        prop_assert!(!parsed.has_amount());
        prop_assert!(parsed.extensions.is_empty());
    }

    #[test]
    fn key_case_does_not_matter(request in request()) {
        let uri = request.build().unwrap();
        let (head, query) = uri.split_once('?').unwrap_or((uri.as_str(), ""));
        let shouted: Vec<String> = query
            .split('&')
            .filter(|t| !t.is_empty())
            .map(|token| match token.split_once('=') {
                Some((k, v)) => format!("{}={v}", k.to_uppercase()),
                None => token.to_string(),
            })
            .collect();
        let shouted_uri = if shouted.is_empty() {
            head.to_string()
        } else {
            format!("{head}?{}", shouted.join("&"))
        };
        prop_assert_eq!(PaymentRequest::parse(&shouted_uri).unwrap(), request);
    }

    #[test]
    fn tokens_without_separator_are_dropped(
        request in request(),
        junk in prop::collection::vec("[a-z]{1,8}", 1..4),
    ) {
        let uri = request.build().unwrap();
        let separator = if uri.contains('?') { '&' } else { '?' };
        let noisy = format!("{uri}{separator}{}", junk.join("&"));
        prop_assert_eq!(PaymentRequest::parse(&noisy).unwrap(), request);
    }

    #[test]
    fn zero_amount_never_emitted(mut request in request()) {
        request.amount = 0.0;
        let uri = request.build().unwrap();
        let has_amount_key = uri
            .split_once('?')
            .is_some_and(|(_, q)| q.split('&').any(|t| t.starts_with("amount=")));
        prop_assert!(!has_amount_key);
    }

    #[test]
    fn negative_amount_rejected_both_ways(
        mut request in request(),
        amount in -1_000_000.0f64..-0.000_000_01,
    ) {
        request.amount = amount;
        prop_assert_eq!(request.build().unwrap_err().error_kind(), ErrorKind::NegativeAmount);

        let uri = format!("bitcoin:{}?amount={amount}", request.address);
        prop_assert_eq!(
            PaymentRequest::parse(&uri).unwrap_err().error_kind(),
            ErrorKind::NegativeAmount
        );
    }

    #[test]
    fn second_colon_is_always_rejected(left in address(), right in address()) {
        let uri = format!("bitcoin:{left}:{right}");
        prop_assert_eq!(
            PaymentRequest::parse(&uri).unwrap_err().error_kind(),
            ErrorKind::InvalidScheme
        );
    }

    #[test]
    fn other_schemes_are_rejected(scheme in "[a-z]{1,10}", address in address()) {
        prop_assume!(scheme != "bitcoin");
        let uri = format!("{scheme}:{address}");
        prop_assert_eq!(
            PaymentRequest::parse(&uri).unwrap_err().error_kind(),
            ErrorKind::InvalidScheme
        );

        let mut request = PaymentRequest::new(address);
        request.scheme = scheme;
        prop_assert_eq!(request.build().unwrap_err().error_kind(), ErrorKind::InvalidScheme);
    }

    #[test]
    fn split_key_value_takes_first_two_pieces(
        key in "[a-z]{0,8}",
        value in "[a-z]{0,8}",
        tail in "[a-z=]{0,8}",
    ) {
        let token = format!("{key}={value}={tail}");
        prop_assert_eq!(split_key_value(&token), Some((key.as_str(), value.as_str())));
    }

    #[test]
    fn split_key_value_without_separator_is_none(token in "[a-z&?]{0,16}") {
        prop_assert_eq!(split_key_value(&token), None);
    }
}
