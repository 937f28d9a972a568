//! Parser and builder for `bitcoin:` payment request URIs (BIP 21).
//!
//! This crate converts between the textual URI form of a payment request
//! and a structured [`PaymentRequest`] record.
//!
//! # Overview
//!
//! Payment URIs combine an address with optional query parameters:
//!
//! ```text
//! bitcoin:<address>[?amount=<decimal>&label=<text>&message=<text>&<key>=<value>...]
//! ```
//!
//! `amount`, `label` and `message` are extracted into dedicated fields (key
//! matching is case-insensitive). Every other parameter is kept in
//! [`PaymentRequest::extensions`] under its lowercased key.
//!
//! # Quick Start
//!
//! ```rust
//! use bip21_uri::PaymentRequest;
//!
//! let request = PaymentRequest::parse("bitcoin:ADDR1?amount=20.3&label=Luke-Jr&foo=50").unwrap();
//! assert_eq!(request.amount, 20.3);
//! assert_eq!(request.label, "Luke-Jr");
//! assert_eq!(request.extension("foo"), Some("50"));
//!
//! let mut request = PaymentRequest::new("ADDR1");
//! request.message = "Donation for project xyz".to_string();
//! assert_eq!(request.build().unwrap(), "bitcoin:ADDR1?message=Donation+for+project+xyz");
//! ```
//!
//! # Builder Pattern
//!
//! ```rust
//! use bip21_uri::PaymentRequestBuilder;
//!
//! let uri = PaymentRequestBuilder::new()
//!     .address("ADDR1")
//!     .label("Luke-Jr")
//!     .into_uri()
//!     .unwrap();
//! assert_eq!(uri, "bitcoin:ADDR1?label=Luke-Jr");
//! ```
//!
//! # Parsing Rules
//!
//! - The input must contain exactly one `:`. A second `:` anywhere, even
//!   inside a query value, is rejected as an invalid scheme.
//! - The scheme must be exactly `bitcoin`.
//! - Query tokens without `=` are dropped. For tokens with several `=`, the
//!   value is the text between the first and the second one.
//! - Values are not percent-decoded; [`PaymentRequest::build`] does encode.
//! - A repeated key keeps its last value.
//!
//! # Errors
//!
//! Both directions report one of three [`ErrorKind`]s: `InvalidScheme`,
//! `InvalidAmount`, `NegativeAmount`.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod amount;
mod builder;
mod constants;
mod error;
pub mod prelude;
mod query;
mod uri;

pub use amount::Amount;
pub use builder::{Empty, PaymentRequestBuilder, Ready};
pub use constants::{
    AMOUNT_KEY, KEY_VALUE_SEPARATOR, LABEL_KEY, MESSAGE_KEY, PAIR_SEPARATOR, QUERY_SEPARATOR,
    SCHEME, SCHEME_SEPARATOR, WELL_KNOWN_KEYS,
};
pub use error::{AmountError, BuildError, ErrorKind, ParseError, ParseErrorKind};
pub use query::{QueryParams, encode_query, query_escape, split_key_value, split_pairs};
pub use uri::PaymentRequest;
