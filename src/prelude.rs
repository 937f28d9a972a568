//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use bip21_uri::prelude::*;
//!
//! let request = PaymentRequest::parse("bitcoin:ADDR1").unwrap();
//! assert_eq!(request.scheme, SCHEME);
//! ```
//!
//! Builder state markers (`Empty`, `Ready`) are intentionally excluded.

pub use crate::{
    // Core types
    Amount, PaymentRequest, QueryParams,
    // Builder
    PaymentRequestBuilder,
    // Errors
    AmountError, BuildError, ErrorKind, ParseError, ParseErrorKind,
    // Constants
    AMOUNT_KEY, LABEL_KEY, MESSAGE_KEY, SCHEME,
};
