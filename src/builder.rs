//! Typestate builder for constructing [`PaymentRequest`] instances.
//!
//! The builder uses a phantom type so that `build()` is only reachable once
//! an address has been supplied. Amounts are validated as they are set.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use tracing::debug;

use crate::amount::Amount;
use crate::constants::WELL_KNOWN_KEYS;
use crate::error::{AmountError, BuildError};
use crate::uri::PaymentRequest;

/// Marker: No address set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: Address is set, ready to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// A typestate builder for [`PaymentRequest`].
///
/// Optional fields (amount, label, message, extensions) can be set in any
/// state; `build()` becomes available after `address()`.
///
/// # Examples
///
/// ```
/// use bip21_uri::PaymentRequestBuilder;
///
/// let uri = PaymentRequestBuilder::new()
///     .address("175tWpb8K1S7NmH4Zx6rewF9WQrcZv245W")
///     .try_amount(50.0)?
///     .label("Luke-Jr")
///     .into_uri()?;
///
/// assert_eq!(uri, "bitcoin:175tWpb8K1S7NmH4Zx6rewF9WQrcZv245W?amount=50&label=Luke-Jr");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// ```compile_fail
/// use bip21_uri::PaymentRequestBuilder;
///
/// // Error: cannot call build() before address()
/// let request = PaymentRequestBuilder::new().label("Luke-Jr").build();
/// ```
#[derive(Debug, Clone)]
pub struct PaymentRequestBuilder<State = Empty> {
    address: String,
    amount: Amount,
    label: String,
    message: String,
    extensions: BTreeMap<String, String>,
    _state: PhantomData<State>,
}

impl PaymentRequestBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            address: String::new(),
            amount: Amount::ZERO,
            label: String::new(),
            message: String::new(),
            extensions: BTreeMap::new(),
            _state: PhantomData,
        }
    }

    /// Sets the payment address and advances to the [`Ready`] state.
    ///
    /// The address is not validated.
    #[must_use]
    pub fn address(self, address: impl Into<String>) -> PaymentRequestBuilder<Ready> {
        PaymentRequestBuilder {
            address: address.into(),
            amount: self.amount,
            label: self.label,
            message: self.message,
            extensions: self.extensions,
            _state: PhantomData,
        }
    }
}

impl Default for PaymentRequestBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentRequestBuilder<Ready> {
    /// Builds the final [`PaymentRequest`].
    #[must_use]
    pub fn build(self) -> PaymentRequest {
        let mut request = PaymentRequest::new(self.address);
        request.amount = self.amount.value();
        request.label = self.label;
        request.message = self.message;
        request.extensions = self.extensions;
        request
    }

    /// Builds the request and serializes it straight to a URI string.
    ///
    /// # Errors
    ///
    /// Returns `BuildError` if the request cannot be serialized. With the
    /// scheme fixed and the amount pre-validated this does not happen in
    /// practice.
    pub fn into_uri(self) -> Result<String, BuildError> {
        self.build().build()
    }
}

/// Methods available in every state for optional fields.
impl<State> PaymentRequestBuilder<State> {
    /// Sets the requested amount. Zero clears it.
    #[must_use]
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    /// Validates and sets the requested amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] if the amount is negative or not finite.
    ///
    /// ```
    /// use bip21_uri::{ErrorKind, PaymentRequestBuilder};
    ///
    /// let err = PaymentRequestBuilder::new().try_amount(-1.0).unwrap_err();
    /// assert_eq!(err.error_kind(), ErrorKind::NegativeAmount);
    /// ```
    pub fn try_amount(self, amount: f64) -> Result<Self, AmountError> {
        Ok(self.amount(Amount::new(amount)?))
    }

    /// Sets the recipient label. An empty label is omitted from the URI.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the payment message. An empty message is omitted from the URI.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds an extension parameter, lowercasing its key.
    ///
    /// Keys naming `amount`, `label` or `message` are ignored; use the
    /// dedicated setters for those. If a key is added twice, the last value
    /// wins.
    #[must_use]
    pub fn extension(mut self, key: &str, value: impl Into<String>) -> Self {
        let key = key.to_lowercase();
        if WELL_KNOWN_KEYS.contains(&key.as_str()) {
            debug!(key = %key, "ignoring well-known key passed as extension");
            return self;
        }
        self.extensions.insert(key, value.into());
        self
    }
}
