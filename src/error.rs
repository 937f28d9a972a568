//! Error types for payment URI parsing and building.

use std::fmt;

use crate::constants::SCHEME;

/// Comparable error categories shared by parsing and building.
///
/// Every [`ParseError`] and [`BuildError`] maps onto exactly one kind, so
/// callers can match on the category without caring which direction failed.
///
/// ```
/// use bip21_uri::{ErrorKind, PaymentRequest};
///
/// let err = PaymentRequest::parse("bitcoin:addr?amount=-1").unwrap_err();
/// assert_eq!(err.error_kind(), ErrorKind::NegativeAmount);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Scheme missing, unsupported, or not exactly one scheme separator
    InvalidScheme,
    /// Amount is not a finite decimal number
    InvalidAmount,
    /// Amount is below zero
    NegativeAmount,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScheme => write!(f, "invalid scheme"),
            Self::InvalidAmount => write!(f, "invalid amount"),
            Self::NegativeAmount => write!(f, "amount can not be negative"),
        }
    }
}

/// Errors that can occur when parsing a payment URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn error_kind(&self) -> ErrorKind {
        self.kind.error_kind()
    }
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Missing or unsupported scheme, or the input does not split into
    /// exactly two parts around ':'
    InvalidScheme {
        /// The text before the first ':', if any
        found: Option<String>,
    },
    /// The amount parameter is not a finite decimal number
    InvalidAmount {
        /// The raw amount value
        value: String,
    },
    /// The amount parameter is negative
    NegativeAmount {
        /// The raw amount value
        value: String,
    },
}

impl ParseErrorKind {
    /// Returns the category of this error.
    #[must_use]
    pub const fn error_kind(&self) -> ErrorKind {
        match self {
            Self::InvalidScheme { .. } => ErrorKind::InvalidScheme,
            Self::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            Self::NegativeAmount { .. } => ErrorKind::NegativeAmount,
        }
    }
}

impl From<AmountError> for ParseErrorKind {
    fn from(e: AmountError) -> Self {
        match e {
            AmountError::Invalid { value } => Self::InvalidAmount { value },
            AmountError::Negative { value } => Self::NegativeAmount { value },
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse payment URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::InvalidScheme { found } => match found {
                Some(s) if s == SCHEME => {
                    write!(f, "expected exactly one ':' separating scheme from address")
                }
                Some(s) => write!(f, "expected scheme '{SCHEME}', found '{s}'"),
                None => write!(f, "missing scheme; URI must start with '{SCHEME}:'"),
            },
            ParseErrorKind::InvalidAmount { value } => {
                write!(f, "invalid amount '{value}'; expected a decimal number")
            }
            ParseErrorKind::NegativeAmount { value } => {
                write!(f, "amount '{value}' can not be negative")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur when building a payment URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The record's scheme is not the supported scheme
    InvalidScheme {
        /// The scheme that was found
        found: String,
    },
    /// The amount is not a finite number
    InvalidAmount {
        /// The offending amount, formatted
        value: String,
    },
    /// The amount is negative
    NegativeAmount {
        /// The offending amount, formatted
        value: String,
    },
}

impl BuildError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn error_kind(&self) -> ErrorKind {
        match self {
            Self::InvalidScheme { .. } => ErrorKind::InvalidScheme,
            Self::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            Self::NegativeAmount { .. } => ErrorKind::NegativeAmount,
        }
    }
}

impl From<AmountError> for BuildError {
    fn from(e: AmountError) -> Self {
        match e {
            AmountError::Invalid { value } => Self::InvalidAmount { value },
            AmountError::Negative { value } => Self::NegativeAmount { value },
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to build payment URI: ")?;
        match self {
            Self::InvalidScheme { found } => {
                write!(f, "expected scheme '{SCHEME}', found '{found}'")
            }
            Self::InvalidAmount { value } => {
                write!(f, "amount {value} is not a finite number")
            }
            Self::NegativeAmount { value } => {
                write!(f, "amount {value} can not be negative")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Errors for amount validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Not a finite decimal number
    Invalid {
        /// The invalid value
        value: String,
    },
    /// Below zero
    Negative {
        /// The negative value
        value: String,
    },
}

impl AmountError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn error_kind(&self) -> ErrorKind {
        match self {
            Self::Invalid { .. } => ErrorKind::InvalidAmount,
            Self::Negative { .. } => ErrorKind::NegativeAmount,
        }
    }
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { value } => {
                write!(f, "invalid amount '{value}'; expected a decimal number")
            }
            Self::Negative { value } => write!(f, "amount '{value}' can not be negative"),
        }
    }
}

impl std::error::Error for AmountError {}
