//! Requested payment amount.

use std::fmt;
use std::str::FromStr;

use crate::error::AmountError;

/// A validated payment amount: finite and not negative.
///
/// Zero means "no amount requested" and is never written into a URI.
/// Formatting yields the shortest decimal string that parses back to the
/// same value, without exponent notation or trailing zeros.
///
/// # Examples
///
/// ```
/// use bip21_uri::Amount;
///
/// let amount = Amount::parse("20.30").unwrap();
/// assert_eq!(amount.to_string(), "20.3");
///
/// let whole = Amount::new(50.0).unwrap();
/// assert_eq!(whole.to_string(), "50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    /// The unset amount.
    pub const ZERO: Self = Self(0.0);

    /// Validates a raw numeric amount.
    ///
    /// # Errors
    ///
    /// Returns `AmountError::Negative` for values below zero (including
    /// negative infinity) and `AmountError::Invalid` for `NaN` and positive
    /// infinity.
    pub fn new(value: f64) -> Result<Self, AmountError> {
        Self::validate(value, || value.to_string())
    }

    /// Parses an amount from its decimal text form.
    ///
    /// # Errors
    ///
    /// Returns `AmountError::Invalid` if the text is not a finite number and
    /// `AmountError::Negative` if it is below zero.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let value: f64 = input.parse().map_err(|_| AmountError::Invalid {
            value: input.to_string(),
        })?;
        Self::validate(value, || input.to_string())
    }

    /// Returns the amount as a float.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns true for the unset amount.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    fn validate(value: f64, raw: impl FnOnce() -> String) -> Result<Self, AmountError> {
        if value.is_nan() {
            return Err(AmountError::Invalid { value: raw() });
        }
        if value < 0.0 {
            return Err(AmountError::Negative { value: raw() });
        }
        if value.is_infinite() {
            return Err(AmountError::Invalid { value: raw() });
        }
        // Collapse -0.0 so it never formats as "-0".
        Ok(Self(value + 0.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Amount {
    type Error = AmountError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal() {
        assert_eq!(Amount::parse("20.3").unwrap().value(), 20.3);
        assert_eq!(Amount::parse("50").unwrap().value(), 50.0);
        assert_eq!(Amount::parse("0.00000001").unwrap().value(), 0.000_000_01);
    }

    #[test]
    fn parse_empty_fails() {
        assert!(matches!(Amount::parse(""), Err(AmountError::Invalid { .. })));
    }

    #[test]
    fn parse_non_numeric_fails() {
        assert_eq!(
            Amount::parse("hoge"),
            Err(AmountError::Invalid {
                value: "hoge".to_string()
            })
        );
    }

    #[test]
    fn parse_negative_fails() {
        assert_eq!(
            Amount::parse("-1"),
            Err(AmountError::Negative {
                value: "-1".to_string()
            })
        );
    }

    #[test]
    fn non_finite_is_invalid() {
        assert!(matches!(Amount::parse("NaN"), Err(AmountError::Invalid { .. })));
        assert!(matches!(Amount::parse("inf"), Err(AmountError::Invalid { .. })));
        assert!(matches!(Amount::new(f64::NAN), Err(AmountError::Invalid { .. })));
        assert!(matches!(
            Amount::new(f64::NEG_INFINITY),
            Err(AmountError::Negative { .. })
        ));
    }

    #[test]
    fn negative_zero_is_zero() {
        let amount = Amount::parse("-0").unwrap();
        assert!(amount.is_zero());
        assert_eq!(amount.to_string(), "0");
    }

    #[test]
    fn display_is_shortest_roundtrip() {
        assert_eq!(Amount::new(20.3).unwrap().to_string(), "20.3");
        assert_eq!(Amount::new(50.0).unwrap().to_string(), "50");
        assert_eq!(Amount::new(0.1).unwrap().to_string(), "0.1");
        assert_eq!(Amount::new(0.000_000_01).unwrap().to_string(), "0.00000001");
        assert_eq!(Amount::new(1e21).unwrap().to_string(), "1000000000000000000000");
    }

    #[test]
    fn exponent_input_is_accepted() {
        assert_eq!(Amount::parse("1e3").unwrap().to_string(), "1000");
    }

    #[test]
    fn zero_is_default() {
        assert!(Amount::default().is_zero());
        assert_eq!(Amount::default(), Amount::ZERO);
    }
}
