//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use rust_decimal::Decimal;

use crate::define_kind;

/// Amount of money in some [`Currency`].
///
/// The amount never has more than two fractional digits (minor units).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Maximum number of minor unit digits of a [`Money`] amount.
    pub const MINOR_DIGITS: u32 = 2;

    /// Indicates whether this [`Money`] amount is at least one whole unit of
    /// its [`Currency`].
    #[must_use]
    pub fn is_at_least_one_unit(&self) -> bool {
        self.amount >= Decimal::ONE
    }

    /// Indicates whether this [`Money`] amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    /// Formats as `{major}[.{minor}]{currency}`, omitting a zero minor part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount.normalize();
        if amount.is_integer() {
            write!(f, "{}{}", amount.trunc(), self.currency)
        } else {
            write!(f, "{:.2}{}", amount, self.currency)
        }
    }
}

/// Error of parsing [`Money`] from a string.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// No three-letter currency code at the end.
    #[display("missing currency code")]
    NoCurrency,

    /// Unknown currency code.
    #[display("unknown currency code")]
    UnknownCurrency,

    /// Amount is not a decimal number.
    #[display("invalid amount")]
    InvalidAmount,

    /// Amount has more fractional digits than [`Money::MINOR_DIGITS`].
    #[display("amount has more than two fractional digits")]
    TooPrecise,
}

impl FromStr for Money {
    type Err = ParseError;

    /// Parses a `{major}[.{minor}]{currency}` string, e.g. `1500.50USD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .len()
            .checked_sub(3)
            .filter(|&at| s.is_char_boundary(at))
            .ok_or(ParseError::NoCurrency)?;
        let (amount, currency) = s.split_at(split);

        let currency = Currency::from_str(currency)
            .map_err(|_| ParseError::UnknownCurrency)?;
        if amount.is_empty() || amount.starts_with('+') {
            return Err(ParseError::InvalidAmount);
        }
        let amount = Decimal::from_str_exact(amount)
            .map_err(|_| ParseError::InvalidAmount)?;
        if amount.normalize().scale() > Self::MINOR_DIGITS {
            return Err(ParseError::TooPrecise);
        }

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,

        #[doc = "Canadian Dollar."]
        Cad = 4,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional one or two digits integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    s.parse().map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Currency, Money, ParseError};

    fn money(amount: &str, currency: Currency) -> Money {
        Money {
            amount: amount.parse::<Decimal>().unwrap(),
            currency,
        }
    }

    #[test]
    fn parses_amount_and_currency() {
        for (input, expected) in [
            ("1500USD", money("1500", Currency::Usd)),
            ("1500.5EUR", money("1500.5", Currency::Eur)),
            ("0.99GBP", money("0.99", Currency::Gbp)),
            ("250.00CAD", money("250", Currency::Cad)),
        ] {
            assert_eq!(input.parse::<Money>(), Ok(expected), "{input}");
        }
    }

    #[test]
    fn rejects_malformed() {
        for (input, err) in [
            ("", ParseError::NoCurrency),
            ("US", ParseError::NoCurrency),
            ("100usd", ParseError::UnknownCurrency),
            ("100JPY", ParseError::UnknownCurrency),
            ("USD", ParseError::InvalidAmount),
            ("+100USD", ParseError::InvalidAmount),
            ("1,000USD", ParseError::InvalidAmount),
            ("10.001USD", ParseError::TooPrecise),
        ] {
            assert_eq!(input.parse::<Money>(), Err(err), "{input}");
        }
    }

    #[test]
    fn formats_without_zero_minor_part() {
        assert_eq!(money("5000", Currency::Usd).to_string(), "5000USD");
        assert_eq!(money("5000.00", Currency::Usd).to_string(), "5000USD");
        assert_eq!(money("99.5", Currency::Eur).to_string(), "99.50EUR");
        assert_eq!(money("0.05", Currency::Gbp).to_string(), "0.05GBP");
    }

    #[test]
    fn unit_threshold() {
        assert!(money("5000", Currency::Usd).is_at_least_one_unit());
        assert!(money("1", Currency::Usd).is_at_least_one_unit());
        assert!(!money("0.99", Currency::Usd).is_at_least_one_unit());

        assert!(money("-0.01", Currency::Usd).is_negative());
        assert!(!money("0", Currency::Usd).is_negative());
        assert!(!money("-0", Currency::Usd).is_negative());
    }
}
