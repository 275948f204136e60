//! Contact information shared by [`Artist`]s and [`Promoter`]s.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

#[cfg(doc)]
use crate::domain::{Artist, Promoter};

/// Email address.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format:
        /// - exactly one `@` separating non-empty local and domain parts;
        /// - domain part containing at least one `.`;
        /// - no whitespace anywhere.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 320 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: digits optionally
        /// separated by spaces, dashes or parentheses, with an optional
        /// leading `+`.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[\d(][\d\s()-]*\d$").expect("valid regex")
        });

        let number = number.as_ref();
        (10..=32).contains(&number.len())
            && number.chars().filter(char::is_ascii_digit).count() >= 10
            && REGEX.is_match(number)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Phone};

    #[test]
    fn email() {
        assert!(Email::new("booking@agency.com").is_some());
        assert!(Email::new("first.last+tag@mail.example.org").is_some());

        assert!(Email::new("").is_none());
        assert!(Email::new("agency.com").is_none());
        assert!(Email::new("booking@agency").is_none());
        assert!(Email::new("booking@@agency.com").is_none());
        assert!(Email::new("book ing@agency.com").is_none());
        assert!(Email::new(" booking@agency.com").is_none());
    }

    #[test]
    fn phone() {
        assert!(Phone::new("5551234567").is_some());
        assert!(Phone::new("+1 (555) 123-4567").is_some());
        assert!(Phone::new("+44 20 7946 0958").is_some());

        assert!(Phone::new("555-1234").is_none());
        assert!(Phone::new("call me maybe").is_none());
        assert!(Phone::new("+1 555 123 456a").is_none());
        assert!(Phone::new("5551234567 ").is_none());
    }
}
