//! [`Artist`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

use super::contact::{Email, Phone};

/// Performing artist represented by the agency.
#[derive(Clone, Debug)]
pub struct Artist {
    /// ID of this [`Artist`].
    pub id: Id,

    /// [`Name`] of this [`Artist`].
    pub name: Name,

    /// [`Email`] of this [`Artist`].
    pub email: Email,

    /// [`Phone`] of this [`Artist`].
    pub phone: Phone,

    /// Musical [`Genre`] of this [`Artist`].
    pub genre: Genre,

    /// [`Bio`] of this [`Artist`].
    pub bio: Bio,

    /// [`ImageUrl`] of this [`Artist`], if any.
    pub image_url: Option<ImageUrl>,

    /// [`DateTime`] when this [`Artist`] was created.
    pub created_at: CreationDateTime,
}

define_id! {
    #[doc = "ID of an [`Artist`]."]
    Id
}

define_text! {
    #[doc = "Name of an [`Artist`]."]
    Name(2..=255)
}

define_text! {
    #[doc = "Musical genre of an [`Artist`]."]
    Genre(1..=64)
}

define_text! {
    #[doc = "Biography of an [`Artist`]."]
    Bio(10..=500)
}

/// URL of an [`Artist`]'s image.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        /// Regular expression checking [`ImageUrl`] to be an absolute HTTP(S)
        /// URL without whitespace.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("valid regex")
        });

        let url = url.as_ref();
        url.len() <= 2048 && REGEX.is_match(url)
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// [`DateTime`] when an [`Artist`] was created.
pub type CreationDateTime = DateTimeOf<(Artist, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Bio, ImageUrl, Name};

    #[test]
    fn name_bounds() {
        assert!(Name::new("DJ").is_some());
        assert!(Name::new("Nina Simone").is_some());

        assert!(Name::new("X").is_none());
        assert!(Name::new(" Nina").is_none());
        assert!(Name::new("a".repeat(256)).is_none());
    }

    #[test]
    fn bio_bounds() {
        assert!(Bio::new("Jazz pianist").is_some());
        assert!(Bio::new("a".repeat(500)).is_some());

        assert!(Bio::new("Too short").is_none());
        assert!(Bio::new("a".repeat(501)).is_none());
    }

    #[test]
    fn image_url() {
        assert!(ImageUrl::new("https://cdn.example.com/a.png").is_some());
        assert!(ImageUrl::new("http://example.com").is_some());

        assert!(ImageUrl::new("ftp://example.com/a.png").is_none());
        assert!(ImageUrl::new("https://").is_none());
        assert!(ImageUrl::new("https://exa mple.com").is_none());
    }
}
