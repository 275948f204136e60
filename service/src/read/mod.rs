//! Read models derived from the [`Store`] contents.
//!
//! [`Store`]: crate::Store

pub mod booking;
pub mod invoice;

/// Case-insensitive substring search.
#[derive(Clone, Debug)]
struct Needle(String);

impl Needle {
    /// Creates a new [`Needle`] out of the provided search `text`.
    fn new(text: &str) -> Self {
        Self(text.to_lowercase())
    }

    /// Indicates whether the provided `haystack` contains this [`Needle`]
    /// ignoring the letter case.
    fn is_in(&self, haystack: impl AsRef<str>) -> bool {
        haystack.as_ref().to_lowercase().contains(&self.0)
    }
}

#[cfg(test)]
mod spec {
    use super::Needle;

    #[test]
    fn needle_ignores_case() {
        let needle = Needle::new("JaZz");

        assert!(needle.is_in("Blue Jazz Club"));
        assert!(needle.is_in("JAZZ"));
        assert!(!needle.is_in("Blues"));
        assert!(Needle::new("").is_in("anything"));
    }
}
