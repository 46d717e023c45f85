//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, slugs, coordinates and ratings are checked once at the
//! boundary and trusted everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A numeric value fell outside its allowed range.
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Slug contained whitespace or path separators.
    #[error("{0} must not contain whitespace or '/'")]
    InvalidSlug(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Shared accessors and conversions for string-backed newtypes.
macro_rules! string_wrapper_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

/// Positive `i32` identifiers as assigned by the database.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }
        }

        string_wrapper_impls!($name);
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }
        }

        string_wrapper_impls!($name);
    };
}

/// Finite `f64` constrained to an inclusive range.
macro_rules! bounded_f64_newtype {
    ($name:ident, $doc:expr, $field:expr, $min:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Constructs a finite value within the allowed range.
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && ($min..=$max).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::OutOfRange($field))
                }
            }

            /// Returns the raw `f64` value.
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(
    CategoryId,
    "Unique identifier for a category node.",
    "category_id"
);
id_newtype!(PlaceId, "Unique identifier for a place.", "place_id");
id_newtype!(ReviewId, "Unique identifier for a review.", "review_id");
id_newtype!(
    MenuItemId,
    "Unique identifier for a menu item.",
    "menu_item_id"
);

non_empty_string_newtype!(
    UserId,
    "Subject identifier issued by the auth provider.",
    "user_id"
);
non_empty_string_newtype!(CategoryName, "Category display name.", "category name");
non_empty_string_newtype!(PlaceName, "Place display name.", "place name");
non_empty_string_newtype!(Description, "Free-form description text.", "description");
non_empty_string_newtype!(Address, "Street address of a place.", "address");
non_empty_string_newtype!(Phone, "Contact phone number.", "phone");
non_empty_string_newtype!(OpeningHours, "Opening hours as entered by admins.", "opening hours");
non_empty_string_newtype!(ReviewComment, "Review comment text.", "comment");
non_empty_string_newtype!(MenuItemName, "Menu item name.", "menu item name");
non_empty_string_newtype!(MenuSection, "Menu section label.", "menu section");
non_empty_string_newtype!(DisplayName, "Public display name of a user.", "display name");

url_string_newtype!(ImageUrl, "Cover image URL.", "image url");
url_string_newtype!(PhotoUrl, "Review photo URL.", "photo url");
url_string_newtype!(SocialUrl, "Social network profile URL.", "social url");

bounded_f64_newtype!(Latitude, "Latitude in decimal degrees.", "latitude", -90.0, 90.0);
bounded_f64_newtype!(
    Longitude,
    "Longitude in decimal degrees.",
    "longitude",
    -180.0,
    180.0
);
bounded_f64_newtype!(
    MenuPrice,
    "Menu price in local currency units.",
    "price",
    0.0,
    f64::MAX
);

/// URL-safe identifier used for routing to categories and places.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Accepts a trimmed, non-empty value without whitespace or `/`.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "slug")?;
        if trimmed.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(TypeConstraintError::InvalidSlug("slug"));
        }
        Ok(Self(trimmed))
    }

    /// Derives a slug from a display name: lowercased, whitespace runs become `-`.
    pub fn from_name(name: &str) -> Result<Self, TypeConstraintError> {
        let slug = name
            .split_whitespace()
            .map(|part| part.replace('/', "-").to_lowercase())
            .collect::<Vec<_>>()
            .join("-");
        Self::new(slug)
    }

    /// Appends `-<suffix>` where the suffix is derived from a name.
    pub fn child(&self, name: &str) -> Result<Self, TypeConstraintError> {
        let suffix = Self::from_name(name)?;
        Self::new(format!("{}-{}", self.0, suffix.0))
    }
}

string_wrapper_impls!(Slug);

/// Star rating in the inclusive range 1..=5.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Rating(i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange("rating"))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Number of visible places attached to a category.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlaceCount(i32);

impl PlaceCount {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("place count"))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<usize> for PlaceCount {
    fn from(value: usize) -> Self {
        Self(i32::try_from(value).unwrap_or(i32::MAX))
    }
}

impl PartialEq<i32> for PlaceCount {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Parses an optional free-text field, treating blank input as absent.
pub fn optional_text<T, F>(value: Option<String>, build: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value {
        Some(value) if !value.trim().is_empty() => build(value).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_names() {
        let value = PlaceName::new("  Kebab House  ").unwrap();
        assert_eq!(value.as_str(), "Kebab House");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = PlaceId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("place_id"));
    }

    #[test]
    fn validates_urls() {
        assert!(ImageUrl::new("https://example.com/a.jpg").is_ok());
        let err = PhotoUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("photo url"));
    }

    #[test]
    fn derives_slug_from_name() {
        let slug = Slug::from_name("  Mobile   Shops ").unwrap();
        assert_eq!(slug.as_str(), "mobile-shops");
        let child = Slug::new("erbil-center").unwrap().child("Candy Shop").unwrap();
        assert_eq!(child.as_str(), "erbil-center-candy-shop");
    }

    #[test]
    fn rejects_slug_with_spaces() {
        assert_eq!(
            Slug::new("two words").unwrap_err(),
            TypeConstraintError::InvalidSlug("slug")
        );
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(
            Rating::new(0).unwrap_err(),
            TypeConstraintError::OutOfRange("rating")
        );
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(Latitude::new(36.19).is_ok());
        assert!(Latitude::new(90.5).is_err());
        assert!(Longitude::new(-180.0).is_ok());
        assert!(Longitude::new(f64::NAN).is_err());
    }

    #[test]
    fn blank_optional_text_is_absent() {
        let value = optional_text(Some("   ".to_string()), Description::new).unwrap();
        assert!(value.is_none());
        let value = optional_text(Some(" Nice ".to_string()), Description::new).unwrap();
        assert_eq!(value.unwrap().as_str(), "Nice");
    }
}
