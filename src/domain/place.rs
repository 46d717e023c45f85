use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinate;
use crate::domain::types::{
    Address, CategoryId, Description, ImageUrl, OpeningHours, Phone, PlaceId, PlaceName, Slug,
    SocialUrl,
};

/// A point of interest listed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: PlaceName,
    pub slug: Slug,
    pub description: Option<Description>,
    pub image_url: Option<ImageUrl>,
    pub address: Option<Address>,
    pub phone: Option<Phone>,
    pub opening_hours: Option<OpeningHours>,
    pub coordinate: Option<Coordinate>,
    pub category_id: Option<CategoryId>,
    pub is_visible: bool,
    pub tiktok_url: Option<SocialUrl>,
    pub facebook_url: Option<SocialUrl>,
    pub instagram_url: Option<SocialUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Place {
    /// Case-insensitive match against name, description and address.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let contains = |value: &str| value.to_lowercase().contains(&needle);
        contains(&self.name)
            || self.description.as_deref().is_some_and(contains)
            || self.address.as_deref().is_some_and(contains)
    }
}

/// Information required to create or overwrite a [`Place`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPlace {
    pub name: PlaceName,
    pub slug: Slug,
    pub description: Option<Description>,
    pub image_url: Option<ImageUrl>,
    pub address: Option<Address>,
    pub phone: Option<Phone>,
    pub opening_hours: Option<OpeningHours>,
    pub coordinate: Option<Coordinate>,
    pub category_id: Option<CategoryId>,
    pub is_visible: bool,
    pub tiktok_url: Option<SocialUrl>,
    pub facebook_url: Option<SocialUrl>,
    pub instagram_url: Option<SocialUrl>,
}

/// Review aggregate computed at read time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RatingSummary {
    /// Mean rating, `0.0` when there are no reviews.
    pub avg_rating: f64,
    pub review_count: usize,
}

impl RatingSummary {
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0i64, 0usize), |(sum, count), r| (sum + i64::from(r), count + 1));
        let avg_rating = if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        };
        Self {
            avg_rating,
            review_count: count,
        }
    }
}

/// A place enriched with its rating aggregate and, once ranked, its distance.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceSummary {
    #[serde(flatten)]
    pub place: Place,
    #[serde(flatten)]
    pub rating: RatingSummary,
    /// Kilometres from the ranking origin; `None` when unknown.
    pub distance_km: Option<f64>,
}

impl PlaceSummary {
    pub fn new(place: Place, rating: RatingSummary) -> Self {
        Self {
            place,
            rating,
            distance_km: None,
        }
    }
}
