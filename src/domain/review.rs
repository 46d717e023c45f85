use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    DisplayName, PhotoUrl, PlaceId, PlaceName, Rating, ReviewComment, ReviewId, UserId,
};

/// A user's rating of a place, with optional comment and photos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub place_id: PlaceId,
    pub user_id: UserId,
    pub rating: Rating,
    pub comment: Option<ReviewComment>,
    pub created_at: NaiveDateTime,
    /// Photo URLs in upload order.
    pub photos: Vec<PhotoUrl>,
    /// Author's public name, when a profile exists.
    pub author: Option<DisplayName>,
    /// Name of the reviewed place, filled in for listings outside a place page.
    pub place_name: Option<PlaceName>,
}

/// Data required to insert a [`Review`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub place_id: PlaceId,
    pub user_id: UserId,
    pub rating: Rating,
    pub comment: Option<ReviewComment>,
    pub photos: Vec<PhotoUrl>,
}
