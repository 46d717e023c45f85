use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{PlaceId, UserId};

/// A bookmarked place, unique per user and place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub user_id: UserId,
    pub place_id: PlaceId,
    pub created_at: NaiveDateTime,
}
