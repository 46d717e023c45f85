use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};
use crate::domain::types::{
    DisplayName, PhotoUrl, PlaceName, Rating, ReviewComment, TypeConstraintError, UserId,
};

/// Diesel model representing the `reviews` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub place_id: i32,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview {
    pub place_id: i32,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Diesel model representing the `review_photos` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Review))]
#[diesel(table_name = crate::schema::review_photos)]
pub struct ReviewPhoto {
    pub id: i32,
    pub review_id: i32,
    pub photo_url: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::review_photos)]
pub struct NewReviewPhoto {
    pub review_id: i32,
    pub photo_url: String,
}

impl From<&DomainNewReview> for NewReview {
    fn from(review: &DomainNewReview) -> Self {
        Self {
            place_id: review.place_id.get(),
            user_id: review.user_id.as_str().to_string(),
            rating: review.rating.get(),
            comment: review.comment.as_ref().map(|c| c.as_str().to_string()),
        }
    }
}

impl Review {
    /// Assembles the domain review from its row, photos and joined names.
    pub fn into_domain(
        self,
        photos: Vec<ReviewPhoto>,
        author: Option<String>,
        place_name: Option<String>,
    ) -> Result<DomainReview, TypeConstraintError> {
        Ok(DomainReview {
            id: self.id.try_into()?,
            place_id: self.place_id.try_into()?,
            user_id: UserId::new(self.user_id)?,
            rating: Rating::new(self.rating)?,
            comment: self.comment.map(ReviewComment::new).transpose()?,
            created_at: self.created_at,
            photos: photos
                .into_iter()
                .map(|p| PhotoUrl::new(p.photo_url))
                .collect::<Result<_, _>>()?,
            author: author.map(DisplayName::new).transpose()?,
            place_name: place_name.map(PlaceName::new).transpose()?,
        })
    }
}
