use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::review::NewReview;
use crate::domain::types::{
    PhotoUrl, PlaceId, Rating, ReviewComment, TypeConstraintError, UserId, optional_text,
};

#[derive(Deserialize, Validate)]
pub struct AddReviewForm {
    #[validate(required(message = "rating is required"), range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
    /// Public URLs returned by the upload endpoint, in display order.
    #[serde(default)]
    #[validate(length(max = 10))]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddReviewFormPayload {
    pub rating: Rating,
    pub comment: Option<ReviewComment>,
    pub photos: Vec<PhotoUrl>,
}

impl AddReviewFormPayload {
    pub fn into_new_review(self, place_id: PlaceId, user_id: UserId) -> NewReview {
        NewReview {
            place_id,
            user_id,
            rating: self.rating,
            comment: self.comment,
            photos: self.photos,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddReviewFormError {
    #[error("Review form validation failed: {0}")]
    Validation(String),
    #[error("Review form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Please select a rating")]
    MissingRating,
}

impl From<ValidationErrors> for AddReviewFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddReviewFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddReviewForm> for AddReviewFormPayload {
    type Error = AddReviewFormError;

    fn try_from(value: AddReviewForm) -> Result<Self, Self::Error> {
        let rating = value.rating.ok_or(AddReviewFormError::MissingRating)?;
        value.validate()?;

        let photos = value
            .photos
            .into_iter()
            .map(PhotoUrl::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rating: Rating::new(rating)?,
            comment: optional_text(value.comment, ReviewComment::new)?,
            photos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(rating: Option<i32>, comment: Option<&str>, photos: Vec<&str>) -> AddReviewForm {
        AddReviewForm {
            rating,
            comment: comment.map(str::to_string),
            photos: photos.into_iter().map(str::to_string).collect(),
        }
    }

    #[test]
    fn missing_rating_is_rejected() {
        let err = AddReviewFormPayload::try_from(form(None, Some("nice"), vec![])).unwrap_err();
        assert!(matches!(err, AddReviewFormError::MissingRating));
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let err = AddReviewFormPayload::try_from(form(Some(6), None, vec![])).unwrap_err();
        assert!(matches!(err, AddReviewFormError::Validation(_)));
    }

    #[test]
    fn blank_comment_is_dropped_and_photos_keep_order() {
        let payload = AddReviewFormPayload::try_from(form(
            Some(4),
            Some("   "),
            vec!["https://cdn.example.com/b.jpg", "https://cdn.example.com/a.jpg"],
        ))
        .unwrap();

        assert_eq!(payload.rating.get(), 4);
        assert!(payload.comment.is_none());
        assert_eq!(payload.photos[0].as_str(), "https://cdn.example.com/b.jpg");
        assert_eq!(payload.photos[1].as_str(), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn invalid_photo_url_is_rejected() {
        let err =
            AddReviewFormPayload::try_from(form(Some(3), None, vec!["not a url"])).unwrap_err();
        assert!(matches!(err, AddReviewFormError::TypeConstraint(_)));
    }
}
