use serde::Serialize;

use crate::domain::types::{PlaceId, ReviewId};
use crate::forms::reviews::AddReviewFormPayload;
use crate::repository::{PlaceReader, ReviewWriter};
use crate::session::SessionContext;

use super::{ServiceError, ServiceResult};

/// Result of posting a review.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReviewPosted {
    pub review_id: ReviewId,
    /// Set when the review was saved but its photos could not be linked.
    pub warning: Option<String>,
}

/// Saves a review for a visible place, then links its photos in order.
pub fn add_review<R>(
    place_id: PlaceId,
    payload: AddReviewFormPayload,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<ReviewPosted>
where
    R: PlaceReader + ReviewWriter,
{
    match repo.get_place_by_id(place_id) {
        Ok(Some(place)) if place.is_visible => {}
        Ok(_) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get place {place_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let review = payload.into_new_review(place_id, session.user_id.clone());

    let review_id = repo.create_review(&review).map_err(|e| {
        log::error!("Failed to create review: {e}");
        ServiceError::Internal
    })?;

    let warning = match repo.add_review_photos(review_id, &review.photos) {
        Ok(_) => None,
        Err(e) => {
            log::warn!("Review {review_id} saved without photos: {e}");
            Some("Review saved, but photos could not be attached.".to_string())
        }
    };

    Ok(ReviewPosted { review_id, warning })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PhotoUrl, Rating, UserId};
    use crate::repository::test::{TestRepository, sample_place};
    use crate::session::{AuthenticatedUser, SessionContext};

    fn session() -> SessionContext {
        let user = AuthenticatedUser {
            user_id: UserId::new("u1").unwrap(),
            email: None,
            expires_at: i64::MAX,
        };
        SessionContext::new(&user, None)
    }

    fn payload() -> AddReviewFormPayload {
        AddReviewFormPayload {
            rating: Rating::new(5).unwrap(),
            comment: None,
            photos: vec![
                PhotoUrl::new("https://cdn.example.com/1.jpg").unwrap(),
                PhotoUrl::new("https://cdn.example.com/2.jpg").unwrap(),
            ],
        }
    }

    fn repo() -> TestRepository {
        let mut hidden = sample_place(2, "Hidden", None, None);
        hidden.is_visible = false;
        TestRepository::new().with_places(vec![sample_place(1, "Kebab", None, None), hidden])
    }

    #[test]
    fn stores_review_with_ordered_photos() {
        let repo = repo();

        let posted = add_review(PlaceId::new(1).unwrap(), payload(), &session(), &repo).unwrap();

        assert!(posted.warning.is_none());
        let reviews = repo.reviews();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, posted.review_id);
        assert_eq!(reviews[0].user_id, "u1");
        assert_eq!(reviews[0].photos[0].as_str(), "https://cdn.example.com/1.jpg");
        assert_eq!(reviews[0].photos[1].as_str(), "https://cdn.example.com/2.jpg");
    }

    #[test]
    fn photo_failure_is_a_warning() {
        let repo = repo().failing_on("add_review_photos");

        let posted = add_review(PlaceId::new(1).unwrap(), payload(), &session(), &repo).unwrap();

        assert!(posted.warning.is_some());
        assert_eq!(repo.reviews().len(), 1);
        assert!(repo.reviews()[0].photos.is_empty());
    }

    #[test]
    fn hidden_or_missing_place_is_not_found() {
        let repo = repo();
        for id in [2, 99] {
            assert_eq!(
                add_review(PlaceId::new(id).unwrap(), payload(), &session(), &repo).unwrap_err(),
                ServiceError::NotFound
            );
        }
        assert!(repo.reviews().is_empty());
    }

    #[test]
    fn create_failure_is_internal() {
        let repo = repo().failing_on("create_review");
        assert_eq!(
            add_review(PlaceId::new(1).unwrap(), payload(), &session(), &repo).unwrap_err(),
            ServiceError::Internal
        );
    }
}
