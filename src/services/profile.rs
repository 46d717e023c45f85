use serde::Serialize;

use crate::domain::review::Review;
use crate::repository::{FavoriteReader, ReviewListQuery, ReviewReader};
use crate::session::SessionContext;

use super::{ServiceError, ServiceResult};

const RECENT_REVIEWS: usize = 3;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfilePage {
    pub user: SessionContext,
    pub review_count: usize,
    pub favorite_count: usize,
    pub recent_reviews: Vec<Review>,
}

/// Activity summary of the signed-in user.
pub fn show_profile<R>(session: &SessionContext, repo: &R) -> ServiceResult<ProfilePage>
where
    R: ReviewReader + FavoriteReader,
{
    let query = ReviewListQuery::default()
        .user(session.user_id.clone())
        .paginate(1, RECENT_REVIEWS);

    let (review_count, recent_reviews) = repo.list_reviews(query).map_err(|e| {
        log::error!("Failed to list reviews of {}: {e}", session.user_id);
        ServiceError::Internal
    })?;

    let favorite_count = match repo.list_favorites(&session.user_id) {
        Ok(favorites) => favorites.len(),
        Err(e) => {
            log::error!("Failed to list favorites of {}: {e}", session.user_id);
            0
        }
    };

    Ok(ProfilePage {
        user: session.clone(),
        review_count,
        favorite_count,
        recent_reviews,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UserId;
    use crate::repository::test::{TestRepository, sample_profile, sample_review};
    use crate::session::AuthenticatedUser;

    #[test]
    fn counts_and_three_recent_reviews() {
        let repo = TestRepository::new().with_reviews(vec![
            sample_review(1, 1, "u1", 4),
            sample_review(2, 2, "u1", 5),
            sample_review(3, 3, "u2", 3),
            sample_review(4, 3, "u1", 2),
            sample_review(5, 4, "u1", 1),
        ]);
        let user = AuthenticatedUser {
            user_id: UserId::new("u1").unwrap(),
            email: None,
            expires_at: i64::MAX,
        };
        let session = SessionContext::new(&user, Some(sample_profile("u1", false)));

        let page = show_profile(&session, &repo).unwrap();

        assert_eq!(page.review_count, 4);
        assert_eq!(page.favorite_count, 0);
        let ids: Vec<i32> = page.recent_reviews.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![5, 4, 2]);
        assert_eq!(page.user.display_name.unwrap().as_str(), "u1");
    }
}
