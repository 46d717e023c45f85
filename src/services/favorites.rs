use std::collections::HashMap;

use crate::domain::place::PlaceSummary;
use crate::domain::types::PlaceId;
use crate::repository::{FavoriteReader, FavoriteWriter, PlaceListQuery, PlaceReader, ReviewReader};
use crate::services::catalog::summarize_places;
use crate::session::SessionContext;

use super::{ServiceError, ServiceResult};

/// Flips the favorite flag and returns the new state.
pub fn toggle_favorite<R>(
    place_id: PlaceId,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<bool>
where
    R: PlaceReader + FavoriteReader + FavoriteWriter,
{
    match repo.get_place_by_id(place_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get place {place_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let is_favorite = repo
        .is_favorite(&session.user_id, place_id)
        .map_err(|e| {
            log::error!("Failed to check favorite: {e}");
            ServiceError::Internal
        })?;

    let result = if is_favorite {
        repo.remove_favorite(&session.user_id, place_id)
    } else {
        repo.add_favorite(&session.user_id, place_id)
    };

    match result {
        Ok(_) => Ok(!is_favorite),
        Err(e) => {
            log::error!("Failed to toggle favorite: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The user's favorite places, most recently added first, hidden ones skipped.
pub fn list_favorites<R>(session: &SessionContext, repo: &R) -> ServiceResult<Vec<PlaceSummary>>
where
    R: FavoriteReader + PlaceReader + ReviewReader,
{
    let favorites = repo.list_favorites(&session.user_id).map_err(|e| {
        log::error!("Failed to list favorites: {e}");
        ServiceError::Internal
    })?;

    let (_total, places) = repo.list_places(PlaceListQuery::visible()).map_err(|e| {
        log::error!("Failed to list places: {e}");
        ServiceError::Internal
    })?;
    let mut by_id: HashMap<PlaceId, _> = places.into_iter().map(|p| (p.id, p)).collect();

    let places = favorites
        .into_iter()
        .filter_map(|favorite| by_id.remove(&favorite.place_id))
        .collect();

    Ok(summarize_places(places, repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::favorite::Favorite;
    use crate::domain::types::UserId;
    use crate::repository::test::{TestRepository, at, sample_place};
    use crate::session::AuthenticatedUser;

    fn session() -> SessionContext {
        let user = AuthenticatedUser {
            user_id: UserId::new("u1").unwrap(),
            email: None,
            expires_at: i64::MAX,
        };
        SessionContext::new(&user, None)
    }

    fn favorite(user: &str, place_id: i32, secs: i64) -> Favorite {
        Favorite {
            user_id: UserId::new(user).unwrap(),
            place_id: PlaceId::new(place_id).unwrap(),
            created_at: at(secs),
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let repo = TestRepository::new().with_places(vec![sample_place(1, "Kebab", None, None)]);
        let place_id = PlaceId::new(1).unwrap();

        assert!(toggle_favorite(place_id, &session(), &repo).unwrap());
        assert_eq!(repo.favorites().len(), 1);
        assert!(!toggle_favorite(place_id, &session(), &repo).unwrap());
        assert!(repo.favorites().is_empty());
    }

    #[test]
    fn toggle_unknown_place() {
        let repo = TestRepository::new();
        assert_eq!(
            toggle_favorite(PlaceId::new(5).unwrap(), &session(), &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn lists_visible_favorites_newest_first() {
        let mut hidden = sample_place(3, "Hidden", None, None);
        hidden.is_visible = false;
        let repo = TestRepository::new()
            .with_places(vec![
                sample_place(1, "Kebab", None, None),
                sample_place(2, "Pizza", None, None),
                hidden,
            ])
            .with_favorites(vec![
                favorite("u1", 1, 10),
                favorite("u1", 2, 20),
                favorite("u1", 3, 30),
                favorite("u2", 1, 40),
            ]);

        let places = list_favorites(&session(), &repo).unwrap();

        let ids: Vec<i32> = places.iter().map(|p| p.place.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
