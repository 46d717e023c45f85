use serde::Serialize;

use crate::domain::category::CategoryNode;
use crate::domain::geo::Coordinate;
use crate::domain::menu::{MenuGroup, group_menu};
use crate::domain::place::PlaceSummary;
use crate::domain::review::Review;
use crate::domain::types::{CategoryId, Slug, UserId};
use crate::proximity;
use crate::repository::{
    CategoryReader, FavoriteReader, MenuReader, PlaceListQuery, PlaceReader, ReviewListQuery,
    ReviewReader,
};
use crate::services::catalog::summarize_places;

use super::{ServiceError, ServiceResult};

/// Detail view of a single place.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlacePage {
    pub place: PlaceSummary,
    pub category: Option<CategoryNode>,
    /// Newest first.
    pub reviews: Vec<Review>,
    pub menu: Vec<MenuGroup>,
    pub is_favorite: bool,
}

/// Loads a visible place with its reviews, menu and the viewer's favorite flag.
pub fn show_place<R>(slug: &str, viewer: Option<&UserId>, repo: &R) -> ServiceResult<PlacePage>
where
    R: PlaceReader + ReviewReader + MenuReader + FavoriteReader + CategoryReader,
{
    let slug = Slug::new(slug).map_err(|_| ServiceError::NotFound)?;

    let place = match repo.get_place_by_slug(&slug) {
        Ok(Some(place)) if place.is_visible => place,
        Ok(_) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get place {slug}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let category = match place.category_id {
        Some(category_id) => repo.get_category_by_id(category_id).unwrap_or_else(|e| {
            log::error!("Failed to load category of place {}: {e}", place.id);
            None
        }),
        None => None,
    };

    let reviews = match repo.list_reviews(ReviewListQuery::default().place(place.id)) {
        Ok((_total, reviews)) => reviews,
        Err(e) => {
            log::error!("Failed to list reviews of place {}: {e}", place.id);
            vec![]
        }
    };

    let menu = match repo.list_menu_items(place.id, true) {
        Ok(items) => group_menu(items),
        Err(e) => {
            log::error!("Failed to load menu of place {}: {e}", place.id);
            vec![]
        }
    };

    let is_favorite = match viewer {
        Some(user_id) => repo.is_favorite(user_id, place.id).unwrap_or_else(|e| {
            log::error!("Failed to check favorite of place {}: {e}", place.id);
            false
        }),
        None => false,
    };

    let place = summarize_places(vec![place], repo)
        .pop()
        .ok_or(ServiceError::Internal)?;

    Ok(PlacePage {
        place,
        category,
        reviews,
        menu,
        is_favorite,
    })
}

/// All visible places ranked around `origin`.
///
/// With an origin the result is cut to `radius_km`; without one every place
/// is returned in name order with no distance.
pub fn nearby<R>(
    origin: Option<Coordinate>,
    category_id: Option<CategoryId>,
    radius_km: f64,
    repo: &R,
) -> Vec<PlaceSummary>
where
    R: PlaceReader + ReviewReader,
{
    let places = match repo.list_places(PlaceListQuery::visible()) {
        Ok((_total, places)) => places,
        Err(e) => {
            log::error!("Failed to list places for nearby view: {e}");
            return vec![];
        }
    };

    let places = proximity::filter_by_category(summarize_places(places, repo), category_id);
    let ranked = proximity::rank(places, origin);

    match origin {
        Some(_) => proximity::filter_by_radius(ranked, radius_km),
        None => ranked,
    }
}
