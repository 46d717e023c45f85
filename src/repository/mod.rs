use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{CategoryNode, CategoryType, NewCategory};
use crate::domain::favorite::Favorite;
use crate::domain::menu::{MenuItem, NewMenuItem};
use crate::domain::place::{NewPlace, Place, RatingSummary};
use crate::domain::profile::Profile;
use crate::domain::review::{NewReview, Review};
use crate::domain::types::{
    CategoryId, MenuItemId, PhotoUrl, PlaceId, ReviewId, Slug, UserId,
};
use crate::pagination::Pagination;

pub mod category;
pub mod errors;
pub mod favorite;
pub mod menu;
pub mod place;
pub mod profile;
pub mod review;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Filters for listing category nodes. Results are ordered by sort key, then name.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    pub parent_id: Option<CategoryId>,
    pub category_type: Option<CategoryType>,
}

impl CategoryListQuery {
    pub fn children_of(parent_id: CategoryId) -> Self {
        Self {
            parent_id: Some(parent_id),
            category_type: None,
        }
    }

    pub fn of_type(category_type: CategoryType) -> Self {
        Self {
            parent_id: None,
            category_type: Some(category_type),
        }
    }
}

/// Ordering applied to place listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceOrder {
    #[default]
    Name,
    NewestFirst,
}

/// Query parameters used when listing places.
#[derive(Debug, Clone, Default)]
pub struct PlaceListQuery {
    /// Restrict to places attached directly to this category.
    pub category_id: Option<CategoryId>,
    /// Skip hidden places.
    pub visible_only: bool,
    pub order: PlaceOrder,
    pub pagination: Option<Pagination>,
}

impl PlaceListQuery {
    /// Visible places only, the public default.
    pub fn visible() -> Self {
        Self {
            visible_only: true,
            ..Self::default()
        }
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = PlaceOrder::NewestFirst;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing reviews, always newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewListQuery {
    pub place_id: Option<PlaceId>,
    pub user_id: Option<UserId>,
    pub pagination: Option<Pagination>,
}

impl ReviewListQuery {
    pub fn place(mut self, place_id: PlaceId) -> Self {
        self.place_id = Some(place_id);
        self
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category nodes.
pub trait CategoryReader {
    /// Retrieve a node by its slug.
    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<CategoryNode>>;
    /// Retrieve a node by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<CategoryNode>>;
    /// List nodes matching the query, ordered by sort key then name.
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<CategoryNode>>;
}

/// Write operations for category nodes.
pub trait CategoryWriter {
    /// Persist a new node and return it.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryNode>;
    /// Persist several nodes at once.
    fn create_categories(&self, categories: &[NewCategory]) -> RepositoryResult<usize>;
    /// Overwrite a node's editable fields.
    fn update_category(&self, id: CategoryId, category: &NewCategory) -> RepositoryResult<usize>;
    /// Delete a node; descendants cascade, attached places become uncategorised.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for places.
pub trait PlaceReader {
    /// List places matching the query, returning the total before pagination.
    fn list_places(&self, query: PlaceListQuery) -> RepositoryResult<(usize, Vec<Place>)>;
    /// Retrieve a place by its slug.
    fn get_place_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Place>>;
    /// Retrieve a place by its identifier.
    fn get_place_by_id(&self, id: PlaceId) -> RepositoryResult<Option<Place>>;
    /// Count visible places attached directly to a category.
    fn count_visible_places(&self, category_id: CategoryId) -> RepositoryResult<usize>;
    /// Count visible places per category in one pass.
    fn count_visible_places_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>>;
}

/// Write operations for places.
pub trait PlaceWriter {
    fn create_place(&self, place: &NewPlace) -> RepositoryResult<Place>;
    fn update_place(&self, id: PlaceId, place: &NewPlace) -> RepositoryResult<usize>;
    fn set_place_visibility(&self, id: PlaceId, is_visible: bool) -> RepositoryResult<usize>;
    fn delete_place(&self, id: PlaceId) -> RepositoryResult<usize>;
}

/// Read-only operations for reviews.
pub trait ReviewReader {
    /// Rating aggregates for the given places; places without reviews are absent.
    fn rating_summaries(
        &self,
        place_ids: &[PlaceId],
    ) -> RepositoryResult<HashMap<PlaceId, RatingSummary>>;
    /// List reviews newest first with photos and author names.
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)>;
    fn get_review_by_id(&self, id: ReviewId) -> RepositoryResult<Option<Review>>;
}

/// Write operations for reviews.
pub trait ReviewWriter {
    /// Insert the review row only and return its identifier.
    fn create_review(&self, review: &NewReview) -> RepositoryResult<ReviewId>;
    /// Link photos to a review, preserving their order.
    fn add_review_photos(&self, review_id: ReviewId, photos: &[PhotoUrl]) -> RepositoryResult<usize>;
    fn delete_review(&self, id: ReviewId) -> RepositoryResult<usize>;
}

/// Read-only operations for favorites.
pub trait FavoriteReader {
    fn is_favorite(&self, user_id: &UserId, place_id: PlaceId) -> RepositoryResult<bool>;
    /// Favorites of a user, newest first.
    fn list_favorites(&self, user_id: &UserId) -> RepositoryResult<Vec<Favorite>>;
}

/// Write operations for favorites.
pub trait FavoriteWriter {
    fn add_favorite(&self, user_id: &UserId, place_id: PlaceId) -> RepositoryResult<usize>;
    fn remove_favorite(&self, user_id: &UserId, place_id: PlaceId) -> RepositoryResult<usize>;
}

/// Read-only operations for menu items.
pub trait MenuReader {
    /// Items of a place, newest first.
    fn list_menu_items(&self, place_id: PlaceId, visible_only: bool)
    -> RepositoryResult<Vec<MenuItem>>;
    fn get_menu_item_by_id(&self, id: MenuItemId) -> RepositoryResult<Option<MenuItem>>;
}

/// Write operations for menu items.
pub trait MenuWriter {
    fn create_menu_item(&self, item: &NewMenuItem) -> RepositoryResult<usize>;
    fn update_menu_item(&self, id: MenuItemId, item: &NewMenuItem) -> RepositoryResult<usize>;
    fn set_menu_item_visibility(&self, id: MenuItemId, is_visible: bool)
    -> RepositoryResult<usize>;
    fn delete_menu_item(&self, id: MenuItemId) -> RepositoryResult<usize>;
}

/// Read-only access to user profiles.
pub trait ProfileReader {
    fn get_profile(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>>;
}
