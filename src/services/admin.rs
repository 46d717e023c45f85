//! Catalog curation. Every operation requires the admin flag.

use serde::Serialize;

use crate::domain::category::{CategoryLevel, CategoryNode, CategoryType, default_verticals};
use crate::domain::menu::MenuItem;
use crate::domain::place::Place;
use crate::domain::review::Review;
use crate::domain::types::{CategoryId, MenuItemId, PlaceId, ReviewId};
use crate::forms::categories::CategoryFormPayload;
use crate::forms::menu::MenuItemFormPayload;
use crate::forms::places::PlaceFormPayload;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, MenuReader, MenuWriter, PlaceListQuery,
    PlaceReader, PlaceWriter, RepositoryResult, ReviewListQuery, ReviewReader, ReviewWriter,
};
use crate::session::SessionContext;

use super::{ServiceError, ServiceResult};

/// A created category plus a warning when its follow-up steps failed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryCreated {
    pub category: CategoryNode,
    pub warning: Option<String>,
}

fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page)
}

/// Maps an affected-row count to `NotFound` when nothing matched.
fn expect_affected(result: RepositoryResult<usize>, what: &str) -> ServiceResult<()> {
    match result {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to {what}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn load_parent<R>(parent_id: Option<CategoryId>, repo: &R) -> ServiceResult<Option<CategoryNode>>
where
    R: CategoryReader,
{
    let Some(parent_id) = parent_id else {
        return Ok(None);
    };

    match repo.get_category_by_id(parent_id) {
        Ok(Some(parent)) => Ok(Some(parent)),
        Ok(None) => Err(ServiceError::Form(format!(
            "Parent category {parent_id} does not exist"
        ))),
        Err(e) => {
            log::error!("Failed to load parent category {parent_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_categories<R>(session: &SessionContext, repo: &R) -> ServiceResult<Vec<CategoryNode>>
where
    R: CategoryReader,
{
    session.require_admin()?;

    repo.list_categories(CategoryListQuery::default())
        .map_err(|e| {
            log::error!("Failed to list categories: {e}");
            ServiceError::Internal
        })
}

/// Creates a node. A new district also receives the default verticals; if
/// that fails the district stays and a warning is returned.
pub fn create_category<R>(
    payload: CategoryFormPayload,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<CategoryCreated>
where
    R: CategoryReader + CategoryWriter,
{
    session.require_admin()?;

    let parent = load_parent(payload.parent_id, repo)?;
    let new_category = payload.into_new_category(parent.as_ref())?;

    let category = repo.create_category(&new_category).map_err(|e| {
        log::error!("Failed to create category: {e}");
        ServiceError::Internal
    })?;

    let mut warning = None;
    if category.category_type() == CategoryType::District {
        let created = default_verticals(category.id, &category.slug)
            .map_err(|e| e.to_string())
            .and_then(|verticals| {
                repo.create_categories(&verticals)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = created {
            log::warn!("District {} created without default verticals: {e}", category.id);
            warning = Some("District created, but default verticals could not be added.".to_string());
        }
    }

    Ok(CategoryCreated { category, warning })
}

pub fn update_category<R>(
    id: CategoryId,
    payload: CategoryFormPayload,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + PlaceReader,
{
    session.require_admin()?;

    if payload.parent_id == Some(id) {
        return Err(ServiceError::Form(
            "A category cannot be its own parent".to_string(),
        ));
    }

    let parent = load_parent(payload.parent_id, repo)?;
    let category = payload.into_new_category(parent.as_ref())?;
    check_retype(id, category.level.category_type(), repo)?;

    expect_affected(repo.update_category(id, &category), "update category")
}

/// A tier change must keep every existing child valid, and a node that
/// stops hosting places must not have any attached.
fn check_retype<R>(id: CategoryId, new_type: CategoryType, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + PlaceReader,
{
    let current = match repo.get_category_by_id(id) {
        Ok(Some(current)) => current,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load category {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if current.category_type() == new_type {
        return Ok(());
    }

    let children = repo
        .list_categories(CategoryListQuery::children_of(id))
        .map_err(|e| {
            log::error!("Failed to list children of category {id}: {e}");
            ServiceError::Internal
        })?;
    if let Some(child) = children
        .iter()
        .find(|child| CategoryLevel::new(child.category_type(), Some((id, new_type))).is_err())
    {
        return Err(ServiceError::Form(format!(
            "A {new_type} cannot be the parent of {} ({})",
            child.name,
            child.category_type()
        )));
    }

    if matches!(new_type, CategoryType::Province | CategoryType::District) {
        let query = PlaceListQuery::default().category(id).paginate(1, 1);
        let (attached, _) = repo.list_places(query).map_err(|e| {
            log::error!("Failed to count places of category {id}: {e}");
            ServiceError::Internal
        })?;
        if attached > 0 {
            return Err(ServiceError::Form(format!(
                "A {new_type} cannot hold places; move its {attached} place(s) first"
            )));
        }
    }

    Ok(())
}

/// Deletes a node with its descendants; attached places become uncategorised.
pub fn delete_category<R>(id: CategoryId, session: &SessionContext, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    session.require_admin()?;
    expect_affected(repo.delete_category(id), "delete category")
}

fn check_category<R>(category_id: Option<CategoryId>, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match load_parent(category_id, repo)? {
        Some(category) if !category.hosts_places() => Err(ServiceError::Form(format!(
            "A {} cannot hold places",
            category.category_type()
        ))),
        _ => Ok(()),
    }
}

/// All places, hidden included, newest first.
pub fn list_places<R>(
    page: usize,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<Paginated<Place>>
where
    R: PlaceReader,
{
    session.require_admin()?;

    let query = PlaceListQuery::default()
        .newest_first()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    match repo.list_places(query) {
        Ok((total, places)) => Ok(Paginated::new(
            places,
            page,
            total_pages(total, DEFAULT_ITEMS_PER_PAGE),
        )),
        Err(e) => {
            log::error!("Failed to list places: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_place<R>(
    payload: PlaceFormPayload,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<Place>
where
    R: CategoryReader + PlaceWriter,
{
    session.require_admin()?;
    check_category(payload.place.category_id, repo)?;

    repo.create_place(&payload.place).map_err(|e| {
        log::error!("Failed to create place: {e}");
        ServiceError::Internal
    })
}

pub fn update_place<R>(
    id: PlaceId,
    payload: PlaceFormPayload,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + PlaceWriter,
{
    session.require_admin()?;
    check_category(payload.place.category_id, repo)?;

    expect_affected(repo.update_place(id, &payload.place), "update place")
}

pub fn set_place_visibility<R>(
    id: PlaceId,
    is_visible: bool,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<()>
where
    R: PlaceWriter,
{
    session.require_admin()?;
    expect_affected(
        repo.set_place_visibility(id, is_visible),
        "set place visibility",
    )
}

pub fn delete_place<R>(id: PlaceId, session: &SessionContext, repo: &R) -> ServiceResult<()>
where
    R: PlaceWriter,
{
    session.require_admin()?;
    expect_affected(repo.delete_place(id), "delete place")
}

/// Every review, newest first, with the reviewed place's name.
pub fn list_reviews<R>(
    page: usize,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<Paginated<Review>>
where
    R: ReviewReader,
{
    session.require_admin()?;

    let query = ReviewListQuery::default().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    match repo.list_reviews(query) {
        Ok((total, reviews)) => Ok(Paginated::new(
            reviews,
            page,
            total_pages(total, DEFAULT_ITEMS_PER_PAGE),
        )),
        Err(e) => {
            log::error!("Failed to list reviews: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_review<R>(id: ReviewId, session: &SessionContext, repo: &R) -> ServiceResult<()>
where
    R: ReviewWriter,
{
    session.require_admin()?;
    expect_affected(repo.delete_review(id), "delete review")
}

/// The full menu of a place, hidden items included.
pub fn list_menu_items<R>(
    place_id: PlaceId,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<Vec<MenuItem>>
where
    R: PlaceReader + MenuReader,
{
    session.require_admin()?;

    match repo.get_place_by_id(place_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get place {place_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    repo.list_menu_items(place_id, false).map_err(|e| {
        log::error!("Failed to list menu of place {place_id}: {e}");
        ServiceError::Internal
    })
}

pub fn create_menu_item<R>(
    place_id: PlaceId,
    payload: MenuItemFormPayload,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<()>
where
    R: PlaceReader + MenuWriter,
{
    session.require_admin()?;

    match repo.get_place_by_id(place_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get place {place_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let item = payload.into_new_menu_item(place_id);
    expect_affected(repo.create_menu_item(&item), "create menu item")
}

/// Overwrites an item; it stays attached to its place.
pub fn update_menu_item<R>(
    id: MenuItemId,
    payload: MenuItemFormPayload,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<()>
where
    R: MenuReader + MenuWriter,
{
    session.require_admin()?;

    let existing = match repo.get_menu_item_by_id(id) {
        Ok(Some(item)) => item,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get menu item {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let item = payload.into_new_menu_item(existing.place_id);
    expect_affected(repo.update_menu_item(id, &item), "update menu item")
}

pub fn set_menu_item_visibility<R>(
    id: MenuItemId,
    is_visible: bool,
    session: &SessionContext,
    repo: &R,
) -> ServiceResult<()>
where
    R: MenuWriter,
{
    session.require_admin()?;
    expect_affected(
        repo.set_menu_item_visibility(id, is_visible),
        "set menu item visibility",
    )
}

pub fn delete_menu_item<R>(id: MenuItemId, session: &SessionContext, repo: &R) -> ServiceResult<()>
where
    R: MenuWriter,
{
    session.require_admin()?;
    expect_affected(repo.delete_menu_item(id), "delete menu item")
}
