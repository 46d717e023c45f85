//! Navigation through the province -> district -> vertical tree.
//!
//! Each call resolves one node plus one level of children or places. Query
//! failures are logged and degrade to an empty piece so the rest of a page
//! still renders.

use serde::Serialize;

use crate::domain::category::{CategoryNode, CategoryType, CategoryWithCount};
use crate::domain::geo::Coordinate;
use crate::domain::place::{Place, PlaceSummary};
use crate::domain::types::{PlaceCount, Slug};
use crate::proximity;
use crate::repository::{CategoryListQuery, CategoryReader, PlaceListQuery, PlaceReader, ReviewReader};

use super::{ServiceError, ServiceResult};

/// Everything shown on a category page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryPage {
    pub category: CategoryNode,
    pub parent: Option<CategoryNode>,
    pub children: Vec<CategoryWithCount>,
    pub places: Vec<PlaceSummary>,
}

/// Looks a node up by slug. A failed lookup is reported as not found.
pub fn resolve_node<R>(slug: &str, repo: &R) -> ServiceResult<CategoryNode>
where
    R: CategoryReader,
{
    let slug = Slug::new(slug).map_err(|_| ServiceError::NotFound)?;

    match repo.get_category_by_slug(&slug) {
        Ok(Some(node)) => Ok(node),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to resolve category {slug}: {e}");
            Err(ServiceError::NotFound)
        }
    }
}

/// Visible places attached directly to `node`; zero when the count fails.
pub fn count_places<R>(node: &CategoryNode, repo: &R) -> usize
where
    R: PlaceReader,
{
    repo.count_visible_places(node.id).unwrap_or_else(|e| {
        log::error!("Failed to count places of category {}: {e}", node.id);
        0
    })
}

/// Direct children of a branch node, each with its place count.
pub fn list_children<R>(node: &CategoryNode, repo: &R) -> Vec<CategoryWithCount>
where
    R: CategoryReader + PlaceReader,
{
    if !node.hosts_children() {
        return vec![];
    }

    let children = match repo.list_categories(CategoryListQuery::children_of(node.id)) {
        Ok(children) => children,
        Err(e) => {
            log::error!("Failed to list children of category {}: {e}", node.id);
            return vec![];
        }
    };

    children
        .into_iter()
        .map(|category| {
            let place_count = PlaceCount::from(count_places(&category, repo));
            CategoryWithCount {
                category,
                place_count,
            }
        })
        .collect()
}

/// Breadcrumb parent, `None` for roots or when the lookup fails.
pub fn resolve_parent<R>(node: &CategoryNode, repo: &R) -> Option<CategoryNode>
where
    R: CategoryReader,
{
    let parent_id = node.parent_id()?;

    match repo.get_category_by_id(parent_id) {
        Ok(parent) => parent,
        Err(e) => {
            log::error!("Failed to load parent of category {}: {e}", node.id);
            None
        }
    }
}

/// Attaches rating aggregates. Places without reviews get a zero aggregate,
/// as do all places when the aggregate query fails.
pub fn summarize_places<R>(places: Vec<Place>, repo: &R) -> Vec<PlaceSummary>
where
    R: ReviewReader,
{
    let ids: Vec<_> = places.iter().map(|p| p.id).collect();
    let ratings = repo.rating_summaries(&ids).unwrap_or_else(|e| {
        log::error!("Failed to load rating summaries: {e}");
        Default::default()
    });

    places
        .into_iter()
        .map(|place| {
            let rating = ratings.get(&place.id).copied().unwrap_or_default();
            PlaceSummary::new(place, rating)
        })
        .collect()
}

/// Visible places of a leaf or vertical node, by name, with ratings.
pub fn list_places<R>(node: &CategoryNode, repo: &R) -> Vec<PlaceSummary>
where
    R: PlaceReader + ReviewReader,
{
    if !node.hosts_places() {
        return vec![];
    }

    match repo.list_places(PlaceListQuery::visible().category(node.id)) {
        Ok((_total, places)) => summarize_places(places, repo),
        Err(e) => {
            log::error!("Failed to list places of category {}: {e}", node.id);
            vec![]
        }
    }
}

/// Province nodes with their directly attached visible place counts.
pub fn list_provinces<R>(repo: &R) -> Vec<CategoryWithCount>
where
    R: CategoryReader + PlaceReader,
{
    let provinces = match repo.list_categories(CategoryListQuery::of_type(CategoryType::Province))
    {
        Ok(provinces) => provinces,
        Err(e) => {
            log::error!("Failed to list provinces: {e}");
            return vec![];
        }
    };

    let counts = repo.count_visible_places_by_category().unwrap_or_else(|e| {
        log::error!("Failed to count places per category: {e}");
        Default::default()
    });

    provinces
        .into_iter()
        .map(|category| {
            let place_count = PlaceCount::from(counts.get(&category.id).copied().unwrap_or(0));
            CategoryWithCount {
                category,
                place_count,
            }
        })
        .collect()
}

/// Resolves a category page: node, breadcrumb parent, children and places.
///
/// Places are narrowed by `search` over name, description and address, then
/// ranked by distance when `origin` is known.
pub fn show_category<R>(
    slug: &str,
    origin: Option<Coordinate>,
    search: Option<&str>,
    repo: &R,
) -> ServiceResult<CategoryPage>
where
    R: CategoryReader + PlaceReader + ReviewReader,
{
    let category = resolve_node(slug, repo)?;
    let parent = resolve_parent(&category, repo);
    let children = list_children(&category, repo);

    let mut places = list_places(&category, repo);
    if let Some(search) = search {
        places.retain(|summary| summary.place.matches_text(search));
    }
    let places = proximity::rank(places, origin);

    Ok(CategoryPage {
        category,
        parent,
        children,
        places,
    })
}
