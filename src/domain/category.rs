use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{
    CategoryId, CategoryName, Description, ImageUrl, PlaceCount, Slug, TypeConstraintError,
};

/// Flat tier tag as persisted in the `category_type` column.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Province,
    District,
    Vertical,
    Standard,
}

impl CategoryType {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::District => "district",
            Self::Vertical => "vertical",
            Self::Standard => "standard",
        }
    }
}

impl Display for CategoryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for CategoryType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "province" => Ok(Self::Province),
            "district" => Ok(Self::District),
            "vertical" => Ok(Self::Vertical),
            "standard" | "" => Ok(Self::Standard),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "category type: {other}"
            ))),
        }
    }
}

/// Position of a node in the province -> district -> vertical tree.
///
/// Each variant carries only the parent link its tier allows, so a district
/// without a province or a province with a parent cannot be represented.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "category_type", rename_all = "snake_case")]
pub enum CategoryLevel {
    Province,
    District { province_id: CategoryId },
    /// `district_id` is `None` for global verticals.
    Vertical { district_id: Option<CategoryId> },
    Standard { parent_id: Option<CategoryId> },
}

impl CategoryLevel {
    /// Checks the requested tier against the tier of its parent.
    pub fn new(
        kind: CategoryType,
        parent: Option<(CategoryId, CategoryType)>,
    ) -> Result<Self, TypeConstraintError> {
        let invalid = |parent: Option<CategoryType>| {
            let parent = parent.map_or("no", CategoryType::as_str);
            TypeConstraintError::InvalidValue(format!("a {kind} cannot have {parent} parent"))
        };

        match (kind, parent) {
            (CategoryType::Province, None) => Ok(Self::Province),
            (CategoryType::District, Some((id, CategoryType::Province))) => {
                Ok(Self::District { province_id: id })
            }
            (CategoryType::Vertical, None) => Ok(Self::Vertical { district_id: None }),
            (CategoryType::Vertical, Some((id, CategoryType::District))) => Ok(Self::Vertical {
                district_id: Some(id),
            }),
            (CategoryType::Standard, parent) => Ok(Self::Standard {
                parent_id: parent.map(|(id, _)| id),
            }),
            (_, parent) => Err(invalid(parent.map(|(_, kind)| kind))),
        }
    }

    /// Rebuilds a level from stored columns, where the parent's tier is not at hand.
    pub fn from_stored(
        kind: CategoryType,
        parent_id: Option<CategoryId>,
    ) -> Result<Self, TypeConstraintError> {
        match (kind, parent_id) {
            (CategoryType::Province, _) => Ok(Self::Province),
            (CategoryType::District, Some(province_id)) => Ok(Self::District { province_id }),
            (CategoryType::District, None) => Err(TypeConstraintError::InvalidValue(
                "district without a province".to_string(),
            )),
            (CategoryType::Vertical, district_id) => Ok(Self::Vertical { district_id }),
            (CategoryType::Standard, parent_id) => Ok(Self::Standard { parent_id }),
        }
    }

    pub const fn category_type(&self) -> CategoryType {
        match self {
            Self::Province => CategoryType::Province,
            Self::District { .. } => CategoryType::District,
            Self::Vertical { .. } => CategoryType::Vertical,
            Self::Standard { .. } => CategoryType::Standard,
        }
    }

    pub const fn parent_id(&self) -> Option<CategoryId> {
        match self {
            Self::Province => None,
            Self::District { province_id } => Some(*province_id),
            Self::Vertical { district_id } => *district_id,
            Self::Standard { parent_id } => *parent_id,
        }
    }
}

/// A node of the catalog tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
    pub description: Option<Description>,
    pub image_url: Option<ImageUrl>,
    pub sort_order: i32,
    #[serde(flatten)]
    pub level: CategoryLevel,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CategoryNode {
    pub const fn category_type(&self) -> CategoryType {
        self.level.category_type()
    }

    pub const fn parent_id(&self) -> Option<CategoryId> {
        self.level.parent_id()
    }

    /// Provinces, districts and verticals list sub-categories.
    pub const fn hosts_children(&self) -> bool {
        matches!(
            self.level,
            CategoryLevel::Province | CategoryLevel::District { .. } | CategoryLevel::Vertical { .. }
        )
    }

    /// Everything below the district tier may carry places directly.
    pub const fn hosts_places(&self) -> bool {
        !matches!(
            self.level,
            CategoryLevel::Province | CategoryLevel::District { .. }
        )
    }
}

/// Data required to insert or overwrite a [`CategoryNode`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
    pub description: Option<Description>,
    pub image_url: Option<ImageUrl>,
    pub sort_order: i32,
    pub level: CategoryLevel,
}

/// A child node annotated with its directly attached visible place count.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: CategoryNode,
    pub place_count: PlaceCount,
}

/// Verticals created under every new district: name and cover image.
pub const DEFAULT_VERTICALS: [(&str, &str); 5] = [
    (
        "Restaurants",
        "https://images.unsplash.com/photo-1555939594-58d7cb561ad1?w=800",
    ),
    (
        "Markets",
        "https://images.unsplash.com/photo-1578916171728-46686eac8d58?w=800",
    ),
    (
        "Mechanics",
        "https://images.unsplash.com/photo-1619642751034-765dfdf7c58e?w=800",
    ),
    (
        "Mobile Shops",
        "https://images.unsplash.com/photo-1596742578505-1c3906352936?w=800",
    ),
    (
        "Candy Shop",
        "https://images.unsplash.com/photo-1582058091505-f87a2e55a40f?w=800",
    ),
];

/// Builds the default verticals for a freshly created district.
pub fn default_verticals(
    district_id: CategoryId,
    district_slug: &Slug,
) -> Result<Vec<NewCategory>, TypeConstraintError> {
    DEFAULT_VERTICALS
        .iter()
        .map(|(name, image)| {
            Ok(NewCategory {
                name: CategoryName::new(*name)?,
                slug: district_slug.child(name)?,
                description: None,
                image_url: Some(ImageUrl::new(*image)?),
                sort_order: 0,
                level: CategoryLevel::new(
                    CategoryType::Vertical,
                    Some((district_id, CategoryType::District)),
                )?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i32) -> CategoryId {
        CategoryId::new(value).unwrap()
    }

    #[test]
    fn district_requires_province_parent() {
        let level =
            CategoryLevel::new(CategoryType::District, Some((id(1), CategoryType::Province)))
                .unwrap();
        assert_eq!(level.parent_id(), Some(id(1)));

        assert!(CategoryLevel::new(CategoryType::District, None).is_err());
        assert!(
            CategoryLevel::new(CategoryType::District, Some((id(2), CategoryType::District)))
                .is_err()
        );
    }

    #[test]
    fn province_rejects_parent() {
        assert!(
            CategoryLevel::new(CategoryType::Province, Some((id(1), CategoryType::Province)))
                .is_err()
        );
        assert_eq!(
            CategoryLevel::new(CategoryType::Province, None).unwrap(),
            CategoryLevel::Province
        );
    }

    #[test]
    fn vertical_may_be_global() {
        let level = CategoryLevel::new(CategoryType::Vertical, None).unwrap();
        assert_eq!(level.parent_id(), None);
        assert!(
            CategoryLevel::new(CategoryType::Vertical, Some((id(1), CategoryType::Province)))
                .is_err()
        );
    }

    #[test]
    fn stored_district_without_parent_is_rejected() {
        assert!(CategoryLevel::from_stored(CategoryType::District, None).is_err());
    }

    #[test]
    fn default_verticals_are_prefixed_with_district_slug() {
        let slug = Slug::new("ankawa").unwrap();
        let verticals = default_verticals(id(7), &slug).unwrap();
        assert_eq!(verticals.len(), 5);
        assert_eq!(verticals[3].slug.as_str(), "ankawa-mobile-shops");
        assert!(
            verticals
                .iter()
                .all(|v| v.level == CategoryLevel::Vertical { district_id: Some(id(7)) })
        );
    }

    #[test]
    fn parses_category_type() {
        assert_eq!(
            CategoryType::try_from("district").unwrap(),
            CategoryType::District
        );
        assert!(CategoryType::try_from("city").is_err());
    }
}
