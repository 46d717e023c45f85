use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{CategoryLevel, CategoryNode, CategoryType, NewCategory};
use crate::domain::types::{
    CategoryId, CategoryName, Description, ImageUrl, Slug, TypeConstraintError, optional_text,
};

/// Admin form for creating or overwriting a category node.
#[derive(Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Derived from `name` when blank.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// One of `province`, `district`, `vertical` or `standard`.
    #[serde(default)]
    pub category_type: String,
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
    pub slug: Slug,
    pub description: Option<Description>,
    pub image_url: Option<ImageUrl>,
    pub category_type: CategoryType,
    pub parent_id: Option<CategoryId>,
    pub sort_order: i32,
}

impl CategoryFormPayload {
    /// Builds the node once the parent has been looked up; the parent's tier
    /// must fit the requested tier.
    pub fn into_new_category(
        self,
        parent: Option<&CategoryNode>,
    ) -> Result<NewCategory, TypeConstraintError> {
        let level = CategoryLevel::new(
            self.category_type,
            parent.map(|parent| (parent.id, parent.category_type())),
        )?;

        Ok(NewCategory {
            name: self.name,
            slug: self.slug,
            description: self.description,
            image_url: self.image_url,
            sort_order: self.sort_order,
            level,
        })
    }
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let name = CategoryName::new(value.name)?;
        let slug = match optional_text(value.slug, Slug::new)? {
            Some(slug) => slug,
            None => Slug::from_name(&name)?,
        };

        Ok(Self {
            name,
            slug,
            description: optional_text(value.description, Description::new)?,
            image_url: optional_text(value.image_url, ImageUrl::new)?,
            category_type: CategoryType::try_from(value.category_type.as_str())?,
            parent_id: value.parent_id.map(CategoryId::new).transpose()?,
            sort_order: value.sort_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::sample_category;

    fn form(name: &str, category_type: &str, parent_id: Option<i32>) -> CategoryForm {
        CategoryForm {
            name: name.into(),
            slug: None,
            description: None,
            image_url: None,
            category_type: category_type.into(),
            parent_id,
            sort_order: 0,
        }
    }

    #[test]
    fn parses_district_form() {
        let payload = CategoryFormPayload::try_from(form("New Erbil", "district", Some(1))).unwrap();
        assert_eq!(payload.slug.as_str(), "new-erbil");
        assert_eq!(payload.category_type, CategoryType::District);
        assert_eq!(payload.parent_id.unwrap().get(), 1);
    }

    #[test]
    fn blank_type_means_standard() {
        let payload = CategoryFormPayload::try_from(form("Misc", "", None)).unwrap();
        assert_eq!(payload.category_type, CategoryType::Standard);
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(matches!(
            CategoryFormPayload::try_from(form("Misc", "planet", None)),
            Err(CategoryFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn parent_tier_is_checked() {
        let province = sample_category(1, "Erbil", CategoryLevel::Province);
        let payload = CategoryFormPayload::try_from(form("Ankawa", "district", Some(1))).unwrap();
        let category = payload.into_new_category(Some(&province)).unwrap();
        assert_eq!(
            category.level,
            CategoryLevel::District {
                province_id: province.id
            }
        );

        let payload = CategoryFormPayload::try_from(form("Food", "vertical", Some(1))).unwrap();
        assert!(payload.into_new_category(Some(&province)).is_err());

        let payload = CategoryFormPayload::try_from(form("Ankawa", "district", None)).unwrap();
        assert!(payload.into_new_category(None).is_err());
    }
}
