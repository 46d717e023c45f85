use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{CategoryLevel, CategoryNode, CategoryType, NewCategory as DomainNewCategory};
use crate::domain::types::{
    CategoryId, CategoryName, Description, ImageUrl, Slug, TypeConstraintError,
};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_type: String,
    pub parent_id: Option<i32>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`Category`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_type: String,
    pub parent_id: Option<i32>,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for CategoryNode {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        let kind = CategoryType::try_from(category.category_type.as_str())?;
        let parent_id = category.parent_id.map(CategoryId::new).transpose()?;

        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            slug: Slug::new(category.slug)?,
            description: category.description.map(Description::new).transpose()?,
            image_url: category.image_url.map(ImageUrl::new).transpose()?,
            sort_order: category.sort_order,
            level: CategoryLevel::from_stored(kind, parent_id)?,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            name: category.name.into_inner(),
            slug: category.slug.into_inner(),
            description: category.description.map(Description::into_inner),
            image_url: category.image_url.map(ImageUrl::into_inner),
            category_type: category.level.category_type().as_str().to_string(),
            parent_id: category.level.parent_id().map(CategoryId::get),
            sort_order: category.sort_order,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
