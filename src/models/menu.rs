use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::menu::{MenuItem as DomainMenuItem, NewMenuItem as DomainNewMenuItem};
use crate::domain::types::{
    Description, ImageUrl, MenuItemName, MenuPrice, MenuSection, TypeConstraintError,
};

/// Diesel model representing the `menu_items` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::menu_items)]
pub struct MenuItem {
    pub id: i32,
    pub place_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub section: Option<String>,
    pub is_visible: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::menu_items)]
#[diesel(treat_none_as_null = true)]
pub struct NewMenuItem {
    pub place_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub section: Option<String>,
    pub is_visible: bool,
}

impl TryFrom<MenuItem> for DomainMenuItem {
    type Error = TypeConstraintError;

    fn try_from(item: MenuItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.try_into()?,
            place_id: item.place_id.try_into()?,
            name: MenuItemName::new(item.name)?,
            description: item.description.map(Description::new).transpose()?,
            price: item.price.map(MenuPrice::new).transpose()?,
            image_url: item.image_url.map(ImageUrl::new).transpose()?,
            section: item.section.map(MenuSection::new).transpose()?,
            is_visible: item.is_visible,
            created_at: item.created_at,
        })
    }
}

impl From<DomainNewMenuItem> for NewMenuItem {
    fn from(item: DomainNewMenuItem) -> Self {
        Self {
            place_id: item.place_id.get(),
            name: item.name.into_inner(),
            description: item.description.map(Description::into_inner),
            price: item.price.map(MenuPrice::get),
            image_url: item.image_url.map(ImageUrl::into_inner),
            section: item.section.map(MenuSection::into_inner),
            is_visible: item.is_visible,
        }
    }
}
