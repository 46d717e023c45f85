use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::menu::NewMenuItem;
use crate::domain::types::{
    Description, ImageUrl, MenuItemName, MenuPrice, MenuSection, PlaceId, TypeConstraintError,
    optional_text,
};

fn default_visible() -> bool {
    true
}

#[derive(Deserialize, Validate)]
pub struct MenuItemForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    #[validate(length(max = 100))]
    pub section: Option<String>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemFormPayload {
    pub name: MenuItemName,
    pub description: Option<Description>,
    pub price: Option<MenuPrice>,
    pub image_url: Option<ImageUrl>,
    pub section: Option<MenuSection>,
    pub is_visible: bool,
}

impl MenuItemFormPayload {
    pub fn into_new_menu_item(self, place_id: PlaceId) -> NewMenuItem {
        NewMenuItem {
            place_id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            section: self.section,
            is_visible: self.is_visible,
        }
    }
}

#[derive(Debug, Error)]
pub enum MenuItemFormError {
    #[error("Menu item form validation failed: {0}")]
    Validation(String),
    #[error("Menu item form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for MenuItemFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for MenuItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<MenuItemForm> for MenuItemFormPayload {
    type Error = MenuItemFormError;

    fn try_from(value: MenuItemForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: MenuItemName::new(value.name)?,
            description: optional_text(value.description, Description::new)?,
            price: value.price.map(MenuPrice::new).transpose()?,
            image_url: optional_text(value.image_url, ImageUrl::new)?,
            section: optional_text(value.section, MenuSection::new)?,
            is_visible: value.is_visible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let form = MenuItemForm {
            name: "Tea".into(),
            description: None,
            price: Some(-1.0),
            image_url: None,
            section: None,
            is_visible: true,
        };
        assert!(matches!(
            MenuItemFormPayload::try_from(form),
            Err(MenuItemFormError::Validation(_))
        ));
    }

    #[test]
    fn blank_section_falls_back_later() {
        let form = MenuItemForm {
            name: "Tea".into(),
            description: None,
            price: Some(1500.0),
            image_url: None,
            section: Some(" ".into()),
            is_visible: false,
        };
        let item = MenuItemFormPayload::try_from(form)
            .unwrap()
            .into_new_menu_item(PlaceId::new(3).unwrap());
        assert!(item.section.is_none());
        assert!(!item.is_visible);
        assert_eq!(item.price.unwrap().get(), 1500.0);
    }
}
