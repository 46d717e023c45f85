use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::geo::Coordinate;
use crate::domain::place::NewPlace;
use crate::domain::types::{
    Address, CategoryId, Description, ImageUrl, OpeningHours, Phone, PlaceName, Slug, SocialUrl,
    TypeConstraintError, optional_text,
};

fn default_visible() -> bool {
    true
}

/// Admin form for creating or overwriting a place.
#[derive(Deserialize, Validate)]
pub struct PlaceForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Derived from `name` when blank.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    pub tiktok_url: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceFormPayload {
    pub place: NewPlace,
}

#[derive(Debug, Error)]
pub enum PlaceFormError {
    #[error("Place form validation failed: {0}")]
    Validation(String),
    #[error("Place form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Latitude and longitude must be given together")]
    PartialCoordinate,
}

impl From<ValidationErrors> for PlaceFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for PlaceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<PlaceForm> for PlaceFormPayload {
    type Error = PlaceFormError;

    fn try_from(value: PlaceForm) -> Result<Self, Self::Error> {
        value.validate()?;

        if value.latitude.is_some() != value.longitude.is_some() {
            return Err(PlaceFormError::PartialCoordinate);
        }

        let name = PlaceName::new(value.name)?;
        let slug = match optional_text(value.slug, Slug::new)? {
            Some(slug) => slug,
            None => Slug::from_name(&name)?,
        };

        Ok(Self {
            place: NewPlace {
                name,
                slug,
                description: optional_text(value.description, Description::new)?,
                image_url: optional_text(value.image_url, ImageUrl::new)?,
                address: optional_text(value.address, Address::new)?,
                phone: optional_text(value.phone, Phone::new)?,
                opening_hours: optional_text(value.opening_hours, OpeningHours::new)?,
                coordinate: Coordinate::from_parts(value.latitude, value.longitude)?,
                category_id: value.category_id.map(CategoryId::new).transpose()?,
                is_visible: value.is_visible,
                tiktok_url: optional_text(value.tiktok_url, SocialUrl::new)?,
                facebook_url: optional_text(value.facebook_url, SocialUrl::new)?,
                instagram_url: optional_text(value.instagram_url, SocialUrl::new)?,
            },
        })
    }
}

/// Toggle for places and menu items.
#[derive(Debug, Deserialize)]
pub struct VisibilityForm {
    pub is_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str) -> PlaceForm {
        PlaceForm {
            name: name.into(),
            slug: None,
            description: None,
            image_url: None,
            address: Some("  ".into()),
            phone: None,
            opening_hours: None,
            latitude: None,
            longitude: None,
            category_id: None,
            is_visible: true,
            tiktok_url: None,
            facebook_url: None,
            instagram_url: None,
        }
    }

    #[test]
    fn slug_is_derived_from_name() {
        let payload = PlaceFormPayload::try_from(form("Zagros  Kebab House")).unwrap();
        assert_eq!(payload.place.slug.as_str(), "zagros-kebab-house");
        assert!(payload.place.address.is_none());
        assert!(payload.place.coordinate.is_none());
    }

    #[test]
    fn explicit_slug_wins() {
        let mut value = form("Zagros");
        value.slug = Some("zagros-erbil".into());
        let payload = PlaceFormPayload::try_from(value).unwrap();
        assert_eq!(payload.place.slug.as_str(), "zagros-erbil");
    }

    #[test]
    fn coordinates_must_come_in_pairs() {
        let mut value = form("Zagros");
        value.latitude = Some(36.19);
        assert!(matches!(
            PlaceFormPayload::try_from(value),
            Err(PlaceFormError::PartialCoordinate)
        ));

        let mut value = form("Zagros");
        value.latitude = Some(36.19);
        value.longitude = Some(44.0);
        let payload = PlaceFormPayload::try_from(value).unwrap();
        assert_eq!(payload.place.coordinate.unwrap().lat(), 36.19);
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let mut value = form("Zagros");
        value.latitude = Some(91.0);
        value.longitude = Some(44.0);
        assert!(matches!(
            PlaceFormPayload::try_from(value),
            Err(PlaceFormError::Validation(_))
        ));
    }

    #[test]
    fn invalid_social_url_is_rejected() {
        let mut value = form("Zagros");
        value.instagram_url = Some("instagram".into());
        assert!(matches!(
            PlaceFormPayload::try_from(value),
            Err(PlaceFormError::TypeConstraint(_))
        ));
    }
}
