use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::geo::Coordinate;
use crate::domain::place::{NewPlace as DomainNewPlace, Place as DomainPlace};
use crate::domain::types::{
    Address, CategoryId, Description, ImageUrl, OpeningHours, Phone, PlaceName, Slug, SocialUrl,
    TypeConstraintError,
};

/// Diesel model representing the `places` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::places)]
pub struct Place {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_id: Option<i32>,
    pub is_visible: bool,
    pub tiktok_url: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`Place`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::places)]
#[diesel(treat_none_as_null = true)]
pub struct NewPlace {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_id: Option<i32>,
    pub is_visible: bool,
    pub tiktok_url: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Place> for DomainPlace {
    type Error = TypeConstraintError;

    fn try_from(place: Place) -> Result<Self, Self::Error> {
        Ok(Self {
            id: place.id.try_into()?,
            name: PlaceName::new(place.name)?,
            slug: Slug::new(place.slug)?,
            description: place.description.map(Description::new).transpose()?,
            image_url: place.image_url.map(ImageUrl::new).transpose()?,
            address: place.address.map(Address::new).transpose()?,
            phone: place.phone.map(Phone::new).transpose()?,
            opening_hours: place.opening_hours.map(OpeningHours::new).transpose()?,
            coordinate: Coordinate::from_parts(place.latitude, place.longitude)?,
            category_id: place.category_id.map(CategoryId::new).transpose()?,
            is_visible: place.is_visible,
            tiktok_url: place.tiktok_url.map(SocialUrl::new).transpose()?,
            facebook_url: place.facebook_url.map(SocialUrl::new).transpose()?,
            instagram_url: place.instagram_url.map(SocialUrl::new).transpose()?,
            created_at: place.created_at,
            updated_at: place.updated_at,
        })
    }
}

impl From<DomainNewPlace> for NewPlace {
    fn from(place: DomainNewPlace) -> Self {
        Self {
            name: place.name.into_inner(),
            slug: place.slug.into_inner(),
            description: place.description.map(Description::into_inner),
            image_url: place.image_url.map(ImageUrl::into_inner),
            address: place.address.map(Address::into_inner),
            phone: place.phone.map(Phone::into_inner),
            opening_hours: place.opening_hours.map(OpeningHours::into_inner),
            latitude: place.coordinate.map(|c| c.lat()),
            longitude: place.coordinate.map(|c| c.lon()),
            category_id: place.category_id.map(CategoryId::get),
            is_visible: place.is_visible,
            tiktok_url: place.tiktok_url.map(SocialUrl::into_inner),
            facebook_url: place.facebook_url.map(SocialUrl::into_inner),
            instagram_url: place.instagram_url.map(SocialUrl::into_inner),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
