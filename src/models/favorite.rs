use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::favorite::Favorite as DomainFavorite;
use crate::domain::types::{TypeConstraintError, UserId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct Favorite {
    pub user_id: String,
    pub place_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite<'a> {
    pub user_id: &'a str,
    pub place_id: i32,
}

impl TryFrom<Favorite> for DomainFavorite {
    type Error = TypeConstraintError;

    fn try_from(favorite: Favorite) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(favorite.user_id)?,
            place_id: favorite.place_id.try_into()?,
            created_at: favorite.created_at,
        })
    }
}
