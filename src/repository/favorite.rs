use diesel::prelude::*;

use crate::domain::favorite::Favorite;
use crate::domain::types::{PlaceId, UserId};
use crate::models::favorite::{Favorite as DbFavorite, NewFavorite};
use crate::repository::{DieselRepository, FavoriteReader, FavoriteWriter, RepositoryResult};

impl FavoriteReader for DieselRepository {
    fn is_favorite(&self, user_id: &UserId, place_id: PlaceId) -> RepositoryResult<bool> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let count = favorites::table
            .filter(favorites::user_id.eq(user_id.as_str()))
            .filter(favorites::place_id.eq(place_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count > 0)
    }

    fn list_favorites(&self, user_id: &UserId) -> RepositoryResult<Vec<Favorite>> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let items = favorites::table
            .filter(favorites::user_id.eq(user_id.as_str()))
            .order(favorites::created_at.desc())
            .load::<DbFavorite>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Favorite>, _>>()?;

        Ok(items)
    }
}

impl FavoriteWriter for DieselRepository {
    fn add_favorite(&self, user_id: &UserId, place_id: PlaceId) -> RepositoryResult<usize> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let affected = diesel::insert_or_ignore_into(favorites::table)
            .values(NewFavorite {
                user_id: user_id.as_str(),
                place_id: place_id.get(),
            })
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn remove_favorite(&self, user_id: &UserId, place_id: PlaceId) -> RepositoryResult<usize> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id.as_str()))
                .filter(favorites::place_id.eq(place_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
