use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::place::{NewPlace, Place};
use crate::domain::types::{CategoryId, PlaceId, Slug};
use crate::models::place::{NewPlace as DbNewPlace, Place as DbPlace};
use crate::repository::{
    DieselRepository, PlaceListQuery, PlaceOrder, PlaceReader, PlaceWriter, RepositoryResult,
};

impl PlaceReader for DieselRepository {
    fn list_places(&self, query: PlaceListQuery) -> RepositoryResult<(usize, Vec<Place>)> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = places::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(places::category_id.eq(category_id.get()));
            }

            if query.visible_only {
                items = items.filter(places::is_visible.eq(true));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        items = match query.order {
            PlaceOrder::Name => items.order(places::name.asc()),
            PlaceOrder::NewestFirst => items.order((places::created_at.desc(), places::id.desc())),
        };

        let items = items
            .load::<DbPlace>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Place>, _>>()?;

        Ok((total, items))
    }

    fn get_place_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Place>> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let place = places::table
            .filter(places::slug.eq(slug.as_str()))
            .first::<DbPlace>(&mut conn)
            .optional()?;

        Ok(place.map(TryInto::try_into).transpose()?)
    }

    fn get_place_by_id(&self, id: PlaceId) -> RepositoryResult<Option<Place>> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let place = places::table
            .filter(places::id.eq(id.get()))
            .first::<DbPlace>(&mut conn)
            .optional()?;

        Ok(place.map(TryInto::try_into).transpose()?)
    }

    fn count_visible_places(&self, category_id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let count = places::table
            .filter(places::category_id.eq(category_id.get()))
            .filter(places::is_visible.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count as usize)
    }

    fn count_visible_places_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let rows: Vec<(Option<i32>, i64)> = places::table
            .filter(places::is_visible.eq(true))
            .filter(places::category_id.is_not_null())
            .group_by(places::category_id)
            .select((places::category_id, diesel::dsl::count_star()))
            .load(&mut conn)?;

        let mut counts = HashMap::with_capacity(rows.len());
        for (category_id, count) in rows {
            if let Some(category_id) = category_id {
                counts.insert(CategoryId::new(category_id)?, count as usize);
            }
        }
        Ok(counts)
    }
}

impl PlaceWriter for DieselRepository {
    fn create_place(&self, place: &NewPlace) -> RepositoryResult<Place> {
        use crate::schema::places;

        let mut conn = self.conn()?;
        let db_place: DbNewPlace = place.clone().into();

        let created = diesel::insert_into(places::table)
            .values(db_place)
            .get_result::<DbPlace>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_place(&self, id: PlaceId, place: &NewPlace) -> RepositoryResult<usize> {
        use crate::schema::places;

        let mut conn = self.conn()?;
        let changes: DbNewPlace = place.clone().into();

        let affected = diesel::update(places::table.filter(places::id.eq(id.get())))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_place_visibility(&self, id: PlaceId, is_visible: bool) -> RepositoryResult<usize> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let affected = diesel::update(places::table.filter(places::id.eq(id.get())))
            .set((
                places::is_visible.eq(is_visible),
                places::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_place(&self, id: PlaceId) -> RepositoryResult<usize> {
        use crate::schema::places;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(places::table.filter(places::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
