use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::place::RatingSummary;
use crate::domain::review::{NewReview, Review};
use crate::domain::types::{PhotoUrl, PlaceId, ReviewId};
use crate::models::review::{
    NewReview as DbNewReview, NewReviewPhoto, Review as DbReview, ReviewPhoto,
};
use crate::repository::{
    DieselRepository, RepositoryResult, ReviewListQuery, ReviewReader, ReviewWriter,
};

/// Attach photos, author names and place names to loaded review rows.
fn hydrate_reviews(
    conn: &mut SqliteConnection,
    rows: Vec<DbReview>,
) -> RepositoryResult<Vec<Review>> {
    use crate::schema::{places, profiles};

    let photos = ReviewPhoto::belonging_to(&rows)
        .order(crate::schema::review_photos::id.asc())
        .load::<ReviewPhoto>(conn)?
        .grouped_by(&rows);

    let user_ids: Vec<String> = rows.iter().map(|r| r.user_id.clone()).collect();
    let authors: HashMap<String, Option<String>> = profiles::table
        .filter(profiles::user_id.eq_any(user_ids))
        .select((profiles::user_id, profiles::display_name))
        .load::<(String, Option<String>)>(conn)?
        .into_iter()
        .collect();

    let place_ids: Vec<i32> = rows.iter().map(|r| r.place_id).collect();
    let place_names: HashMap<i32, String> = places::table
        .filter(places::id.eq_any(place_ids))
        .select((places::id, places::name))
        .load::<(i32, String)>(conn)?
        .into_iter()
        .collect();

    let reviews = rows
        .into_iter()
        .zip(photos)
        .map(|(row, photos)| {
            let author = authors.get(&row.user_id).cloned().flatten();
            let place_name = place_names.get(&row.place_id).cloned();
            row.into_domain(photos, author, place_name)
        })
        .collect::<Result<Vec<Review>, _>>()?;

    Ok(reviews)
}

impl ReviewReader for DieselRepository {
    fn rating_summaries(
        &self,
        place_ids: &[PlaceId],
    ) -> RepositoryResult<HashMap<PlaceId, RatingSummary>> {
        use crate::schema::reviews;

        if place_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.conn()?;
        let ids: Vec<i32> = place_ids.iter().map(|id| id.get()).collect();

        let rows: Vec<(i32, i32)> = reviews::table
            .filter(reviews::place_id.eq_any(ids))
            .select((reviews::place_id, reviews::rating))
            .load(&mut conn)?;

        let mut ratings: HashMap<i32, Vec<i32>> = HashMap::new();
        for (place_id, rating) in rows {
            ratings.entry(place_id).or_default().push(rating);
        }

        let mut summaries = HashMap::with_capacity(ratings.len());
        for (place_id, values) in ratings {
            summaries.insert(PlaceId::new(place_id)?, RatingSummary::from_ratings(values));
        }
        Ok(summaries)
    }

    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = reviews::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(place_id) = query.place_id {
                items = items.filter(reviews::place_id.eq(place_id.get()));
            }

            if let Some(user_id) = &query.user_id {
                items = items.filter(reviews::user_id.eq(user_id.as_str().to_string()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((reviews::created_at.desc(), reviews::id.desc()));

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let rows = items.load::<DbReview>(&mut conn)?;
        let reviews = hydrate_reviews(&mut conn, rows)?;

        Ok((total, reviews))
    }

    fn get_review_by_id(&self, id: ReviewId) -> RepositoryResult<Option<Review>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let rows = reviews::table
            .filter(reviews::id.eq(id.get()))
            .load::<DbReview>(&mut conn)?;

        Ok(hydrate_reviews(&mut conn, rows)?.into_iter().next())
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, review: &NewReview) -> RepositoryResult<ReviewId> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;
        let db_review: DbNewReview = review.into();

        let id = diesel::insert_into(reviews::table)
            .values(db_review)
            .returning(reviews::id)
            .get_result::<i32>(&mut conn)?;

        Ok(ReviewId::new(id)?)
    }

    fn add_review_photos(
        &self,
        review_id: ReviewId,
        photos: &[PhotoUrl],
    ) -> RepositoryResult<usize> {
        use crate::schema::review_photos;

        if photos.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let rows: Vec<NewReviewPhoto> = photos
            .iter()
            .map(|url| NewReviewPhoto {
                review_id: review_id.get(),
                photo_url: url.as_str().to_string(),
            })
            .collect();

        let affected = conn.transaction(|conn| {
            diesel::insert_into(review_photos::table)
                .values(&rows)
                .execute(conn)
        })?;

        Ok(affected)
    }

    fn delete_review(&self, id: ReviewId) -> RepositoryResult<usize> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(reviews::table.filter(reviews::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
