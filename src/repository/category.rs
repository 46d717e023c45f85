use diesel::prelude::*;

use crate::domain::category::{CategoryNode, NewCategory};
use crate::domain::types::{CategoryId, Slug};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, RepositoryResult,
};

impl CategoryReader for DieselRepository {
    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<CategoryNode>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<CategoryNode>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }

    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<CategoryNode>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(parent_id) = query.parent_id {
            items = items.filter(categories::parent_id.eq(parent_id.get()));
        }
        if let Some(category_type) = query.category_type {
            items = items.filter(categories::category_type.eq(category_type.as_str()));
        }

        let items = items
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CategoryNode>, _>>()?;

        Ok(items)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryNode> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn create_categories(&self, categories_to_add: &[NewCategory]) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let rows: Vec<DbNewCategory> = categories_to_add.iter().cloned().map(Into::into).collect();

        let affected = conn.transaction(|conn| {
            diesel::insert_into(categories::table)
                .values(&rows)
                .execute(conn)
        })?;

        Ok(affected)
    }

    fn update_category(&self, id: CategoryId, category: &NewCategory) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let changes: DbNewCategory = category.clone().into();

        let affected = diesel::update(categories::table.filter(categories::id.eq(id.get())))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(categories::table.filter(categories::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
