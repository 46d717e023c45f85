use diesel::prelude::*;

use crate::domain::menu::{MenuItem, NewMenuItem};
use crate::domain::types::{MenuItemId, PlaceId};
use crate::models::menu::{MenuItem as DbMenuItem, NewMenuItem as DbNewMenuItem};
use crate::repository::{DieselRepository, MenuReader, MenuWriter, RepositoryResult};

impl MenuReader for DieselRepository {
    fn list_menu_items(
        &self,
        place_id: PlaceId,
        visible_only: bool,
    ) -> RepositoryResult<Vec<MenuItem>> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let mut items = menu_items::table
            .filter(menu_items::place_id.eq(place_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if visible_only {
            items = items.filter(menu_items::is_visible.eq(true));
        }

        let items = items
            .order((menu_items::created_at.desc(), menu_items::id.desc()))
            .load::<DbMenuItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<MenuItem>, _>>()?;

        Ok(items)
    }

    fn get_menu_item_by_id(&self, id: MenuItemId) -> RepositoryResult<Option<MenuItem>> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let item = menu_items::table
            .filter(menu_items::id.eq(id.get()))
            .first::<DbMenuItem>(&mut conn)
            .optional()?;

        Ok(item.map(TryInto::try_into).transpose()?)
    }
}

impl MenuWriter for DieselRepository {
    fn create_menu_item(&self, item: &NewMenuItem) -> RepositoryResult<usize> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;
        let db_item: DbNewMenuItem = item.clone().into();

        let affected = diesel::insert_into(menu_items::table)
            .values(db_item)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_menu_item(&self, id: MenuItemId, item: &NewMenuItem) -> RepositoryResult<usize> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;
        let changes: DbNewMenuItem = item.clone().into();

        let affected = diesel::update(menu_items::table.filter(menu_items::id.eq(id.get())))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_menu_item_visibility(
        &self,
        id: MenuItemId,
        is_visible: bool,
    ) -> RepositoryResult<usize> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let affected = diesel::update(menu_items::table.filter(menu_items::id.eq(id.get())))
            .set(menu_items::is_visible.eq(is_visible))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_menu_item(&self, id: MenuItemId) -> RepositoryResult<usize> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let affected = diesel::delete(menu_items::table.filter(menu_items::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
