use crate::db::{scope, DbConnection, RepositoryError};
use crate::models::admin::{MenuItem, NewMenuItem, UpdateMenuItem};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::error;

#[derive(Clone)]
pub struct MenuOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl MenuOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_menu_item: failed to acquire DB connection: {}", e);
            e
        })?;

        if item.price_minor < 0 {
            return Err(RepositoryError::ValidationError(format!(
                "Item '{}' has a negative price",
                item.name
            )));
        }

        use crate::db::schema::menu_items::dsl::*;
        diesel::insert_into(menu_items)
            .values(&item)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_menu_item: error inserting item '{}': {}",
                    item.name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    /// Price updates only touch the catalog row; snapshots taken by past
    /// orders keep the price that was current at purchase time.
    pub fn update_menu_item(
        &self,
        search_item_id: i32,
        changes: UpdateMenuItem,
    ) -> Result<MenuItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_menu_item: failed to acquire DB connection for item {}: {}",
                search_item_id, e
            );
            e
        })?;

        if matches!(changes.price_minor, Some(p) if p < 0) {
            return Err(RepositoryError::ValidationError(format!(
                "Item {} cannot have a negative price",
                search_item_id
            )));
        }

        use crate::db::schema::menu_items::dsl::*;
        diesel::update(
            menu_items
                .filter(item_id.eq(search_item_id))
                .filter(is_deleted.eq(false)),
        )
        .set(&changes)
        .get_result(conn.connection())
        .map_err(|e| {
            error!(
                "update_menu_item: error updating item {}: {}",
                search_item_id, e
            );
            RepositoryError::from_diesel(&format!("menu item {}", search_item_id), e)
        })
    }

    pub fn get_menu_for_canteen(
        &self,
        search_canteen_id: i32,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_menu_for_canteen: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        scope::live_menu_items()
            .filter(crate::db::schema::menu_items::canteen_id.eq(search_canteen_id))
            .order_by(crate::db::schema::menu_items::name.asc())
            .select(MenuItem::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "get_menu_for_canteen: error fetching items for canteen {}: {}",
                    search_canteen_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_menu_item(&self, search_item_id: i32) -> Result<MenuItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_menu_item: failed to acquire DB connection for item {}: {}",
                search_item_id, e
            );
            e
        })?;

        scope::live_menu_items()
            .filter(crate::db::schema::menu_items::item_id.eq(search_item_id))
            .select(MenuItem::as_select())
            .first(conn.connection())
            .map_err(|e| RepositoryError::from_diesel(&format!("menu item {}", search_item_id), e))
    }

    pub fn soft_delete_menu_item(&self, search_item_id: i32) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "soft_delete_menu_item: failed to acquire DB connection for item {}: {}",
                search_item_id, e
            );
            e
        })?;

        use crate::db::schema::menu_items::dsl::*;
        let affected = diesel::update(
            menu_items
                .filter(item_id.eq(search_item_id))
                .filter(is_deleted.eq(false)),
        )
        .set((is_deleted.eq(true), is_available.eq(false)))
        .execute(conn.connection())
        .map_err(RepositoryError::DatabaseError)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "menu item {}",
                search_item_id
            )));
        }
        Ok(())
    }
}
