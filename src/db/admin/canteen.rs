use crate::db::{scope, DbConnection, RepositoryError};
use crate::models::admin::{Canteen, NewCanteen};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::error;

#[derive(Clone)]
pub struct CanteenOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl CanteenOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Creates a canteen for an existing vendor who does not own one yet,
    /// linking `users.canteen_id` in the same transaction.
    pub fn create_canteen(&self, canteen: NewCanteen) -> Result<Canteen, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_canteen: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            let existing: Option<i32> = {
                use crate::db::schema::users::dsl::*;
                scope::live_users()
                    .filter(user_id.eq(canteen.owner_id))
                    .select(canteen_id)
                    .first::<Option<i32>>(conn)
                    .map_err(|e| {
                        RepositoryError::from_diesel(&format!("user {}", canteen.owner_id), e)
                    })?
            };
            if existing.is_some() {
                return Err(RepositoryError::Conflict(format!(
                    "User {} already owns a canteen",
                    canteen.owner_id
                )));
            }

            let created: Canteen = {
                use crate::db::schema::canteens::dsl::*;
                diesel::insert_into(canteens)
                    .values(&canteen)
                    .get_result(conn)
                    .map_err(|e| {
                        error!(
                            "create_canteen: error inserting canteen '{}': {}",
                            canteen.name, e
                        );
                        RepositoryError::DatabaseError(e)
                    })?
            };

            use crate::db::schema::users::dsl::*;
            diesel::update(users.filter(user_id.eq(created.owner_id)))
                .set(canteen_id.eq(created.canteen_id))
                .execute(conn)
                .map_err(RepositoryError::DatabaseError)?;

            Ok(created)
        })
    }

    pub fn get_canteen(&self, search_canteen_id: i32) -> Result<Canteen, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_canteen: failed to acquire DB connection for canteen {}: {}",
                search_canteen_id, e
            );
            e
        })?;

        scope::live_canteens()
            .filter(crate::db::schema::canteens::canteen_id.eq(search_canteen_id))
            .select(Canteen::as_select())
            .first(conn.connection())
            .map_err(|e| RepositoryError::from_diesel(&format!("canteen {}", search_canteen_id), e))
    }

    pub fn get_canteens_by_campus(
        &self,
        search_campus_id: i32,
    ) -> Result<Vec<Canteen>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_canteens_by_campus: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        scope::live_canteens()
            .filter(crate::db::schema::canteens::campus_id.eq(search_campus_id))
            .order_by(crate::db::schema::canteens::name.asc())
            .select(Canteen::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "get_canteens_by_campus: error fetching canteens for campus {}: {}",
                    search_campus_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    /// Open/close toggle, vendor-gated at the API layer.
    pub fn set_open_state(
        &self,
        search_canteen_id: i32,
        open: bool,
    ) -> Result<Canteen, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "set_open_state: failed to acquire DB connection for canteen {}: {}",
                search_canteen_id, e
            );
            e
        })?;

        use crate::db::schema::canteens::dsl::*;
        diesel::update(
            canteens
                .filter(canteen_id.eq(search_canteen_id))
                .filter(is_deleted.eq(false)),
        )
        .set(is_open.eq(open))
        .get_result(conn.connection())
        .map_err(|e| {
            error!(
                "set_open_state: error updating canteen {}: {}",
                search_canteen_id, e
            );
            RepositoryError::from_diesel(&format!("canteen {}", search_canteen_id), e)
        })
    }
}
