use crate::db::{scope, DbConnection, RepositoryError};
use crate::models::admin::{Campus, NewCampus};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::error;

#[derive(Clone)]
pub struct CampusOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl CampusOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Campus codes are unique; a duplicate surfaces as a Conflict.
    pub fn create_campus(&self, campus: NewCampus) -> Result<Campus, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_campus: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::campuses::dsl::*;
        diesel::insert_into(campuses)
            .values(&campus)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_campus: error inserting campus '{}': {}",
                    campus.code, e
                );
                RepositoryError::from_diesel(&format!("campus {}", campus.code), e)
            })
    }

    pub fn get_all_campuses(&self) -> Result<Vec<Campus>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_campuses: failed to acquire DB connection: {}", e);
            e
        })?;

        scope::live_campuses()
            .order_by(crate::db::schema::campuses::name.asc())
            .select(Campus::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!("get_all_campuses: error fetching campuses: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }
}
