use crate::db::{scope, DbConnection, RepositoryError};
use crate::models::status::UserRole;
use crate::models::user::{NewUser, User};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::error;

#[derive(Clone)]
pub struct UserOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl UserOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Registers a student or admin account. Vendor accounts go through
    /// `register_vendor` so the canteen link is created in the same step.
    pub fn register_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("register_user: failed to acquire DB connection: {}", e);
            e
        })?;

        if new_user.role == UserRole::Vendor {
            return Err(RepositoryError::ValidationError(
                "Vendor accounts must register with a canteen".to_string(),
            ));
        }

        use crate::db::schema::users::dsl::*;
        diesel::insert_into(users)
            .values(&new_user)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "register_user: error inserting user with email '{}': {}",
                    new_user.email, e
                );
                RepositoryError::from_diesel(&format!("user {}", new_user.email), e)
            })
    }

    /// Registers a vendor together with its canteen. A vendor owns exactly
    /// one canteen; both rows are created in one transaction and linked in
    /// both directions.
    pub fn register_vendor(
        &self,
        name_val: &str,
        email_val: &str,
        campus_id_val: i32,
        canteen_name_val: &str,
        location_val: &str,
    ) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("register_vendor: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            {
                use crate::db::schema::campuses::dsl::*;
                scope::live_campuses()
                    .filter(campus_id.eq(campus_id_val))
                    .select(campus_id)
                    .first::<i32>(conn)
                    .map_err(|e| {
                        RepositoryError::from_diesel(&format!("campus {}", campus_id_val), e)
                    })?;
            }

            let user: User = {
                use crate::db::schema::users::dsl::*;
                diesel::insert_into(users)
                    .values((
                        name.eq(name_val),
                        email.eq(email_val),
                        role.eq(UserRole::Vendor),
                    ))
                    .get_result(conn)
                    .map_err(|e| {
                        error!(
                            "register_vendor: error inserting user with email '{}': {}",
                            email_val, e
                        );
                        RepositoryError::from_diesel(&format!("user {}", email_val), e)
                    })?
            };

            let new_canteen_id: i32 = {
                use crate::db::schema::canteens::dsl::*;
                diesel::insert_into(canteens)
                    .values((
                        campus_id.eq(campus_id_val),
                        owner_id.eq(user.user_id),
                        name.eq(canteen_name_val),
                        location.eq(location_val),
                    ))
                    .returning(canteen_id)
                    .get_result(conn)
                    .map_err(RepositoryError::DatabaseError)?
            };

            use crate::db::schema::users::dsl::*;
            diesel::update(users.filter(user_id.eq(user.user_id)))
                .set(canteen_id.eq(new_canteen_id))
                .get_result::<User>(conn)
                .map_err(RepositoryError::DatabaseError)
        })
    }

    pub fn get_user_by_id(&self, search_user_id: i32) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_user_by_id: failed to acquire DB connection for user {}: {}",
                search_user_id, e
            );
            e
        })?;

        scope::live_users()
            .filter(crate::db::schema::users::user_id.eq(search_user_id))
            .select(User::as_select())
            .first(conn.connection())
            .map_err(|e| RepositoryError::from_diesel(&format!("user {}", search_user_id), e))
    }

    pub fn get_user_by_email(&self, email_addr: &str) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        scope::live_users()
            .filter(crate::db::schema::users::email.eq(email_addr))
            .select(User::as_select())
            .first(conn.connection())
            .map_err(|e| {
                error!(
                    "get_user_by_email: error fetching user with email '{}': {}",
                    email_addr, e
                );
                RepositoryError::from_diesel(&format!("user {}", email_addr), e)
            })
    }
}
