use crate::db::{DbConnection, RepositoryError};
use crate::models::user::User;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::{error, info};

#[derive(Clone)]
pub struct ModerationOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl ModerationOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// The single ban-state function: updates the user's flag and, when the
    /// user owns a canteen, the canteen's flag to the same value in one
    /// transaction. Banning a vendor suspends the canteen; unbanning lifts
    /// the suspension. Suspend-canteen endpoints resolve the owner and call
    /// this, so the two flags can never diverge.
    pub fn set_ban_state(&self, target_user_id: i32, banned: bool) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "set_ban_state: failed to acquire DB connection for user {}: {}",
                target_user_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            let user: User = {
                use crate::db::schema::users::dsl::*;
                diesel::update(users.filter(user_id.eq(target_user_id)))
                    .set(is_banned.eq(banned))
                    .get_result(conn)
                    .map_err(|e| {
                        error!(
                            "set_ban_state: error updating user {}: {}",
                            target_user_id, e
                        );
                        RepositoryError::from_diesel(&format!("user {}", target_user_id), e)
                    })?
            };

            if let Some(owned_canteen_id) = user.canteen_id {
                use crate::db::schema::canteens::dsl::*;
                diesel::update(canteens.filter(canteen_id.eq(owned_canteen_id)))
                    .set(is_banned.eq(banned))
                    .execute(conn)
                    .map_err(|e| {
                        error!(
                            "set_ban_state: error updating canteen {}: {}",
                            owned_canteen_id, e
                        );
                        RepositoryError::DatabaseError(e)
                    })?;
            }

            info!(
                "set_ban_state: user {} banned={} (canteen {:?})",
                target_user_id, banned, user.canteen_id
            );
            Ok(user)
        })
    }

    /// Suspension addressed by canteen id: resolves the owner and applies
    /// the same bidirectional ban invariant.
    pub fn set_canteen_suspension(
        &self,
        target_canteen_id: i32,
        suspended: bool,
    ) -> Result<User, RepositoryError> {
        let owner_id_val: i32 = {
            let mut conn = DbConnection::new(&self.pool).map_err(|e| {
                error!(
                    "set_canteen_suspension: failed to acquire DB connection for canteen {}: {}",
                    target_canteen_id, e
                );
                e
            })?;

            use crate::db::schema::canteens::dsl::*;
            canteens
                .filter(canteen_id.eq(target_canteen_id))
                .select(owner_id)
                .first(conn.connection())
                .map_err(|e| {
                    RepositoryError::from_diesel(&format!("canteen {}", target_canteen_id), e)
                })?
        };

        self.set_ban_state(owner_id_val, suspended)
    }

    /// Vendor approval mirrors `is_verified` across the user and its
    /// canteen, same shape as the ban cascade.
    pub fn set_vendor_approval(
        &self,
        target_user_id: i32,
        approved: bool,
    ) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "set_vendor_approval: failed to acquire DB connection for user {}: {}",
                target_user_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            let user: User = {
                use crate::db::schema::users::dsl::*;
                diesel::update(users.filter(user_id.eq(target_user_id)))
                    .set(is_verified.eq(approved))
                    .get_result(conn)
                    .map_err(|e| {
                        error!(
                            "set_vendor_approval: error updating user {}: {}",
                            target_user_id, e
                        );
                        RepositoryError::from_diesel(&format!("user {}", target_user_id), e)
                    })?
            };

            if let Some(owned_canteen_id) = user.canteen_id {
                use crate::db::schema::canteens::dsl::*;
                diesel::update(canteens.filter(canteen_id.eq(owned_canteen_id)))
                    .set(is_verified.eq(approved))
                    .execute(conn)
                    .map_err(RepositoryError::DatabaseError)?;
            }

            info!(
                "set_vendor_approval: user {} approved={}",
                target_user_id, approved
            );
            Ok(user)
        })
    }
}
