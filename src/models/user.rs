use crate::models::status::UserRole;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_banned: bool,
    pub is_verified: bool,
    pub canteen_id: Option<i32>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}
