use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::campuses)]
#[diesel(primary_key(campus_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Campus {
    pub campus_id: i32,
    pub name: String,
    pub code: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::campuses)]
pub struct NewCampus {
    pub name: String,
    pub code: String,
}

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::canteens)]
#[diesel(primary_key(canteen_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Canteen {
    pub canteen_id: i32,
    pub campus_id: i32,
    pub owner_id: i32,
    pub name: String,
    pub location: String,
    pub is_open: bool,
    pub is_banned: bool,
    pub is_verified: bool,
    pub image_link: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::canteens)]
pub struct NewCanteen {
    pub campus_id: i32,
    pub owner_id: i32,
    pub name: String,
    pub location: String,
    pub image_link: Option<String>,
}

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::menu_items)]
#[diesel(primary_key(item_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MenuItem {
    pub item_id: i32,
    pub canteen_id: i32,
    pub name: String,
    pub price_minor: i64,
    pub category: String,
    pub is_available: bool,
    pub image_link: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::menu_items)]
pub struct NewMenuItem {
    pub canteen_id: i32,
    pub name: String,
    pub price_minor: i64,
    pub category: String,
    pub is_available: bool,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = crate::db::schema::menu_items)]
pub struct UpdateMenuItem {
    pub name: Option<String>,
    pub price_minor: Option<i64>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub image_link: Option<String>,
}
