#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod db;
pub mod enums;
pub mod models;
pub mod test_utils;

use crate::db::{
    establish_connection_pool, run_db_migrations, AnalyticsOperations, CampusOperations,
    CanteenOperations, MenuOperations, ModerationOperations, OrderOperations, UserOperations,
};

#[derive(Clone)]
pub struct AppState {
    pub user_ops: UserOperations,
    pub campus_ops: CampusOperations,
    pub canteen_ops: CanteenOperations,
    pub menu_ops: MenuOperations,
    pub order_ops: OrderOperations,
    pub moderation_ops: ModerationOperations,
    pub analytics_ops: AnalyticsOperations,
}

impl AppState {
    pub fn new(url: &str) -> Self {
        let db = establish_connection_pool(url);
        run_db_migrations(db.clone()).expect("Unable to run migrations");

        AppState {
            user_ops: UserOperations::new(db.clone()),
            campus_ops: CampusOperations::new(db.clone()),
            canteen_ops: CanteenOperations::new(db.clone()),
            menu_ops: MenuOperations::new(db.clone()),
            order_ops: OrderOperations::new(db.clone()),
            moderation_ops: ModerationOperations::new(db.clone()),
            analytics_ops: AnalyticsOperations::new(db),
        }
    }
}
