//! Soft-delete query scopes.
//!
//! Every read that feeds listings or analytics starts from one of these
//! helpers instead of the raw table, so the `is_deleted = false` predicate
//! cannot be forgotten at a call site.

use crate::db::schema::{campuses, canteens, menu_items, orders, transactions, users};
use diesel::dsl::{Eq, Filter};
use diesel::prelude::*;

pub type Live<Src, Col> = Filter<Src, Eq<Col, bool>>;

pub fn live_users() -> Live<users::table, users::is_deleted> {
    users::table.filter(users::is_deleted.eq(false))
}

pub fn live_campuses() -> Live<campuses::table, campuses::is_deleted> {
    campuses::table.filter(campuses::is_deleted.eq(false))
}

pub fn live_canteens() -> Live<canteens::table, canteens::is_deleted> {
    canteens::table.filter(canteens::is_deleted.eq(false))
}

pub fn live_menu_items() -> Live<menu_items::table, menu_items::is_deleted> {
    menu_items::table.filter(menu_items::is_deleted.eq(false))
}

pub fn live_orders() -> Live<orders::table, orders::is_deleted> {
    orders::table.filter(orders::is_deleted.eq(false))
}

pub fn live_transactions() -> Live<transactions::table, transactions::is_deleted> {
    transactions::table.filter(transactions::is_deleted.eq(false))
}
