use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, RepositoryError};
use crate::models::admin::{NewCampus, NewCanteen, NewMenuItem};
use crate::models::status::UserRole;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use std::sync::Once;

// Fixture strategy:
// - One campus, one admin, one vendor with a canteen, one student.
// - Two priced menu items on the vendor's canteen.
const TEST_DEV_BYPASS_TOKEN: &str = "test-bypass-token";
const TEST_JWT_SECRET: &str = "test-jwt-secret";
static TEST_THREADS_GUARD: Once = Once::new();

fn ensure_single_threaded_tests() {
    TEST_THREADS_GUARD.call_once(|| {
        let threads = test_threads_from_args().or_else(|| std::env::var("RUST_TEST_THREADS").ok());
        if threads.as_deref() != Some("1") {
            panic!(
                "Tests must run with --test-threads=1 or RUST_TEST_THREADS=1 because init_test_env mutates environment variables."
            );
        }
    });
}

fn test_threads_from_args() -> Option<String> {
    let mut args = std::env::args();
    while let Some(arg) = args.next() {
        if arg == "--test-threads" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--test-threads=") {
            return Some(value.to_string());
        }
    }
    None
}

fn set_env_if_unset(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

pub fn init_test_env() {
    ensure_single_threaded_tests();
    set_env_if_unset("DEV_BYPASS_TOKEN", TEST_DEV_BYPASS_TOKEN);
    set_env_if_unset("AUTH_JWT_SECRET", TEST_JWT_SECRET);
}

pub fn dev_bypass_token() -> String {
    std::env::var("DEV_BYPASS_TOKEN").unwrap_or_else(|_| TEST_DEV_BYPASS_TOKEN.to_string())
}

pub fn build_test_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    let pool = establish_connection_pool(database_url);
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE transactions, order_items, orders, menu_items, canteens, users, \
         campuses RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub campus_id: i32,
    pub admin_id: i32,
    pub vendor_id: i32,
    pub canteen_id: i32,
    pub student_id: i32,
    pub menu_item_ids: Vec<i32>,
}

pub fn seed_basic_fixtures(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let campus_id = insert_campus(conn.connection(), "North Campus", "NC")?;
    let admin_id = insert_user(conn.connection(), "Ada Admin", "admin@example.com", UserRole::Admin)?;
    let vendor_id = insert_user(
        conn.connection(),
        "Vik Vendor",
        "vendor@example.com",
        UserRole::Vendor,
    )?;
    let canteen_id = insert_canteen(conn.connection(), campus_id, vendor_id, "Test Canteen", "Block A")?;
    link_vendor_canteen(conn.connection(), vendor_id, canteen_id)?;
    let student_id = insert_user(
        conn.connection(),
        "Sam Student",
        "student@example.com",
        UserRole::Student,
    )?;

    let sandwich_id = seed_menu_item(conn.connection(), canteen_id, "Veg Sandwich", 100, true)?;
    let wrap_id = seed_menu_item(conn.connection(), canteen_id, "Chicken Wrap", 150, true)?;

    Ok(TestFixtures {
        campus_id,
        admin_id,
        vendor_id,
        canteen_id,
        student_id,
        menu_item_ids: vec![sandwich_id, wrap_id],
    })
}

pub fn insert_campus(
    conn: &mut PgConnection,
    name_val: &str,
    code_val: &str,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::campuses::dsl::*;

    let new_campus = NewCampus {
        name: name_val.to_string(),
        code: code_val.to_string(),
    };

    diesel::insert_into(campuses)
        .values(&new_campus)
        .returning(campus_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_user(
    conn: &mut PgConnection,
    name_val: &str,
    email_val: &str,
    role_val: UserRole,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    diesel::insert_into(users)
        .values((name.eq(name_val), email.eq(email_val), role.eq(role_val)))
        .returning(user_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_canteen(
    conn: &mut PgConnection,
    campus_id_val: i32,
    owner_id_val: i32,
    name_val: &str,
    location_val: &str,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::canteens::dsl::*;

    let new_canteen = NewCanteen {
        campus_id: campus_id_val,
        owner_id: owner_id_val,
        name: name_val.to_string(),
        location: location_val.to_string(),
        image_link: None,
    };

    diesel::insert_into(canteens)
        .values(&new_canteen)
        .returning(canteen_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn link_vendor_canteen(
    conn: &mut PgConnection,
    user_id_val: i32,
    canteen_id_val: i32,
) -> Result<(), RepositoryError> {
    use crate::db::schema::users::dsl::*;

    diesel::update(users.filter(user_id.eq(user_id_val)))
        .set(canteen_id.eq(Some(canteen_id_val)))
        .execute(conn)
        .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub fn seed_menu_item(
    conn: &mut PgConnection,
    canteen_id_val: i32,
    name_val: &str,
    price_minor_val: i64,
    is_available_val: bool,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::menu_items::dsl::*;

    let new_item = NewMenuItem {
        canteen_id: canteen_id_val,
        name: name_val.to_string(),
        price_minor: price_minor_val,
        category: "general".to_string(),
        is_available: is_available_val,
        image_link: None,
    };

    diesel::insert_into(menu_items)
        .values(&new_item)
        .returning(item_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}
