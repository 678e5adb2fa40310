mod common;

use campus_bites::db::{
    DbConnection, OrderActor, OrderLine, OrderOperations, PaymentDetails, RepositoryError,
};
use campus_bites::models::status::{
    OrderStatus, PaymentMethod, PaymentStatus, TxnMode, TxnStatus,
};
use diesel::prelude::*;
use diesel::PgConnection;

fn cod_payment() -> PaymentDetails {
    PaymentDetails {
        method: PaymentMethod::Cod,
        upi_vpa: None,
        card_number: None,
        card_holder: None,
    }
}

fn upi_payment(vpa: &str) -> PaymentDetails {
    PaymentDetails {
        method: PaymentMethod::Upi,
        upi_vpa: Some(vpa.to_string()),
        card_number: None,
        card_holder: None,
    }
}

fn line(item_id: i32, quantity: i16) -> OrderLine {
    OrderLine { item_id, quantity }
}

fn orders_count(conn: &mut PgConnection) -> i64 {
    campus_bites::db::schema::orders::table
        .count()
        .get_result(conn)
        .expect("count orders")
}

fn transactions_count(conn: &mut PgConnection) -> i64 {
    campus_bites::db::schema::transactions::table
        .count()
        .get_result(conn)
        .expect("count transactions")
}

#[actix_rt::test]
async fn create_order_recomputes_total_and_snapshots_items() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let mut conn = DbConnection::new(&pool).expect("db connection");

    let sandwich = fixtures.menu_item_ids[0]; // 100
    let wrap = fixtures.menu_item_ids[1]; // 150

    let order = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(sandwich, 2), line(wrap, 1)],
            cod_payment(),
            Some("12:30".to_string()),
        )
        .expect("create order");

    assert_eq!(order.total_minor, 2 * 100 + 150);
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert!(order.paid_at.is_none());

    use campus_bites::db::schema::order_items::dsl as items_dsl;
    let items = items_dsl::order_items
        .filter(items_dsl::order_id.eq(order.order_id))
        .select((
            items_dsl::item_id,
            items_dsl::name_at_purchase,
            items_dsl::price_minor_at_purchase,
            items_dsl::quantity,
        ))
        .load::<(i32, String, i64, i16)>(conn.connection())
        .expect("order items");

    assert_eq!(items.len(), 2);
    for (item, name, price, qty) in items {
        if item == sandwich {
            assert_eq!(name, "Veg Sandwich");
            assert_eq!(price, 100);
            assert_eq!(qty, 2);
        } else {
            assert_eq!(item, wrap);
            assert_eq!(name, "Chicken Wrap");
            assert_eq!(price, 150);
            assert_eq!(qty, 1);
        }
    }
}

#[actix_rt::test]
async fn create_order_collapses_duplicate_item_lines() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());

    let sandwich = fixtures.menu_item_ids[0];
    let order = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(sandwich, 1), line(sandwich, 2)],
            cod_payment(),
            None,
        )
        .expect("create order");

    assert_eq!(order.total_minor, 3 * 100);

    let mut conn = DbConnection::new(&pool).expect("db connection");
    use campus_bites::db::schema::order_items::dsl as items_dsl;
    let qty: i16 = items_dsl::order_items
        .filter(items_dsl::order_id.eq(order.order_id))
        .select(items_dsl::quantity)
        .first(conn.connection())
        .expect("merged line");
    assert_eq!(qty, 3);
}

#[actix_rt::test]
async fn create_order_writes_ledger_row_in_same_transaction() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let mut conn = DbConnection::new(&pool).expect("db connection");

    let order = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[1], 2)],
            upi_payment("sam@upi"),
            None,
        )
        .expect("create order");

    assert_eq!(order.payment_status, PaymentStatus::Completed);
    assert!(order.transaction_ref.is_some());
    assert!(order.paid_at.is_some());

    use campus_bites::db::schema::transactions::dsl as txn_dsl;
    let (amount, mode, status, txn_student, txn_canteen) = txn_dsl::transactions
        .filter(txn_dsl::order_id.eq(order.order_id))
        .select((
            txn_dsl::amount_minor,
            txn_dsl::mode,
            txn_dsl::status,
            txn_dsl::student_id,
            txn_dsl::canteen_id,
        ))
        .first::<(i64, TxnMode, TxnStatus, i32, i32)>(conn.connection())
        .expect("ledger row");

    assert_eq!(amount, 2 * 150);
    assert_eq!(mode, TxnMode::Online);
    assert_eq!(status, TxnStatus::Paid);
    assert_eq!(txn_student, fixtures.student_id);
    assert_eq!(txn_canteen, fixtures.canteen_id);
}

#[actix_rt::test]
async fn create_order_rejects_empty_item_list_and_persists_nothing() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let mut conn = DbConnection::new(&pool).expect("db connection");

    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            Vec::new(),
            cod_payment(),
            None,
        )
        .expect_err("empty order must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    assert_eq!(orders_count(conn.connection()), 0);
    assert_eq!(transactions_count(conn.connection()), 0);
}

#[actix_rt::test]
async fn create_order_rejects_non_positive_quantity() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());

    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[0], 0)],
            cod_payment(),
            None,
        )
        .expect_err("zero quantity must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[actix_rt::test]
async fn payment_instruments_are_mutually_exclusive() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let sandwich = fixtures.menu_item_ids[0];

    // cod with a vpa
    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(sandwich, 1)],
            PaymentDetails {
                method: PaymentMethod::Cod,
                upi_vpa: Some("sam@upi".to_string()),
                card_number: None,
                card_holder: None,
            },
            None,
        )
        .expect_err("cod with vpa must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    // upi with card fields
    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(sandwich, 1)],
            PaymentDetails {
                method: PaymentMethod::Upi,
                upi_vpa: Some("sam@upi".to_string()),
                card_number: Some("4111111111111111".to_string()),
                card_holder: None,
            },
            None,
        )
        .expect_err("upi with card must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    // upi without a vpa
    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(sandwich, 1)],
            PaymentDetails {
                method: PaymentMethod::Upi,
                upi_vpa: None,
                card_number: None,
                card_holder: None,
            },
            None,
        )
        .expect_err("upi without vpa must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    // card without holder
    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(sandwich, 1)],
            PaymentDetails {
                method: PaymentMethod::Card,
                upi_vpa: None,
                card_number: Some("4111111111111111".to_string()),
                card_holder: None,
            },
            None,
        )
        .expect_err("card without holder must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[actix_rt::test]
async fn card_orders_store_only_the_last_four_digits() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());

    let order = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[0], 1)],
            PaymentDetails {
                method: PaymentMethod::Card,
                upi_vpa: None,
                card_number: Some("4111 1111 1111 1234".to_string()),
                card_holder: Some("Sam Student".to_string()),
            },
            None,
        )
        .expect("create card order");

    assert_eq!(order.card_last_four.as_deref(), Some("1234"));
    assert_eq!(order.payment_status, PaymentStatus::Completed);

    // The full number must not appear anywhere on the row.
    assert!(order.transaction_ref.is_some());
    assert_ne!(order.card_last_four.as_deref(), Some("4111111111111234"));
}

#[actix_rt::test]
async fn create_order_rejects_closed_or_suspended_canteen() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let mut conn = DbConnection::new(&pool).expect("db connection");

    use campus_bites::db::schema::canteens::dsl::*;
    diesel::update(canteens.filter(canteen_id.eq(fixtures.canteen_id)))
        .set(is_open.eq(false))
        .execute(conn.connection())
        .expect("close canteen");

    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[0], 1)],
            cod_payment(),
            None,
        )
        .expect_err("closed canteen must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    diesel::update(canteens.filter(canteen_id.eq(fixtures.canteen_id)))
        .set((is_open.eq(true), is_banned.eq(true)))
        .execute(conn.connection())
        .expect("suspend canteen");

    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[0], 1)],
            cod_payment(),
            None,
        )
        .expect_err("suspended canteen must fail");
    assert!(matches!(err, RepositoryError::Forbidden(_)));
}

#[actix_rt::test]
async fn create_order_rejects_unavailable_and_foreign_items() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let mut conn = DbConnection::new(&pool).expect("db connection");

    use campus_bites::db::schema::menu_items::dsl as menu_dsl;
    diesel::update(menu_dsl::menu_items.filter(menu_dsl::item_id.eq(fixtures.menu_item_ids[0])))
        .set(menu_dsl::is_available.eq(false))
        .execute(conn.connection())
        .expect("hide item");

    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[0], 1)],
            cod_payment(),
            None,
        )
        .expect_err("unavailable item must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    // An item on another canteen's menu cannot be ordered here.
    let other_vendor = campus_bites::test_utils::insert_user(
        conn.connection(),
        "Other Vendor",
        "other-vendor@example.com",
        campus_bites::models::status::UserRole::Vendor,
    )
    .expect("other vendor");
    let other_canteen = campus_bites::test_utils::insert_canteen(
        conn.connection(),
        fixtures.campus_id,
        other_vendor,
        "Other Canteen",
        "Block B",
    )
    .expect("other canteen");
    let foreign_item = campus_bites::test_utils::seed_menu_item(
        conn.connection(),
        other_canteen,
        "Foreign Dish",
        500,
        true,
    )
    .expect("foreign item");

    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(foreign_item, 1)],
            cod_payment(),
            None,
        )
        .expect_err("foreign item must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[actix_rt::test]
async fn get_order_enforces_object_level_authorization() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let mut conn = DbConnection::new(&pool).expect("db connection");

    let order = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[0], 1)],
            cod_payment(),
            None,
        )
        .expect("create order");

    let other_student = campus_bites::test_utils::insert_user(
        conn.connection(),
        "Nina Nosy",
        "nosy@example.com",
        campus_bites::models::status::UserRole::Student,
    )
    .expect("other student");

    let err = order_ops
        .get_order(order.order_id, &OrderActor::Student(other_student))
        .expect_err("foreign student must not read the order");
    assert!(matches!(err, RepositoryError::Forbidden(_)));

    let detail = order_ops
        .get_order(order.order_id, &OrderActor::Student(fixtures.student_id))
        .expect("owner reads own order");
    assert_eq!(detail.order.order_id, order.order_id);
    assert_eq!(detail.items.len(), 1);

    let detail = order_ops
        .get_order(
            order.order_id,
            &OrderActor::Vendor {
                user_id: fixtures.vendor_id,
                canteen_id: fixtures.canteen_id,
            },
        )
        .expect("owning vendor reads the order");
    assert_eq!(detail.order.canteen_id, fixtures.canteen_id);
}

#[actix_rt::test]
async fn list_orders_returns_newest_first_and_skips_deleted() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());

    let first = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[0], 1)],
            cod_payment(),
            None,
        )
        .expect("first order");
    let second = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![line(fixtures.menu_item_ids[1], 1)],
            cod_payment(),
            None,
        )
        .expect("second order");

    let listed = order_ops
        .list_orders_for_student(fixtures.student_id)
        .expect("list orders");
    assert_eq!(listed.len(), 2);

    // Cancel and hide the first order; it must drop out of the listing.
    order_ops
        .transition_status(
            first.order_id,
            OrderStatus::Cancelled,
            &OrderActor::Student(fixtures.student_id),
        )
        .expect("cancel first");
    order_ops
        .soft_delete_order(first.order_id, &OrderActor::Student(fixtures.student_id))
        .expect("hide first");

    let listed = order_ops
        .list_orders_for_student(fixtures.student_id)
        .expect("list orders again");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].order.order_id, second.order_id);
}
