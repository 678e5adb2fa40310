mod common;

use campus_bites::db::{
    CampusOperations, CanteenOperations, MenuOperations, OrderActor, OrderLine, OrderOperations,
    PaymentDetails, RepositoryError,
};
use campus_bites::models::admin::{NewCampus, NewCanteen, NewMenuItem, UpdateMenuItem};
use campus_bites::models::status::PaymentMethod;

#[actix_rt::test]
async fn campus_codes_must_be_unique() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let campus_ops = CampusOperations::new(pool.clone());

    let err = campus_ops
        .create_campus(NewCampus {
            name: "North Again".to_string(),
            code: "NC".to_string(),
        })
        .expect_err("duplicate code must fail");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let listed = campus_ops.get_all_campuses().expect("list campuses");
    assert_eq!(listed.len(), 1);
}

#[actix_rt::test]
async fn a_vendor_owns_at_most_one_canteen() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let canteen_ops = CanteenOperations::new(pool.clone());

    let err = canteen_ops
        .create_canteen(NewCanteen {
            campus_id: fixtures.campus_id,
            owner_id: fixtures.vendor_id,
            name: "Second Stall".to_string(),
            location: "Block D".to_string(),
            image_link: None,
        })
        .expect_err("vendor already owns a canteen");
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[actix_rt::test]
async fn open_state_toggles_and_lists_by_campus() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let canteen_ops = CanteenOperations::new(pool.clone());

    let canteen = canteen_ops
        .set_open_state(fixtures.canteen_id, false)
        .expect("close canteen");
    assert!(!canteen.is_open);

    let canteens = canteen_ops
        .get_canteens_by_campus(fixtures.campus_id)
        .expect("list canteens");
    assert_eq!(canteens.len(), 1);
    assert!(!canteens[0].is_open);
}

#[actix_rt::test]
async fn menu_item_rejects_negative_prices() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool.clone());

    let err = menu_ops
        .create_menu_item(NewMenuItem {
            canteen_id: fixtures.canteen_id,
            name: "Anti-Matter Snack".to_string(),
            price_minor: -1,
            category: "general".to_string(),
            is_available: true,
            image_link: None,
        })
        .expect_err("negative price must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    let err = menu_ops
        .update_menu_item(
            fixtures.menu_item_ids[0],
            UpdateMenuItem {
                name: None,
                price_minor: Some(-5),
                category: None,
                is_available: None,
                image_link: None,
            },
        )
        .expect_err("negative price update must fail");
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[actix_rt::test]
async fn price_updates_do_not_rewrite_past_order_snapshots() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool.clone());
    let order_ops = OrderOperations::new(pool.clone());

    let sandwich = fixtures.menu_item_ids[0]; // 100 at purchase time
    let order = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![OrderLine {
                item_id: sandwich,
                quantity: 1,
            }],
            PaymentDetails {
                method: PaymentMethod::Cod,
                upi_vpa: None,
                card_number: None,
                card_holder: None,
            },
            None,
        )
        .expect("create order");

    menu_ops
        .update_menu_item(
            sandwich,
            UpdateMenuItem {
                name: Some("Deluxe Veg Sandwich".to_string()),
                price_minor: Some(999),
                category: None,
                is_available: None,
                image_link: None,
            },
        )
        .expect("raise price");

    let detail = order_ops
        .get_order(order.order_id, &OrderActor::Student(fixtures.student_id))
        .expect("read back order");
    assert_eq!(detail.order.total_minor, 100);
    assert_eq!(detail.items[0].price_minor_at_purchase, 100);
    assert_eq!(detail.items[0].name_at_purchase, "Veg Sandwich");
}

#[actix_rt::test]
async fn soft_deleted_menu_items_drop_out_of_the_menu_and_new_orders() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool.clone());
    let order_ops = OrderOperations::new(pool.clone());

    let sandwich = fixtures.menu_item_ids[0];
    menu_ops
        .soft_delete_menu_item(sandwich)
        .expect("hide item");

    let menu = menu_ops
        .get_menu_for_canteen(fixtures.canteen_id)
        .expect("list menu");
    assert_eq!(menu.len(), 1);
    assert_ne!(menu[0].item_id, sandwich);

    let err = order_ops
        .create_order(
            fixtures.student_id,
            fixtures.canteen_id,
            vec![OrderLine {
                item_id: sandwich,
                quantity: 1,
            }],
            PaymentDetails {
                method: PaymentMethod::Cod,
                upi_vpa: None,
                card_number: None,
                card_holder: None,
            },
            None,
        )
        .expect_err("hidden item cannot be ordered");
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    // Hiding twice reports not found.
    let err = menu_ops
        .soft_delete_menu_item(sandwich)
        .expect_err("already hidden");
    assert!(matches!(err, RepositoryError::NotFound(_)));
}
