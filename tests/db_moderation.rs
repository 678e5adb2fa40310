mod common;

use campus_bites::db::{DbConnection, ModerationOperations, RepositoryError};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

fn user_flags(pool: &Pool<ConnectionManager<PgConnection>>, user_id_val: i32) -> (bool, bool) {
    use campus_bites::db::schema::users::dsl::*;
    let mut conn = DbConnection::new(pool).expect("db connection");
    users
        .filter(user_id.eq(user_id_val))
        .select((is_banned, is_verified))
        .first(conn.connection())
        .expect("user flags")
}

fn canteen_flags(pool: &Pool<ConnectionManager<PgConnection>>, canteen_id_val: i32) -> (bool, bool) {
    use campus_bites::db::schema::canteens::dsl::*;
    let mut conn = DbConnection::new(pool).expect("db connection");
    canteens
        .filter(canteen_id.eq(canteen_id_val))
        .select((is_banned, is_verified))
        .first(conn.connection())
        .expect("canteen flags")
}

#[actix_rt::test]
async fn banning_a_vendor_suspends_their_canteen_and_back() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let moderation_ops = ModerationOperations::new(pool.clone());

    let user = moderation_ops
        .set_ban_state(fixtures.vendor_id, true)
        .expect("ban vendor");
    assert!(user.is_banned);
    assert_eq!(user_flags(&pool, fixtures.vendor_id).0, true);
    assert_eq!(canteen_flags(&pool, fixtures.canteen_id).0, true);

    let user = moderation_ops
        .set_ban_state(fixtures.vendor_id, false)
        .expect("unban vendor");
    assert!(!user.is_banned);
    assert_eq!(user_flags(&pool, fixtures.vendor_id).0, false);
    assert_eq!(canteen_flags(&pool, fixtures.canteen_id).0, false);
}

#[actix_rt::test]
async fn suspending_by_canteen_id_bans_the_owner() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let moderation_ops = ModerationOperations::new(pool.clone());

    let user = moderation_ops
        .set_canteen_suspension(fixtures.canteen_id, true)
        .expect("suspend canteen");
    assert_eq!(user.user_id, fixtures.vendor_id);
    assert!(user.is_banned);
    assert_eq!(canteen_flags(&pool, fixtures.canteen_id).0, true);

    // Lifting the suspension unbans the owner through the same path.
    moderation_ops
        .set_canteen_suspension(fixtures.canteen_id, false)
        .expect("reinstate canteen");
    assert_eq!(user_flags(&pool, fixtures.vendor_id).0, false);
    assert_eq!(canteen_flags(&pool, fixtures.canteen_id).0, false);
}

#[actix_rt::test]
async fn banning_a_student_touches_no_canteen() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let moderation_ops = ModerationOperations::new(pool.clone());

    moderation_ops
        .set_ban_state(fixtures.student_id, true)
        .expect("ban student");
    assert_eq!(user_flags(&pool, fixtures.student_id).0, true);
    assert_eq!(canteen_flags(&pool, fixtures.canteen_id).0, false);
}

#[actix_rt::test]
async fn approval_mirrors_verification_onto_the_canteen() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let moderation_ops = ModerationOperations::new(pool.clone());

    let user = moderation_ops
        .set_vendor_approval(fixtures.vendor_id, true)
        .expect("approve vendor");
    assert!(user.is_verified);
    assert_eq!(user_flags(&pool, fixtures.vendor_id).1, true);
    assert_eq!(canteen_flags(&pool, fixtures.canteen_id).1, true);

    moderation_ops
        .set_vendor_approval(fixtures.vendor_id, false)
        .expect("revoke approval");
    assert_eq!(user_flags(&pool, fixtures.vendor_id).1, false);
    assert_eq!(canteen_flags(&pool, fixtures.canteen_id).1, false);
}

#[actix_rt::test]
async fn moderating_unknown_targets_returns_not_found() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let moderation_ops = ModerationOperations::new(pool.clone());

    let err = moderation_ops
        .set_ban_state(9999, true)
        .expect_err("unknown user");
    assert!(matches!(err, RepositoryError::NotFound(_)));

    let err = moderation_ops
        .set_canteen_suspension(9999, true)
        .expect_err("unknown canteen");
    assert!(matches!(err, RepositoryError::NotFound(_)));
}
