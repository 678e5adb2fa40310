mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::auth_header;
use serde_json::Value;

#[actix_rt::test]
async fn root_and_health_bypass_auth() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn protected_routes_require_a_token() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;

    // The middleware rejects before a response is built, so the
    // rejection surfaces as a service error.
    let req = test::TestRequest::get().uri("/users/me").to_request();
    let err = test::try_call_service(&app, req)
        .await
        .expect_err("request without a token must be rejected");
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri(&format!("/users/me?as={}", fixtures.student_id))
        .insert_header(auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "student@example.com");
}

#[actix_rt::test]
async fn banned_accounts_are_locked_out() {
    let (app, fixtures, db_url) = common::setup_api_app().await;
    let pool = campus_bites::test_utils::build_test_pool(&db_url);
    let moderation_ops = campus_bites::db::ModerationOperations::new(pool);

    moderation_ops
        .set_ban_state(fixtures.student_id, true)
        .expect("ban student");

    let req = test::TestRequest::get()
        .uri(&format!("/users/me?as={}", fixtures.student_id))
        .insert_header(auth_header())
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .expect_err("banned accounts must be rejected");
    assert_eq!(err.error_response().status(), StatusCode::FORBIDDEN);
}
