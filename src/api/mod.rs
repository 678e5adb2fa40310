pub mod admin;
pub mod common;
mod errors;
pub mod users;

use crate::AppState;
pub(crate) use errors::default_error_handler;
use actix_web::{get, web, HttpResponse, Responder};
use utoipa_actix_web::service_config::ServiceConfig;

#[utoipa::path(
    get,
    tag = "Meta",
    path = "/",
    responses((status = 200, description = "Server is reachable")),
    summary = "Liveness banner"
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

#[utoipa::path(
    get,
    tag = "Meta",
    path = "/health",
    responses((status = 200, description = "Service health")),
    summary = "Health check"
)]
#[get("/health")]
async fn health_endpoint() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.app_data(web::JsonConfig::default().error_handler(default_error_handler))
        .service(root_endpoint)
        .service(health_endpoint)
        .configure(|cfg| users::config(cfg, &state.user_ops))
        .configure(|cfg| common::config(cfg, &state.order_ops))
        .configure(|cfg| {
            admin::config(
                cfg,
                &state.campus_ops,
                &state.canteen_ops,
                &state.menu_ops,
                &state.moderation_ops,
                &state.analytics_ops,
            )
        });
}
