use crate::api::errors::{client_message, error_status};
use crate::auth::extractors::AdminPrincipal;
use crate::db::CampusOperations;
use crate::enums::admin::{CampusListResponse, CampusResponse};
use crate::models::admin::NewCampus;
use actix_web::{get, post, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Campus",
    path = "",
    request_body = NewCampus,
    responses(
        (status = 200, description = "Campus created", body = CampusResponse),
        (status = 409, description = "Campus code already taken", body = CampusResponse),
    ),
    summary = "Create a campus"
)]
#[post("")]
pub(super) async fn create_campus(
    campus_ops: web::Data<CampusOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<NewCampus>,
) -> impl Responder {
    match campus_ops.create_campus(req_data.into_inner()) {
        Ok(campus) => {
            debug!("create_campus: created campus {}", campus.campus_id);
            HttpResponse::Ok().json(CampusResponse {
                status: "ok".to_string(),
                data: Some(campus),
                error: None,
            })
        }
        Err(e) => {
            error!("create_campus: {}", e);
            HttpResponse::build(error_status(&e)).json(CampusResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Campus",
    path = "",
    responses(
        (status = 200, description = "All live campuses", body = CampusListResponse),
    ),
    summary = "List campuses"
)]
#[get("")]
pub(super) async fn get_all_campuses(campus_ops: web::Data<CampusOperations>) -> impl Responder {
    match campus_ops.get_all_campuses() {
        Ok(data) => HttpResponse::Ok().json(CampusListResponse {
            status: "ok".to_string(),
            data,
            error: None,
        }),
        Err(e) => {
            error!("get_all_campuses: {}", e);
            HttpResponse::build(error_status(&e)).json(CampusListResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(client_message(&e)),
            })
        }
    }
}
