use crate::api::errors::{client_message, error_status};
use crate::auth::extractors::{AdminPrincipal, VendorPrincipal};
use crate::db::CanteenOperations;
use crate::enums::admin::{CanteenListResponse, CanteenResponse, CreateCanteenReq, OpenStateReq};
use crate::models::admin::NewCanteen;
use actix_web::{get, post, put, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Canteen",
    path = "",
    request_body = CreateCanteenReq,
    responses(
        (status = 200, description = "Canteen created and linked to its owner", body = CanteenResponse),
        (status = 409, description = "Owner already has a canteen", body = CanteenResponse),
    ),
    summary = "Create a canteen for an existing vendor"
)]
#[post("")]
pub(super) async fn create_canteen(
    canteen_ops: web::Data<CanteenOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<CreateCanteenReq>,
) -> impl Responder {
    let CreateCanteenReq {
        campus_id,
        owner_user_id,
        name,
        location,
        image_link,
    } = req_data.into_inner();
    match canteen_ops.create_canteen(NewCanteen {
        campus_id,
        owner_id: owner_user_id,
        name,
        location,
        image_link,
    }) {
        Ok(canteen) => {
            debug!("create_canteen: created canteen {}", canteen.canteen_id);
            HttpResponse::Ok().json(CanteenResponse {
                status: "ok".to_string(),
                data: Some(canteen),
                error: None,
            })
        }
        Err(e) => {
            error!("create_canteen: {}", e);
            HttpResponse::build(error_status(&e)).json(CanteenResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Canteen",
    path = "/by_campus/{campus_id}",
    responses(
        (status = 200, description = "Live canteens on the campus", body = CanteenListResponse),
    ),
    summary = "List canteens for a campus"
)]
#[get("/by_campus/{campus_id}")]
pub(super) async fn get_canteens_by_campus(
    canteen_ops: web::Data<CanteenOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let campus_id = path.into_inner().0;
    match canteen_ops.get_canteens_by_campus(campus_id) {
        Ok(data) => HttpResponse::Ok().json(CanteenListResponse {
            status: "ok".to_string(),
            data,
            error: None,
        }),
        Err(e) => {
            error!(
                "get_canteens_by_campus: error fetching campus {}: {}",
                campus_id, e
            );
            HttpResponse::build(error_status(&e)).json(CanteenListResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Canteen",
    path = "/{canteen_id}",
    responses(
        (status = 200, description = "Canteen detail", body = CanteenResponse),
        (status = 404, description = "No such canteen", body = CanteenResponse),
    ),
    summary = "Get one canteen"
)]
#[get("/{canteen_id}")]
pub(super) async fn get_canteen(
    canteen_ops: web::Data<CanteenOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let canteen_id = path.into_inner().0;
    match canteen_ops.get_canteen(canteen_id) {
        Ok(canteen) => HttpResponse::Ok().json(CanteenResponse {
            status: "ok".to_string(),
            data: Some(canteen),
            error: None,
        }),
        Err(e) => {
            error!("get_canteen: error fetching canteen {}: {}", canteen_id, e);
            HttpResponse::build(error_status(&e)).json(CanteenResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    put,
    tag = "Canteen",
    path = "/open",
    request_body = OpenStateReq,
    responses(
        (status = 200, description = "Open state updated", body = CanteenResponse),
    ),
    summary = "Open or close the vendor's own canteen"
)]
#[put("/open")]
pub(super) async fn set_open_state(
    canteen_ops: web::Data<CanteenOperations>,
    vendor: VendorPrincipal,
    req_data: web::Json<OpenStateReq>,
) -> impl Responder {
    match canteen_ops.set_open_state(vendor.canteen_id, req_data.into_inner().is_open) {
        Ok(canteen) => HttpResponse::Ok().json(CanteenResponse {
            status: "ok".to_string(),
            data: Some(canteen),
            error: None,
        }),
        Err(e) => {
            error!(
                "set_open_state: error updating canteen {}: {}",
                vendor.canteen_id, e
            );
            HttpResponse::build(error_status(&e)).json(CanteenResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}
