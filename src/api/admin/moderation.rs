use crate::api::errors::{client_message, error_status};
use crate::auth::extractors::AdminPrincipal;
use crate::db::ModerationOperations;
use crate::enums::admin::{ApprovalReq, BanStateReq, ModerationResponse, SuspensionReq};
use actix_web::{put, web, HttpResponse, Responder};
use log::warn;

#[utoipa::path(
    put,
    tag = "Moderation",
    path = "/users/{user_id}/ban",
    request_body = BanStateReq,
    responses(
        (status = 200, description = "Ban state applied to the user and any owned canteen", body = ModerationResponse),
        (status = 404, description = "No such user", body = ModerationResponse),
    ),
    summary = "Ban or unban a user"
)]
#[put("/users/{user_id}/ban")]
pub(super) async fn set_user_ban(
    moderation_ops: web::Data<ModerationOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<BanStateReq>,
) -> impl Responder {
    let user_id = path.into_inner().0;
    let banned = req_data.into_inner().banned;
    match moderation_ops.set_ban_state(user_id, banned) {
        Ok(user) => {
            warn!("set_user_ban: user {} banned={}", user_id, banned);
            HttpResponse::Ok().json(ModerationResponse {
                status: "ok".to_string(),
                data: Some(user),
                error: None,
            })
        }
        Err(e) => {
            error!("set_user_ban: error updating user {}: {}", user_id, e);
            HttpResponse::build(error_status(&e)).json(ModerationResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    put,
    tag = "Moderation",
    path = "/canteens/{canteen_id}/suspend",
    request_body = SuspensionReq,
    responses(
        (status = 200, description = "Suspension applied via the owner's ban state", body = ModerationResponse),
        (status = 404, description = "No such canteen", body = ModerationResponse),
    ),
    summary = "Suspend or reinstate a canteen"
)]
#[put("/canteens/{canteen_id}/suspend")]
pub(super) async fn set_canteen_suspension(
    moderation_ops: web::Data<ModerationOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<SuspensionReq>,
) -> impl Responder {
    let canteen_id = path.into_inner().0;
    let suspended = req_data.into_inner().suspended;
    match moderation_ops.set_canteen_suspension(canteen_id, suspended) {
        Ok(user) => {
            warn!(
                "set_canteen_suspension: canteen {} suspended={}",
                canteen_id, suspended
            );
            HttpResponse::Ok().json(ModerationResponse {
                status: "ok".to_string(),
                data: Some(user),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "set_canteen_suspension: error updating canteen {}: {}",
                canteen_id, e
            );
            HttpResponse::build(error_status(&e)).json(ModerationResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    put,
    tag = "Moderation",
    path = "/vendors/{user_id}/approval",
    request_body = ApprovalReq,
    responses(
        (status = 200, description = "Approval mirrored to the vendor's canteen", body = ModerationResponse),
        (status = 404, description = "No such user", body = ModerationResponse),
    ),
    summary = "Approve or block a vendor"
)]
#[put("/vendors/{user_id}/approval")]
pub(super) async fn set_vendor_approval(
    moderation_ops: web::Data<ModerationOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<ApprovalReq>,
) -> impl Responder {
    let user_id = path.into_inner().0;
    let approved = req_data.into_inner().approved;
    match moderation_ops.set_vendor_approval(user_id, approved) {
        Ok(user) => HttpResponse::Ok().json(ModerationResponse {
            status: "ok".to_string(),
            data: Some(user),
            error: None,
        }),
        Err(e) => {
            error!(
                "set_vendor_approval: error updating user {}: {}",
                user_id, e
            );
            HttpResponse::build(error_status(&e)).json(ModerationResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}
