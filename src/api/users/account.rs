use crate::api::errors::{client_message, error_status};
use crate::auth::extractors::PrincipalExtractor;
use crate::db::UserOperations;
use crate::enums::users::{RegisterStudentReq, RegisterVendorReq, UserResponse};
use crate::models::status::UserRole;
use crate::models::user::NewUser;
use actix_web::{get, post, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "User",
    path = "/register",
    request_body = RegisterStudentReq,
    responses(
        (status = 200, description = "Student account created", body = UserResponse),
        (status = 409, description = "Email already registered", body = UserResponse),
    ),
    summary = "Register a student account"
)]
#[post("/register")]
pub(super) async fn register_student(
    user_ops: web::Data<UserOperations>,
    req_data: web::Json<RegisterStudentReq>,
) -> impl Responder {
    let RegisterStudentReq { name, email } = req_data.into_inner();
    match user_ops.register_user(NewUser {
        name,
        email,
        role: UserRole::Student,
    }) {
        Ok(user) => {
            debug!("register_student: created user {}", user.user_id);
            HttpResponse::Ok().json(UserResponse {
                status: "ok".to_string(),
                data: Some(user),
                error: None,
            })
        }
        Err(e) => {
            error!("register_student: {}", e);
            HttpResponse::build(error_status(&e)).json(UserResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    post,
    tag = "User",
    path = "/register_vendor",
    request_body = RegisterVendorReq,
    responses(
        (status = 200, description = "Vendor account and canteen created", body = UserResponse),
        (status = 404, description = "Campus does not exist", body = UserResponse),
    ),
    summary = "Register a vendor with its canteen"
)]
#[post("/register_vendor")]
pub(super) async fn register_vendor(
    user_ops: web::Data<UserOperations>,
    req_data: web::Json<RegisterVendorReq>,
) -> impl Responder {
    let RegisterVendorReq {
        name,
        email,
        campus_id,
        canteen_name,
        location,
    } = req_data.into_inner();
    match user_ops.register_vendor(&name, &email, campus_id, &canteen_name, &location) {
        Ok(user) => {
            debug!(
                "register_vendor: created vendor {} with canteen {:?}",
                user.user_id, user.canteen_id
            );
            HttpResponse::Ok().json(UserResponse {
                status: "ok".to_string(),
                data: Some(user),
                error: None,
            })
        }
        Err(e) => {
            error!("register_vendor: {}", e);
            HttpResponse::build(error_status(&e)).json(UserResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "User",
    path = "/me",
    responses(
        (status = 200, description = "The authenticated user's record", body = UserResponse),
    ),
    summary = "Get the current account"
)]
#[get("/me")]
pub(super) async fn get_me(
    user_ops: web::Data<UserOperations>,
    principal: PrincipalExtractor,
) -> impl Responder {
    let user_id = principal.0.user_id();
    match user_ops.get_user_by_id(user_id) {
        Ok(user) => HttpResponse::Ok().json(UserResponse {
            status: "ok".to_string(),
            data: Some(user),
            error: None,
        }),
        Err(e) => {
            error!("get_me: error fetching user {}: {}", user_id, e);
            HttpResponse::build(error_status(&e)).json(UserResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}
