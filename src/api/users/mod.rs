mod account;

use crate::db::UserOperations;
use account::{get_me, register_student, register_vendor};
use actix_web::middleware::NormalizePath;
use actix_web::web;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, user_ops: &UserOperations) {
    cfg.service(
        scope::scope("/users")
            .app_data(web::Data::new(user_ops.clone()))
            .wrap(NormalizePath::trim())
            .service(register_student)
            .service(register_vendor)
            .service(get_me),
    );
}
