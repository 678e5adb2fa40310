mod orders;

use crate::db::OrderOperations;
use actix_web::middleware::NormalizePath;
use actix_web::web;
use orders::{create_order, delete_order, get_order, list_orders, update_order_status};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, order_ops: &OrderOperations) {
    cfg.service(
        scope::scope("/orders")
            .app_data(web::Data::new(order_ops.clone()))
            .wrap(NormalizePath::trim())
            .service(create_order)
            .service(list_orders)
            .service(get_order)
            .service(update_order_status)
            .service(delete_order),
    );
}
