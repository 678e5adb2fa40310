use crate::api::errors::{client_message, error_status};
use crate::auth::extractors::{PrincipalExtractor, StudentPrincipal};
use crate::auth::Principal;
use crate::db::{OrderLine, OrderOperations, PaymentDetails};
use crate::enums::common::{
    AckResponse, OrderListResponse, OrderRequest, OrderResponse, StatusUpdateReq,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Orders",
    path = "",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order created with recomputed total and snapshotted items", body = OrderResponse),
        (status = 400, description = "Empty item list or invalid payment details", body = OrderResponse),
    ),
    summary = "Create a new order"
)]
#[post("")]
pub(super) async fn create_order(
    order_ops: web::Data<OrderOperations>,
    student: StudentPrincipal,
    req_data: web::Json<OrderRequest>,
) -> impl Responder {
    let OrderRequest {
        canteen_id,
        items,
        payment,
        pickup_time,
    } = req_data.into_inner();

    let lines: Vec<OrderLine> = items
        .into_iter()
        .map(|i| OrderLine {
            item_id: i.item_id,
            quantity: i.quantity,
        })
        .collect();
    let payment = PaymentDetails {
        method: payment.method,
        upi_vpa: payment.upi_vpa,
        card_number: payment.card_number,
        card_holder: payment.card_holder,
    };

    match order_ops.create_order(student.user_id(), canteen_id, lines, payment, pickup_time) {
        Ok(order) => {
            debug!(
                "create_order: order {} placed by user {}",
                order.order_id,
                student.user_id()
            );
            let actor = crate::db::OrderActor::Student(student.user_id());
            match order_ops.get_order(order.order_id, &actor) {
                Ok(detail) => HttpResponse::Ok().json(OrderResponse {
                    status: "ok".to_string(),
                    data: Some(detail),
                    error: None,
                }),
                Err(e) => {
                    error!("create_order: readback failed: {}", e);
                    HttpResponse::build(error_status(&e)).json(OrderResponse {
                        status: "error".to_string(),
                        data: None,
                        error: Some(client_message(&e)),
                    })
                }
            }
        }
        Err(e) => {
            error!("ORDER: create_order(): {}", e);
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/{order_id}",
    responses(
        (status = 200, description = "Order detail", body = OrderResponse),
        (status = 403, description = "Requester does not own the order", body = OrderResponse),
        (status = 404, description = "No such order", body = OrderResponse),
    ),
    summary = "Get one order (owner, owning vendor or admin only)"
)]
#[get("/{order_id}")]
pub(super) async fn get_order(
    order_ops: web::Data<OrderOperations>,
    principal: PrincipalExtractor,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    match order_ops.get_order(order_id, &principal.0.order_actor()) {
        Ok(detail) => HttpResponse::Ok().json(OrderResponse {
            status: "ok".to_string(),
            data: Some(detail),
            error: None,
        }),
        Err(e) => {
            error!("get_order: error fetching order {}: {}", order_id, e);
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "",
    responses(
        (status = 200, description = "Orders visible to the requester, newest first", body = OrderListResponse),
    ),
    summary = "List own orders (student) or canteen orders (vendor)"
)]
#[get("")]
pub(super) async fn list_orders(
    order_ops: web::Data<OrderOperations>,
    principal: PrincipalExtractor,
) -> impl Responder {
    let result = match &principal.0 {
        Principal::Student { user_id } => order_ops.list_orders_for_student(*user_id),
        Principal::Vendor { canteen_id, .. } => order_ops.list_orders_for_canteen(*canteen_id),
        Principal::Admin { .. } => {
            return HttpResponse::BadRequest().json(OrderListResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some("admins query orders through analytics endpoints".to_string()),
            })
        }
    };

    match result {
        Ok(data) => {
            debug!("list_orders: retrieved {} orders", data.len());
            HttpResponse::Ok().json(OrderListResponse {
                status: "ok".to_string(),
                data,
                error: None,
            })
        }
        Err(e) => {
            error!("list_orders: error retrieving orders: {}", e);
            HttpResponse::build(error_status(&e)).json(OrderListResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    put,
    tag = "Orders",
    path = "/{order_id}/status",
    request_body = StatusUpdateReq,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Illegal transition", body = OrderResponse),
        (status = 403, description = "Actor may not transition this order", body = OrderResponse),
        (status = 409, description = "Concurrent update lost", body = OrderResponse),
    ),
    summary = "Move an order along its status state machine"
)]
#[put("/{order_id}/status")]
pub(super) async fn update_order_status(
    order_ops: web::Data<OrderOperations>,
    principal: PrincipalExtractor,
    path: web::Path<(i32,)>,
    req_data: web::Json<StatusUpdateReq>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    let target = req_data.into_inner().status;

    match order_ops.transition_status(order_id, target, &principal.0.order_actor()) {
        Ok(order) => HttpResponse::Ok().json(OrderResponse {
            status: "ok".to_string(),
            data: Some(crate::enums::common::OrderDetail {
                order,
                items: Vec::new(),
            }),
            error: None,
        }),
        Err(e) => {
            error!(
                "update_order_status: error moving order {} to {}: {}",
                order_id, target, e
            );
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Orders",
    path = "/{order_id}",
    responses(
        (status = 200, description = "Order hidden from listings and analytics", body = AckResponse),
        (status = 400, description = "Order not terminal yet", body = AckResponse),
    ),
    summary = "Soft-delete a terminal order"
)]
#[delete("/{order_id}")]
pub(super) async fn delete_order(
    order_ops: web::Data<OrderOperations>,
    principal: PrincipalExtractor,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    match order_ops.soft_delete_order(order_id, &principal.0.order_actor()) {
        Ok(()) => HttpResponse::Ok().json(AckResponse {
            status: "ok".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("delete_order: error deleting order {}: {}", order_id, e);
            HttpResponse::build(error_status(&e)).json(AckResponse {
                status: "error".to_string(),
                error: Some(client_message(&e)),
            })
        }
    }
}
