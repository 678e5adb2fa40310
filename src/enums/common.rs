use crate::models::common::{Order, OrderItemRow};
use crate::models::status::{OrderStatus, PaymentMethod};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct OrderItemReq {
    pub item_id: i32,
    pub quantity: i16,
}

/// Payment intent as sent by the client. For card payments the full
/// number is accepted on the wire but only the last four digits are
/// stored.
#[derive(Deserialize, Debug, ToSchema)]
pub struct PaymentReq {
    pub method: PaymentMethod,
    pub upi_vpa: Option<String>,
    pub card_number: Option<String>,
    pub card_holder: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct OrderRequest {
    pub canteen_id: i32,
    pub items: Vec<OrderItemReq>,
    pub payment: PaymentReq,
    pub pickup_time: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct StatusUpdateReq {
    pub status: OrderStatus,
}

/// An order with its snapshotted line items.
#[derive(Serialize, Debug, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemRow>,
}

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub status: String,
    pub data: Option<OrderDetail>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct OrderListResponse {
    pub status: String,
    pub data: Vec<OrderDetail>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AckResponse {
    pub status: String,
    pub error: Option<String>,
}
