use crate::models::status::{OrderStatus, PaymentMethod, PaymentStatus, TxnMode, TxnStatus};
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub order_id: i32,
    pub student_id: i32,
    pub canteen_id: i32,
    pub total_minor: i64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub transaction_ref: Option<String>,
    pub upi_vpa: Option<String>,
    pub card_last_four: Option<String>,
    pub card_holder: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub pickup_time: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub student_id: i32,
    pub canteen_id: i32,
    pub total_minor: i64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub transaction_ref: Option<String>,
    pub upi_vpa: Option<String>,
    pub card_last_four: Option<String>,
    pub card_holder: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub pickup_time: Option<String>,
}

#[derive(
    Queryable, Selectable, Debug, Clone, Associations, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = crate::db::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub order_id: i32,
    pub item_id: i32,
    pub name_at_purchase: String,
    pub price_minor_at_purchase: i64,
    pub quantity: i16,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub item_id: i32,
    pub name_at_purchase: String,
    pub price_minor_at_purchase: i64,
    pub quantity: i16,
}

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::transactions)]
#[diesel(primary_key(txn_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Transaction {
    pub txn_id: i32,
    pub order_id: i32,
    pub student_id: i32,
    pub canteen_id: i32,
    pub amount_minor: i64,
    pub mode: TxnMode,
    pub status: TxnStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::transactions)]
pub struct NewTransaction {
    pub order_id: i32,
    pub student_id: i32,
    pub canteen_id: i32,
    pub amount_minor: i64,
    pub mode: TxnMode,
    pub status: TxnStatus,
}
