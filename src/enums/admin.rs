use crate::models::admin::{Campus, Canteen, MenuItem};
use crate::models::status::{OrderStatus, TxnMode};
use crate::models::user::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateCanteenReq {
    pub campus_id: i32,
    pub owner_user_id: i32,
    pub name: String,
    pub location: String,
    pub image_link: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct OpenStateReq {
    pub is_open: bool,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct BanStateReq {
    pub banned: bool,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SuspensionReq {
    pub suspended: bool,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ApprovalReq {
    pub approved: bool,
}

#[derive(Serialize, ToSchema)]
pub struct CampusResponse {
    pub status: String,
    pub data: Option<Campus>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CampusListResponse {
    pub status: String,
    pub data: Vec<Campus>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CanteenResponse {
    pub status: String,
    pub data: Option<Canteen>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CanteenListResponse {
    pub status: String,
    pub data: Vec<Canteen>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub status: String,
    pub data: Option<MenuItem>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MenuListResponse {
    pub status: String,
    pub data: Vec<MenuItem>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ModerationResponse {
    pub status: String,
    pub data: Option<User>,
    pub error: Option<String>,
}

// Analytics containers.

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct PlatformTotals {
    pub users: i64,
    pub campuses: i64,
    pub canteens: i64,
    pub orders: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct BucketCount {
    pub bucket: String,
    pub count: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct BucketSum {
    pub bucket: String,
    pub amount_minor: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct TopStudent {
    pub student_id: i32,
    pub total_spend_minor: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct TopCanteen {
    pub canteen_id: i32,
    pub total_revenue_minor: i64,
    pub order_count: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct ModeRevenue {
    pub mode: TxnMode,
    pub amount_minor: i64,
}

#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
pub struct CampusRevenue {
    pub campus_id: i32,
    pub campus_name: String,
    pub total_revenue_minor: i64,
}

#[derive(Serialize, ToSchema)]
pub struct AnalyticsResponse<T> {
    pub status: String,
    pub data: Option<T>,
    pub error: Option<String>,
}
