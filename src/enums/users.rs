use crate::models::user::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterStudentReq {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterVendorReq {
    pub name: String,
    pub email: String,
    pub campus_id: i32,
    pub canteen_name: String,
    pub location: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub status: String,
    pub data: Option<User>,
    pub error: Option<String>,
}
