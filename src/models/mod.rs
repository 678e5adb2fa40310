pub mod admin;
pub mod common;
pub mod status;
pub mod user;
