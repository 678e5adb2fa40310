pub mod analytics;
pub mod campus;
pub mod canteen;
pub mod menu;
pub mod moderation;
