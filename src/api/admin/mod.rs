mod analytics;
mod campus;
mod canteen;
mod menu;
mod moderation;

use crate::db::{
    AnalyticsOperations, CampusOperations, CanteenOperations, MenuOperations, ModerationOperations,
};
use actix_web::middleware::NormalizePath;
use actix_web::web;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(
    cfg: &mut ServiceConfig,
    campus_ops: &CampusOperations,
    canteen_ops: &CanteenOperations,
    menu_ops: &MenuOperations,
    moderation_ops: &ModerationOperations,
    analytics_ops: &AnalyticsOperations,
) {
    cfg.service(
        scope::scope("/campus")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(campus_ops.clone()))
            .service(campus::create_campus)
            .service(campus::get_all_campuses),
    )
    .service(
        scope::scope("/canteen")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(canteen_ops.clone()))
            .service(canteen::create_canteen)
            .service(canteen::set_open_state)
            .service(canteen::get_canteens_by_campus)
            .service(canteen::get_canteen),
    )
    .service(
        scope::scope("/menu")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(menu_ops.clone()))
            .service(menu::create_menu_item)
            .service(menu::get_menu_for_canteen)
            .service(menu::update_menu_item)
            .service(menu::remove_menu_item)
            .service(menu::get_menu_item),
    )
    .service(
        scope::scope("/moderation")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(moderation_ops.clone()))
            .service(moderation::set_user_ban)
            .service(moderation::set_canteen_suspension)
            .service(moderation::set_vendor_approval),
    )
    .service(
        scope::scope("/analytics")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(analytics_ops.clone()))
            .service(analytics::platform_totals)
            .service(analytics::orders_per_day)
            .service(analytics::revenue_per_month)
            .service(analytics::orders_per_hour)
            .service(analytics::top_students)
            .service(analytics::top_canteens)
            .service(analytics::status_breakdown)
            .service(analytics::revenue_by_mode)
            .service(analytics::campus_revenue),
    );
}
