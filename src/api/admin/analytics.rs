use crate::api::errors::{client_message, error_status};
use crate::auth::extractors::AdminPrincipal;
use crate::db::AnalyticsOperations;
use crate::enums::admin::{
    AnalyticsResponse, BucketCount, BucketSum, CampusRevenue, ModeRevenue, PlatformTotals,
    StatusCount, TopCanteen, TopStudent,
};
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::IntoParams;

const DEFAULT_TOP_N: i64 = 10;

#[derive(Deserialize, Debug, IntoParams)]
pub(super) struct TopNQuery {
    pub limit: Option<i64>,
}

impl TopNQuery {
    fn limit(&self) -> i64 {
        self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_TOP_N)
    }
}

// Both arms yield the same AnalyticsResponse type so the payload type
// is pinned by the Ok arm.
macro_rules! analytics_reply {
    ($result:expr, $handler:literal) => {{
        let (code, body) = match $result {
            Ok(data) => (
                StatusCode::OK,
                AnalyticsResponse {
                    status: "ok".to_string(),
                    data: Some(data),
                    error: None,
                },
            ),
            Err(e) => {
                error!("{}: {}", $handler, e);
                (
                    error_status(&e),
                    AnalyticsResponse {
                        status: "error".to_string(),
                        data: None,
                        error: Some(client_message(&e)),
                    },
                )
            }
        };
        HttpResponse::build(code).json(body)
    }};
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/totals",
    responses(
        (status = 200, description = "Platform-wide live-row counts", body = AnalyticsResponse<PlatformTotals>),
    ),
    summary = "Platform totals"
)]
#[get("/totals")]
pub(super) async fn platform_totals(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    analytics_reply!(analytics_ops.platform_totals(), "platform_totals")
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/orders_per_day",
    responses(
        (status = 200, description = "Order counts bucketed by calendar day", body = AnalyticsResponse<Vec<BucketCount>>),
    ),
    summary = "Orders per day"
)]
#[get("/orders_per_day")]
pub(super) async fn orders_per_day(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    analytics_reply!(analytics_ops.orders_per_day(), "orders_per_day")
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/revenue_per_month",
    responses(
        (status = 200, description = "Completed-order revenue bucketed by month", body = AnalyticsResponse<Vec<BucketSum>>),
    ),
    summary = "Revenue per month"
)]
#[get("/revenue_per_month")]
pub(super) async fn revenue_per_month(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    analytics_reply!(analytics_ops.revenue_per_month(), "revenue_per_month")
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/orders_per_hour",
    responses(
        (status = 200, description = "Order counts bucketed by hour of day", body = AnalyticsResponse<Vec<BucketCount>>),
    ),
    summary = "Orders per hour of day"
)]
#[get("/orders_per_hour")]
pub(super) async fn orders_per_hour(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    analytics_reply!(analytics_ops.orders_per_hour(), "orders_per_hour")
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/top_students",
    params(TopNQuery),
    responses(
        (status = 200, description = "Highest-spending students over completed orders", body = AnalyticsResponse<Vec<TopStudent>>),
    ),
    summary = "Top students by spend"
)]
#[get("/top_students")]
pub(super) async fn top_students(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
    query: web::Query<TopNQuery>,
) -> impl Responder {
    analytics_reply!(
        analytics_ops.top_students_by_spend(query.limit()),
        "top_students"
    )
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/top_canteens",
    params(TopNQuery),
    responses(
        (status = 200, description = "Highest-revenue canteens over completed orders", body = AnalyticsResponse<Vec<TopCanteen>>),
    ),
    summary = "Top canteens by revenue"
)]
#[get("/top_canteens")]
pub(super) async fn top_canteens(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
    query: web::Query<TopNQuery>,
) -> impl Responder {
    analytics_reply!(
        analytics_ops.top_canteens_by_revenue(query.limit()),
        "top_canteens"
    )
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/status_breakdown",
    responses(
        (status = 200, description = "Live order counts per lifecycle status", body = AnalyticsResponse<Vec<StatusCount>>),
    ),
    summary = "Order status breakdown"
)]
#[get("/status_breakdown")]
pub(super) async fn status_breakdown(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    analytics_reply!(analytics_ops.order_status_breakdown(), "status_breakdown")
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/revenue_by_mode",
    responses(
        (status = 200, description = "Settled ledger revenue split by payment mode", body = AnalyticsResponse<Vec<ModeRevenue>>),
    ),
    summary = "Revenue by payment mode"
)]
#[get("/revenue_by_mode")]
pub(super) async fn revenue_by_mode(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    analytics_reply!(analytics_ops.revenue_by_mode(), "revenue_by_mode")
}

#[utoipa::path(
    get,
    tag = "Analytics",
    path = "/campus_revenue",
    responses(
        (status = 200, description = "Completed-order revenue rolled up per campus", body = AnalyticsResponse<Vec<CampusRevenue>>),
    ),
    summary = "Campus revenue rollup"
)]
#[get("/campus_revenue")]
pub(super) async fn campus_revenue(
    analytics_ops: web::Data<AnalyticsOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    analytics_reply!(analytics_ops.campus_revenue_rollup(), "campus_revenue")
}
