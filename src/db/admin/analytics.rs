use crate::db::{scope, DbConnection, RepositoryError};
use crate::enums::admin::{
    BucketCount, BucketSum, CampusRevenue, ModeRevenue, PlatformTotals, StatusCount, TopCanteen,
    TopStudent,
};
use crate::models::status::{OrderStatus, TxnMode, TxnStatus};
use diesel::dsl::{count_star, sql};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::{BigInt, Nullable, Text};
use log::error;

/// Read-only dashboard aggregations. Every query starts from a
/// `db::scope` helper, so soft-deleted rows are excluded uniformly.
#[derive(Clone)]
pub struct AnalyticsOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl AnalyticsOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn platform_totals(&self) -> Result<PlatformTotals, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("platform_totals: failed to acquire DB connection: {}", e);
            e
        })?;

        let users = scope::live_users()
            .count()
            .get_result(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        let campuses = scope::live_campuses()
            .count()
            .get_result(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        let canteens = scope::live_canteens()
            .count()
            .get_result(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        let orders = scope::live_orders()
            .count()
            .get_result(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;

        Ok(PlatformTotals {
            users,
            campuses,
            canteens,
            orders,
        })
    }

    pub fn orders_per_day(&self) -> Result<Vec<BucketCount>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("orders_per_day: failed to acquire DB connection: {}", e);
            e
        })?;

        let rows: Vec<(String, i64)> = scope::live_orders()
            .group_by(sql::<Text>("to_char(created_at, 'YYYY-MM-DD')"))
            .select((
                sql::<Text>("to_char(created_at, 'YYYY-MM-DD')"),
                sql::<BigInt>("count(*)"),
            ))
            .order_by(sql::<Text>("to_char(created_at, 'YYYY-MM-DD')").asc())
            .load(conn.connection())
            .map_err(|e| {
                error!("orders_per_day: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(bucket, count)| BucketCount { bucket, count })
            .collect())
    }

    /// Revenue per calendar month over completed orders.
    pub fn revenue_per_month(&self) -> Result<Vec<BucketSum>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("revenue_per_month: failed to acquire DB connection: {}", e);
            e
        })?;

        let rows: Vec<(String, i64)> = scope::live_orders()
            .filter(crate::db::schema::orders::status.eq(OrderStatus::Completed))
            .group_by(sql::<Text>("to_char(created_at, 'YYYY-MM')"))
            .select((
                sql::<Text>("to_char(created_at, 'YYYY-MM')"),
                // Postgres sum(bigint) is numeric; cast back down.
                sql::<BigInt>("COALESCE(sum(total_minor), 0)::bigint"),
            ))
            .order_by(sql::<Text>("to_char(created_at, 'YYYY-MM')").asc())
            .load(conn.connection())
            .map_err(|e| {
                error!("revenue_per_month: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(bucket, amount_minor)| BucketSum {
                bucket,
                amount_minor,
            })
            .collect())
    }

    /// Order volume per hour of day, for peak-load dashboards.
    pub fn orders_per_hour(&self) -> Result<Vec<BucketCount>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("orders_per_hour: failed to acquire DB connection: {}", e);
            e
        })?;

        let rows: Vec<(String, i64)> = scope::live_orders()
            .group_by(sql::<Text>("to_char(created_at, 'HH24')"))
            .select((
                sql::<Text>("to_char(created_at, 'HH24')"),
                sql::<BigInt>("count(*)"),
            ))
            .order_by(sql::<Text>("to_char(created_at, 'HH24')").asc())
            .load(conn.connection())
            .map_err(|e| {
                error!("orders_per_hour: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(bucket, count)| BucketCount { bucket, count })
            .collect())
    }

    /// Top spenders over completed orders. Ties break on student id
    /// ascending so rankings are stable across runs.
    pub fn top_students_by_spend(&self, limit: i64) -> Result<Vec<TopStudent>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "top_students_by_spend: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::orders;
        let rows: Vec<(i32, Option<i64>)> = scope::live_orders()
            .filter(orders::status.eq(OrderStatus::Completed))
            .group_by(orders::student_id)
            .select((
                orders::student_id,
                sql::<Nullable<BigInt>>("sum(total_minor)::bigint"),
            ))
            .order_by((sql::<BigInt>("sum(total_minor)").desc(), orders::student_id.asc()))
            .limit(limit)
            .load(conn.connection())
            .map_err(|e| {
                error!("top_students_by_spend: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(student_id, total)| TopStudent {
                student_id,
                total_spend_minor: total.unwrap_or(0),
            })
            .collect())
    }

    /// Top canteens by completed-order revenue, id-ascending tie-break.
    pub fn top_canteens_by_revenue(&self, limit: i64) -> Result<Vec<TopCanteen>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "top_canteens_by_revenue: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::orders;
        let rows: Vec<(i32, Option<i64>, i64)> = scope::live_orders()
            .filter(orders::status.eq(OrderStatus::Completed))
            .group_by(orders::canteen_id)
            .select((
                orders::canteen_id,
                sql::<Nullable<BigInt>>("sum(total_minor)::bigint"),
                count_star(),
            ))
            .order_by((sql::<BigInt>("sum(total_minor)").desc(), orders::canteen_id.asc()))
            .limit(limit)
            .load(conn.connection())
            .map_err(|e| {
                error!("top_canteens_by_revenue: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(canteen_id, total, order_count)| TopCanteen {
                canteen_id,
                total_revenue_minor: total.unwrap_or(0),
                order_count,
            })
            .collect())
    }

    pub fn order_status_breakdown(&self) -> Result<Vec<StatusCount>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "order_status_breakdown: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::orders;
        let rows: Vec<(OrderStatus, i64)> = scope::live_orders()
            .group_by(orders::status)
            .select((orders::status, count_star()))
            .load(conn.connection())
            .map_err(|e| {
                error!("order_status_breakdown: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }

    /// Revenue split by payment mode over the transaction ledger. Only
    /// rows that actually settled count; pending and failed are excluded.
    pub fn revenue_by_mode(&self) -> Result<Vec<ModeRevenue>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("revenue_by_mode: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::transactions;
        let rows: Vec<(TxnMode, Option<i64>)> = scope::live_transactions()
            .filter(transactions::status.eq(TxnStatus::Paid))
            .group_by(transactions::mode)
            .select((
                transactions::mode,
                sql::<Nullable<BigInt>>("sum(amount_minor)::bigint"),
            ))
            .load(conn.connection())
            .map_err(|e| {
                error!("revenue_by_mode: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(mode, total)| ModeRevenue {
                mode,
                amount_minor: total.unwrap_or(0),
            })
            .collect())
    }

    /// Order -> Canteen -> Campus rollup of completed-order revenue.
    pub fn campus_revenue_rollup(&self) -> Result<Vec<CampusRevenue>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "campus_revenue_rollup: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::{campuses, canteens, orders};
        let rows: Vec<(i32, String, Option<i64>)> = scope::live_orders()
            .filter(orders::status.eq(OrderStatus::Completed))
            .inner_join(canteens::table.on(orders::canteen_id.eq(canteens::canteen_id)))
            .inner_join(
                campuses::table.on(canteens::campus_id.eq(campuses::campus_id)),
            )
            .group_by((campuses::campus_id, campuses::name))
            .select((
                campuses::campus_id,
                campuses::name,
                sql::<Nullable<BigInt>>("sum(orders.total_minor)::bigint"),
            ))
            .order_by(campuses::campus_id.asc())
            .load(conn.connection())
            .map_err(|e| {
                error!("campus_revenue_rollup: error running aggregation: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(campus_id, name, total)| CampusRevenue {
                campus_id,
                campus_name: name,
                total_revenue_minor: total.unwrap_or(0),
            })
            .collect())
    }
}
