use crate::db::{scope, DbConnection, RepositoryError};
use crate::enums::common::OrderDetail;
use crate::models::admin::{Canteen, MenuItem};
use crate::models::common::{NewOrder, NewOrderItem, NewTransaction, Order, OrderItemRow};
use crate::models::status::{OrderStatus, PaymentMethod, PaymentStatus, TxnStatus};
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use diesel::PgConnection;
use log::{debug, error};
use std::collections::HashMap;
use uuid::Uuid;

/// One requested line of an order, before catalog prices are snapshotted.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub item_id: i32,
    pub quantity: i16,
}

/// Payment instrument as supplied by the client. Card numbers are never
/// persisted; only the last four digits survive into the order row.
#[derive(Debug, Clone)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub upi_vpa: Option<String>,
    pub card_number: Option<String>,
    pub card_holder: Option<String>,
}

/// The acting identity, as resolved by the auth layer.
#[derive(Debug, Clone)]
pub enum OrderActor {
    Student(i32),
    Vendor { user_id: i32, canteen_id: i32 },
    Admin,
}

struct PaymentState {
    status: PaymentStatus,
    transaction_ref: Option<String>,
    upi_vpa: Option<String>,
    card_last_four: Option<String>,
    card_holder: Option<String>,
    paid_at: Option<chrono::DateTime<Utc>>,
    ledger_status: TxnStatus,
}

#[derive(Clone)]
pub struct OrderOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl OrderOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Creates an order with status `placed`. The total and per-line
    /// snapshots are always recomputed from the catalog; client-supplied
    /// totals are never read. The order row, its line items and the ledger
    /// transaction are written in one database transaction.
    pub fn create_order(
        &self,
        student_id: i32,
        order_canteen_id: i32,
        lines: Vec<OrderLine>,
        payment: PaymentDetails,
        pickup_time: Option<String>,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        if lines.is_empty() {
            return Err(RepositoryError::ValidationError(format!(
                "No order items for user: {}",
                student_id
            )));
        }

        // Collapse duplicate item ids by summing quantities.
        let mut ordered_qty: HashMap<i32, i64> = HashMap::new();
        for line in &lines {
            if line.quantity < 1 {
                return Err(RepositoryError::ValidationError(format!(
                    "Invalid quantity {} for item {}",
                    line.quantity, line.item_id
                )));
            }
            *ordered_qty.entry(line.item_id).or_insert(0) += line.quantity as i64;
        }

        let canteen: Canteen = scope::live_canteens()
            .filter(crate::db::schema::canteens::canteen_id.eq(order_canteen_id))
            .select(Canteen::as_select())
            .first(conn.connection())
            .map_err(|e| {
                error!(
                    "create_order: error loading canteen {}: {}",
                    order_canteen_id, e
                );
                RepositoryError::from_diesel(&format!("canteen {}", order_canteen_id), e)
            })?;

        if canteen.is_banned {
            return Err(RepositoryError::Forbidden(format!(
                "Canteen {} is suspended",
                order_canteen_id
            )));
        }
        if !canteen.is_open {
            return Err(RepositoryError::ValidationError(format!(
                "Canteen {} is closed",
                order_canteen_id
            )));
        }

        let item_ids: Vec<i32> = ordered_qty.keys().copied().collect();
        let catalog_items: Vec<MenuItem> = scope::live_menu_items()
            .filter(crate::db::schema::menu_items::item_id.eq_any(&item_ids))
            .select(MenuItem::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "create_order: error loading menu items {:?}: {}",
                    item_ids, e
                );
                RepositoryError::from_diesel("menu_items", e)
            })?;

        if catalog_items.len() != ordered_qty.len() {
            return Err(RepositoryError::ValidationError(format!(
                "Order contains missing menu items: {:?}",
                item_ids
            )));
        }

        let mut total_minor: i64 = 0;
        for item in &catalog_items {
            if item.canteen_id != order_canteen_id {
                return Err(RepositoryError::ValidationError(format!(
                    "Item {} does not belong to canteen {}",
                    item.item_id, order_canteen_id
                )));
            }
            if !item.is_available {
                return Err(RepositoryError::ValidationError(format!(
                    "Item '{}' is not available",
                    item.name
                )));
            }
            total_minor += item.price_minor * ordered_qty[&item.item_id];
        }

        let payment_state = Self::resolve_payment_state(&payment)?;

        conn.connection().transaction(|conn| {
            let new_order = NewOrder {
                student_id,
                canteen_id: order_canteen_id,
                total_minor,
                status: OrderStatus::Placed,
                payment_method: payment.method,
                payment_status: payment_state.status,
                transaction_ref: payment_state.transaction_ref.clone(),
                upi_vpa: payment_state.upi_vpa.clone(),
                card_last_four: payment_state.card_last_four.clone(),
                card_holder: payment_state.card_holder.clone(),
                paid_at: payment_state.paid_at,
                pickup_time: pickup_time.clone(),
            };

            let order: Order = {
                use crate::db::schema::orders::dsl::*;
                diesel::insert_into(orders)
                    .values(&new_order)
                    .get_result(conn)
                    .map_err(RepositoryError::DatabaseError)?
            };

            let new_items: Vec<NewOrderItem> = catalog_items
                .iter()
                .map(|item| NewOrderItem {
                    order_id: order.order_id,
                    item_id: item.item_id,
                    name_at_purchase: item.name.clone(),
                    price_minor_at_purchase: item.price_minor,
                    quantity: ordered_qty[&item.item_id] as i16,
                })
                .collect();

            {
                use crate::db::schema::order_items::dsl::*;
                diesel::insert_into(order_items)
                    .values(&new_items)
                    .execute(conn)
                    .map_err(RepositoryError::DatabaseError)?;
            }

            // Ledger row is derived from the same payment state, in the
            // same transaction, so the two can never disagree. Built
            // before the dsl glob so the column names don't shadow the
            // surrounding bindings.
            let ledger_row = NewTransaction {
                order_id: order.order_id,
                student_id,
                canteen_id: order_canteen_id,
                amount_minor: total_minor,
                mode: payment.method.ledger_mode(),
                status: payment_state.ledger_status,
            };
            {
                use crate::db::schema::transactions::dsl::*;
                diesel::insert_into(transactions)
                    .values(&ledger_row)
                    .execute(conn)
                    .map_err(RepositoryError::DatabaseError)?;
            }

            debug!(
                "create_order: order {} created for user {} (total {} minor units)",
                order.order_id, student_id, total_minor
            );
            Ok(order)
        })
    }

    /// Validates instrument exclusivity and simulates the gateway: upi and
    /// card complete immediately with a generated reference, cod stays
    /// pending until the order is delivered.
    fn resolve_payment_state(payment: &PaymentDetails) -> Result<PaymentState, RepositoryError> {
        match payment.method {
            PaymentMethod::Cod => {
                if payment.upi_vpa.is_some() || payment.card_number.is_some() {
                    return Err(RepositoryError::ValidationError(
                        "cod orders must not carry payment instrument details".to_string(),
                    ));
                }
                Ok(PaymentState {
                    status: PaymentStatus::Pending,
                    transaction_ref: None,
                    upi_vpa: None,
                    card_last_four: None,
                    card_holder: None,
                    paid_at: None,
                    ledger_status: TxnStatus::Pending,
                })
            }
            PaymentMethod::Upi => {
                if payment.card_number.is_some() || payment.card_holder.is_some() {
                    return Err(RepositoryError::ValidationError(
                        "upi orders must not carry card details".to_string(),
                    ));
                }
                let vpa = payment.upi_vpa.clone().ok_or_else(|| {
                    RepositoryError::ValidationError("upi orders require a vpa".to_string())
                })?;
                Ok(PaymentState {
                    status: PaymentStatus::Completed,
                    transaction_ref: Some(Uuid::new_v4().to_string()),
                    upi_vpa: Some(vpa),
                    card_last_four: None,
                    card_holder: None,
                    paid_at: Some(Utc::now()),
                    ledger_status: TxnStatus::Paid,
                })
            }
            PaymentMethod::Card => {
                if payment.upi_vpa.is_some() {
                    return Err(RepositoryError::ValidationError(
                        "card orders must not carry upi details".to_string(),
                    ));
                }
                let number = payment.card_number.as_deref().ok_or_else(|| {
                    RepositoryError::ValidationError("card orders require a card number".to_string())
                })?;
                let holder = payment.card_holder.clone().ok_or_else(|| {
                    RepositoryError::ValidationError("card orders require a holder name".to_string())
                })?;
                let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
                if digits.len() < 12 {
                    return Err(RepositoryError::ValidationError(
                        "card number too short".to_string(),
                    ));
                }
                Ok(PaymentState {
                    status: PaymentStatus::Completed,
                    transaction_ref: Some(Uuid::new_v4().to_string()),
                    upi_vpa: None,
                    card_last_four: Some(digits[digits.len() - 4..].to_string()),
                    card_holder: Some(holder),
                    paid_at: Some(Utc::now()),
                    ledger_status: TxnStatus::Paid,
                })
            }
        }
    }

    /// Moves an order along the status state machine. The row is locked for
    /// the duration of the transaction and the final UPDATE is additionally
    /// filtered on the status that was read, so a concurrent transition
    /// loses with a Conflict instead of silently overwriting.
    pub fn transition_status(
        &self,
        search_order_id: i32,
        target: OrderStatus,
        actor: &OrderActor,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "transition_status: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            let order: Order = scope::live_orders()
                .filter(crate::db::schema::orders::order_id.eq(search_order_id))
                .select(Order::as_select())
                .for_update()
                .first(conn)
                .map_err(|e| {
                    error!(
                        "transition_status: error loading order {}: {}",
                        search_order_id, e
                    );
                    RepositoryError::from_diesel(&format!("order {}", search_order_id), e)
                })?;

            Self::authorize_transition(&order, target, actor)?;

            if !order.status.can_transition_to(target) {
                return Err(RepositoryError::ValidationError(format!(
                    "Illegal status transition: {} -> {}",
                    order.status, target
                )));
            }

            // COD settles on delivery; a cancelled paid order is refunded.
            let (new_payment_status, new_paid_at, ledger_status) =
                match (target, order.payment_status) {
                    (OrderStatus::Completed, PaymentStatus::Pending) => (
                        PaymentStatus::Completed,
                        Some(Utc::now()),
                        Some(TxnStatus::Paid),
                    ),
                    (OrderStatus::Cancelled, PaymentStatus::Completed) => (
                        PaymentStatus::Refunded,
                        order.paid_at,
                        Some(TxnStatus::Failed),
                    ),
                    (_, current) => (current, order.paid_at, None),
                };

            let updated = {
                use crate::db::schema::orders::dsl::*;
                diesel::update(
                    orders
                        .filter(order_id.eq(search_order_id))
                        .filter(status.eq(order.status)),
                )
                .set((
                    status.eq(target),
                    payment_status.eq(new_payment_status),
                    paid_at.eq(new_paid_at),
                ))
                .get_result::<Order>(conn)
                .optional()
                .map_err(RepositoryError::DatabaseError)?
            };

            let updated = updated.ok_or_else(|| {
                RepositoryError::Conflict(format!(
                    "Order {} was modified concurrently",
                    search_order_id
                ))
            })?;

            if let Some(new_ledger_status) = ledger_status {
                use crate::db::schema::transactions::dsl::*;
                diesel::update(transactions.filter(order_id.eq(search_order_id)))
                    .set(status.eq(new_ledger_status))
                    .execute(conn)
                    .map_err(RepositoryError::DatabaseError)?;
            }

            debug!(
                "transition_status: order {} moved {} -> {}",
                search_order_id, order.status, target
            );
            Ok(updated)
        })
    }

    fn authorize_transition(
        order: &Order,
        target: OrderStatus,
        actor: &OrderActor,
    ) -> Result<(), RepositoryError> {
        let allowed = match actor {
            OrderActor::Admin => true,
            OrderActor::Vendor { canteen_id, .. } => *canteen_id == order.canteen_id,
            // Students may only cancel, and only their own order.
            OrderActor::Student(user_id) => {
                target == OrderStatus::Cancelled && *user_id == order.student_id
            }
        };
        if allowed {
            Ok(())
        } else {
            Err(RepositoryError::Forbidden(format!(
                "Actor may not move order {} to {}",
                order.order_id, target
            )))
        }
    }

    /// Single-order fetch with object-level authorization: only the owning
    /// student, the owning canteen's vendor or an admin may read it.
    pub fn get_order(
        &self,
        search_order_id: i32,
        actor: &OrderActor,
    ) -> Result<OrderDetail, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_order: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        let order: Order = scope::live_orders()
            .filter(crate::db::schema::orders::order_id.eq(search_order_id))
            .select(Order::as_select())
            .first(conn.connection())
            .map_err(|e| {
                error!("get_order: error loading order {}: {}", search_order_id, e);
                RepositoryError::from_diesel(&format!("order {}", search_order_id), e)
            })?;

        let allowed = match actor {
            OrderActor::Admin => true,
            OrderActor::Student(user_id) => *user_id == order.student_id,
            OrderActor::Vendor { canteen_id, .. } => *canteen_id == order.canteen_id,
        };
        if !allowed {
            return Err(RepositoryError::Forbidden(format!(
                "Actor does not own order {}",
                search_order_id
            )));
        }

        let items = {
            use crate::db::schema::order_items::dsl::*;
            order_items
                .filter(order_id.eq(search_order_id))
                .select(OrderItemRow::as_select())
                .load::<OrderItemRow>(conn.connection())
                .map_err(RepositoryError::DatabaseError)?
        };

        Ok(OrderDetail { order, items })
    }

    pub fn list_orders_for_student(
        &self,
        search_student_id: i32,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_orders_for_student: failed to acquire DB connection for user {}: {}",
                search_student_id, e
            );
            e
        })?;

        let orders: Vec<Order> = scope::live_orders()
            .filter(crate::db::schema::orders::student_id.eq(search_student_id))
            .order_by(crate::db::schema::orders::created_at.desc())
            .select(Order::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "list_orders_for_student: error loading orders for user {}: {}",
                    search_student_id, e
                );
                RepositoryError::from_diesel("orders", e)
            })?;

        Self::attach_items(conn.connection(), orders)
    }

    pub fn list_orders_for_canteen(
        &self,
        search_canteen_id: i32,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_orders_for_canteen: failed to acquire DB connection for canteen {}: {}",
                search_canteen_id, e
            );
            e
        })?;

        let orders: Vec<Order> = scope::live_orders()
            .filter(crate::db::schema::orders::canteen_id.eq(search_canteen_id))
            .order_by(crate::db::schema::orders::created_at.desc())
            .select(Order::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "list_orders_for_canteen: error loading orders for canteen {}: {}",
                    search_canteen_id, e
                );
                RepositoryError::from_diesel("orders", e)
            })?;

        Self::attach_items(conn.connection(), orders)
    }

    fn attach_items(
        conn: &mut PgConnection,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let order_ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();
        let rows = {
            use crate::db::schema::order_items::dsl::*;
            order_items
                .filter(order_id.eq_any(&order_ids))
                .select(OrderItemRow::as_select())
                .load::<OrderItemRow>(conn)
                .map_err(RepositoryError::DatabaseError)?
        };

        let mut grouped: HashMap<i32, Vec<OrderItemRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row);
        }
        debug!("attach_items: grouped items for {} orders", orders.len());

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = grouped.remove(&order.order_id).unwrap_or_default();
                OrderDetail { order, items }
            })
            .collect())
    }

    /// Soft delete: hides the order from listings and analytics while the
    /// row is retained. Only terminal orders can be hidden.
    pub fn soft_delete_order(
        &self,
        search_order_id: i32,
        actor: &OrderActor,
    ) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "soft_delete_order: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            let order: Order = scope::live_orders()
                .filter(crate::db::schema::orders::order_id.eq(search_order_id))
                .select(Order::as_select())
                .for_update()
                .first(conn)
                .map_err(|e| {
                    RepositoryError::from_diesel(&format!("order {}", search_order_id), e)
                })?;

            let allowed = match actor {
                OrderActor::Admin => true,
                OrderActor::Student(user_id) => *user_id == order.student_id,
                OrderActor::Vendor { .. } => false,
            };
            if !allowed {
                return Err(RepositoryError::Forbidden(format!(
                    "Actor may not delete order {}",
                    search_order_id
                )));
            }
            if !order.status.is_terminal() {
                return Err(RepositoryError::ValidationError(format!(
                    "Order {} is still {}; only completed or cancelled orders can be removed",
                    search_order_id, order.status
                )));
            }

            use crate::db::schema::orders::dsl::*;
            diesel::update(orders.filter(order_id.eq(search_order_id)))
                .set(is_deleted.eq(true))
                .execute(conn)
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("order {}", search_order_id))
                    }
                    other => RepositoryError::DatabaseError(other),
                })?;
            Ok(())
        })
    }
}
