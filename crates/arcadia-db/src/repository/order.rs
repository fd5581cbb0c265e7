//! # Order Repository
//!
//! Reads over placed orders and the administrator-driven status
//! transitions. Order CREATION is not here - orders come into existence
//! only through the placement transaction in [`crate::placement`].
//!
//! ## Status Lifecycle
//! ```text
//! pending ──► confirmed ──► processing ──► shipped ──► delivered
//!    └────────────┴─────────────┴────────────┴──► cancelled
//! ```
//! Placement writes `pending`; everything after that goes through
//! [`OrderRepository::update_status`], which enforces the state machine.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use arcadia_core::{Order, OrderItem, OrderStatus};

/// Failures of a status transition request.
#[derive(Debug, Error)]
pub enum OrderStatusError {
    #[error(transparent)]
    Db(#[from] DbError),

    /// The requested transition violates the order state machine.
    #[error("order {order_id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_number, user_id, status, total_cents,
                   shipping_address, created_at, updated_at
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all line items for an order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, sku_snapshot, name_snapshot,
                   quantity, unit_price_cents, line_total_cents, created_at
            FROM order_items
            WHERE order_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a user's orders, newest first.
    pub async fn list_for_user(&self, user_id: &str, limit: u32) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_number, user_id, status, total_cents,
                   shipping_address, created_at, updated_at
            FROM orders
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Counts a user's lifetime orders.
    ///
    /// No status filter: cancelled orders count, matching how the
    /// commission rule has always been applied.
    pub async fn count_for_user(&self, user_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Moves an order to a new status, enforcing the state machine.
    ///
    /// The UPDATE is guarded on the previously read status, so a
    /// concurrent transition surfaces as a retryable failure instead of
    /// silently overwriting.
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<Order, OrderStatusError> {
        let order = self
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", order_id))?;

        if !order.status.can_transition_to(new_status) {
            return Err(OrderStatusError::InvalidTransition {
                order_id: order_id.to_string(),
                from: order.status,
                to: new_status,
            });
        }

        debug!(order_id = %order_id, from = ?order.status, to = ?new_status, "Order status transition");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = ?, updated_at = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(new_status)
        .bind(now)
        .bind(order_id)
        .bind(order.status)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(OrderStatusError::Db(DbError::TransactionFailed(format!(
                "order {order_id} changed status concurrently"
            ))));
        }

        info!(order_id = %order_id, status = ?new_status, "Order status updated");

        Ok(Order {
            status: new_status,
            updated_at: now,
            ..order
        })
    }
}
