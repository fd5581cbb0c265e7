//! # Order Placement
//!
//! The one multi-statement transaction in the system: turning a list of
//! (product, quantity) pairs into a durable order.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  place_order(user, items)                                           │
//! │                                                                     │
//! │  0. validate input              (no I/O; EmptyOrder, quantities)    │
//! │  ┌─ BEGIN ─────────────────────────────────────────────────────┐    │
//! │  │ 1. per item:                                                │    │
//! │  │      reserve stock          (atomic floor-checked UPDATE)   │    │
//! │  │      load product + tiers   (missing/inactive → NotFound)   │    │
//! │  │      resolve unit price     (frozen onto the line item)     │    │
//! │  │ 2. insert order (pending) + all order items                 │    │
//! │  │ 3. count user's orders      (includes the one just made)    │    │
//! │  │    read assigned agent, evaluate commission policy          │    │
//! │  │ 4. insert commission if granted                             │    │
//! │  └─ COMMIT ────────────────────────────────────────────────────┘    │
//! │  5. clear the user's cart     (best effort, after commit)           │
//! │                                                                     │
//! │  Any failure before COMMIT rolls the whole transaction back:        │
//! │  no order, no items, no stock change, no commission.                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Under Contention
//! The reservation is a single `UPDATE ... SET stock_quantity =
//! stock_quantity - ? WHERE ... AND stock_quantity >= ?`. Two placements
//! racing for the last unit serialize on SQLite's writer lock; the loser
//! sees the committed decrement and fails the floor check. Stock is never
//! read into memory and written back, so it can never go negative - and
//! the schema CHECK backs that up.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use arcadia_core::validation::{validate_order_size, validate_quantity};
use arcadia_core::{
    resolve_unit_price, CommissionGrant, CommissionPolicy, CommissionStatus, Money, OrderItem,
    OrderStatus, PricingTier, Product, ValidationError,
};

use crate::error::{DbError, DbResult};
use crate::repository::cart::CartRepository;

// =============================================================================
// Request / Response DTOs
// =============================================================================

/// One requested line: which product, how many.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// The placement entry point's input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub items: Vec<OrderItemRequest>,
    /// Opaque reference to a shipping address held by the account service.
    pub shipping_address: Option<String>,
}

/// What callers get back from a successful placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub order_number: String,
    pub total_cents: i64,
    pub status: OrderStatus,
}

// =============================================================================
// Failure Taxonomy
// =============================================================================

/// Why a placement was rejected. Every variant except a post-commit
/// cart-clear hiccup means NOTHING was persisted.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// No items submitted; rejected before any I/O.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// A quantity or order-size rule failed; rejected before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced product does not exist or is inactive.
    #[error("product not found or inactive: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds available stock for some product.
    #[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// The store transaction could not commit (busy writer, order-number
    /// collision, ...). Retry the whole placement from scratch.
    #[error("order transaction failed: {0}")]
    Transaction(#[from] DbError),
}

// =============================================================================
// Placement Service
// =============================================================================

/// Places orders. Holds the pool and the commission policy; everything
/// else is per-call state.
#[derive(Debug, Clone)]
pub struct OrderPlacement {
    pool: SqlitePool,
    policy: CommissionPolicy,
}

impl OrderPlacement {
    /// Creates a placement service with the given commission policy.
    pub fn new(pool: SqlitePool, policy: CommissionPolicy) -> Self {
        OrderPlacement { pool, policy }
    }

    /// Places an order: all-or-nothing across every requested item.
    ///
    /// On success the order exists with status `pending`, stock is
    /// decremented, a commission row exists if the policy granted one,
    /// and the user's cart has been cleared (best effort).
    pub async fn place_order(&self, req: PlaceOrderRequest) -> Result<OrderSummary, PlacementError> {
        // -- Step 0: input validation, before any I/O -----------------------
        if req.items.is_empty() {
            return Err(PlacementError::EmptyOrder);
        }
        validate_order_size(req.items.len())?;
        for item in &req.items {
            validate_quantity(item.quantity)?;
        }

        debug!(user_id = %req.user_id, items = req.items.len(), "Placing order");

        let order_id = Uuid::new_v4().to_string();
        let order_number = generate_order_number(&req.user_id);
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        // -- Step 1: reserve stock and price each line ----------------------
        // The reservation UPDATE runs before anything else touches the
        // product, so the first statement of the transaction already takes
        // the writer lock and concurrent placements serialize here.
        let mut order_items = Vec::with_capacity(req.items.len());
        let mut total = Money::zero();

        for item in &req.items {
            Self::reserve_stock(&mut tx, &item.product_id, item.quantity).await?;

            let (product, tiers) = Self::load_product(&mut tx, &item.product_id).await?;

            let unit_price = resolve_unit_price(&product, &tiers, item.quantity);
            let line_total = unit_price.multiply_quantity(item.quantity);
            total += line_total;

            order_items.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: product.id.clone(),
                sku_snapshot: product.sku.clone(),
                name_snapshot: product.name.clone(),
                quantity: item.quantity,
                unit_price_cents: unit_price.cents(),
                line_total_cents: line_total.cents(),
                created_at: now,
            });
        }

        // -- Step 2: persist the order and its items ------------------------
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, user_id, status, total_cents,
                shipping_address, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order_id)
        .bind(&order_number)
        .bind(&req.user_id)
        .bind(OrderStatus::Pending)
        .bind(total.cents())
        .bind(&req.shipping_address)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        for item in &order_items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, sku_snapshot, name_snapshot,
                    quantity, unit_price_cents, line_total_cents, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.sku_snapshot)
            .bind(&item.name_snapshot)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.line_total_cents)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;
        }

        // -- Step 3: evaluate the commission rule ---------------------------
        // The order row is already inserted, so this count includes the
        // order being placed: "first three orders" means count <= 3 here.
        // Cancelled orders count too (no status filter).
        let lifetime_orders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = ?")
                .bind(&req.user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(DbError::from)?;

        let assigned_agent: Option<String> =
            sqlx::query_scalar::<_, Option<String>>(
                "SELECT assigned_sales_agent_id FROM users WHERE id = ?",
            )
            .bind(&req.user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(DbError::from)?
            .flatten();

        let grant = self
            .policy
            .evaluate(assigned_agent.as_deref(), lifetime_orders, total);

        // -- Step 4: persist the commission if granted ----------------------
        if let Some(grant) = &grant {
            Self::insert_commission(&mut tx, &order_id, grant, now).await?;
        }

        // -- Commit ---------------------------------------------------------
        // An order-number collision surfaces here as a unique violation;
        // like any other commit failure it means "retry the whole call".
        tx.commit().await.map_err(DbError::from)?;

        info!(
            order_id = %order_id,
            order_number = %order_number,
            user_id = %req.user_id,
            total_cents = total.cents(),
            items = order_items.len(),
            commission = grant.is_some(),
            "Order placed"
        );

        // -- Step 5: cart clear, best effort --------------------------------
        // The order is durable; a cart hiccup must not turn it into a
        // failure. The stale cart self-corrects on next checkout.
        if let Err(e) = CartRepository::new(self.pool.clone())
            .clear_for_user(&req.user_id)
            .await
        {
            warn!(user_id = %req.user_id, error = %e, "Cart clear failed after order commit");
        }

        Ok(OrderSummary {
            id: order_id,
            order_number,
            total_cents: total.cents(),
            status: OrderStatus::Pending,
        })
    }

    /// Atomically reserves stock for one line.
    ///
    /// Single floor-checked UPDATE - the read and the write are one
    /// statement, so no interleaving can oversell. Zero rows affected
    /// means the floor check failed OR the product is missing/inactive;
    /// a follow-up read inside the same transaction tells the two apart.
    async fn reserve_stock(
        conn: &mut SqliteConnection,
        product_id: &str,
        quantity: i64,
    ) -> Result<(), PlacementError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - ?,
                updated_at = ?
            WHERE id = ? AND is_active = 1 AND stock_quantity >= ?
            "#,
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let row: Option<(i64, bool)> =
            sqlx::query_as("SELECT stock_quantity, is_active FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(DbError::from)?;

        match row {
            Some((available, true)) => Err(PlacementError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available,
            }),
            _ => Err(PlacementError::ProductNotFound(product_id.to_string())),
        }
    }

    /// Loads a product and its tiers inside the transaction.
    ///
    /// Runs after a successful reservation, so the product exists; the
    /// None arm covers a concurrent hard delete, which the schema doesn't
    /// do but the type system can't know.
    async fn load_product(
        conn: &mut SqliteConnection,
        product_id: &str,
    ) -> Result<(Product, Vec<PricingTier>), PlacementError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, sku, name, base_price_cents, stock_quantity,
                   is_active, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| PlacementError::ProductNotFound(product_id.to_string()))?;

        let tiers = sqlx::query_as::<_, PricingTier>(
            r#"
            SELECT id, product_id, min_quantity, max_quantity, unit_price_cents
            FROM pricing_tiers
            WHERE product_id = ?
            ORDER BY min_quantity, id
            "#,
        )
        .bind(product_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(DbError::from)?;

        Ok((product, tiers))
    }

    /// Persists a granted commission for the order, status `pending`.
    async fn insert_commission(
        conn: &mut SqliteConnection,
        order_id: &str,
        grant: &CommissionGrant,
        now: chrono::DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO commissions (
                id, order_id, sales_agent_id, rate_bps, amount_cents,
                status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(order_id)
        .bind(&grant.sales_agent_id)
        .bind(grant.rate.bps())
        .bind(grant.amount.cents())
        .bind(CommissionStatus::Pending)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Order Numbers
// =============================================================================

/// Generates an order number: `ORD-YYYYMMDD-UUUU-XXXXXX`.
///
/// - YYYYMMDD: order date
/// - UUUU: first characters of the user id, for eyeball grouping
/// - XXXXXX: random hex suffix
///
/// Readability aid only. TRUE uniqueness comes from the UNIQUE constraint
/// on orders.order_number; a collision fails the commit and the caller
/// retries with a fresh number.
fn generate_order_number(user_id: &str) -> String {
    let date_part = Utc::now().format("%Y%m%d");

    let user_part: String = user_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(4)
        .collect::<String>()
        .to_uppercase();
    let user_part = if user_part.is_empty() {
        "ANON".to_string()
    } else {
        user_part
    };

    let suffix: String = Uuid::new_v4().simple().to_string()[..6].to_uppercase();

    format!("ORD-{date_part}-{user_part}-{suffix}")
}
