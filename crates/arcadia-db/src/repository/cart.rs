//! # Cart Repository
//!
//! The durable storefront cart: one row per (user, product). Placement
//! reads nothing from here - the request carries its own item list - but
//! clears the cart after a successful commit.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use arcadia_core::CartItem;

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Adds a product to a user's cart, accumulating quantity if the
    /// product is already there.
    pub async fn upsert_item(&self, user_id: &str, product_id: &str, quantity: i64) -> DbResult<()> {
        debug!(user_id = %user_id, product_id = %product_id, quantity, "Upserting cart item");

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO cart_items (id, user_id, product_id, quantity, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = quantity + excluded.quantity
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets all cart lines for a user.
    pub async fn items_for_user(&self, user_id: &str) -> DbResult<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, user_id, product_id, quantity, created_at
            FROM cart_items
            WHERE user_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Removes every line from a user's cart. Returns the number of lines
    /// removed. Clearing an empty cart is not an error.
    pub async fn clear_for_user(&self, user_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        debug!(user_id = %user_id, removed = result.rows_affected(), "Cart cleared");

        Ok(result.rows_affected())
    }
}
