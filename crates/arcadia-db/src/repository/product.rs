//! # Product Repository
//!
//! Catalog reads for the order core, plus the inventory adjustments the
//! admin surface needs.
//!
//! The stock decrement that accompanies order placement does NOT live
//! here: it is part of the placement transaction in [`crate::placement`]
//! and never runs outside it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use arcadia_core::validation::validate_price_cents;
use arcadia_core::{PricingTier, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, sku, name, base_price_cents, stock_quantity,
                   is_active, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product together with its pricing tiers, ordered by
    /// ascending min_quantity the way the resolver scans them.
    pub async fn get_with_tiers(&self, id: &str) -> DbResult<Option<(Product, Vec<PricingTier>)>> {
        let Some(product) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let tiers = self.tiers_for(id).await?;
        Ok(Some((product, tiers)))
    }

    /// Lists the pricing tiers for a product, ascending by min_quantity.
    pub async fn tiers_for(&self, product_id: &str) -> DbResult<Vec<PricingTier>> {
        let tiers = sqlx::query_as::<_, PricingTier>(
            r#"
            SELECT id, product_id, min_quantity, max_quantity, unit_price_cents
            FROM pricing_tiers
            WHERE product_id = ?
            ORDER BY min_quantity, id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tiers)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        validate_price_cents(product.base_price_cents)
            .map_err(|e| DbError::QueryFailed(e.to_string()))?;

        debug!(sku = %product.sku, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, base_price_cents, stock_quantity,
                is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.base_price_cents)
        .bind(product.stock_quantity)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a pricing tier for a product.
    pub async fn insert_tier(&self, tier: &PricingTier) -> DbResult<()> {
        validate_price_cents(tier.unit_price_cents)
            .map_err(|e| DbError::QueryFailed(e.to_string()))?;

        debug!(product_id = %tier.product_id, min = tier.min_quantity, "Inserting pricing tier");

        sqlx::query(
            r#"
            INSERT INTO pricing_tiers (
                id, product_id, min_quantity, max_quantity, unit_price_cents
            ) VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tier.id)
        .bind(&tier.product_id)
        .bind(tier.min_quantity)
        .bind(tier.max_quantity)
        .bind(tier.unit_price_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Adjusts product stock by a delta (positive for restocking).
    ///
    /// Delta update, not an absolute write, so concurrent adjustments
    /// compose. The schema CHECK rejects any adjustment that would take
    /// stock below zero.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = delta, "Adjusting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity + ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(delta)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Soft-deletes a product. Historical order items keep referencing it.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET is_active = 0,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
