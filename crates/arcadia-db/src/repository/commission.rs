//! # Commission Repository
//!
//! Read paths over sales-agent commissions. Commissions are WRITTEN in
//! exactly one place - the order placement transaction - so this
//! repository exposes no insert.

use sqlx::SqlitePool;

use crate::error::DbResult;
use arcadia_core::Commission;

/// Repository for commission database operations.
#[derive(Debug, Clone)]
pub struct CommissionRepository {
    pool: SqlitePool,
}

impl CommissionRepository {
    /// Creates a new CommissionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CommissionRepository { pool }
    }

    /// Gets the commission earned by an order, if any.
    pub async fn get_for_order(&self, order_id: &str) -> DbResult<Option<Commission>> {
        let commission = sqlx::query_as::<_, Commission>(
            r#"
            SELECT id, order_id, sales_agent_id, rate_bps, amount_cents,
                   status, created_at
            FROM commissions
            WHERE order_id = ?
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(commission)
    }

    /// Lists an agent's commissions, newest first. Feeds the agent
    /// dashboard.
    pub async fn list_for_agent(&self, agent_id: &str, limit: u32) -> DbResult<Vec<Commission>> {
        let commissions = sqlx::query_as::<_, Commission>(
            r#"
            SELECT id, order_id, sales_agent_id, rate_bps, amount_cents,
                   status, created_at
            FROM commissions
            WHERE sales_agent_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(agent_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(commissions)
    }

    /// Counts all commissions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM commissions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
