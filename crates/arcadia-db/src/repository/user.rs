//! # User Repository
//!
//! The order core's narrow view of customers: who they are and which
//! sales agent, if any, referred them. Account management owns the rest.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use arcadia_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, assigned_sales_agent_id, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Returns the user's assigned sales agent, if any.
    ///
    /// A missing user and a user without an agent both resolve to `None`:
    /// neither can earn a commission.
    pub async fn assigned_agent(&self, user_id: &str) -> DbResult<Option<String>> {
        let agent: Option<Option<String>> =
            sqlx::query_scalar("SELECT assigned_sales_agent_id FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(agent.flatten())
    }

    /// Inserts a new user.
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, email, assigned_sales_agent_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.assigned_sales_agent_id)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
