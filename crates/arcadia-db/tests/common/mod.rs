//! Shared fixtures for the integration tests: an in-memory database plus
//! seed helpers for users and tiered products.

// Each test binary compiles this module; not every binary uses every helper.
#![allow(dead_code)]

use chrono::Utc;
use uuid::Uuid;

use arcadia_core::{PricingTier, Product, User};
use arcadia_db::{Database, DbConfig};

/// Fresh in-memory database with migrations applied.
pub async fn test_db() -> Database {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Inserts a user, optionally referred by a sales agent. Returns the id.
pub async fn seed_user(db: &Database, agent: Option<&str>) -> String {
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: format!("{}@example.com", Uuid::new_v4().simple()),
        assigned_sales_agent_id: agent.map(str::to_string),
        created_at: Utc::now(),
    };
    db.users().insert(&user).await.expect("insert user");
    user.id
}

/// Inserts a product with the given stock and tier ladder. Tiers are
/// (min_quantity, max_quantity, unit_price_cents). Returns the id.
pub async fn seed_product(
    db: &Database,
    base_price_cents: i64,
    stock_quantity: i64,
    tiers: &[(i64, Option<i64>, i64)],
) -> String {
    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        sku: format!("SKU-{}", Uuid::new_v4().simple()),
        name: "Test Widget".to_string(),
        base_price_cents,
        stock_quantity,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await.expect("insert product");

    for (min_quantity, max_quantity, unit_price_cents) in tiers {
        let tier = PricingTier {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            min_quantity: *min_quantity,
            max_quantity: *max_quantity,
            unit_price_cents: *unit_price_cents,
        };
        db.products().insert_tier(&tier).await.expect("insert tier");
    }

    product.id
}

/// The three-tier ladder from the pricing examples:
/// 1-3 → $100, 4-11 → $90, 12+ → $80.
pub fn standard_ladder() -> Vec<(i64, Option<i64>, i64)> {
    vec![
        (1, Some(3), 100_00),
        (4, Some(11), 90_00),
        (12, None, 80_00),
    ]
}

/// Current stock for a product, read straight from the store.
pub async fn stock_of(db: &Database, product_id: &str) -> i64 {
    db.products()
        .get_by_id(product_id)
        .await
        .expect("product query")
        .expect("product exists")
        .stock_quantity
}
