//! # Seed Data Generator
//!
//! Populates a development database with customers, tiered products, and
//! carts, then places one demo order so the full flow is visible.
//!
//! ## Usage
//! ```bash
//! # Default database path (./arcadia_dev.db)
//! cargo run -p arcadia-db --bin seed
//!
//! # Custom amount / path
//! cargo run -p arcadia-db --bin seed -- --products 200 --db ./data/arcadia.db
//! ```

use chrono::Utc;
use std::env;
use uuid::Uuid;

use arcadia_core::{PricingTier, Product, User};
use arcadia_db::{Database, DbConfig, OrderItemRequest, PlaceOrderRequest};

/// Product name pool for generated catalog data.
const PRODUCT_NAMES: &[(&str, &str)] = &[
    ("DESK", "Standing Desk"),
    ("CHAIR", "Ergonomic Chair"),
    ("LAMP", "LED Desk Lamp"),
    ("MON", "27in Monitor"),
    ("KEYB", "Mechanical Keyboard"),
    ("MOUSE", "Wireless Mouse"),
    ("DOCK", "USB-C Dock"),
    ("HUB", "4-Port Hub"),
    ("MAT", "Desk Mat"),
    ("STAND", "Laptop Stand"),
    ("CABLE", "Braided Cable"),
    ("SHELF", "Wall Shelf"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut product_count: usize = 60;
    let mut db_path = String::from("./arcadia_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    product_count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Arcadia Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --products <N>  Number of products to generate (default: 60)");
                println!("  -d, --db <PATH>     Database file path (default: ./arcadia_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Arcadia Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Products: {}", product_count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = arcadia_db::migrations::migration_status(db.pool()).await?;
    println!("Connected; migrations applied: {}/{}", applied, total);

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products; skipping seed.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    // Customers: one referred by an agent, one not.
    let referred = User {
        id: Uuid::new_v4().to_string(),
        email: "referred@example.com".to_string(),
        assigned_sales_agent_id: Some("agent-demo-1".to_string()),
        created_at: Utc::now(),
    };
    let organic = User {
        id: Uuid::new_v4().to_string(),
        email: "organic@example.com".to_string(),
        assigned_sales_agent_id: None,
        created_at: Utc::now(),
    };
    db.users().insert(&referred).await?;
    db.users().insert(&organic).await?;
    println!("Seeded 2 users (1 agent-referred)");

    // Products with a three-step tier ladder each.
    let mut first_product_id = None;
    for seed in 0..product_count {
        let (code, name) = PRODUCT_NAMES[seed % PRODUCT_NAMES.len()];
        let product = generate_product(code, name, seed);

        db.products().insert(&product).await?;
        for tier in generate_tiers(&product) {
            db.products().insert_tier(&tier).await?;
        }

        if first_product_id.is_none() {
            first_product_id = Some(product.id.clone());
        }
    }
    println!("Seeded {} products with tier ladders", product_count);

    // A cart for the referred customer, then a demo placement.
    let product_id = first_product_id.expect("at least one product seeded");
    db.carts().upsert_item(&referred.id, &product_id, 5).await?;

    let summary = db
        .placement()
        .place_order(PlaceOrderRequest {
            user_id: referred.id.clone(),
            items: vec![OrderItemRequest {
                product_id,
                quantity: 5,
            }],
            shipping_address: Some("addr-demo-1".to_string()),
        })
        .await?;

    println!("Demo order placed:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let commission = db.commissions().get_for_order(&summary.id).await?;
    match commission {
        Some(c) => println!(
            "Commission earned: {} cents for agent {}",
            c.amount_cents, c.sales_agent_id
        ),
        None => println!("No commission earned"),
    }

    println!();
    println!("Seed complete!");

    Ok(())
}

/// Generates one product with a deterministic pseudo-random price/stock.
fn generate_product(code: &str, name: &str, seed: usize) -> Product {
    let now = Utc::now();

    let base_price = 19_99 + ((seed * 137) % 180_00) as i64;

    Product {
        id: Uuid::new_v4().to_string(),
        sku: format!("{}-{:03}", code, seed),
        name: format!("{} v{}", name, seed / PRODUCT_NAMES.len() + 1),
        base_price_cents: base_price,
        stock_quantity: (seed % 90 + 10) as i64,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Three-step ladder below the base price: 1-3, 4-11, 12+.
fn generate_tiers(product: &Product) -> Vec<PricingTier> {
    let base = product.base_price_cents;

    let step = |min: i64, max: Option<i64>, price: i64| PricingTier {
        id: Uuid::new_v4().to_string(),
        product_id: product.id.clone(),
        min_quantity: min,
        max_quantity: max,
        unit_price_cents: price,
    };

    vec![
        step(1, Some(3), base - base / 10),
        step(4, Some(11), base - base / 5),
        step(12, None, base - base / 3),
    ]
}
