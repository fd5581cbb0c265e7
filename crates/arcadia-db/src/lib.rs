//! # arcadia-db: Database Layer for the Arcadia Order Core
//!
//! SQLite persistence for the order-placement core, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Arcadia Data Flow                             │
//! │                                                                     │
//! │  API handler (place order, out of scope)                            │
//! │       │                                                             │
//! │  ┌────▼────────────────────────────────────────────────────────┐    │
//! │  │                  arcadia-db (THIS CRATE)                    │    │
//! │  │                                                             │    │
//! │  │  ┌──────────────┐  ┌───────────────┐  ┌──────────────────┐  │    │
//! │  │  │   Database   │  │ Repositories  │  │  OrderPlacement  │  │    │
//! │  │  │  (pool.rs)   │  │ product/order │  │  the one multi-  │  │    │
//! │  │  │  SqlitePool  │◄─│ user/cart/    │  │  statement       │  │    │
//! │  │  │  migrations  │  │ commission    │  │  transaction     │  │    │
//! │  │  └──────────────┘  └───────────────┘  └──────────────────┘  │    │
//! │  └──────────────────────────────┬──────────────────────────────┘    │
//! │                                 │                                   │
//! │                          SQLite (WAL mode)                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - connection pool creation and configuration
//! - [`migrations`] - embedded database migrations
//! - [`error`] - database error types
//! - [`repository`] - per-aggregate repositories
//! - [`placement`] - the order placement transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arcadia_db::{Database, DbConfig, PlaceOrderRequest, OrderItemRequest};
//!
//! let db = Database::new(DbConfig::new("arcadia.db")).await?;
//!
//! let summary = db.placement().place_order(PlaceOrderRequest {
//!     user_id: user_id.clone(),
//!     items: vec![OrderItemRequest { product_id, quantity: 5 }],
//!     shipping_address: None,
//! }).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod placement;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use placement::{
    OrderItemRequest, OrderPlacement, OrderSummary, PlaceOrderRequest, PlacementError,
};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::commission::CommissionRepository;
pub use repository::order::{OrderRepository, OrderStatusError};
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
