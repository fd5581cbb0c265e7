//! # arcadia-core: Pure Business Logic for the Arcadia Order Core
//!
//! This crate holds the decision logic of order placement as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Arcadia Order Placement                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │              Storefront / Admin API (out of scope)            │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                arcadia-db (order transaction)                 │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ arcadia-core (THIS CRATE) ★                    │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌───────────────┐     │  │
//! │  │  │  types  │ │  money  │ │  pricing   │ │  commission   │     │  │
//! │  │  │ Product │ │  Money  │ │ tier match │ │ agent policy  │     │  │
//! │  │  │  Order  │ │  Rate   │ │            │ │               │     │  │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └───────────────┘     │  │
//! │  │                                                               │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Commission, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Quantity-tier price resolution
//! - [`commission`] - Sales-agent commission policy
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output, every time
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer money**: all monetary values are cents (i64)
//! 4. **Explicit errors**: typed errors, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use commission::{CommissionGrant, CommissionPolicy};
pub use error::ValidationError;
pub use money::Money;
pub use pricing::resolve_unit_price;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed in a single order.
///
/// Keeps a single placement transaction short-lived; the storefront cart
/// enforces the same ceiling.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Guards against accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Default sales-agent commission rate in basis points (500 = 5.0%).
///
/// Business rule owned by sales operations. Override via
/// [`CommissionPolicy`], not by editing transaction logic.
pub const DEFAULT_COMMISSION_RATE_BPS: u32 = 500;

/// Orders 1..=N of a referred customer earn a commission; later orders do
/// not. The count includes the order being placed.
pub const DEFAULT_COMMISSIONED_ORDER_CAP: i64 = 3;
