//! # Repository Module
//!
//! Repository implementations for the Arcadia schema, one per aggregate.
//!
//! ## Repository Pattern
//! ```text
//! API layer ──► db.orders().get_by_id(id) ──► SQL ──► SQLite
//! ```
//! SQL stays isolated here; callers see typed domain structs. The one
//! exception is order placement, which owns its own multi-statement
//! transaction in [`crate::placement`] - repositories serve the
//! single-statement read/write paths around it.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - catalog reads, stock adjustments
//! - [`order::OrderRepository`] - order reads and status transitions
//! - [`commission::CommissionRepository`] - commission reads
//! - [`user::UserRepository`] - customer reads, agent assignment lookup
//! - [`cart::CartRepository`] - durable cart lines

pub mod cart;
pub mod commission;
pub mod order;
pub mod product;
pub mod user;
