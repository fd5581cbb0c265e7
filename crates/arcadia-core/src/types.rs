//! # Domain Types
//!
//! Core domain types for the Arcadia order core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐   ┌────────────────┐   ┌────────────────┐        │
//! │  │    Product    │   │     Order      │   │   Commission   │        │
//! │  │  ───────────  │   │  ────────────  │   │  ────────────  │        │
//! │  │  id (UUID)    │   │  id (UUID)     │   │  id (UUID)     │        │
//! │  │  sku          │   │  order_number  │   │  order_id (FK) │        │
//! │  │  base_price   │   │  status        │   │  rate_bps      │        │
//! │  │  stock        │◄──│  total_cents   │──►│  amount_cents  │        │
//! │  └──────┬────────┘   └───────┬────────┘   └────────────────┘        │
//! │         │ 1:N                │ 1:N                                  │
//! │  ┌──────▼────────┐   ┌───────▼────────┐                             │
//! │  │  PricingTier  │   │   OrderItem    │                             │
//! │  │  min..max     │   │  qty, frozen   │                             │
//! │  │  unit_price   │   │  unit price    │                             │
//! │  └───────────────┘   └────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Entities carry both an `id` (UUID v4, immutable, used for relations) and,
//! where humans need one, a business identifier (sku, order_number).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5.0%. Integer bps keep rate
/// arithmetic exact; see [`Money::percent_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as the order core sees it.
///
/// Owned by catalog management; the order core reads it and performs the
/// atomic stock decrement, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown in the storefront and on order items.
    pub name: String,

    /// Price in cents used only when no pricing tier matches.
    pub base_price_cents: i64,

    /// Authoritative available stock count. Never negative.
    pub stock_quantity: i64,

    /// Whether product is purchasable (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

// =============================================================================
// Pricing Tier
// =============================================================================

/// A quantity range mapped to a fixed unit price for one product.
///
/// Ranges are inclusive on both ends; `max_quantity: None` means the tier
/// is unbounded above. Catalog management keeps a product's tiers
/// non-overlapping and ordered by `min_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PricingTier {
    pub id: String,
    pub product_id: String,
    /// Lowest quantity this tier applies to. Always > 0.
    pub min_quantity: i64,
    /// Highest quantity this tier applies to, inclusive. None = unbounded.
    pub max_quantity: Option<i64>,
    /// Unit price in cents while this tier applies.
    pub unit_price_cents: i64,
}

impl PricingTier {
    /// Checks whether a quantity falls inside this tier's range.
    pub fn contains(&self, quantity: i64) -> bool {
        if quantity < self.min_quantity {
            return false;
        }
        match self.max_quantity {
            Some(max) => quantity <= max,
            None => true,
        }
    }

    /// Returns the tier's unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// ## State Machine
/// ```text
/// pending ──► confirmed ──► processing ──► shipped ──► delivered
///    │            │             │             │
///    └────────────┴─────────────┴─────────────┴──────► cancelled
/// ```
///
/// Transitions move forward only; `cancelled` is reachable from any state
/// except the terminal ones. Placement always writes `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created by placement; awaiting confirmation.
    Pending,
    /// Accepted for fulfillment.
    Confirmed,
    /// Being picked and packed.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer. Terminal.
    Delivered,
    /// Abandoned before delivery. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Position in the forward chain. Cancelled sits outside it.
    const fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Processing => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Cancelled => 5,
        }
    }

    /// Checks if no further transition is allowed from this status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Checks whether moving from `self` to `next` is a legal transition.
    ///
    /// Forward steps of exactly one stage, plus cancellation from any
    /// non-terminal state. Self-transitions are rejected.
    pub const fn can_transition_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            OrderStatus::Cancelled => true,
            _ => next.rank() == self.rank() + 1,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Created atomically with its items; `total_cents` equals the sum of the
/// items' line totals for the lifetime of the order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    /// Human-readable unique identifier, distinct from `id`.
    pub order_number: String,
    /// Owning customer. Immutable.
    pub user_id: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    /// Opaque reference to a shipping address held by the account service.
    pub shipping_address: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern: sku, name, and unit price are frozen at
/// order time and never recomputed, so historical orders keep their
/// totals when the catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// SKU at time of order (frozen).
    pub sku_snapshot: String,
    /// Product name at time of order (frozen).
    pub name_snapshot: String,
    /// Quantity ordered. Always > 0.
    pub quantity: i64,
    /// Unit price in cents resolved at order time (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit_price_cents.
    pub line_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Commission
// =============================================================================

/// Payment lifecycle of a commission. Payout handling is out of scope;
/// the order core only ever writes `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    Pending,
    Paid,
}

/// A monetary credit owed to a sales agent for a qualifying order.
///
/// At most one per order; created only inside order placement.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Commission {
    pub id: String,
    pub order_id: String,
    pub sales_agent_id: String,
    /// Commission rate in basis points (500 = 5.0%).
    pub rate_bps: u32,
    /// order total × rate, in cents.
    pub amount_cents: i64,
    pub status: CommissionStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Commission {
    /// Returns the commission rate.
    #[inline]
    pub fn rate(&self) -> Rate {
        Rate::from_bps(self.rate_bps)
    }

    /// Returns the commission amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// User
// =============================================================================

/// A storefront customer, as the order core sees one.
///
/// Owned by the account service; the core reads the agent assignment and
/// counts the user's orders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Referring sales agent, set at registration. Immutable here.
    pub assigned_sales_agent_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in a user's durable storefront cart.
///
/// The cart is input to placement, not part of the order record; placement
/// clears it after a successful commit.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_percentage() {
        let rate = Rate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_tier_contains_inclusive_bounds() {
        let tier = PricingTier {
            id: "t1".to_string(),
            product_id: "p1".to_string(),
            min_quantity: 4,
            max_quantity: Some(11),
            unit_price_cents: 9000,
        };

        assert!(!tier.contains(3));
        assert!(tier.contains(4)); // lower bound inclusive
        assert!(tier.contains(11)); // upper bound inclusive
        assert!(!tier.contains(12));
    }

    #[test]
    fn test_tier_unbounded_above() {
        let tier = PricingTier {
            id: "t1".to_string(),
            product_id: "p1".to_string(),
            min_quantity: 12,
            max_quantity: None,
            unit_price_cents: 8000,
        };

        assert!(!tier.contains(11));
        assert!(tier.contains(12));
        assert!(tier.contains(10_000));
    }

    #[test]
    fn test_status_forward_chain() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
    }

    #[test]
    fn test_status_no_skipping_or_backwards() {
        use OrderStatus::*;

        assert!(!Pending.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_status_cancellation() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Cancelled));

        // Terminal states allow nothing
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
