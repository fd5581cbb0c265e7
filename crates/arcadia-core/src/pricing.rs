//! # Pricing Tier Resolution
//!
//! Resolves the unit price for a (product, quantity) pair from the
//! product's quantity tiers.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Product P: base $120.00                                            │
//! │  Tiers:  1-3   → $100.00                                            │
//! │          4-11  → $90.00                                             │
//! │          12+   → $80.00                                             │
//! │                                                                     │
//! │  resolve_unit_price(P, tiers, 5)                                    │
//! │       │                                                             │
//! │       ├── 1-3 contains 5?   no                                      │
//! │       ├── 4-11 contains 5?  yes ──► $90.00                          │
//! │       │                                                             │
//! │  resolve_unit_price(P, tiers, 0 matching)  ──► base $120.00         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolved price is frozen onto the order item at placement time;
//! later tier edits never touch existing orders.

use crate::money::Money;
use crate::types::{PricingTier, Product};

/// Resolves the unit price for `quantity` units of `product`.
///
/// Pure function: no I/O, no side effects, same inputs always produce the
/// same price.
///
/// ## Selection Rule
/// Among tiers whose range contains `quantity` (bounds inclusive), the one
/// with the smallest `min_quantity` wins; among equal `min_quantity`, the
/// earliest in `tiers`. Overlapping tiers are a catalog data error, but the
/// tie-break keeps resolution deterministic rather than failing the order.
/// No matching tier (or no tiers at all) falls back to the base price.
///
/// ## Input Contract
/// `quantity` is a positive integer; callers validate before resolving.
pub fn resolve_unit_price(product: &Product, tiers: &[PricingTier], quantity: i64) -> Money {
    debug_assert!(quantity > 0, "quantity must be validated before pricing");

    let mut matching: Vec<&PricingTier> = tiers.iter().filter(|t| t.contains(quantity)).collect();
    // Stable sort: equal min_quantity keeps input order
    matching.sort_by_key(|t| t.min_quantity);

    match matching.first() {
        Some(tier) => tier.unit_price(),
        None => product.base_price(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(base_price_cents: i64) -> Product {
        Product {
            id: "p1".to_string(),
            sku: "WIDGET-01".to_string(),
            name: "Widget".to_string(),
            base_price_cents,
            stock_quantity: 10,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tier(min: i64, max: Option<i64>, unit_price_cents: i64) -> PricingTier {
        PricingTier {
            id: format!("t-{min}"),
            product_id: "p1".to_string(),
            min_quantity: min,
            max_quantity: max,
            unit_price_cents,
        }
    }

    /// Three-tier ladder used across the tests:
    /// 1-3 → $100, 4-11 → $90, 12+ → $80, base $120.
    fn ladder() -> Vec<PricingTier> {
        vec![
            tier(1, Some(3), 100_00),
            tier(4, Some(11), 90_00),
            tier(12, None, 80_00),
        ]
    }

    #[test]
    fn test_tier_selection_mid_range() {
        let p = product(120_00);
        let price = resolve_unit_price(&p, &ladder(), 5);
        assert_eq!(price.cents(), 90_00);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let p = product(120_00);
        let tiers = ladder();

        // min_quantity selects the tier
        assert_eq!(resolve_unit_price(&p, &tiers, 4).cents(), 90_00);
        // max_quantity still selects the tier
        assert_eq!(resolve_unit_price(&p, &tiers, 11).cents(), 90_00);
        // one above max falls through to the next tier
        assert_eq!(resolve_unit_price(&p, &tiers, 12).cents(), 80_00);
    }

    #[test]
    fn test_unbounded_tier() {
        let p = product(120_00);
        assert_eq!(resolve_unit_price(&p, &ladder(), 500).cents(), 80_00);
    }

    #[test]
    fn test_no_tiers_falls_back_to_base_price() {
        let p = product(120_00);
        assert_eq!(resolve_unit_price(&p, &[], 5).cents(), 120_00);
    }

    #[test]
    fn test_gap_falls_back_to_base_price() {
        // Tiers start at 10; smaller quantities have no tier
        let p = product(120_00);
        let tiers = vec![tier(10, None, 80_00)];
        assert_eq!(resolve_unit_price(&p, &tiers, 3).cents(), 120_00);
        assert_eq!(resolve_unit_price(&p, &tiers, 10).cents(), 80_00);
    }

    #[test]
    fn test_overlap_first_by_min_quantity_wins() {
        // Overlapping data error: 1-10 and 5-20 both contain 7.
        // The smaller min_quantity wins regardless of slice order.
        let p = product(120_00);
        let tiers = vec![tier(5, Some(20), 70_00), tier(1, Some(10), 100_00)];
        assert_eq!(resolve_unit_price(&p, &tiers, 7).cents(), 100_00);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let p = product(120_00);
        let tiers = ladder();
        let first = resolve_unit_price(&p, &tiers, 6);
        let second = resolve_unit_price(&p, &tiers, 6);
        assert_eq!(first, second);
    }
}
