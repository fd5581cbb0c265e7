//! # Commission Policy Engine
//!
//! Decides whether an order earns a commission for a referring sales
//! agent, and how much.
//!
//! ## The Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Customer places order (total $1000.00)                             │
//! │       │                                                             │
//! │       ├── no assigned agent?         ──► no commission              │
//! │       │                                                             │
//! │       ├── lifetime order count ≤ 3?  ──► 5.0% of total = $50.00     │
//! │       │   (count includes this order)                               │
//! │       │                                                             │
//! │       └── order count > 3            ──► no commission              │
//! │                                                                     │
//! │  The commission rewards agent-driven customer acquisition, so only  │
//! │  the customer's first orders qualify.                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a pure decision + arithmetic step. Persisting the grant
//! is the order transaction's job.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Rate;
use crate::{DEFAULT_COMMISSIONED_ORDER_CAP, DEFAULT_COMMISSION_RATE_BPS};

// =============================================================================
// Policy
// =============================================================================

/// The configurable commission rule.
///
/// Defaults come from the crate-level constants; override the fields to
/// change the rule without touching transaction logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CommissionPolicy {
    /// Rate applied to the order total.
    pub rate: Rate,
    /// Orders 1..=cap of a customer's lifetime earn commission.
    pub commissioned_order_cap: i64,
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        CommissionPolicy {
            rate: Rate::from_bps(DEFAULT_COMMISSION_RATE_BPS),
            commissioned_order_cap: DEFAULT_COMMISSIONED_ORDER_CAP,
        }
    }
}

/// A commission the policy has decided to grant.
///
/// Carries everything the transaction needs to persist a Commission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionGrant {
    pub sales_agent_id: String,
    pub rate: Rate,
    pub amount: Money,
}

impl CommissionPolicy {
    /// Evaluates the rule for one freshly created order.
    ///
    /// ## Arguments
    /// * `assigned_agent` - the customer's referring agent, if any
    /// * `lifetime_order_count` - the customer's order count INCLUDING the
    ///   order being placed; the caller counts after inserting the order row
    /// * `order_total` - the new order's total
    ///
    /// ## Returns
    /// `Some(grant)` when the order qualifies, `None` otherwise.
    pub fn evaluate(
        &self,
        assigned_agent: Option<&str>,
        lifetime_order_count: i64,
        order_total: Money,
    ) -> Option<CommissionGrant> {
        let agent = assigned_agent?;

        if lifetime_order_count > self.commissioned_order_cap {
            return None;
        }

        Some(CommissionGrant {
            sales_agent_id: agent.to_string(),
            rate: self.rate,
            amount: order_total.percent_of(self.rate),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_three_orders_earn_commission() {
        let policy = CommissionPolicy::default();
        let total = Money::from_cents(100_000); // $1000.00

        for count in 1..=3 {
            let grant = policy.evaluate(Some("agent-7"), count, total);
            let grant = grant.expect("orders 1-3 qualify");
            assert_eq!(grant.sales_agent_id, "agent-7");
            assert_eq!(grant.rate.bps(), 500);
            assert_eq!(grant.amount.cents(), 5_000); // $50.00
        }
    }

    #[test]
    fn test_fourth_order_earns_nothing() {
        let policy = CommissionPolicy::default();
        let total = Money::from_cents(100_000);

        assert!(policy.evaluate(Some("agent-7"), 4, total).is_none());
        assert!(policy.evaluate(Some("agent-7"), 100, total).is_none());
    }

    #[test]
    fn test_no_agent_never_earns() {
        let policy = CommissionPolicy::default();
        let total = Money::from_cents(100_000);

        for count in 1..=5 {
            assert!(policy.evaluate(None, count, total).is_none());
        }
    }

    #[test]
    fn test_custom_policy_overrides() {
        let policy = CommissionPolicy {
            rate: Rate::from_bps(1000), // 10%
            commissioned_order_cap: 1,
        };
        let total = Money::from_cents(50_00);

        let grant = policy.evaluate(Some("agent-1"), 1, total).unwrap();
        assert_eq!(grant.amount.cents(), 5_00);

        assert!(policy.evaluate(Some("agent-1"), 2, total).is_none());
    }

    #[test]
    fn test_evaluation_is_pure() {
        let policy = CommissionPolicy::default();
        let total = Money::from_cents(33_333);

        let a = policy.evaluate(Some("agent-7"), 2, total);
        let b = policy.evaluate(Some("agent-7"), 2, total);
        assert_eq!(a, b);
    }
}
