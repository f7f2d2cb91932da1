//! Reason classification and priority assignment.
//!
//! Reason selection is a fixed-order, first-match rule list: one reason per
//! recommendation, never multi-label, so output stays deterministic and the
//! precedence is auditable in a single place.

use serde::{Deserialize, Serialize};

use stocksense_catalog::CatalogItem;

use crate::lead_time::LeadTime;
use crate::stockout::DaysOfStock;
use crate::velocity::VelocityEstimate;

/// Why an item needs reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderReason {
    OutOfStock,
    BelowMinimum,
    HighVelocityStockoutRisk,
}

impl ReorderReason {
    /// Evaluation order. Earlier rules shadow later ones: an out-of-stock
    /// item is reported as out of stock even if it is also below its floor.
    pub const RULE_ORDER: [ReorderReason; 3] = [
        ReorderReason::OutOfStock,
        ReorderReason::BelowMinimum,
        ReorderReason::HighVelocityStockoutRisk,
    ];

    /// Display label; presentation only, irrelevant to the computation.
    pub fn label(&self) -> &'static str {
        match self {
            ReorderReason::OutOfStock => "Out of stock",
            ReorderReason::BelowMinimum => "Below minimum level",
            ReorderReason::HighVelocityStockoutRisk => "Selling out soon",
        }
    }

    /// Display icon; presentation only.
    pub fn icon(&self) -> &'static str {
        match self {
            ReorderReason::OutOfStock => "🚫",
            ReorderReason::BelowMinimum => "📉",
            ReorderReason::HighVelocityStockoutRisk => "🔥",
        }
    }

    fn triggers(
        &self,
        item: &CatalogItem,
        estimate: &VelocityEstimate,
        days_remaining: DaysOfStock,
        lead_time: LeadTime,
    ) -> bool {
        match self {
            ReorderReason::OutOfStock => item.is_out_of_stock(),
            ReorderReason::BelowMinimum => item.is_below_minimum(),
            // A zero velocity from an empty window is not a measured rate;
            // without data this rule must not fire.
            ReorderReason::HighVelocityStockoutRisk => {
                estimate.has_sufficient_data && days_remaining.at_most(lead_time.days())
            }
        }
    }
}

impl core::fmt::Display for ReorderReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// How urgently to act. Total order: `Critical` outranks everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl ReorderPriority {
    pub fn label(&self) -> &'static str {
        match self {
            ReorderPriority::Low => "low",
            ReorderPriority::Medium => "medium",
            ReorderPriority::High => "high",
            ReorderPriority::Critical => "critical",
        }
    }
}

impl core::fmt::Display for ReorderPriority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pick the single triggering reason, or `None` when the item needs no
/// recommendation at all.
pub fn classify(
    item: &CatalogItem,
    estimate: &VelocityEstimate,
    days_remaining: DaysOfStock,
    lead_time: LeadTime,
) -> Option<ReorderReason> {
    ReorderReason::RULE_ORDER
        .into_iter()
        .find(|reason| reason.triggers(item, estimate, days_remaining, lead_time))
}

/// Assign a priority tier to an already-classified item.
///
/// Thresholds scale with lead time, so for fixed stock and velocity a longer
/// lead time can only hold or escalate the tier, never lower it.
pub fn prioritize(
    reason: ReorderReason,
    days_remaining: DaysOfStock,
    lead_time: LeadTime,
) -> ReorderPriority {
    if reason == ReorderReason::OutOfStock || days_remaining == DaysOfStock::Finite(0) {
        return ReorderPriority::Critical;
    }
    if reason == ReorderReason::BelowMinimum || days_remaining.at_most(lead_time.days()) {
        return ReorderPriority::High;
    }
    if days_remaining.at_most(2 * lead_time.days()) {
        return ReorderPriority::Medium;
    }
    // Triggered but not urgent. Unreachable for the current rule list (every
    // reason lands in a tier above); final arm of the priority table.
    ReorderPriority::Low
}
