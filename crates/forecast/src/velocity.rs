//! Velocity estimation: reduce a sale history to average daily demand.

use serde::{Deserialize, Serialize};

use stocksense_catalog::SalesHistory;

/// Average daily demand over a lookback window.
///
/// A plain moving average: no smoothing, weighting, or seasonality
/// correction. Known limitation — a burst at the edge of the window moves
/// the estimate as much as steady demand does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityEstimate {
    /// Units per calendar day, >= 0.
    pub average_daily_units: f64,
    pub window_days: u32,
    /// False when the window held no events at all. A measured zero rate and
    /// "we saw nothing" are different facts: the latter routes downstream to
    /// the stock-level fallback instead of posing as a real velocity.
    pub has_sufficient_data: bool,
}

/// Estimate velocity from an aggregated history.
///
/// Single shared implementation for both the full recommendation pipeline
/// and the quick forecast facade.
pub fn estimate(history: &SalesHistory) -> VelocityEstimate {
    let window_days = history.window_days().max(1);

    if history.is_empty() {
        return VelocityEstimate {
            average_daily_units: 0.0,
            window_days,
            has_sufficient_data: false,
        };
    }

    VelocityEstimate {
        average_daily_units: history.total_units() as f64 / f64::from(window_days),
        window_days,
        has_sufficient_data: true,
    }
}
