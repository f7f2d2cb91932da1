//! Stockout projection: current stock + velocity → days until stockout.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::velocity::VelocityEstimate;

/// Days of stock remaining, with an explicit "never at this rate" variant.
///
/// Variant order gives the total order we want: finite days ascending, with
/// `Unbounded` greater than every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaysOfStock {
    Finite(u32),
    Unbounded,
}

impl DaysOfStock {
    pub fn finite(&self) -> Option<u32> {
        match self {
            DaysOfStock::Finite(days) => Some(*days),
            DaysOfStock::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, DaysOfStock::Unbounded)
    }

    /// True when finite and within `limit` days.
    pub fn at_most(&self, limit: u32) -> bool {
        matches!(self, DaysOfStock::Finite(days) if *days <= limit)
    }
}

impl core::fmt::Display for DaysOfStock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DaysOfStock::Finite(days) => write!(f, "{days}d"),
            DaysOfStock::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Projected runway for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockoutProjection {
    pub days_remaining: DaysOfStock,
    /// Calendar date stock reaches zero; absent when `days_remaining` is
    /// unbounded (or past the calendar's representable range).
    pub estimated_date: Option<NaiveDate>,
}

/// Project days until stockout.
///
/// - `current_stock == 0` is already a stockout: zero days, today, no
///   velocity consulted.
/// - With measurable velocity: `floor(stock / average_daily_units)`.
/// - With zero velocity and stock on hand there is no estimate; that is the
///   one case that maps to [`DaysOfStock::Unbounded`].
pub fn project(
    current_stock: u32,
    estimate: &VelocityEstimate,
    today: NaiveDate,
) -> StockoutProjection {
    if current_stock == 0 {
        return StockoutProjection {
            days_remaining: DaysOfStock::Finite(0),
            estimated_date: Some(today),
        };
    }

    if estimate.average_daily_units <= 0.0 {
        return StockoutProjection {
            days_remaining: DaysOfStock::Unbounded,
            estimated_date: None,
        };
    }

    let days = (f64::from(current_stock) / estimate.average_daily_units).floor() as u32;
    StockoutProjection {
        days_remaining: DaysOfStock::Finite(days),
        estimated_date: today.checked_add_days(Days::new(u64::from(days))),
    }
}
