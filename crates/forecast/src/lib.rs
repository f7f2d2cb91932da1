//! `stocksense-forecast`
//!
//! **Responsibility:** the sales-velocity forecasting and
//! reorder-recommendation engine.
//!
//! This crate is deliberately pure:
//! - No IO, no async, no clocks — callers pass `today` explicitly.
//! - It never mutates catalog state; it reads snapshots and emits advice.
//! - Every invocation recomputes from scratch; nothing is cached or
//!   persisted between calls.
//!
//! Pipeline, leaf-first: [`history`] merges per-channel sale events into one
//! deduplicated window, [`velocity`] reduces that to an average daily demand,
//! [`stockout`] projects days until stockout, [`classify`] picks the single
//! triggering reason and a priority tier, and [`recommend`] computes order
//! quantities and assembles the sorted recommendation list. The quick
//! forecast facade reuses the same estimator and projector, so the two read
//! paths cannot drift apart.

pub mod classify;
pub mod history;
pub mod lead_time;
pub mod recommend;
pub mod stockout;
pub mod velocity;

pub use classify::{ReorderPriority, ReorderReason, classify, prioritize};
pub use history::{DEFAULT_WINDOW_DAYS, aggregate};
pub use lead_time::LeadTime;
pub use recommend::{
    Forecast, ReorderRecommendation, generate_recommendations,
    generate_recommendations_in_window, generate_recommendations_now, quick_forecast,
    quick_forecast_now,
};
pub use stockout::{DaysOfStock, StockoutProjection, project};
pub use velocity::{VelocityEstimate, estimate};
