//! `stocksense-advisor`
//!
//! **Responsibility:** the async shell around the pure forecasting engine.
//!
//! History retrieval is the only IO-bound part of a recommendation pass and
//! dominates latency, so per-item per-channel fetches fan out with bounded
//! concurrency instead of awaiting one lookup at a time. Everything after
//! the fetch is the synchronous `stocksense-forecast` pipeline over
//! immutable snapshots.

pub mod advisor;

pub use advisor::{AdvisorError, FetchPolicy, ReorderAdvisor};
