//! Batch orchestration: catalog snapshot → fan-out history fetch → engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use stocksense_catalog::{CatalogItem, SaleEvent};
use stocksense_channels::{Catalog, ChannelError, SalesChannel};
use stocksense_core::Sku;
use stocksense_forecast::{Forecast, LeadTime, ReorderRecommendation};

/// Tuning for the history fetch fan-out.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Lookback window passed to channels and the engine, calendar days.
    pub window_days: u32,
    /// Cap on concurrently in-flight channel fetches.
    pub max_in_flight: usize,
    /// A fetch slower than this is treated as "no data available" for that
    /// item/channel pair, never as a batch failure.
    pub per_fetch_timeout: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            window_days: stocksense_forecast::DEFAULT_WINDOW_DAYS,
            max_in_flight: 8,
            per_fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Advisor-level failure.
///
/// Only the catalog listing is fatal: without an item snapshot there is
/// nothing to advise on. Channel failures never surface here.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("catalog listing failed: {0}")]
    Catalog(#[from] ChannelError),
}

/// Produces restocking advice from injected collaborators.
///
/// Holds no state across calls: every invocation re-reads the catalog and
/// re-fetches history. Dropping the returned future aborts in-flight fetch
/// tasks (the `JoinSet` aborts on drop), so an abandoned request stops
/// hitting the channels.
pub struct ReorderAdvisor {
    catalog: Arc<dyn Catalog>,
    channels: Vec<Arc<dyn SalesChannel>>,
    policy: FetchPolicy,
}

impl ReorderAdvisor {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            channels: Vec::new(),
            policy: FetchPolicy::default(),
        }
    }

    pub fn with_channel(mut self, channel: Arc<dyn SalesChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Full recommendation pass at the current UTC date.
    pub async fn recommendations(
        &self,
        lead_time: LeadTime,
    ) -> Result<Vec<ReorderRecommendation>, AdvisorError> {
        self.recommendations_at(lead_time, Utc::now().date_naive())
            .await
    }

    /// Full recommendation pass with an explicit "today" (deterministic
    /// tests).
    pub async fn recommendations_at(
        &self,
        lead_time: LeadTime,
        today: NaiveDate,
    ) -> Result<Vec<ReorderRecommendation>, AdvisorError> {
        let items = self.catalog.list_items().await?;
        let histories = self.fetch_histories(&items).await;

        Ok(stocksense_forecast::generate_recommendations_in_window(
            &items,
            &histories,
            self.policy.window_days,
            lead_time,
            today,
        ))
    }

    /// Single-item summary at the current UTC date.
    pub async fn quick_forecast(&self, item: &CatalogItem) -> Forecast {
        self.quick_forecast_at(item, Utc::now().date_naive()).await
    }

    /// Single-item summary with an explicit "today".
    pub async fn quick_forecast_at(&self, item: &CatalogItem, today: NaiveDate) -> Forecast {
        let histories = self.fetch_histories(std::slice::from_ref(item)).await;
        let events = histories.get(item.sku()).cloned().unwrap_or_default();

        stocksense_forecast::quick_forecast(item, &events, self.policy.window_days, today)
    }

    /// Fan out one fetch per (item × channel), capped at
    /// `policy.max_in_flight` in flight at once.
    ///
    /// Failed, timed-out, or panicked fetches degrade to an empty
    /// contribution with a warning; the batch always completes. Results land
    /// in per-(item, channel) slots, so the merged output depends only on
    /// channel registration order, never on completion order.
    async fn fetch_histories(&self, items: &[CatalogItem]) -> HashMap<Sku, Vec<SaleEvent>> {
        let semaphore = Arc::new(Semaphore::new(self.policy.max_in_flight.max(1)));
        let mut tasks: JoinSet<(usize, usize, Vec<SaleEvent>)> = JoinSet::new();

        for (item_idx, item) in items.iter().enumerate() {
            for (channel_idx, channel) in self.channels.iter().enumerate() {
                let semaphore = semaphore.clone();
                let channel = channel.clone();
                let sku = item.sku().clone();
                let window_days = self.policy.window_days;
                let per_fetch_timeout = self.policy.per_fetch_timeout;

                tasks.spawn(async move {
                    // The semaphore is never closed; a failed acquire can
                    // only mean shutdown, which reads as "no data".
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => return (item_idx, channel_idx, Vec::new()),
                    };

                    let fetch = channel.fetch_history(&sku, window_days);
                    let events = match tokio::time::timeout(per_fetch_timeout, fetch).await {
                        Ok(Ok(events)) => events,
                        Ok(Err(e)) => {
                            tracing::warn!(
                                %sku,
                                channel = %channel.kind(),
                                error = %e,
                                "history fetch failed; continuing without this channel's data"
                            );
                            Vec::new()
                        }
                        Err(_) => {
                            tracing::warn!(
                                %sku,
                                channel = %channel.kind(),
                                timeout = ?per_fetch_timeout,
                                "history fetch timed out; continuing without this channel's data"
                            );
                            Vec::new()
                        }
                    };

                    (item_idx, channel_idx, events)
                });
            }
        }

        let mut slots: Vec<Vec<Vec<SaleEvent>>> = items
            .iter()
            .map(|_| vec![Vec::new(); self.channels.len()])
            .collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((item_idx, channel_idx, events)) => slots[item_idx][channel_idx] = events,
                Err(e) => tracing::warn!(error = %e, "history fetch task failed"),
            }
        }

        items
            .iter()
            .zip(slots)
            .map(|(item, batches)| {
                let merged: Vec<SaleEvent> = batches.into_iter().flatten().collect();
                (item.sku().clone(), merged)
            })
            .collect()
    }
}
