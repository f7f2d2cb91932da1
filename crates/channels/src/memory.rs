//! In-memory collaborator doubles for tests/dev.
//!
//! - No IO beyond optional artificial latency
//! - Scripted failure for exercising the soft-failure path

use std::time::Duration;

use async_trait::async_trait;

use stocksense_catalog::{CatalogItem, SaleEvent, SalesChannelKind};
use stocksense_core::Sku;

use crate::channel::{Catalog, ChannelError, SalesChannel};

/// In-memory catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<CatalogItem>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, ChannelError> {
        Ok(self.items.clone())
    }
}

/// In-memory sales channel with scripted latency and failure.
#[derive(Debug, Clone)]
pub struct InMemoryChannel {
    kind: SalesChannelKind,
    events: Vec<SaleEvent>,
    delay: Option<Duration>,
    failure: Option<ChannelError>,
}

impl InMemoryChannel {
    pub fn new(kind: SalesChannelKind) -> Self {
        Self {
            kind,
            events: Vec::new(),
            delay: None,
            failure: None,
        }
    }

    pub fn with_events(mut self, events: Vec<SaleEvent>) -> Self {
        self.events = events;
        self
    }

    /// Sleep this long before answering (timeout-path testing).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer every fetch with this error.
    pub fn failing_with(mut self, failure: ChannelError) -> Self {
        self.failure = Some(failure);
        self
    }
}

#[async_trait]
impl SalesChannel for InMemoryChannel {
    fn kind(&self) -> SalesChannelKind {
        self.kind
    }

    async fn fetch_history(
        &self,
        sku: &Sku,
        _window_days: u32,
    ) -> Result<Vec<SaleEvent>, ChannelError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        Ok(self
            .events
            .iter()
            .filter(|event| event.sku == *sku)
            .cloned()
            .collect())
    }
}
