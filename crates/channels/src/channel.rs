//! Collaborator traits and their error model.

use async_trait::async_trait;
use thiserror::Error;

use stocksense_catalog::{CatalogItem, SaleEvent, SalesChannelKind};
use stocksense_core::Sku;

/// Failure reported by a catalog or sales-channel collaborator.
///
/// At the aggregation boundary these are soft failures: the advisor logs the
/// cause and treats the channel's contribution as empty for that item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The channel could not be reached or refused the request.
    #[error("channel unavailable: {0}")]
    Unavailable(String),

    /// The channel answered too slowly.
    #[error("channel timed out")]
    Timeout,

    /// The channel answered with something we could not interpret.
    #[error("channel protocol error: {0}")]
    Protocol(String),
}

/// Supplies the catalog snapshot: items with current stock and floors.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, ChannelError>;
}

/// One source of historical sale events.
///
/// Implementations should return raw per-channel events for the item;
/// windowing and cross-channel deduplication happen in the engine, not here.
#[async_trait]
pub trait SalesChannel: Send + Sync {
    fn kind(&self) -> SalesChannelKind;

    async fn fetch_history(
        &self,
        sku: &Sku,
        window_days: u32,
    ) -> Result<Vec<SaleEvent>, ChannelError>;
}
