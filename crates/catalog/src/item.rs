use serde::{Deserialize, Serialize};

use stocksense_core::{DomainError, Sku};

/// Snapshot of one catalog item as the surrounding inventory system sees it.
///
/// Read-only to the engine: recommendations reference items, they never
/// mutate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    sku: Sku,
    name: String,
    current_stock: u32,
    /// Reorder floor; 0 means "unset/no floor".
    min_stock_level: u32,
}

impl CatalogItem {
    pub fn new(
        sku: Sku,
        name: impl Into<String>,
        current_stock: u32,
        min_stock_level: u32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(Self {
            sku,
            name,
            current_stock,
            min_stock_level,
        })
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    pub fn min_stock_level(&self) -> u32 {
        self.min_stock_level
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.current_stock == 0
    }

    /// True when a floor is set and stock has fallen under it.
    pub fn is_below_minimum(&self) -> bool {
        self.min_stock_level > 0 && self.current_stock < self.min_stock_level
    }
}
