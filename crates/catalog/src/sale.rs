use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stocksense_core::{DomainError, Sku};

/// Which source reported a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesChannelKind {
    Manual,
    Storefront,
    Accounting,
}

impl SalesChannelKind {
    pub fn label(&self) -> &'static str {
        match self {
            SalesChannelKind::Manual => "manual",
            SalesChannelKind::Storefront => "storefront",
            SalesChannelKind::Accounting => "accounting",
        }
    }
}

impl core::fmt::Display for SalesChannelKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One historical sale fact for an item.
///
/// The same physical transaction may be reported by more than one channel
/// (e.g. a manual order later mirrored into the storefront). When both
/// reports carry the same `reference` they are one sale, not two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub sku: Sku,
    pub date: NaiveDate,
    pub units_sold: u32,
    pub channel: SalesChannelKind,
    /// Channel-agnostic order/receipt reference, when the channel has one.
    pub reference: Option<String>,
}

impl SaleEvent {
    pub fn new(
        sku: Sku,
        date: NaiveDate,
        units_sold: u32,
        channel: SalesChannelKind,
        reference: Option<String>,
    ) -> Result<Self, DomainError> {
        if units_sold == 0 {
            return Err(DomainError::validation("units_sold must be positive"));
        }
        Ok(Self {
            sku,
            date,
            units_sold,
            channel,
            reference,
        })
    }
}

/// Window-bounded, deduplicated sale history for one item.
///
/// Events are kept date-ordered for display; every computation over a
/// history is order-independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesHistory {
    window_days: u32,
    events: Vec<SaleEvent>,
}

impl SalesHistory {
    /// Build a history from already-deduplicated, window-filtered events.
    ///
    /// Sorts by date (then channel label, for a stable order when several
    /// events share a date).
    pub fn new(window_days: u32, mut events: Vec<SaleEvent>) -> Self {
        events.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.channel.label().cmp(b.channel.label()))
                .then_with(|| a.units_sold.cmp(&b.units_sold))
        });
        Self {
            window_days,
            events,
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn events(&self) -> &[SaleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn total_units(&self) -> u64 {
        self.events.iter().map(|e| u64::from(e.units_sold)).sum()
    }
}
