//! History aggregation: merge per-channel sale events into one deduplicated,
//! window-bounded time series.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use stocksense_catalog::{SaleEvent, SalesChannelKind, SalesHistory};
use stocksense_core::Sku;

/// Default lookback window, in calendar days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Identity of a sale for cross-channel deduplication.
///
/// A referenced sale (order/receipt number known to both channels) is the
/// same physical transaction wherever it was reported. An unreferenced sale
/// is only a duplicate of an exact repeat from the same channel.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DedupKey {
    Referenced(String),
    Unreferenced(NaiveDate, u32, SalesChannelKind),
}

impl DedupKey {
    fn of(event: &SaleEvent) -> Self {
        match &event.reference {
            Some(reference) => DedupKey::Referenced(reference.clone()),
            None => DedupKey::Unreferenced(event.date, event.units_sold, event.channel),
        }
    }
}

/// Merge per-channel event batches into one history for `sku`.
///
/// - Keeps only events for `sku`, dated within the last `window_days`
///   calendar days ending at `today` (future-dated events are ignored).
/// - Deduplicates per [`DedupKey`]; the first occurrence in batch order
///   wins, so output is a function of batch contents and order alone, never
///   of fetch completion timing.
/// - Never fails: a channel whose fetch failed upstream simply contributes
///   an empty batch, and the resulting thin history reads as insufficient
///   data downstream.
pub fn aggregate(
    sku: &Sku,
    batches: &[Vec<SaleEvent>],
    window_days: u32,
    today: NaiveDate,
) -> SalesHistory {
    let window_days = window_days.max(1);
    let window_start = today.checked_sub_days(Days::new(u64::from(window_days)));

    let mut seen: HashSet<DedupKey> = HashSet::new();
    let mut events: Vec<SaleEvent> = Vec::new();

    for batch in batches {
        for event in batch {
            if event.sku != *sku {
                continue;
            }
            if event.date > today {
                continue;
            }
            if let Some(start) = window_start {
                if event.date <= start {
                    continue;
                }
            }
            if seen.insert(DedupKey::of(event)) {
                events.push(event.clone());
            }
        }
    }

    SalesHistory::new(window_days, events)
}
