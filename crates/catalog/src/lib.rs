//! `stocksense-catalog` — read-only data model consumed by the engine.
//!
//! Items are owned and mutated by the surrounding inventory system; sale
//! events are immutable historical facts sourced from the sales channels.
//! Nothing in this crate mutates either.

pub mod item;
pub mod sale;

pub use item::CatalogItem;
pub use sale::{SaleEvent, SalesChannelKind, SalesHistory};
