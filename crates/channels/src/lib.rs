//! `stocksense-channels` — collaborator seams for the engine.
//!
//! The engine never talks to a storefront, accounting platform, or database
//! itself. It consumes two narrow traits: a [`Catalog`] that supplies item
//! snapshots and a [`SalesChannel`] per source of historical sale events.
//! Production adapters (OAuth, HTTP, persistence) live with the host
//! application; this crate ships in-memory doubles for tests and dev.

pub mod channel;
pub mod memory;

pub use channel::{Catalog, ChannelError, SalesChannel};
pub use memory::{InMemoryCatalog, InMemoryChannel};
