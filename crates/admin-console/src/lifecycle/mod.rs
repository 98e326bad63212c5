//! # Console Lifecycle
//!
//! [`AdminConsole`] creates every feature's stores, starts them with the shared
//! [`Api`](crate::api::Api) context injected at `run()`, and hands out the
//! clients and screens. Stores are created before any of them runs, so a store
//! never needs another store's client at construction time.
//!
//! ## Graceful Shutdown
//!
//! 1. Drop all clients, which closes each store's request channel
//! 2. Each store sees the channel close and stops
//! 3. Await the store tasks
//!
//! A store still settling a call finishes applying it before it stops.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber; `RUST_LOG` picks the verbosity.

pub mod console;

pub use console::AdminConsole;
pub use resource_slice::tracing::setup_tracing;
