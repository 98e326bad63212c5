//! # Resource Slice
//!
//! Building blocks for screens that talk to a REST backend: fetch into a
//! per-resource store, present, mutate, re-fetch. Each remote resource kind gets an
//! **Async Resource Slice**: a uniform contract between the screen and the endpoint.
//!
//! ## Architecture Overview
//!
//! 1. **Action Layer** ([`ResourceSlice`]) - the payload, validation and remote call
//!    for one named operation ("fetch signups", "delete PO member")
//! 2. **Runtime Layer** ([`StoreActor`]) - owns the [`AsyncResource`] for that
//!    action and applies its lifecycle events in order
//! 3. **Interface Layer** ([`SliceClient`]) - dispatch, reset, and a watch
//!    subscription on the store
//! 4. **Transport Layer** ([`Transport`]) - the HTTP client adapter, with
//!    per-endpoint success rules in [`envelope`]
//!
//! Screen helpers sit beside these: [`debounce`] for autocomplete inputs and
//! [`confirm`] for destructive actions.
//!
//! ## Example
//!
//! ```rust
//! use resource_slice::mock::MockTransport;
//! use resource_slice::{
//!     ActionError, ApiRequest, Convention, Envelope, ResourceSlice, Status, StoreActor,
//!     StoreOptions, Transport,
//! };
//! use async_trait::async_trait;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Changelog;
//!
//! const FETCH: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch history");
//!
//! #[async_trait]
//! impl ResourceSlice for Changelog {
//!     const NAME: &'static str = "history.list";
//!     type Payload = ();
//!     type Data = Vec<String>;
//!     type Context = Arc<dyn Transport>;
//!
//!     async fn perform(_payload: (), api: &Self::Context) -> Result<Vec<String>, ActionError> {
//!         let response = api.send(ApiRequest::get("/changelog/fetch")).await?;
//!         FETCH.list(&response)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/changelog/fetch")
//!         .respond_json(json!({"success": true, "data": ["v1.2 released"]}));
//!
//!     let (actor, client) = StoreActor::<Changelog>::new(StoreOptions::default());
//!     tokio::spawn(actor.run(Arc::new(mock.clone())));
//!
//!     let rows = client.dispatch(()).await.unwrap();
//!     assert_eq!(rows, vec!["v1.2 released".to_string()]);
//!     assert_eq!(client.snapshot().status(), Status::Succeeded);
//!     mock.verify();
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the actor starts (`actor.run(context)`), not when
//! it is constructed. All stores can be created first and wired afterwards; a
//! composite action that needs another store's client receives it in its context.
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task and applies events **sequentially**
//! - Remote calls run in spawned tasks, so a slow call never blocks the store
//! - Results commit in version order: a result from an older invocation that
//!   arrives after a newer one started is discarded
//! - Superseded reads are aborted ([`Supersede::Abort`]); superseded writes run to
//!   completion and only their store commit is skipped ([`Supersede::Discard`])
//!
//! ## Testing
//!
//! [`mock::MockTransport`] stands in for the HTTP adapter with a fluent
//! expectation API. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod confirm;
pub mod debounce;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use actor::{StoreActor, StoreOptions};
pub use client::SliceClient;
pub use confirm::{ConfirmationGate, GateError, GateState};
pub use debounce::{DebounceConfig, Debouncer, Fire, SearchField};
pub use entity::{require_id, ResourceSlice, Supersede};
pub use envelope::{Ack, Convention, Envelope};
pub use error::ActionError;
pub use message::{Response, SliceRequest};
pub use state::{AsyncResource, Lifecycle, Status, Transition};
pub use transport::{
    ApiRequest, ApiResponse, Body, Method, ReqwestTransport, Transport, TransportConfig,
    TransportError,
};
