//! # Store Messages
//!
//! This module defines the messages exchanged between a [`SliceClient`](crate::SliceClient)
//! and its [`StoreActor`](crate::StoreActor).

use crate::entity::ResourceSlice;
use crate::error::ActionError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store actors.
pub type Response<T> = oneshot::Sender<Result<T, ActionError>>;

/// Requests a client sends to a store actor.
///
/// A store accepts exactly two commands: start a new invocation of its action, or
/// reset to idle. Everything else about the store is read through its watch channel.
#[derive(Debug)]
pub enum SliceRequest<S: ResourceSlice> {
    /// Emit `pending`, run the action, and answer once it settles.
    Dispatch {
        payload: S::Payload,
        respond_to: Response<S::Data>,
    },
    /// Return the store to `idle`, cancelling anything in flight.
    Reset { respond_to: Response<()> },
}

/// The outcome of one spawned call, routed back into the owning actor.
#[derive(Debug)]
pub(crate) struct Settlement<S: ResourceSlice> {
    pub version: u64,
    pub outcome: Result<S::Data, ActionError>,
    pub respond_to: Response<S::Data>,
}
