//! # Slice Client
//!
//! This module defines the handle views use to drive and observe a Resource Store.

use crate::entity::ResourceSlice;
use crate::error::ActionError;
use crate::message::SliceRequest;
use crate::state::AsyncResource;
use tokio::sync::{mpsc, oneshot, watch};

/// ## SliceClient
///
/// The `SliceClient<S>` dispatches invocations of one Resource Action to its
/// `StoreActor<S>` and exposes the store's latest state through a watch channel.
///
/// * **Cloneable**: holds a sender and a watch receiver, so cloning is inexpensive.
/// * **Validating**: payloads are checked with [`ResourceSlice::validate`] before they
///   leave the caller; an invalid payload never reaches the store.
pub struct SliceClient<S: ResourceSlice> {
    sender: mpsc::Sender<SliceRequest<S>>,
    state: watch::Receiver<AsyncResource<S::Data>>,
}

impl<S: ResourceSlice> Clone for SliceClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: ResourceSlice> SliceClient<S> {
    pub fn new(
        sender: mpsc::Sender<SliceRequest<S>>,
        state: watch::Receiver<AsyncResource<S::Data>>,
    ) -> Self {
        Self { sender, state }
    }

    /// Starts a new invocation and waits for it to settle.
    ///
    /// The returned result is this invocation's own outcome. Whether it was also
    /// committed to the store depends on whether a newer invocation started meanwhile.
    pub async fn dispatch(&self, payload: S::Payload) -> Result<S::Data, ActionError> {
        S::validate(&payload)?;
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Dispatch {
                payload,
                respond_to,
            })
            .await
            .map_err(|_| ActionError::StoreClosed)?;
        response.await.map_err(|_| ActionError::StoreDropped)?
    }

    /// Returns the store to `idle`.
    pub async fn reset(&self) -> Result<(), ActionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Reset { respond_to })
            .await
            .map_err(|_| ActionError::StoreClosed)?;
        response.await.map_err(|_| ActionError::StoreDropped)?
    }

    /// A copy of the store's current state.
    pub fn snapshot(&self) -> AsyncResource<S::Data> {
        self.state.borrow().clone()
    }

    /// The last committed data, if any.
    pub fn data(&self) -> Option<S::Data> {
        self.state.borrow().data().cloned()
    }

    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AsyncResource<S::Data>> {
        self.state.clone()
    }
}
