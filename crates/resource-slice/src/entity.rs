//! # ResourceSlice Trait
//!
//! The `ResourceSlice` trait is the contract every Resource Action implements to be
//! hosted by a [`StoreActor`](crate::StoreActor). It names the payload the action
//! takes, the data it produces, the context (dependencies) it runs against, and the
//! async body that performs the remote call.
//!
//! A slice is a marker type: `struct SignupList;`. It carries no state of its own.
//! The state lives in the store actor that hosts it.
//!
//! # Provided Methods
//! - [`ResourceSlice::validate`] defaults to accepting every payload.

use crate::error::ActionError;
use async_trait::async_trait;
use std::fmt::Debug;

/// What happens to an in-flight call when a newer invocation of the same slice starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supersede {
    /// Cancel the older call at the transport. Used for reads.
    Abort,
    /// Let the older call finish and discard its result. Used for writes.
    Discard,
}

/// Trait that every Resource Action implements to be hosted by a `StoreActor`.
///
/// # Async & Context
/// `perform` runs in its own task spawned by the store actor, so several invocations
/// may be in flight at once. The `Context` is injected when the actor starts
/// (`actor.run(context)`) and cloned into each spawned call.
#[async_trait]
pub trait ResourceSlice: Send + Sync + 'static {
    /// Short name used in logs (e.g. `"signup.list"`).
    const NAME: &'static str;

    /// Cancellation policy for superseded calls.
    const SUPERSEDE: Supersede = Supersede::Discard;

    /// Input to the action. Use `()` for parameterless fetches.
    type Payload: Send + Sync + Debug + 'static;

    /// Normalized result committed to the store on success.
    type Data: Clone + Send + Sync + Debug + 'static;

    /// Runtime dependencies (usually an HTTP adapter handle).
    type Context: Clone + Send + Sync + 'static;

    /// Structural validation run before anything is dispatched.
    fn validate(_payload: &Self::Payload) -> Result<(), ActionError> {
        Ok(())
    }

    /// Performs the remote operation.
    async fn perform(
        payload: Self::Payload,
        ctx: &Self::Context,
    ) -> Result<Self::Data, ActionError>;
}

/// Rejects empty or whitespace-only identifiers.
pub fn require_id(field: &str, value: &str) -> Result<(), ActionError> {
    if value.trim().is_empty() {
        return Err(ActionError::Validation(format!("{field} is required")));
    }
    Ok(())
}
