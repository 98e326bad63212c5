//! Shared context for every admin slice: one HTTP adapter behind a trait object,
//! plus the three call shapes the endpoints come in. Transport failures without a
//! server message take the endpoint's fallback text.

use resource_slice::{Ack, ActionError, ApiRequest, Envelope, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// The context injected into every store actor.
pub type Api = Arc<dyn Transport>;

/// Sends a mutation and reads its acknowledgement.
pub(crate) async fn ack(
    api: &Api,
    request: ApiRequest,
    envelope: Envelope,
    success: &str,
) -> Result<Ack, ActionError> {
    let response = api.send(request).await.map_err(|e| envelope.transport(e))?;
    envelope.ack(&response, success)
}

/// Sends a read and decodes a list from it.
pub(crate) async fn list<T: DeserializeOwned>(
    api: &Api,
    request: ApiRequest,
    envelope: Envelope,
) -> Result<Vec<T>, ActionError> {
    let response = api.send(request).await.map_err(|e| envelope.transport(e))?;
    envelope.list(&response)
}

/// Sends a read and decodes its `data` field.
pub(crate) async fn data<T: DeserializeOwned>(
    api: &Api,
    request: ApiRequest,
    envelope: Envelope,
) -> Result<T, ActionError> {
    let response = api.send(request).await.map_err(|e| envelope.transport(e))?;
    envelope.data(&response)
}
