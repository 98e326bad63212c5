//! # Store Actor
//!
//! This module defines the `StoreActor`, the task that owns one Resource Store. It
//! turns each dispatched invocation into lifecycle events and is the only code that
//! ever mutates the store's [`AsyncResource`].

use crate::client::SliceClient;
use crate::entity::{ResourceSlice, Supersede};
use crate::error::ActionError;
use crate::message::{Response, Settlement, SliceRequest};
use crate::state::{AsyncResource, Lifecycle, Transition};
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Construction options for a store actor.
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// Capacity of the request channel.
    pub buffer_size: usize,
    /// Upper bound on a single call. `None` disables the timeout.
    pub timeout: Option<Duration>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// The actor that owns one Resource Store.
///
/// # Concurrency Model
/// Requests and settlements are processed one at a time in [`StoreActor::run`], so the
/// store needs no lock. The remote calls themselves run in spawned tasks; when one
/// finishes its outcome is routed back through an internal channel and applied here,
/// where the version check decides whether it may commit.
///
/// # Usage Pattern
///
/// ```rust,ignore
/// let (actor, client) = StoreActor::<SignupList>::new(StoreOptions::default());
/// tokio::spawn(actor.run(api_context));
/// let rows = client.dispatch(()).await?;
/// ```
pub struct StoreActor<S: ResourceSlice> {
    receiver: mpsc::Receiver<SliceRequest<S>>,
    settle_tx: mpsc::UnboundedSender<Settlement<S>>,
    settle_rx: mpsc::UnboundedReceiver<Settlement<S>>,
    state: AsyncResource<S::Data>,
    publisher: watch::Sender<AsyncResource<S::Data>>,
    in_flight: Option<CancellationToken>,
    outstanding: usize,
    timeout: Option<Duration>,
}

impl<S: ResourceSlice> StoreActor<S> {
    /// Creates a new `StoreActor` and its associated `SliceClient`.
    ///
    /// The actor does nothing until [`StoreActor::run`] is spawned.
    pub fn new(options: StoreOptions) -> (Self, SliceClient<S>) {
        let (sender, receiver) = mpsc::channel(options.buffer_size);
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let (publisher, watcher) = watch::channel(AsyncResource::new());
        let actor = Self {
            receiver,
            settle_tx,
            settle_rx,
            state: AsyncResource::new(),
            publisher,
            in_flight: None,
            outstanding: 0,
            timeout: options.timeout,
        };
        let client = SliceClient::new(sender, watcher);
        (actor, client)
    }

    /// Runs the store's event loop until every client is dropped and every call
    /// already in flight has settled.
    ///
    /// # Context Injection
    /// `context` is cloned into each spawned call, so dependencies created after the
    /// actor (an HTTP adapter, other clients) can still be wired in here.
    pub async fn run(mut self, context: S::Context) {
        let slice = S::NAME;
        info!(slice, "Store started");

        let mut closed = false;
        loop {
            if closed && self.outstanding == 0 {
                break;
            }
            tokio::select! {
                msg = self.receiver.recv(), if !closed => match msg {
                    Some(SliceRequest::Dispatch { payload, respond_to }) => {
                        self.start(payload, respond_to, &context);
                    }
                    Some(SliceRequest::Reset { respond_to }) => {
                        self.reset();
                        let _ = respond_to.send(Ok(()));
                    }
                    None => closed = true,
                },
                Some(settled) = self.settle_rx.recv() => self.settle(settled),
            }
        }

        info!(slice, version = self.state.request_version(), "Shutdown");
    }

    fn start(&mut self, payload: S::Payload, respond_to: Response<S::Data>, context: &S::Context) {
        let slice = S::NAME;
        debug!(slice, ?payload, "Dispatch");

        let version = self.state.begin();
        if S::SUPERSEDE == Supersede::Abort {
            if let Some(previous) = self.in_flight.take() {
                debug!(slice, version, "Aborting superseded call");
                previous.cancel();
            }
        }
        self.publish();

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.outstanding += 1;

        let ctx = context.clone();
        let settle_tx = self.settle_tx.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            // Poll the call first so it is always issued before a cancellation lands.
            let outcome = tokio::select! {
                biased;
                result = with_timeout(timeout, S::perform(payload, &ctx)) => result,
                _ = token.cancelled() => Err(ActionError::Superseded),
            };
            let _ = settle_tx.send(Settlement {
                version,
                outcome,
                respond_to,
            });
        });
    }

    fn settle(&mut self, settled: Settlement<S>) {
        let slice = S::NAME;
        let Settlement {
            version,
            outcome,
            respond_to,
        } = settled;
        self.outstanding = self.outstanding.saturating_sub(1);

        let event = match &outcome {
            Ok(data) => Some(Lifecycle::Fulfilled {
                version,
                data: data.clone(),
            }),
            Err(e) if e.is_superseded() => None,
            Err(e) => Some(Lifecycle::Rejected {
                version,
                message: e.message(),
            }),
        };

        match event.map(|event| self.state.apply(event)) {
            Some(Transition::Committed(status)) => {
                match &outcome {
                    Ok(_) => info!(slice, version, ?status, "Committed"),
                    Err(e) => warn!(slice, version, error = %e, "Rejected"),
                }
                self.publish();
            }
            Some(_) => debug!(slice, version, latest = self.state.request_version(), "Stale result discarded"),
            None => debug!(slice, version, "Superseded call settled"),
        }

        let _ = respond_to.send(outcome);
    }

    fn reset(&mut self) {
        if S::SUPERSEDE == Supersede::Abort {
            if let Some(token) = self.in_flight.take() {
                token.cancel();
            }
        }
        self.state.apply(Lifecycle::Reset);
        info!(slice = S::NAME, "Reset");
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

async fn with_timeout<T>(
    timeout: Option<Duration>,
    call: impl Future<Output = Result<T, ActionError>>,
) -> Result<T, ActionError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(ActionError::Timeout(limit))),
        None => call.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Status;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Echoes the payload after sleeping for the requested number of milliseconds.
    struct DelayedEcho;

    #[async_trait]
    impl ResourceSlice for DelayedEcho {
        const NAME: &'static str = "test.echo";
        type Payload = (u64, &'static str);
        type Data = String;
        type Context = Arc<AtomicUsize>;

        fn validate(payload: &Self::Payload) -> Result<(), ActionError> {
            crate::entity::require_id("text", payload.1)
        }

        async fn perform(
            (delay_ms, text): Self::Payload,
            calls: &Self::Context,
        ) -> Result<String, ActionError> {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            if text == "fail" {
                return Err(ActionError::Application("backend said no".into()));
            }
            Ok(text.to_string())
        }
    }

    /// Same as `DelayedEcho` but aborts superseded calls.
    struct AbortingEcho;

    #[async_trait]
    impl ResourceSlice for AbortingEcho {
        const NAME: &'static str = "test.aborting";
        const SUPERSEDE: Supersede = Supersede::Abort;
        type Payload = (u64, &'static str);
        type Data = String;
        type Context = Arc<AtomicUsize>;

        async fn perform(
            (delay_ms, text): Self::Payload,
            finished: &Self::Context,
        ) -> Result<String, ActionError> {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            finished.fetch_add(1, Ordering::SeqCst);
            Ok(text.to_string())
        }
    }

    fn spawn<S: ResourceSlice>(ctx: S::Context) -> SliceClient<S> {
        let (actor, client) = StoreActor::<S>::new(StoreOptions::default());
        tokio::spawn(actor.run(ctx));
        client
    }

    #[tokio::test]
    async fn dispatch_commits_success() {
        let client = spawn::<DelayedEcho>(Arc::new(AtomicUsize::new(0)));

        let data = client.dispatch((0, "hello")).await.unwrap();
        assert_eq!(data, "hello");

        let state = client.snapshot();
        assert_eq!(state.status(), Status::Succeeded);
        assert_eq!(state.data().map(String::as_str), Some("hello"));
        assert_eq!(state.request_version(), 1);
    }

    #[tokio::test]
    async fn application_failure_is_rejected() {
        let client = spawn::<DelayedEcho>(Arc::new(AtomicUsize::new(0)));

        let err = client.dispatch((0, "fail")).await.unwrap_err();
        assert_eq!(err.message(), "backend said no");

        let state = client.snapshot();
        assert_eq!(state.status(), Status::Failed);
        assert_eq!(state.error(), Some("backend said no"));
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_the_store() {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = spawn::<DelayedEcho>(calls.clone());

        let err = client.dispatch((0, "  ")).await.unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.snapshot().status(), Status::Idle);
        assert_eq!(client.snapshot().request_version(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn older_result_arriving_last_is_discarded() {
        let client = spawn::<DelayedEcho>(Arc::new(AtomicUsize::new(0)));

        let slow = {
            let client = client.clone();
            tokio::spawn(async move { client.dispatch((200, "first")).await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        let fast = client.dispatch((10, "second")).await.unwrap();
        assert_eq!(fast, "second");

        // The older call still completes for its caller...
        assert_eq!(slow.await.unwrap().unwrap(), "first");
        // ...but the store reflects the newer one.
        let state = client.snapshot();
        assert_eq!(state.data().map(String::as_str), Some("second"));
        assert_eq!(state.request_version(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn older_failure_arriving_last_is_discarded() {
        let client = spawn::<DelayedEcho>(Arc::new(AtomicUsize::new(0)));

        let slow = {
            let client = client.clone();
            tokio::spawn(async move { client.dispatch((50, "fail")).await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        let fast = client.dispatch((10, "second")).await.unwrap();
        assert_eq!(fast, "second");

        // The failing caller still hears about its own failure.
        let err = slow.await.unwrap().unwrap_err();
        assert_eq!(err.message(), "backend said no");

        let state = client.snapshot();
        assert_eq!(state.status(), Status::Succeeded);
        assert_eq!(state.data().map(String::as_str), Some("second"));
        assert_eq!(state.error(), None);
        assert_eq!(state.request_version(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn abort_policy_cancels_superseded_calls() {
        let finished = Arc::new(AtomicUsize::new(0));
        let client = spawn::<AbortingEcho>(finished.clone());

        let first = {
            let client = client.clone();
            tokio::spawn(async move { client.dispatch((500, "first")).await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        let second = client.dispatch((10, "second")).await.unwrap();

        assert_eq!(second, "second");
        assert_eq!(first.await.unwrap(), Err(ActionError::Superseded));
        assert_eq!(finished.load(Ordering::SeqCst), 1);
        assert_eq!(
            client.snapshot().data().map(String::as_str),
            Some("second")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out_as_rejected() {
        let (actor, client) = StoreActor::<DelayedEcho>::new(StoreOptions {
            buffer_size: 4,
            timeout: Some(Duration::from_secs(30)),
        });
        tokio::spawn(actor.run(Arc::new(AtomicUsize::new(0))));

        let err = client.dispatch((60_000, "late")).await.unwrap_err();
        assert_eq!(err, ActionError::Timeout(Duration::from_secs(30)));
        assert_eq!(client.snapshot().status(), Status::Failed);
    }

    #[tokio::test]
    async fn reset_returns_to_idle() {
        let client = spawn::<DelayedEcho>(Arc::new(AtomicUsize::new(0)));
        client.dispatch((0, "data")).await.unwrap();

        client.reset().await.unwrap();
        let state = client.snapshot();
        assert_eq!(state.status(), Status::Idle);
        assert!(state.data().is_none());
    }

    #[tokio::test]
    async fn actor_drains_in_flight_calls_before_shutdown() {
        let (actor, client) = StoreActor::<DelayedEcho>::new(StoreOptions::default());
        let handle = tokio::spawn(actor.run(Arc::new(AtomicUsize::new(0))));

        let call = {
            let client = client.clone();
            tokio::spawn(async move { client.dispatch((20, "last")).await })
        };
        tokio::task::yield_now().await;
        drop(client);

        assert_eq!(call.await.unwrap().unwrap(), "last");
        handle.await.unwrap();
    }
}
