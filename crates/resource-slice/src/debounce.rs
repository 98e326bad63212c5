//! # Debounced Search Field
//!
//! Autocomplete inputs fire their search only after the user stops typing. The
//! logic is split in two:
//!
//! - [`Debouncer`] is a pure state machine over `{Idle, Armed}` driven by explicit
//!   instants, so it can be tested without a clock.
//! - [`SearchField`] runs a `Debouncer` in a task, sleeping until the deadline and
//!   invoking the search callback when it expires.

use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiescence window after the last keystroke.
    pub window: Duration,
    /// Texts shorter than this never trigger a search.
    pub min_chars: usize,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(300),
            min_chars: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Armed { pending: String, deadline: Instant },
}

/// What an expired window produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fire {
    /// Run the search with this text.
    Search(String),
    /// The text was too short: close the result list, search nothing.
    Closed,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            state: DebounceState::Idle,
        }
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    /// Records a keystroke. Always (re-)arms with a fresh deadline.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.state = DebounceState::Armed {
            pending: text.into(),
            deadline: now + self.config.window,
        };
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Armed { deadline, .. } => Some(*deadline),
            DebounceState::Idle => None,
        }
    }

    /// Fires if the deadline has passed, returning to `Idle`.
    pub fn poll(&mut self, now: Instant) -> Option<Fire> {
        match &self.state {
            DebounceState::Armed { deadline, .. } if now >= *deadline => {}
            _ => return None,
        }
        let DebounceState::Armed { pending, .. } =
            std::mem::replace(&mut self.state, DebounceState::Idle)
        else {
            return None;
        };
        if pending.chars().count() >= self.config.min_chars {
            Some(Fire::Search(pending))
        } else {
            Some(Fire::Closed)
        }
    }
}

/// A running debounced search input.
///
/// Dropping the field stops its task; a pending keystroke is discarded.
pub struct SearchField {
    input: mpsc::UnboundedSender<String>,
    open: watch::Receiver<bool>,
    handle: JoinHandle<()>,
}

impl SearchField {
    /// Spawns the debounce task. `on_search` is spawned once per fired search.
    pub fn spawn<F, Fut>(config: DebounceConfig, on_search: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (input, mut rx) = mpsc::unbounded_channel::<String>();
        let (open_tx, open) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut debouncer = Debouncer::new(config);
            loop {
                let deadline = debouncer.deadline();
                tokio::select! {
                    text = rx.recv() => match text {
                        Some(text) => debouncer.input(text, Instant::now()),
                        None => break,
                    },
                    _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                        match debouncer.poll(Instant::now()) {
                            Some(Fire::Search(text)) => {
                                debug!(query = %text, "Search fired");
                                open_tx.send_replace(true);
                                tokio::spawn(on_search(text));
                            }
                            Some(Fire::Closed) => {
                                open_tx.send_replace(false);
                            }
                            None => {}
                        }
                    }
                }
            }
        });

        Self {
            input,
            open,
            handle,
        }
    }

    /// Feeds one keystroke's worth of text.
    pub fn input(&self, text: impl Into<String>) {
        let _ = self.input.send(text.into());
    }

    /// Whether the result list should be shown.
    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }
}

impl Drop for SearchField {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn rearming_moves_the_deadline() {
        let start = Instant::now();
        let mut d = Debouncer::new(DebounceConfig::default());
        d.input("ab", start);
        d.input("abc", start + Duration::from_millis(200));

        assert_eq!(d.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            d.poll(start + Duration::from_millis(500)),
            Some(Fire::Search("abc".into()))
        );
        assert_eq!(d.state(), &DebounceState::Idle);
        assert_eq!(d.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn short_text_closes_instead_of_firing() {
        let start = Instant::now();
        let mut d = Debouncer::new(DebounceConfig::default());
        d.input("a", start);
        assert_eq!(d.poll(start + Duration::from_millis(300)), Some(Fire::Closed));
    }

    fn recording_field() -> (SearchField, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let field = SearchField::spawn(DebounceConfig::default(), move |text| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(text);
            }
        });
        (field, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn fast_typing_fires_once_with_last_text() {
        let (field, calls) = recording_field();

        for text in ["ac", "acm", "acme"] {
            field.input(text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["acme".to_string()]);
        assert!(field.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn below_threshold_never_fires() {
        let (field, calls) = recording_field();

        field.input("a");
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(calls.lock().unwrap().is_empty());
        assert!(!field.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_pauses_fire_separately() {
        let (field, calls) = recording_field();

        field.input("ve");
        tokio::time::sleep(Duration::from_millis(400)).await;
        field.input("ven");
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["ve".to_string(), "ven".to_string()]
        );
    }
}
