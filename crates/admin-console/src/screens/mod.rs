//! # Screens
//!
//! Screen controllers: what a page of the console does, minus the rendering.
//! A screen triggers actions through the feature clients, reads the stores back
//! for display, and turns settled outcomes into [`Notice`]s. Stores never emit
//! notices themselves.
//!
//! Mutations that change a listed resource re-fetch that list once they succeed.
//! Destructive actions go through a [`ConfirmationGate`](resource_slice::ConfirmationGate).

pub mod company;
pub mod dashboard;
pub mod history;
pub mod org_user;
pub mod po_team;
pub mod signup;
pub mod user;

pub use company::CompanyScreen;
pub use dashboard::DashboardScreen;
pub use history::HistoryScreen;
pub use org_user::OrgUserScreen;
pub use po_team::PoTeamScreen;
pub use signup::SignupScreen;
pub use user::AddUserScreen;

use crate::clients::LookupClient;
use crate::model::LookupOption;
use resource_slice::{Ack, ActionError, AsyncResource, DebounceConfig, SearchField};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient message for the operator, like a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// The notice for a failure. A superseded invocation reports nothing: the
    /// newer one will.
    pub fn from_error(error: &ActionError) -> Option<Self> {
        (!error.is_superseded()).then(|| Self::error(error.message()))
    }

    pub fn from_ack(outcome: &Result<Ack, ActionError>) -> Option<Self> {
        match outcome {
            Ok(ack) => Some(Self::success(ack.message.clone())),
            Err(error) => Self::from_error(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "✔ {}", self.message),
            NoticeLevel::Error => write!(f, "✘ {}", self.message),
        }
    }
}

/// Reports a read's failure, if any.
pub(crate) fn load_notice<T>(outcome: Result<T, ActionError>) -> Option<Notice> {
    outcome.err().and_then(|error| Notice::from_error(&error))
}

/// Turns a mutation's outcome into a notice and, on success, re-fetches the
/// affected list. A failed refresh shows up in the list's own store.
pub(crate) async fn settle_and_refresh<R, F, Fut>(
    outcome: Result<Ack, ActionError>,
    refresh: F,
) -> Option<Notice>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, ActionError>>,
{
    let notice = Notice::from_ack(&outcome);
    if outcome.is_ok() {
        if let Err(error) = refresh().await {
            if !error.is_superseded() {
                warn!(error = %error, "Refresh after mutation failed");
            }
        }
    }
    notice
}

/// Which lookup a debounced field feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    Companies,
    Vendors,
    Users,
    CostCenters,
}

/// Spawns a debounced field that searches `lookup` once typing pauses.
pub(crate) fn search_field(lookups: &LookupClient, lookup: Lookup, config: DebounceConfig) -> SearchField {
    let lookups = lookups.clone();
    SearchField::spawn(config, move |text| {
        let lookups = lookups.clone();
        async move {
            let outcome = match lookup {
                Lookup::Companies => lookups.search_companies(text).await,
                Lookup::Vendors => lookups.search_vendors(text).await,
                Lookup::Users => lookups.search_users(text).await,
                Lookup::CostCenters => lookups.search_cost_centers(text).await,
            };
            if let Err(error) = outcome {
                debug!(?lookup, error = %error, "Search settled without results");
            }
        }
    })
}

/// The options a lookup store currently holds.
pub(crate) fn options(state: AsyncResource<Vec<LookupOption>>) -> Vec<LookupOption> {
    state.data().cloned().unwrap_or_default()
}
