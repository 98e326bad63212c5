use super::{load_notice, Notice};
use crate::clients::DashboardClient;
use crate::model::{DateRange, ImsDashboard};
use resource_slice::AsyncResource;
use tracing::warn;

/// IMS counters for a selectable date range. Opens on the last three months.
pub struct DashboardScreen {
    dashboard: DashboardClient,
    range: DateRange,
}

impl DashboardScreen {
    pub fn new(dashboard: DashboardClient, range: DateRange) -> Self {
        Self { dashboard, range }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Picks a new range and loads it.
    pub async fn set_range(&mut self, range: DateRange) -> Option<Notice> {
        self.range = range;
        self.load().await
    }

    pub async fn load(&self) -> Option<Notice> {
        load_notice(self.dashboard.fetch(self.range).await)
    }

    pub fn counters(&self) -> AsyncResource<ImsDashboard> {
        self.dashboard.dashboard()
    }

    /// Leaving the screen forgets the counters.
    pub async fn clear(&self) {
        if let Err(error) = self.dashboard.clear().await {
            warn!(error = %error, "Could not clear dashboard");
        }
    }
}
