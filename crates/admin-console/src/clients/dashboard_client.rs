//! # Dashboard Client
use crate::dashboard_actor::ImsDashboardFetch;
use crate::model::{DateRange, ImsDashboard};
use resource_slice::{ActionError, AsyncResource, SliceClient};
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct DashboardClient {
    ims: SliceClient<ImsDashboardFetch>,
}

impl DashboardClient {
    pub fn new(ims: SliceClient<ImsDashboardFetch>) -> Self {
        Self { ims }
    }

    #[instrument(skip(self), fields(range = %range))]
    pub async fn fetch(&self, range: DateRange) -> Result<ImsDashboard, ActionError> {
        debug!("Fetching dashboard");
        self.ims.dispatch(range).await
    }

    /// Drops the loaded counters and any error.
    pub async fn clear(&self) -> Result<(), ActionError> {
        self.ims.reset().await
    }

    pub fn dashboard(&self) -> AsyncResource<ImsDashboard> {
        self.ims.snapshot()
    }

    pub fn watch_dashboard(&self) -> watch::Receiver<AsyncResource<ImsDashboard>> {
        self.ims.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::dashboard_actor;
    use crate::model::DateRange;
    use chrono::NaiveDate;
    use resource_slice::mock::MockTransport;
    use resource_slice::{ActionError, Status, StoreOptions};
    use serde_json::json;
    use std::sync::Arc;

    const DATED: [&str; 5] = [
        "/tranCount/transaction_counts/transaction",
        "/tranCount/transaction_counts/GP",
        "/tranCount/transaction_counts/MIN",
        "/tranCount/pending_counts",
        "/tranCount/top_mfg_products",
    ];

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 5, 22).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 19).unwrap(),
        )
        .unwrap()
    }

    fn start(mock: &MockTransport) -> super::DashboardClient {
        let (actors, client) = dashboard_actor::new(StoreOptions::default());
        let api: Api = Arc::new(mock.clone());
        actors.run(api);
        client
    }

    #[tokio::test]
    async fn test_fetch_sends_range_to_dated_counters() {
        let mock = MockTransport::new();
        mock.expect_post("/tranCount/master_counts")
            .with_json(json!({}))
            .respond_json(json!({"data": {"totalVendors": 12}}));
        for path in DATED {
            mock.expect_post(path)
                .with_json(json!({"data": "22-05-2025-19-08-2025"}))
                .respond_json(json!({"data": {}}));
        }
        let client = start(&mock);

        let dashboard = client.fetch(range()).await.unwrap();
        assert_eq!(dashboard.master.unwrap().total_vendors, 12);
        assert!(dashboard.pending.is_some());
        assert_eq!(client.dashboard().status(), Status::Succeeded);
        assert_eq!(mock.requests().len(), 6);
    }

    #[tokio::test]
    async fn test_one_failed_counter_rejects_everything() {
        let mock = MockTransport::new();
        mock.expect_post("/tranCount/master_counts").respond_json(json!({"data": {}}));
        for path in DATED {
            if path == "/tranCount/pending_counts" {
                mock.expect_post(path).respond_status(503, json!(null));
            } else {
                mock.expect_post(path).respond_json(json!({"data": {}}));
            }
        }
        let client = start(&mock);

        let err = client.fetch(range()).await.unwrap_err();
        assert!(matches!(err, ActionError::Transport { status: Some(503), .. }));
        assert_eq!(err.message(), "Failed to fetch IMS dashboard data");
        let state = client.dashboard();
        assert_eq!(state.status(), Status::Failed);
        assert!(state.data().is_none());
    }

    #[tokio::test]
    async fn test_clear_returns_to_idle() {
        let mock = MockTransport::new();
        mock.expect_post("/tranCount/master_counts").respond_json(json!({"data": null}));
        for path in DATED {
            mock.expect_post(path).respond_json(json!({"data": null}));
        }
        let client = start(&mock);

        let dashboard = client.fetch(range()).await.unwrap();
        assert!(dashboard.master.is_none());
        client.clear().await.unwrap();
        assert_eq!(client.dashboard().status(), Status::Idle);
    }
}
