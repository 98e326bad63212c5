//! # Company Client
//!
//! Wraps the company stores. Toggles are computed from the listed row, so the
//! caller never has to know the wire codes (`A`/`B`, `ON`/`OFF`).
use crate::company_actor::{
    CompanyFetch, CompanyList, CompanyToggleAction, CompanyToggleRequest, CompanyUpdateAction,
    ToggleKind,
};
use crate::model::{CompanyDetail, CompanyListItem, CompanyToggle};
use resource_slice::{Ack, ActionError, AsyncResource, SliceClient};
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CompanyClient {
    list: SliceClient<CompanyList>,
    detail: SliceClient<CompanyFetch>,
    update: SliceClient<CompanyUpdateAction>,
    toggle: SliceClient<CompanyToggleAction>,
}

impl CompanyClient {
    pub fn new(
        list: SliceClient<CompanyList>,
        detail: SliceClient<CompanyFetch>,
        update: SliceClient<CompanyUpdateAction>,
        toggle: SliceClient<CompanyToggleAction>,
    ) -> Self {
        Self {
            list,
            detail,
            update,
            toggle,
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<CompanyListItem>, ActionError> {
        debug!("Fetching companies");
        self.list.dispatch(()).await
    }

    #[instrument(skip(self))]
    pub async fn detail(&self, company_id: String) -> Result<CompanyDetail, ActionError> {
        debug!("Fetching company");
        self.detail.dispatch(company_id).await
    }

    #[instrument(skip(self, detail), fields(company_id = %detail.company_id))]
    pub async fn update(&self, detail: CompanyDetail) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.update.dispatch(detail).await
    }

    /// Flips `A`/`B` on the given row.
    #[instrument(skip(self, company), fields(company_id = %company.company_id))]
    pub async fn toggle_status(&self, company: &CompanyListItem) -> Result<Ack, ActionError> {
        debug!(from = %company.company_status, "Toggling status");
        self.toggle
            .dispatch(CompanyToggleRequest {
                kind: ToggleKind::Status,
                toggle: CompanyToggle::status_of(company),
            })
            .await
    }

    /// Flips `ON`/`OFF` on the given row.
    #[instrument(skip(self, company), fields(company_id = %company.company_id))]
    pub async fn toggle_server(&self, company: &CompanyListItem) -> Result<Ack, ActionError> {
        debug!(from = %company.company_server, "Toggling server");
        self.toggle
            .dispatch(CompanyToggleRequest {
                kind: ToggleKind::Server,
                toggle: CompanyToggle::server_of(company),
            })
            .await
    }

    pub fn companies(&self) -> AsyncResource<Vec<CompanyListItem>> {
        self.list.snapshot()
    }

    pub fn watch_companies(&self) -> watch::Receiver<AsyncResource<Vec<CompanyListItem>>> {
        self.list.subscribe()
    }

    pub fn current_detail(&self) -> AsyncResource<CompanyDetail> {
        self.detail.snapshot()
    }

    /// Forgets the detail record when the edit dialog closes.
    pub async fn close_detail(&self) -> Result<(), ActionError> {
        self.detail.reset().await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::company_actor;
    use crate::model::{CompanyDetail, CompanyListItem};
    use resource_slice::mock::MockTransport;
    use resource_slice::{ActionError, StoreOptions};
    use serde_json::json;
    use std::sync::Arc;

    fn start(mock: &MockTransport) -> super::CompanyClient {
        let (actors, client) = company_actor::new(StoreOptions::default());
        let api: Api = Arc::new(mock.clone());
        actors.run(api);
        client
    }

    fn row() -> CompanyListItem {
        CompanyListItem {
            company_name: "Acme".into(),
            company_id: "CMP01".into(),
            company_pan_no: "ABCDE1234F".into(),
            company_status: "A".into(),
            company_server: "OFF".into(),
        }
    }

    #[tokio::test]
    async fn test_toggles_send_flipped_codes() {
        let mock = MockTransport::new();
        mock.expect_post("/company/updateCompanyStatus")
            .with_json(json!({"comp_id": "CMP01", "status": "B"}))
            .respond_json(json!(null));
        mock.expect_post("/company/updateCompanyServerStatus")
            .with_json(json!({"comp_id": "CMP01", "status": "ON"}))
            .respond_json(json!({"message": "Server switched"}));
        let client = start(&mock);

        let ack = client.toggle_status(&row()).await.unwrap();
        assert_eq!(ack.message, "Company status updated");
        let ack = client.toggle_server(&row()).await.unwrap();
        assert_eq!(ack.message, "Server switched");
        mock.verify();
    }

    #[tokio::test]
    async fn test_toggle_transport_failure_uses_fallback() {
        let mock = MockTransport::new();
        mock.expect_post("/company/updateCompanyStatus")
            .respond_status(500, json!({}));
        let client = start(&mock);

        let err = client.toggle_status(&row()).await.unwrap_err();
        assert_eq!(err.message(), "Failed to update company status");
    }

    #[tokio::test]
    async fn test_detail_requires_code_200() {
        let mock = MockTransport::new();
        mock.expect_post("/company/compny_by_id")
            .with_json(json!({"company_id": "CMP01"}))
            .respond_json(json!({"code": 200, "data": {"company_id": "CMP01", "company_name": "Acme"}}));
        mock.expect_post("/company/compny_by_id")
            .respond_json(json!({"code": 404, "status": "error"}));
        let client = start(&mock);

        let detail = client.detail("CMP01".into()).await.unwrap();
        assert_eq!(detail.company_name, "Acme");

        let err = client.detail("CMP02".into()).await.unwrap_err();
        assert_eq!(err, ActionError::Application("Failed to fetch company details".into()));
    }

    #[tokio::test]
    async fn test_update_accepts_either_success_flag() {
        let mock = MockTransport::new();
        mock.expect_post("/company/updateCompany")
            .respond_json(json!({"code": "200"}));
        let client = start(&mock);

        let detail = CompanyDetail {
            company_id: "CMP01".into(),
            company_name: "Acme".into(),
            company_pan_no: "ABCDE1234F".into(),
            company_email: "ops@acme.in".into(),
            ..Default::default()
        };
        let ack = client.update(detail).await.unwrap();
        assert_eq!(ack.message, "Company updated successfully");
    }
}
