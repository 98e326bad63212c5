//! Company master: list, status and server switches, edit dialog.

use super::{load_notice, settle_and_refresh, Notice};
use crate::clients::CompanyClient;
use crate::model::{CompanyDetail, CompanyListItem};
use resource_slice::AsyncResource;
use tracing::{instrument, warn};

pub struct CompanyScreen {
    companies: CompanyClient,
}

impl CompanyScreen {
    pub fn new(companies: CompanyClient) -> Self {
        Self { companies }
    }

    pub async fn load(&self) -> Option<Notice> {
        load_notice(self.companies.fetch().await)
    }

    pub fn rows(&self) -> AsyncResource<Vec<CompanyListItem>> {
        self.companies.companies()
    }

    #[instrument(skip(self, row), fields(company_id = %row.company_id))]
    pub async fn toggle_status(&self, row: &CompanyListItem) -> Option<Notice> {
        let outcome = self.companies.toggle_status(row).await;
        settle_and_refresh(outcome, || self.companies.fetch()).await
    }

    #[instrument(skip(self, row), fields(company_id = %row.company_id))]
    pub async fn toggle_server(&self, row: &CompanyListItem) -> Option<Notice> {
        let outcome = self.companies.toggle_server(row).await;
        settle_and_refresh(outcome, || self.companies.fetch()).await
    }

    /// Loads the full record for the edit dialog.
    pub async fn open_edit(&self, company_id: impl Into<String>) -> Option<Notice> {
        load_notice(self.companies.detail(company_id.into()).await)
    }

    pub fn editing(&self) -> AsyncResource<CompanyDetail> {
        self.companies.current_detail()
    }

    /// Saves the dialog. The dialog closes and the list reloads only on success.
    #[instrument(skip(self, detail), fields(company_id = %detail.company_id))]
    pub async fn save(&self, detail: CompanyDetail) -> Option<Notice> {
        let outcome = self.companies.update(detail).await;
        if outcome.is_ok() {
            self.close_edit().await;
        }
        settle_and_refresh(outcome, || self.companies.fetch()).await
    }

    pub async fn close_edit(&self) {
        if let Err(error) = self.companies.close_detail().await {
            warn!(error = %error, "Could not reset company detail");
        }
    }
}
