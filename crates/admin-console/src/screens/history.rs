//! Changelog entries and the developer picker for their author.

use super::{load_notice, settle_and_refresh, Notice};
use crate::clients::HistoryClient;
use crate::model::{HistoryEdit, HistoryForm, HistoryItem, OrgUser};
use resource_slice::{AsyncResource, ConfirmationGate, GateError, GateState};
use tracing::instrument;

pub struct HistoryScreen {
    history: HistoryClient,
    delete_gate: ConfirmationGate<String>,
}

impl HistoryScreen {
    pub fn new(history: HistoryClient) -> Self {
        Self {
            history,
            delete_gate: ConfirmationGate::new(),
        }
    }

    pub async fn load(&self) -> Option<Notice> {
        load_notice(self.history.fetch().await)
    }

    pub fn rows(&self) -> AsyncResource<Vec<HistoryItem>> {
        self.history.entries()
    }

    /// Loads active developers for the "created by" picker.
    pub async fn load_developers(&self) -> Option<Notice> {
        load_notice(self.history.developers().await)
    }

    pub fn developers(&self) -> AsyncResource<Vec<OrgUser>> {
        self.history.developer_list()
    }

    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create(&self, form: HistoryForm) -> Option<Notice> {
        let outcome = self.history.create(form).await;
        settle_and_refresh(outcome, || self.history.fetch()).await
    }

    /// The edit dialog for an existing row, keeping its status.
    pub fn edit_draft(&self, item: &HistoryItem, status: impl Into<String>) -> HistoryEdit {
        HistoryEdit {
            id: item.id.clone(),
            status: status.into(),
            form: HistoryForm::from(item),
        }
    }

    #[instrument(skip(self, edit), fields(id = %edit.id))]
    pub async fn edit(&self, edit: HistoryEdit) -> Option<Notice> {
        let outcome = self.history.edit(edit).await;
        settle_and_refresh(outcome, || self.history.fetch()).await
    }

    pub fn request_delete(&mut self, id: impl Into<String>) -> Result<(), GateError> {
        self.delete_gate.trigger(id.into())
    }

    pub fn cancel_delete(&mut self) -> Result<String, GateError> {
        self.delete_gate.cancel()
    }

    pub fn delete_state(&self) -> &GateState<String> {
        self.delete_gate.state()
    }

    pub async fn confirm_delete(&mut self) -> Result<Option<Notice>, GateError> {
        let history = self.history.clone();
        let outcome = self
            .delete_gate
            .confirm(|id| async move { history.delete(id).await })
            .await?;
        Ok(settle_and_refresh(outcome, || self.history.fetch()).await)
    }
}
