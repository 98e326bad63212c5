//! Organisation users with an activate/deactivate switch behind confirmation.

use super::{load_notice, settle_and_refresh, Notice};
use crate::clients::OrgUserClient;
use crate::model::{OrgUser, OrgUserFilter, OrgUserStatus};
use resource_slice::{AsyncResource, ConfirmationGate, GateError, GateState};
use tracing::{info, instrument};

pub struct OrgUserScreen {
    org_users: OrgUserClient,
    filter: OrgUserFilter,
    status_gate: ConfirmationGate<OrgUser>,
}

impl OrgUserScreen {
    pub fn new(org_users: OrgUserClient) -> Self {
        Self {
            org_users,
            filter: OrgUserFilter::default(),
            status_gate: ConfirmationGate::new(),
        }
    }

    pub fn filter(&self) -> &OrgUserFilter {
        &self.filter
    }

    /// Replaces the filter and reloads with it.
    pub async fn apply_filter(&mut self, filter: OrgUserFilter) -> Option<Notice> {
        self.filter = filter;
        self.load().await
    }

    pub async fn load(&self) -> Option<Notice> {
        load_notice(self.org_users.fetch(self.filter.clone()).await)
    }

    pub fn rows(&self) -> AsyncResource<Vec<OrgUser>> {
        self.org_users.users()
    }

    pub fn request_toggle(&mut self, user: OrgUser) -> Result<(), GateError> {
        self.status_gate.trigger(user)
    }

    pub fn cancel_toggle(&mut self) -> Result<OrgUser, GateError> {
        self.status_gate.cancel()
    }

    pub fn toggle_state(&self) -> &GateState<OrgUser> {
        self.status_gate.state()
    }

    /// Flips the pending user between active (`1`) and inactive (`0`).
    #[instrument(skip(self))]
    pub async fn confirm_toggle(&mut self) -> Result<Option<Notice>, GateError> {
        let org_users = self.org_users.clone();
        let outcome = self
            .status_gate
            .confirm(|user| async move {
                let status = if user.is_active() { "0" } else { "1" };
                info!(cust_id = %user.cust_id, status, "Switching user status");
                org_users
                    .set_status(OrgUserStatus {
                        user_id: user.cust_id,
                        status: status.to_string(),
                    })
                    .await
            })
            .await?;
        let filter = self.filter.clone();
        Ok(settle_and_refresh(outcome, || self.org_users.fetch(filter)).await)
    }
}
