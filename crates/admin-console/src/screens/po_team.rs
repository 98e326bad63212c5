//! PO mail team: leader/member pairs per cost center.

use super::{load_notice, options, search_field, settle_and_refresh, Lookup, Notice};
use crate::clients::{LookupClient, PoTeamClient};
use crate::model::{LookupOption, PoMemberKey, PoTeamMember};
use resource_slice::{AsyncResource, ConfirmationGate, DebounceConfig, GateError, GateState, SearchField};
use tracing::instrument;

pub struct PoTeamScreen {
    po_team: PoTeamClient,
    lookups: LookupClient,
    delete_gate: ConfirmationGate<PoTeamMember>,
    user_field: SearchField,
    cost_center_field: SearchField,
}

impl PoTeamScreen {
    pub fn new(po_team: PoTeamClient, lookups: LookupClient, search: DebounceConfig) -> Self {
        let user_field = search_field(&lookups, Lookup::Users, search);
        let cost_center_field = search_field(&lookups, Lookup::CostCenters, search);
        Self {
            po_team,
            lookups,
            delete_gate: ConfirmationGate::new(),
            user_field,
            cost_center_field,
        }
    }

    pub async fn load(&self) -> Option<Notice> {
        load_notice(self.po_team.fetch().await)
    }

    pub fn rows(&self) -> AsyncResource<Vec<PoTeamMember>> {
        self.po_team.members()
    }

    #[instrument(skip(self))]
    pub async fn add(&self, leader: &str, member: &str, cost_center: &str) -> Option<Notice> {
        let outcome = self.po_team.add(PoMemberKey::new(leader, member, cost_center)).await;
        settle_and_refresh(outcome, || self.po_team.fetch()).await
    }

    pub fn request_delete(&mut self, member: PoTeamMember) -> Result<(), GateError> {
        self.delete_gate.trigger(member)
    }

    pub fn cancel_delete(&mut self) -> Result<PoTeamMember, GateError> {
        self.delete_gate.cancel()
    }

    pub fn delete_state(&self) -> &GateState<PoTeamMember> {
        self.delete_gate.state()
    }

    /// Deletes the member awaiting confirmation. On success the list is fetched
    /// again, so the removed row disappears.
    pub async fn confirm_delete(&mut self) -> Result<Option<Notice>, GateError> {
        let po_team = self.po_team.clone();
        let outcome = self
            .delete_gate
            .confirm(|member| async move { po_team.delete(&member).await })
            .await?;
        Ok(settle_and_refresh(outcome, || self.po_team.fetch()).await)
    }

    pub fn type_user(&self, text: impl Into<String>) {
        self.user_field.input(text);
    }

    pub fn type_cost_center(&self, text: impl Into<String>) {
        self.cost_center_field.input(text);
    }

    pub fn user_options(&self) -> Vec<LookupOption> {
        if self.user_field.is_open() {
            options(self.lookups.users())
        } else {
            Vec::new()
        }
    }

    pub fn cost_center_options(&self) -> Vec<LookupOption> {
        if self.cost_center_field.is_open() {
            options(self.lookups.cost_centers())
        } else {
            Vec::new()
        }
    }
}
