//! Pending signups: approve into a company, or reject after confirmation.

use super::{load_notice, options, search_field, settle_and_refresh, Lookup, Notice};
use crate::clients::{LookupClient, SignupClient};
use crate::model::{ApproveSignup, ApproveSignupPayload, LookupOption, SignupRequest};
use resource_slice::{AsyncResource, ConfirmationGate, DebounceConfig, GateError, GateState, SearchField};
use tracing::{info, instrument};

pub struct SignupScreen {
    signups: SignupClient,
    lookups: LookupClient,
    reject_gate: ConfirmationGate<String>,
    company_field: SearchField,
    vendor_field: SearchField,
}

impl SignupScreen {
    pub fn new(signups: SignupClient, lookups: LookupClient, search: DebounceConfig) -> Self {
        let company_field = search_field(&lookups, Lookup::Companies, search);
        let vendor_field = search_field(&lookups, Lookup::Vendors, search);
        Self {
            signups,
            lookups,
            reject_gate: ConfirmationGate::new(),
            company_field,
            vendor_field,
        }
    }

    pub async fn load(&self) -> Option<Notice> {
        load_notice(self.signups.fetch().await)
    }

    pub fn rows(&self) -> AsyncResource<Vec<SignupRequest>> {
        self.signups.signups()
    }

    /// The approval dialog, prefilled from the row.
    pub fn approval_draft(&self, signup: &SignupRequest) -> ApproveSignup {
        ApproveSignup {
            cust_id: signup.cust_id.clone(),
            payload: ApproveSignupPayload::prefill(signup),
        }
    }

    #[instrument(skip(self, approval), fields(cust_id = %approval.cust_id))]
    pub async fn approve(&self, approval: ApproveSignup) -> Option<Notice> {
        let outcome = self.signups.approve(approval).await;
        settle_and_refresh(outcome, || self.signups.fetch()).await
    }

    pub fn request_reject(&mut self, cust_id: impl Into<String>) -> Result<(), GateError> {
        self.reject_gate.trigger(cust_id.into())
    }

    pub fn cancel_reject(&mut self) -> Result<String, GateError> {
        self.reject_gate.cancel()
    }

    pub fn reject_state(&self) -> &GateState<String> {
        self.reject_gate.state()
    }

    /// Rejects the signup awaiting confirmation and reloads the list.
    #[instrument(skip(self))]
    pub async fn confirm_reject(&mut self) -> Result<Option<Notice>, GateError> {
        let signups = self.signups.clone();
        let outcome = self
            .reject_gate
            .confirm(|cust_id| async move {
                info!(%cust_id, "Rejecting signup");
                signups.reject(cust_id).await
            })
            .await?;
        Ok(settle_and_refresh(outcome, || self.signups.fetch()).await)
    }

    pub fn type_company(&self, text: impl Into<String>) {
        self.company_field.input(text);
    }

    pub fn type_vendor(&self, text: impl Into<String>) {
        self.vendor_field.input(text);
    }

    pub fn company_options(&self) -> Vec<LookupOption> {
        if self.company_field.is_open() {
            options(self.lookups.companies())
        } else {
            Vec::new()
        }
    }

    pub fn vendor_options(&self) -> Vec<LookupOption> {
        if self.vendor_field.is_open() {
            options(self.lookups.vendors())
        } else {
            Vec::new()
        }
    }
}
