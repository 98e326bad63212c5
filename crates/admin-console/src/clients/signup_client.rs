//! # Signup Client
use crate::model::{ApproveSignup, SignupRequest};
use crate::signup_actor::{SignupApprove, SignupFetch, SignupReject};
use resource_slice::{Ack, ActionError, AsyncResource, SliceClient};
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SignupClient {
    list: SliceClient<SignupFetch>,
    approve: SliceClient<SignupApprove>,
    reject: SliceClient<SignupReject>,
}

impl SignupClient {
    pub fn new(
        list: SliceClient<SignupFetch>,
        approve: SliceClient<SignupApprove>,
        reject: SliceClient<SignupReject>,
    ) -> Self {
        Self {
            list,
            approve,
            reject,
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<SignupRequest>, ActionError> {
        debug!("Fetching signups");
        self.list.dispatch(()).await
    }

    #[instrument(skip(self, approval), fields(custid = %approval.cust_id))]
    pub async fn approve(&self, approval: ApproveSignup) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.approve.dispatch(approval).await
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, cust_id: String) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.reject.dispatch(cust_id).await
    }

    pub fn signups(&self) -> AsyncResource<Vec<SignupRequest>> {
        self.list.snapshot()
    }

    pub fn watch_signups(&self) -> watch::Receiver<AsyncResource<Vec<SignupRequest>>> {
        self.list.subscribe()
    }
}
