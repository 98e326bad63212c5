//! # Signup Slices
//!
//! Pending self-service registrations: the queue, approval into a full account,
//! and rejection. Approve and reject report success as `status == "success"`.

use crate::api::{self, Api};
use crate::clients::SignupClient;
use crate::model::{ApproveSignup, SignupRequest};
use async_trait::async_trait;
use resource_slice::{
    require_id, Ack, ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor,
    StoreOptions, Supersede,
};
use tokio::task::JoinHandle;

const FETCH: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch signups");
const APPROVE: Envelope = Envelope::new(Convention::StatusString, "Something went wrong");
const REJECT: Envelope = Envelope::new(Convention::StatusString, "Failed to reject signup");

/// `POST /auth/signup/fetch`.
pub struct SignupFetch;

#[async_trait]
impl ResourceSlice for SignupFetch {
    const NAME: &'static str = "signup.list";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = ();
    type Data = Vec<SignupRequest>;
    type Context = Api;

    async fn perform(_payload: (), api: &Api) -> Result<Vec<SignupRequest>, ActionError> {
        api::list(api, ApiRequest::post("/auth/signup/fetch"), FETCH).await
    }
}

/// `POST /auth/signup/approve/{custid}`.
pub struct SignupApprove;

#[async_trait]
impl ResourceSlice for SignupApprove {
    const NAME: &'static str = "signup.approve";
    type Payload = ApproveSignup;
    type Data = Ack;
    type Context = Api;

    fn validate(approval: &ApproveSignup) -> Result<(), ActionError> {
        approval.validate()
    }

    async fn perform(approval: ApproveSignup, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::post(format!("/auth/signup/approve/{}", approval.cust_id))
            .json_of(&approval.payload)?;
        api::ack(api, request, APPROVE, "User approved successfully").await
    }
}

/// `DELETE /auth/signup/reject/{custid}`.
pub struct SignupReject;

#[async_trait]
impl ResourceSlice for SignupReject {
    const NAME: &'static str = "signup.reject";
    type Payload = String;
    type Data = Ack;
    type Context = Api;

    fn validate(cust_id: &String) -> Result<(), ActionError> {
        require_id("custid", cust_id)
    }

    async fn perform(cust_id: String, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::delete(format!("/auth/signup/reject/{cust_id}"));
        api::ack(api, request, REJECT, "User rejected successfully").await
    }
}

pub struct SignupActors {
    list: StoreActor<SignupFetch>,
    approve: StoreActor<SignupApprove>,
    reject: StoreActor<SignupReject>,
}

impl SignupActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.list.run(api.clone())),
            tokio::spawn(self.approve.run(api.clone())),
            tokio::spawn(self.reject.run(api)),
        ]
    }
}

/// Creates the signup store actors and their client.
pub fn new(options: StoreOptions) -> (SignupActors, SignupClient) {
    let (list, list_client) = StoreActor::new(options);
    let (approve, approve_client) = StoreActor::new(options);
    let (reject, reject_client) = StoreActor::new(options);
    (
        SignupActors {
            list,
            approve,
            reject,
        },
        SignupClient::new(list_client, approve_client, reject_client),
    )
}
