//! # PO Team Slices
//!
//! Purchase-order mail routing: which members report to which leader on which
//! cost center. Add and delete share the `{team_leader, team_member, cost_center}`
//! body.

use crate::api::{self, Api};
use crate::clients::PoTeamClient;
use crate::model::{PoMemberKey, PoTeamMember};
use async_trait::async_trait;
use resource_slice::{
    Ack, ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor, StoreOptions,
    Supersede,
};
use tokio::task::JoinHandle;

const FETCH: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch PO team");
const ADD: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to add team member");
const DELETE: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to delete team member");

pub struct PoTeamFetch;

#[async_trait]
impl ResourceSlice for PoTeamFetch {
    const NAME: &'static str = "po_team.list";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = ();
    type Data = Vec<PoTeamMember>;
    type Context = Api;

    async fn perform(_payload: (), api: &Api) -> Result<Vec<PoTeamMember>, ActionError> {
        let request = ApiRequest::get("/admin/po_mail/fetch_po_team_memeber");
        api::list(api, request, FETCH).await
    }
}

pub struct PoTeamAdd;

#[async_trait]
impl ResourceSlice for PoTeamAdd {
    const NAME: &'static str = "po_team.add";
    type Payload = PoMemberKey;
    type Data = Ack;
    type Context = Api;

    fn validate(key: &PoMemberKey) -> Result<(), ActionError> {
        key.validate()
    }

    async fn perform(key: PoMemberKey, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::post("/admin/po_mail/add_team_in_po").json_of(&key)?;
        api::ack(api, request, ADD, "Team member added successfully").await
    }
}

pub struct PoTeamDelete;

#[async_trait]
impl ResourceSlice for PoTeamDelete {
    const NAME: &'static str = "po_team.delete";
    type Payload = PoMemberKey;
    type Data = Ack;
    type Context = Api;

    fn validate(key: &PoMemberKey) -> Result<(), ActionError> {
        key.validate()
    }

    async fn perform(key: PoMemberKey, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::post("/admin/po_mail/delete_Member").json_of(&key)?;
        api::ack(api, request, DELETE, "Team member deleted successfully").await
    }
}

pub struct PoTeamActors {
    list: StoreActor<PoTeamFetch>,
    add: StoreActor<PoTeamAdd>,
    delete: StoreActor<PoTeamDelete>,
}

impl PoTeamActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.list.run(api.clone())),
            tokio::spawn(self.add.run(api.clone())),
            tokio::spawn(self.delete.run(api)),
        ]
    }
}

/// Creates the PO team store actors and their client.
pub fn new(options: StoreOptions) -> (PoTeamActors, PoTeamClient) {
    let (list, list_client) = StoreActor::new(options);
    let (add, add_client) = StoreActor::new(options);
    let (delete, delete_client) = StoreActor::new(options);
    (
        PoTeamActors { list, add, delete },
        PoTeamClient::new(list_client, add_client, delete_client),
    )
}
