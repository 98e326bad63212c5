//! # History Slices
//!
//! The product changelog: list, create, edit and delete, plus the list of
//! active developers an entry can be credited to.

use crate::api::{self, Api};
use crate::clients::HistoryClient;
use crate::model::{HistoryEdit, HistoryForm, HistoryItem, OrgUser, OrgUserFilter};
use crate::org_user_actor::fetch_list;
use async_trait::async_trait;
use resource_slice::{
    require_id, Ack, ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor,
    StoreOptions, Supersede,
};
use tokio::task::JoinHandle;

const FETCH: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch history");
const CREATE: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to create history");
const EDIT: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to update history");
const DELETE: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to delete history");

pub struct HistoryFetch;

#[async_trait]
impl ResourceSlice for HistoryFetch {
    const NAME: &'static str = "history.list";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = ();
    type Data = Vec<HistoryItem>;
    type Context = Api;

    async fn perform(_payload: (), api: &Api) -> Result<Vec<HistoryItem>, ActionError> {
        api::list(api, ApiRequest::get("/changelog/fetch"), FETCH).await
    }
}

pub struct HistoryCreate;

#[async_trait]
impl ResourceSlice for HistoryCreate {
    const NAME: &'static str = "history.create";
    type Payload = HistoryForm;
    type Data = Ack;
    type Context = Api;

    fn validate(form: &HistoryForm) -> Result<(), ActionError> {
        form.validate()
    }

    async fn perform(form: HistoryForm, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::post("/changelog/add").json_of(&form)?;
        api::ack(api, request, CREATE, "History created successfully").await
    }
}

/// `PUT /changelog/edit/{id}?status=`.
pub struct HistoryUpdate;

#[async_trait]
impl ResourceSlice for HistoryUpdate {
    const NAME: &'static str = "history.edit";
    type Payload = HistoryEdit;
    type Data = Ack;
    type Context = Api;

    fn validate(edit: &HistoryEdit) -> Result<(), ActionError> {
        edit.validate()
    }

    async fn perform(edit: HistoryEdit, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::put(format!("/changelog/edit/{}", edit.id))
            .query("status", edit.status.clone())
            .json_of(&edit.body())?;
        api::ack(api, request, EDIT, "History updated successfully").await
    }
}

pub struct HistoryDelete;

#[async_trait]
impl ResourceSlice for HistoryDelete {
    const NAME: &'static str = "history.delete";
    type Payload = String;
    type Data = Ack;
    type Context = Api;

    fn validate(id: &String) -> Result<(), ActionError> {
        require_id("id", id)
    }

    async fn perform(id: String, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::delete(format!("/changelog/delete/{id}"));
        api::ack(api, request, DELETE, "History deleted successfully").await
    }
}

/// Active developers, for the "created by" picker.
pub struct DeveloperList;

#[async_trait]
impl ResourceSlice for DeveloperList {
    const NAME: &'static str = "history.developers";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = ();
    type Data = Vec<OrgUser>;
    type Context = Api;

    async fn perform(_payload: (), api: &Api) -> Result<Vec<OrgUser>, ActionError> {
        fetch_list(&OrgUserFilter::active_developers(), api).await
    }
}

pub struct HistoryActors {
    list: StoreActor<HistoryFetch>,
    create: StoreActor<HistoryCreate>,
    edit: StoreActor<HistoryUpdate>,
    delete: StoreActor<HistoryDelete>,
    developers: StoreActor<DeveloperList>,
}

impl HistoryActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.list.run(api.clone())),
            tokio::spawn(self.create.run(api.clone())),
            tokio::spawn(self.edit.run(api.clone())),
            tokio::spawn(self.delete.run(api.clone())),
            tokio::spawn(self.developers.run(api)),
        ]
    }
}

/// Creates the history store actors and their client.
pub fn new(options: StoreOptions) -> (HistoryActors, HistoryClient) {
    let (list, list_client) = StoreActor::new(options);
    let (create, create_client) = StoreActor::new(options);
    let (edit, edit_client) = StoreActor::new(options);
    let (delete, delete_client) = StoreActor::new(options);
    let (developers, developers_client) = StoreActor::new(options);
    let actors = HistoryActors {
        list,
        create,
        edit,
        delete,
        developers,
    };
    let client = HistoryClient::new(
        list_client,
        create_client,
        edit_client,
        delete_client,
        developers_client,
    );
    (actors, client)
}
