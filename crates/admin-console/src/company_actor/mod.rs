//! # Company Slices
//!
//! The company management list, the detail record behind the edit dialog, the
//! update itself and the two list toggles.
//!
//! The toggle endpoints report nothing useful in their body, so any 2xx counts
//! as success there.

use crate::api::{self, Api};
use crate::clients::CompanyClient;
use crate::model::{CompanyDetail, CompanyIdQuery, CompanyListItem, CompanyToggle};
use async_trait::async_trait;
use resource_slice::{
    require_id, Ack, ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor,
    StoreOptions, Supersede,
};
use tokio::task::JoinHandle;

const LIST: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch companies");
const DETAIL: Envelope = Envelope::new(Convention::Code200, "Failed to fetch company details");
const UPDATE: Envelope = Envelope::new(Convention::SuccessOrCode200, "Failed to update company");
const STATUS: Envelope = Envelope::new(Convention::TransportOnly, "Failed to update company status");
const SERVER: Envelope = Envelope::new(
    Convention::TransportOnly,
    "Failed to update company server status",
);

/// `GET /company/compny_list`.
pub struct CompanyList;

#[async_trait]
impl ResourceSlice for CompanyList {
    const NAME: &'static str = "company.list";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = ();
    type Data = Vec<CompanyListItem>;
    type Context = Api;

    async fn perform(_payload: (), api: &Api) -> Result<Vec<CompanyListItem>, ActionError> {
        api::list(api, ApiRequest::get("/company/compny_list"), LIST).await
    }
}

/// `POST /company/compny_by_id`.
pub struct CompanyFetch;

#[async_trait]
impl ResourceSlice for CompanyFetch {
    const NAME: &'static str = "company.detail";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = String;
    type Data = CompanyDetail;
    type Context = Api;

    fn validate(company_id: &String) -> Result<(), ActionError> {
        require_id("Company ID", company_id)
    }

    async fn perform(company_id: String, api: &Api) -> Result<CompanyDetail, ActionError> {
        let request = ApiRequest::post("/company/compny_by_id").json_of(&CompanyIdQuery { company_id })?;
        api::data(api, request, DETAIL).await
    }
}

/// `POST /company/updateCompany`.
pub struct CompanyUpdateAction;

#[async_trait]
impl ResourceSlice for CompanyUpdateAction {
    const NAME: &'static str = "company.update";
    type Payload = CompanyDetail;
    type Data = Ack;
    type Context = Api;

    fn validate(detail: &CompanyDetail) -> Result<(), ActionError> {
        detail.validate()
    }

    async fn perform(detail: CompanyDetail, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::post("/company/updateCompany").json_of(&detail.to_update())?;
        api::ack(api, request, UPDATE, "Company updated successfully").await
    }
}

/// Which switch a toggle flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    Status,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyToggleRequest {
    pub kind: ToggleKind,
    pub toggle: CompanyToggle,
}

/// `POST /company/updateCompanyStatus` and `/company/updateCompanyServerStatus`.
pub struct CompanyToggleAction;

#[async_trait]
impl ResourceSlice for CompanyToggleAction {
    const NAME: &'static str = "company.toggle";
    type Payload = CompanyToggleRequest;
    type Data = Ack;
    type Context = Api;

    fn validate(request: &CompanyToggleRequest) -> Result<(), ActionError> {
        require_id("Company ID", &request.toggle.comp_id)
    }

    async fn perform(request: CompanyToggleRequest, api: &Api) -> Result<Ack, ActionError> {
        let (path, envelope, success) = match request.kind {
            ToggleKind::Status => (
                "/company/updateCompanyStatus",
                STATUS,
                "Company status updated",
            ),
            ToggleKind::Server => (
                "/company/updateCompanyServerStatus",
                SERVER,
                "Company server status updated",
            ),
        };
        let call = ApiRequest::post(path).json_of(&request.toggle)?;
        api::ack(api, call, envelope, success).await
    }
}

pub struct CompanyActors {
    list: StoreActor<CompanyList>,
    detail: StoreActor<CompanyFetch>,
    update: StoreActor<CompanyUpdateAction>,
    toggle: StoreActor<CompanyToggleAction>,
}

impl CompanyActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.list.run(api.clone())),
            tokio::spawn(self.detail.run(api.clone())),
            tokio::spawn(self.update.run(api.clone())),
            tokio::spawn(self.toggle.run(api)),
        ]
    }
}

/// Creates the company store actors and their client.
pub fn new(options: StoreOptions) -> (CompanyActors, CompanyClient) {
    let (list, list_client) = StoreActor::new(options);
    let (detail, detail_client) = StoreActor::new(options);
    let (update, update_client) = StoreActor::new(options);
    let (toggle, toggle_client) = StoreActor::new(options);
    let actors = CompanyActors {
        list,
        detail,
        update,
        toggle,
    };
    let client = CompanyClient::new(list_client, detail_client, update_client, toggle_client);
    (actors, client)
}
