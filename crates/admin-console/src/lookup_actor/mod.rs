//! # Lookup Slices
//!
//! Autocomplete sources. Every one answers a search string with `{id, text}`
//! options, and every one aborts its previous call when a newer search starts.
//! Company and vendor searches post JSON; user and cost-center searches post a
//! form.

use crate::api::{self, Api};
use crate::clients::LookupClient;
use crate::model::{LookupOption, SearchQuery};
use async_trait::async_trait;
use resource_slice::{
    ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor, StoreOptions,
    Supersede,
};
use tokio::task::JoinHandle;

const COMPANIES: Envelope = Envelope::new(Convention::BareArrayOrSuccess, "Failed to fetch companies");
const VENDORS: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch vendors");
const USERS: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch users");
const COST_CENTERS: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch cost centers");

pub struct CompanySearch;

#[async_trait]
impl ResourceSlice for CompanySearch {
    const NAME: &'static str = "lookup.companies";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = String;
    type Data = Vec<LookupOption>;
    type Context = Api;

    async fn perform(search: String, api: &Api) -> Result<Vec<LookupOption>, ActionError> {
        let request = ApiRequest::post("/backend/companyList").json_of(&SearchQuery { search })?;
        api::list(api, request, COMPANIES).await
    }
}

pub struct VendorSearch;

#[async_trait]
impl ResourceSlice for VendorSearch {
    const NAME: &'static str = "lookup.vendors";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = String;
    type Data = Vec<LookupOption>;
    type Context = Api;

    async fn perform(search: String, api: &Api) -> Result<Vec<LookupOption>, ActionError> {
        let request = ApiRequest::post("/backend/vendorList").json_of(&SearchQuery { search })?;
        api::list(api, request, VENDORS).await
    }
}

pub struct UserSearch;

#[async_trait]
impl ResourceSlice for UserSearch {
    const NAME: &'static str = "lookup.users";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = String;
    type Data = Vec<LookupOption>;
    type Context = Api;

    async fn perform(search: String, api: &Api) -> Result<Vec<LookupOption>, ActionError> {
        let request = ApiRequest::post("/backend/fetchUsers").form("search", search);
        api::list(api, request, USERS).await
    }
}

pub struct CostCenterSearch;

#[async_trait]
impl ResourceSlice for CostCenterSearch {
    const NAME: &'static str = "lookup.cost_centers";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = String;
    type Data = Vec<LookupOption>;
    type Context = Api;

    async fn perform(search: String, api: &Api) -> Result<Vec<LookupOption>, ActionError> {
        let request = ApiRequest::post("/backend/costCenter").form("search", search);
        api::list(api, request, COST_CENTERS).await
    }
}

pub struct LookupActors {
    companies: StoreActor<CompanySearch>,
    vendors: StoreActor<VendorSearch>,
    users: StoreActor<UserSearch>,
    cost_centers: StoreActor<CostCenterSearch>,
}

impl LookupActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.companies.run(api.clone())),
            tokio::spawn(self.vendors.run(api.clone())),
            tokio::spawn(self.users.run(api.clone())),
            tokio::spawn(self.cost_centers.run(api)),
        ]
    }
}

/// Creates the lookup store actors and their client.
pub fn new(options: StoreOptions) -> (LookupActors, LookupClient) {
    let (companies, companies_client) = StoreActor::new(options);
    let (vendors, vendors_client) = StoreActor::new(options);
    let (users, users_client) = StoreActor::new(options);
    let (cost_centers, cost_centers_client) = StoreActor::new(options);
    let actors = LookupActors {
        companies,
        vendors,
        users,
        cost_centers,
    };
    let client = LookupClient::new(
        companies_client,
        vendors_client,
        users_client,
        cost_centers_client,
    );
    (actors, client)
}
