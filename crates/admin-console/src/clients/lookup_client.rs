//! # Lookup Client
//!
//! Search entry points for the autocomplete fields. Results also land in the
//! matching store, which is what a debounced field reads back.
use crate::lookup_actor::{CompanySearch, CostCenterSearch, UserSearch, VendorSearch};
use crate::model::LookupOption;
use resource_slice::{ActionError, AsyncResource, SliceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct LookupClient {
    companies: SliceClient<CompanySearch>,
    vendors: SliceClient<VendorSearch>,
    users: SliceClient<UserSearch>,
    cost_centers: SliceClient<CostCenterSearch>,
}

impl LookupClient {
    pub fn new(
        companies: SliceClient<CompanySearch>,
        vendors: SliceClient<VendorSearch>,
        users: SliceClient<UserSearch>,
        cost_centers: SliceClient<CostCenterSearch>,
    ) -> Self {
        Self {
            companies,
            vendors,
            users,
            cost_centers,
        }
    }

    #[instrument(skip(self))]
    pub async fn search_companies(&self, search: String) -> Result<Vec<LookupOption>, ActionError> {
        debug!("Searching");
        self.companies.dispatch(search).await
    }

    #[instrument(skip(self))]
    pub async fn search_vendors(&self, search: String) -> Result<Vec<LookupOption>, ActionError> {
        debug!("Searching");
        self.vendors.dispatch(search).await
    }

    #[instrument(skip(self))]
    pub async fn search_users(&self, search: String) -> Result<Vec<LookupOption>, ActionError> {
        debug!("Searching");
        self.users.dispatch(search).await
    }

    #[instrument(skip(self))]
    pub async fn search_cost_centers(
        &self,
        search: String,
    ) -> Result<Vec<LookupOption>, ActionError> {
        debug!("Searching");
        self.cost_centers.dispatch(search).await
    }

    pub fn companies(&self) -> AsyncResource<Vec<LookupOption>> {
        self.companies.snapshot()
    }

    pub fn vendors(&self) -> AsyncResource<Vec<LookupOption>> {
        self.vendors.snapshot()
    }

    pub fn users(&self) -> AsyncResource<Vec<LookupOption>> {
        self.users.snapshot()
    }

    pub fn cost_centers(&self) -> AsyncResource<Vec<LookupOption>> {
        self.cost_centers.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::lookup_actor;
    use resource_slice::mock::MockTransport;
    use resource_slice::StoreOptions;
    use serde_json::json;
    use std::sync::Arc;

    fn start(mock: &MockTransport) -> super::LookupClient {
        let (actors, client) = lookup_actor::new(StoreOptions::default());
        let api: Api = Arc::new(mock.clone());
        actors.run(api);
        client
    }

    #[tokio::test]
    async fn test_company_search_accepts_bare_array() {
        let mock = MockTransport::new();
        mock.expect_post("/backend/companyList")
            .with_json(json!({"search": "acm"}))
            .respond_json(json!([{"id": "CMP01", "text": "Acme"}]));
        let client = start(&mock);

        let options = client.search_companies("acm".into()).await.unwrap();
        assert_eq!(options[0].text, "Acme");
        mock.verify();
    }

    #[tokio::test]
    async fn test_user_and_cost_center_searches_post_forms() {
        let mock = MockTransport::new();
        mock.expect_post("/backend/fetchUsers")
            .with_form(&[("search", "mee")])
            .respond_json(json!({"success": true, "data": [{"id": 3, "text": "Meera"}]}));
        mock.expect_post("/backend/costCenter")
            .with_form(&[("search", "st")])
            .respond_json(json!({"success": true, "data": null}));
        let client = start(&mock);

        let users = client.search_users("mee".into()).await.unwrap();
        assert_eq!(users[0].id, "3");
        let centers = client.search_cost_centers("st".into()).await.unwrap();
        assert!(centers.is_empty());
        mock.verify();
    }
}
