//! # Dashboard Slice
//!
//! The IMS operations dashboard is one store fed by six counter endpoints. The
//! calls go out together and settle together: if any of them fails, the whole
//! fetch is rejected and nothing partial is committed.

use crate::api::Api;
use crate::clients::DashboardClient;
use crate::model::{
    DateRange, DateRangeQuery, GatePassCounts, ImsDashboard, MasterCounts, MinCounts,
    PendingCounts, TopMfgProducts, TransactionCounts,
};
use async_trait::async_trait;
use resource_slice::{
    ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor, StoreOptions,
    Supersede,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::task::JoinHandle;

const COUNTS: Envelope = Envelope::new(Convention::TransportOnly, "Failed to fetch IMS dashboard data");

async fn counter<T: DeserializeOwned>(api: &Api, request: ApiRequest) -> Result<Option<T>, ActionError> {
    crate::api::data(api, request, COUNTS).await
}

fn dated(path: &str, range: &DateRangeQuery) -> Result<ApiRequest, ActionError> {
    ApiRequest::post(path).json_of(range)
}

/// All six counters for one date range. Master counts ignore the range.
pub struct ImsDashboardFetch;

#[async_trait]
impl ResourceSlice for ImsDashboardFetch {
    const NAME: &'static str = "dashboard.ims";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = DateRange;
    type Data = ImsDashboard;
    type Context = Api;

    async fn perform(range: DateRange, api: &Api) -> Result<ImsDashboard, ActionError> {
        let range = DateRangeQuery::from(range);
        let (master, transactions, gate_pass, min, pending, top_mfg) = tokio::try_join!(
            counter::<MasterCounts>(api, ApiRequest::post("/tranCount/master_counts").json(json!({}))),
            counter::<TransactionCounts>(api, dated("/tranCount/transaction_counts/transaction", &range)?),
            counter::<GatePassCounts>(api, dated("/tranCount/transaction_counts/GP", &range)?),
            counter::<MinCounts>(api, dated("/tranCount/transaction_counts/MIN", &range)?),
            counter::<PendingCounts>(api, dated("/tranCount/pending_counts", &range)?),
            counter::<TopMfgProducts>(api, dated("/tranCount/top_mfg_products", &range)?),
        )?;
        Ok(ImsDashboard {
            master,
            transactions,
            gate_pass,
            min,
            pending,
            top_mfg,
        })
    }
}

pub struct DashboardActors {
    ims: StoreActor<ImsDashboardFetch>,
}

impl DashboardActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![tokio::spawn(self.ims.run(api))]
    }
}

/// Creates the dashboard store actor and its client.
pub fn new(options: StoreOptions) -> (DashboardActors, DashboardClient) {
    let (ims, ims_client) = StoreActor::new(options);
    (DashboardActors { ims }, DashboardClient::new(ims_client))
}
