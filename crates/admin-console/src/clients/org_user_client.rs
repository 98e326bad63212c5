//! # Org User Client
use crate::model::{OrgUser, OrgUserFilter, OrgUserStatus};
use crate::org_user_actor::{OrgUserEdit, OrgUserList};
use resource_slice::{Ack, ActionError, AsyncResource, SliceClient};
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrgUserClient {
    list: SliceClient<OrgUserList>,
    edit: SliceClient<OrgUserEdit>,
}

impl OrgUserClient {
    pub fn new(list: SliceClient<OrgUserList>, edit: SliceClient<OrgUserEdit>) -> Self {
        Self { list, edit }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, filter: OrgUserFilter) -> Result<Vec<OrgUser>, ActionError> {
        debug!("Fetching org users");
        self.list.dispatch(filter).await
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, change: OrgUserStatus) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.edit.dispatch(change).await
    }

    pub fn users(&self) -> AsyncResource<Vec<OrgUser>> {
        self.list.snapshot()
    }

    pub fn watch_users(&self) -> watch::Receiver<AsyncResource<Vec<OrgUser>>> {
        self.list.subscribe()
    }
}
