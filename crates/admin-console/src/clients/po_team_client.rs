//! # PO Team Client
use crate::model::{PoMemberKey, PoTeamMember};
use crate::po_team_actor::{PoTeamAdd, PoTeamDelete, PoTeamFetch};
use resource_slice::{Ack, ActionError, AsyncResource, SliceClient};
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct PoTeamClient {
    list: SliceClient<PoTeamFetch>,
    add: SliceClient<PoTeamAdd>,
    delete: SliceClient<PoTeamDelete>,
}

impl PoTeamClient {
    pub fn new(
        list: SliceClient<PoTeamFetch>,
        add: SliceClient<PoTeamAdd>,
        delete: SliceClient<PoTeamDelete>,
    ) -> Self {
        Self { list, add, delete }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<PoTeamMember>, ActionError> {
        debug!("Fetching PO team");
        self.list.dispatch(()).await
    }

    #[instrument(skip(self))]
    pub async fn add(&self, key: PoMemberKey) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.add.dispatch(key).await
    }

    #[instrument(skip(self, member), fields(member_id = %member.member_id))]
    pub async fn delete(&self, member: &PoTeamMember) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.delete.dispatch(member.key()).await
    }

    pub fn members(&self) -> AsyncResource<Vec<PoTeamMember>> {
        self.list.snapshot()
    }

    pub fn watch_members(&self) -> watch::Receiver<AsyncResource<Vec<PoTeamMember>>> {
        self.list.subscribe()
    }
}
