//! # Org User Slices
//!
//! Organisation-side user accounts: the filtered list and the active/inactive
//! switch. The changelog's developer picker reads the same endpoint through
//! [`crate::history_actor`].

use crate::api::{self, Api};
use crate::clients::OrgUserClient;
use crate::model::{OrgUser, OrgUserFilter, OrgUserStatus};
use async_trait::async_trait;
use resource_slice::{
    require_id, Ack, ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor,
    StoreOptions, Supersede,
};
use tokio::task::JoinHandle;

const LIST: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch users");
const EDIT: Envelope = Envelope::new(Convention::Code200, "Failed to update user status");

/// Builds `GET /org/user/list` with whichever filters are set.
pub(crate) fn list_request(filter: &OrgUserFilter) -> ApiRequest {
    let mut request = ApiRequest::get("/org/user/list");
    if let Some(user_type) = &filter.user_type {
        request = request.query("type", user_type.clone());
    }
    if let Some(status) = &filter.status {
        request = request.query("status", status.clone());
    }
    request
}

pub(crate) async fn fetch_list(filter: &OrgUserFilter, api: &Api) -> Result<Vec<OrgUser>, ActionError> {
    api::list(api, list_request(filter), LIST).await
}

pub struct OrgUserList;

#[async_trait]
impl ResourceSlice for OrgUserList {
    const NAME: &'static str = "org_user.list";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = OrgUserFilter;
    type Data = Vec<OrgUser>;
    type Context = Api;

    async fn perform(filter: OrgUserFilter, api: &Api) -> Result<Vec<OrgUser>, ActionError> {
        fetch_list(&filter, api).await
    }
}

/// `PUT /org/user/edit`.
pub struct OrgUserEdit;

#[async_trait]
impl ResourceSlice for OrgUserEdit {
    const NAME: &'static str = "org_user.edit";
    type Payload = OrgUserStatus;
    type Data = Ack;
    type Context = Api;

    fn validate(change: &OrgUserStatus) -> Result<(), ActionError> {
        require_id("userID", &change.user_id)?;
        match change.status.as_str() {
            "0" | "1" => Ok(()),
            other => Err(ActionError::Validation(format!("Unknown user status {other:?}"))),
        }
    }

    async fn perform(change: OrgUserStatus, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::put("/org/user/edit").json_of(&change)?;
        api::ack(api, request, EDIT, "User status updated").await
    }
}

pub struct OrgUserActors {
    list: StoreActor<OrgUserList>,
    edit: StoreActor<OrgUserEdit>,
}

impl OrgUserActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.list.run(api.clone())),
            tokio::spawn(self.edit.run(api)),
        ]
    }
}

/// Creates the org user store actors and their client.
pub fn new(options: StoreOptions) -> (OrgUserActors, OrgUserClient) {
    let (list, list_client) = StoreActor::new(options);
    let (edit, edit_client) = StoreActor::new(options);
    (OrgUserActors { list, edit }, OrgUserClient::new(list_client, edit_client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_become_query_parameters() {
        let request = list_request(&OrgUserFilter::active_developers());
        assert_eq!(
            request.query,
            vec![
                ("type".to_string(), "developer".to_string()),
                ("status".to_string(), "1".to_string())
            ]
        );
        assert!(list_request(&OrgUserFilter::default()).query.is_empty());
    }

    #[test]
    fn status_must_be_binary() {
        let change = OrgUserStatus {
            user_id: "C9".into(),
            status: "yes".into(),
        };
        assert!(OrgUserEdit::validate(&change).is_err());
    }
}
