//! # History Client
use crate::history_actor::{DeveloperList, HistoryCreate, HistoryDelete, HistoryFetch, HistoryUpdate};
use crate::model::{HistoryEdit, HistoryForm, HistoryItem, OrgUser};
use resource_slice::{Ack, ActionError, AsyncResource, SliceClient};
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct HistoryClient {
    list: SliceClient<HistoryFetch>,
    create: SliceClient<HistoryCreate>,
    edit: SliceClient<HistoryUpdate>,
    delete: SliceClient<HistoryDelete>,
    developers: SliceClient<DeveloperList>,
}

impl HistoryClient {
    pub fn new(
        list: SliceClient<HistoryFetch>,
        create: SliceClient<HistoryCreate>,
        edit: SliceClient<HistoryUpdate>,
        delete: SliceClient<HistoryDelete>,
        developers: SliceClient<DeveloperList>,
    ) -> Self {
        Self {
            list,
            create,
            edit,
            delete,
            developers,
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<HistoryItem>, ActionError> {
        debug!("Fetching history");
        self.list.dispatch(()).await
    }

    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create(&self, form: HistoryForm) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.create.dispatch(form).await
    }

    #[instrument(skip(self, edit), fields(id = %edit.id, status = %edit.status))]
    pub async fn edit(&self, edit: HistoryEdit) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.edit.dispatch(edit).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: String) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.delete.dispatch(id).await
    }

    #[instrument(skip(self))]
    pub async fn developers(&self) -> Result<Vec<OrgUser>, ActionError> {
        self.developers.dispatch(()).await
    }

    pub fn developer_list(&self) -> AsyncResource<Vec<OrgUser>> {
        self.developers.snapshot()
    }

    pub fn entries(&self) -> AsyncResource<Vec<HistoryItem>> {
        self.list.snapshot()
    }

    pub fn watch_entries(&self) -> watch::Receiver<AsyncResource<Vec<HistoryItem>>> {
        self.list.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::history_actor;
    use crate::model::{HistoryEdit, HistoryForm};
    use resource_slice::mock::MockTransport;
    use resource_slice::{Method, StoreOptions};
    use serde_json::json;
    use std::sync::Arc;

    fn start(mock: &MockTransport) -> super::HistoryClient {
        let (actors, client) = history_actor::new(StoreOptions::default());
        let api: Api = Arc::new(mock.clone());
        actors.run(api);
        client
    }

    #[tokio::test]
    async fn test_edit_sends_status_in_query_and_body() {
        let mock = MockTransport::new();
        mock.expect_put("/changelog/edit/12")
            .respond_json(json!({"success": true, "message": "Updated"}));
        let client = start(&mock);

        let edit = HistoryEdit {
            id: "12".into(),
            status: "0".into(),
            form: HistoryForm {
                date: "2024-05-01".into(),
                title: "Batch import".into(),
                description: "CSV import".into(),
                created_by: "DEV01".into(),
                ..Default::default()
            },
        };
        let ack = client.edit(edit).await.unwrap();
        assert_eq!(ack.message, "Updated");

        let sent = &mock.requests()[0];
        assert_eq!(sent.query, vec![("status".to_string(), "0".to_string())]);
        let resource_slice::Body::Json(body) = &sent.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["status"], "0");
        assert_eq!(body["createdBy"], "DEV01");
    }

    #[tokio::test]
    async fn test_developers_come_from_filtered_org_list() {
        let mock = MockTransport::new();
        mock.expect_get("/org/user/list").respond_json(json!({
            "success": true,
            "data": [{"username": "dev", "custID": "DEV01", "status": "1"}]
        }));
        let client = start(&mock);

        let developers = client.developers().await.unwrap();
        assert_eq!(developers[0].cust_id, "DEV01");
        let sent = &mock.requests()[0];
        assert_eq!(sent.method, Method::Get);
        assert_eq!(
            sent.query,
            vec![
                ("type".to_string(), "developer".to_string()),
                ("status".to_string(), "1".to_string())
            ]
        );
    }
}
