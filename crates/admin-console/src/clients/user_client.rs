//! # User Client
//!
//! High-level API over the user stores. Each method dispatches to the store for
//! that operation and returns the invocation's own outcome.
use crate::model::{
    AddUserForm, ChangePassword, UpdateEmail, UpdateMobile, UpdateProfile, UserFlag, UserProfile,
    UserSummary,
};
use crate::user_actor::{
    LogKind, UserEdit, UserList, UserLogs, UserProfileFetch, UserRegister, UserUpdate,
};
use resource_slice::{Ack, ActionError, AsyncResource, SliceClient};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for the user stores.
#[derive(Clone)]
pub struct UserClient {
    register: SliceClient<UserRegister>,
    list: SliceClient<UserList>,
    profile: SliceClient<UserProfileFetch>,
    logs: SliceClient<UserLogs>,
    edit: SliceClient<UserEdit>,
}

impl UserClient {
    pub fn new(
        register: SliceClient<UserRegister>,
        list: SliceClient<UserList>,
        profile: SliceClient<UserProfileFetch>,
        logs: SliceClient<UserLogs>,
        edit: SliceClient<UserEdit>,
    ) -> Self {
        Self {
            register,
            list,
            profile,
            logs,
            edit,
        }
    }

    /// Creates an account. The form is validated before anything is sent.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: AddUserForm) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.register.dispatch(form).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_type: String) -> Result<Vec<UserSummary>, ActionError> {
        debug!("Fetching users");
        self.list.dispatch(user_type).await
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: String) -> Result<UserProfile, ActionError> {
        debug!("Fetching profile");
        self.profile.dispatch(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn login_logs(&self, user_id: String) -> Result<Vec<Value>, ActionError> {
        self.logs.dispatch((LogKind::Login, user_id)).await
    }

    #[instrument(skip(self))]
    pub async fn activity_logs(&self, user_id: String) -> Result<Vec<Value>, ActionError> {
        self.logs.dispatch((LogKind::Activity, user_id)).await
    }

    /// Applies any profile-page edit.
    #[instrument(skip(self, update))]
    pub async fn update(&self, update: UserUpdate) -> Result<Ack, ActionError> {
        debug!("Sending request");
        self.edit.dispatch(update).await
    }

    pub async fn change_password(&self, change: ChangePassword) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Password(change)).await
    }

    pub async fn update_email(&self, change: UpdateEmail) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Email(change)).await
    }

    pub async fn update_mobile(&self, change: UpdateMobile) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Mobile(change)).await
    }

    pub async fn update_profile(&self, change: UpdateProfile) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Profile(change)).await
    }

    pub async fn set_two_factor(&self, flag: UserFlag) -> Result<Ack, ActionError> {
        self.update(UserUpdate::TwoFactor(flag)).await
    }

    pub async fn require_password_change(&self, flag: UserFlag) -> Result<Ack, ActionError> {
        self.update(UserUpdate::RequirePasswordChange(flag)).await
    }

    pub async fn set_status(&self, flag: UserFlag) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Status(flag)).await
    }

    pub async fn set_verification(&self, flag: UserFlag) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Verification(flag)).await
    }

    pub async fn suspend(&self, user_id: String) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Suspend(user_id)).await
    }

    pub async fn activate(&self, user_id: String) -> Result<Ack, ActionError> {
        self.update(UserUpdate::Activate(user_id)).await
    }

    pub fn users(&self) -> AsyncResource<Vec<UserSummary>> {
        self.list.snapshot()
    }

    pub fn watch_users(&self) -> watch::Receiver<AsyncResource<Vec<UserSummary>>> {
        self.list.subscribe()
    }

    pub fn current_profile(&self) -> AsyncResource<UserProfile> {
        self.profile.snapshot()
    }

    /// State of the registration store, for the form's busy indicator.
    pub fn registration(&self) -> AsyncResource<Ack> {
        self.register.snapshot()
    }

    pub fn editing(&self) -> AsyncResource<Ack> {
        self.edit.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::model::{AddUserForm, UserFlag};
    use crate::user_actor;
    use resource_slice::mock::MockTransport;
    use resource_slice::{ActionError, Status, StoreOptions};
    use serde_json::json;
    use std::sync::Arc;

    fn start(mock: &MockTransport) -> super::UserClient {
        let (actors, client) = user_actor::new(StoreOptions::default());
        let api: Api = Arc::new(mock.clone());
        actors.run(api);
        client
    }

    #[tokio::test]
    async fn test_register_succeeds_on_code_200() {
        let mock = MockTransport::new();
        mock.expect_post("/auth/register")
            .respond_json(json!({"code": 200, "message": {"msg": "User registered"}}));
        let client = start(&mock);

        let form = AddUserForm {
            username: "asha".into(),
            email: "asha@example.com".into(),
            mobile: "9876543210".into(),
            password: "s3cretpass".into(),
            confirm_password: "s3cretpass".into(),
            ..Default::default()
        };
        let ack = client.register(form).await.unwrap();
        assert_eq!(ack.message, "User registered");
        assert_eq!(client.registration().status(), Status::Succeeded);
        mock.verify();
    }

    #[tokio::test]
    async fn test_register_failure_falls_back_to_generic_message() {
        let mock = MockTransport::new();
        mock.expect_post("/auth/register").respond_json(json!({"code": 500}));
        let client = start(&mock);

        let form = AddUserForm {
            username: "asha".into(),
            email: "asha@example.com".into(),
            mobile: "9876543210".into(),
            password: "s3cretpass".into(),
            confirm_password: "s3cretpass".into(),
            ..Default::default()
        };
        let err = client.register(form).await.unwrap_err();
        assert_eq!(err, ActionError::Application("An error occurred".into()));
        assert_eq!(client.registration().error(), Some("An error occurred"));
    }

    #[tokio::test]
    async fn test_invalid_form_is_never_sent() {
        let mock = MockTransport::new();
        let client = start(&mock);

        let err = client.register(AddUserForm::default()).await.unwrap_err();
        assert_eq!(err, ActionError::Validation("Username is required".into()));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_flag_updates_send_user_id_and_status() {
        let mock = MockTransport::new();
        mock.expect_put("/user/require-password-change")
            .with_json(json!({"userId": "U1", "status": "1"}))
            .respond_json(json!({"success": true}));
        let client = start(&mock);

        let ack = client
            .require_password_change(UserFlag {
                user_id: "U1".into(),
                status: "1".into(),
            })
            .await
            .unwrap();
        assert_eq!(ack.message, "User updated successfully");
        mock.verify();
    }

    #[tokio::test]
    async fn test_login_logs_pass_user_id_as_query() {
        let mock = MockTransport::new();
        mock.expect_get("/user/userLoginLogs")
            .respond_json(json!({"success": true, "data": [{"ip": "10.0.0.1"}]}));
        let client = start(&mock);

        let logs = client.login_logs("U1".into()).await.unwrap();
        assert_eq!(logs.len(), 1);
        let sent = mock.requests();
        assert_eq!(sent[0].query, vec![("userId".to_string(), "U1".to_string())]);
    }
}
