//! # User Slices
//!
//! Account administration: registration, listing, the profile view and every
//! per-user switch the profile page exposes.
//!
//! ## Structure
//!
//! Each operation is its own [`ResourceSlice`] with its own store, so a slow log
//! fetch never holds up a password change. [`new()`] creates every store actor and
//! the [`UserClient`] that fronts them; [`UserActors::run`] injects the [`Api`].
//!
//! ## Usage
//!
//! ```rust
//! use admin_console::api::Api;
//! use admin_console::user_actor;
//! use resource_slice::mock::MockTransport;
//! use resource_slice::StoreOptions;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_put("/user/U7/suspend").respond_json(json!({"success": true}));
//!
//!     let (actors, client) = user_actor::new(StoreOptions::default());
//!     let api: Api = Arc::new(mock.clone());
//!     actors.run(api);
//!
//!     let ack = client.suspend("U7".into()).await.unwrap();
//!     assert_eq!(ack.message, "User suspended successfully");
//! }
//! ```

use crate::api::{self, Api};
use crate::clients::UserClient;
use crate::model::{
    AddUserForm, ChangePassword, UpdateEmail, UpdateMobile, UpdateProfile, UserFlag, UserProfile,
    UserSummary, is_valid_email, is_valid_mobile,
};
use async_trait::async_trait;
use resource_slice::{
    require_id, Ack, ActionError, ApiRequest, Convention, Envelope, ResourceSlice, StoreActor,
    StoreOptions, Supersede,
};
use serde_json::Value;
use tokio::task::JoinHandle;

const REGISTER: Envelope = Envelope::new(Convention::Code200, "An error occurred");
const LIST: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch users");
const PROFILE: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch user details");
const UPDATE: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to update user");
const LOGS: Envelope = Envelope::new(Convention::SuccessFlag, "Failed to fetch logs");

fn require_password(password: &str) -> Result<(), ActionError> {
    if password.chars().count() < 8 {
        return Err(ActionError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

/// `POST /auth/register`.
pub struct UserRegister;

#[async_trait]
impl ResourceSlice for UserRegister {
    const NAME: &'static str = "user.register";
    type Payload = AddUserForm;
    type Data = Ack;
    type Context = Api;

    fn validate(form: &AddUserForm) -> Result<(), ActionError> {
        form.validate()
    }

    async fn perform(form: AddUserForm, api: &Api) -> Result<Ack, ActionError> {
        let request = ApiRequest::post("/auth/register").json_of(&form.to_payload())?;
        api::ack(api, request, REGISTER, "User created successfully").await
    }
}

/// `GET /user/list/{type}`.
pub struct UserList;

#[async_trait]
impl ResourceSlice for UserList {
    const NAME: &'static str = "user.list";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = String;
    type Data = Vec<UserSummary>;
    type Context = Api;

    fn validate(user_type: &String) -> Result<(), ActionError> {
        require_id("User type", user_type)
    }

    async fn perform(user_type: String, api: &Api) -> Result<Vec<UserSummary>, ActionError> {
        api::list(api, ApiRequest::get(format!("/user/list/{user_type}")), LIST).await
    }
}

/// `GET /user/details/{id}`.
pub struct UserProfileFetch;

#[async_trait]
impl ResourceSlice for UserProfileFetch {
    const NAME: &'static str = "user.profile";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = String;
    type Data = UserProfile;
    type Context = Api;

    fn validate(user_id: &String) -> Result<(), ActionError> {
        require_id("User ID", user_id)
    }

    async fn perform(user_id: String, api: &Api) -> Result<UserProfile, ActionError> {
        api::data(api, ApiRequest::get(format!("/user/details/{user_id}")), PROFILE).await
    }
}

/// Login or activity log of one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Login,
    Activity,
}

/// `GET /user/userLoginLogs` and `GET /user/getLogs`. The entries have no fixed shape.
pub struct UserLogs;

#[async_trait]
impl ResourceSlice for UserLogs {
    const NAME: &'static str = "user.logs";
    const SUPERSEDE: Supersede = Supersede::Abort;
    type Payload = (LogKind, String);
    type Data = Vec<Value>;
    type Context = Api;

    fn validate(payload: &(LogKind, String)) -> Result<(), ActionError> {
        require_id("User ID", &payload.1)
    }

    async fn perform(payload: (LogKind, String), api: &Api) -> Result<Vec<Value>, ActionError> {
        let (kind, user_id) = payload;
        let path = match kind {
            LogKind::Login => "/user/userLoginLogs",
            LogKind::Activity => "/user/getLogs",
        };
        api::list(api, ApiRequest::get(path).query("userId", user_id), LOGS).await
    }
}

/// A change to one user's account. All of them share one store: the profile
/// page shows a single busy indicator for its edit actions.
#[derive(Debug, Clone, PartialEq)]
pub enum UserUpdate {
    Password(ChangePassword),
    Email(UpdateEmail),
    Mobile(UpdateMobile),
    TwoFactor(UserFlag),
    Suspend(String),
    Activate(String),
    Profile(UpdateProfile),
    RequirePasswordChange(UserFlag),
    Status(UserFlag),
    Verification(UserFlag),
}

impl UserUpdate {
    fn user_id(&self) -> &str {
        match self {
            UserUpdate::Password(p) => &p.user_id,
            UserUpdate::Email(p) => &p.user_id,
            UserUpdate::Mobile(p) => &p.user_id,
            UserUpdate::Profile(p) => &p.user_id,
            UserUpdate::Suspend(id) | UserUpdate::Activate(id) => id,
            UserUpdate::TwoFactor(f)
            | UserUpdate::RequirePasswordChange(f)
            | UserUpdate::Status(f)
            | UserUpdate::Verification(f) => &f.user_id,
        }
    }

    fn request(&self) -> Result<(ApiRequest, &'static str), ActionError> {
        Ok(match self {
            UserUpdate::Password(p) => (
                ApiRequest::put("/user/change-user-password").json_of(p)?,
                "Password changed successfully",
            ),
            UserUpdate::Email(p) => (
                ApiRequest::put("/user/update-email-id").json_of(p)?,
                "User updated successfully",
            ),
            UserUpdate::Mobile(p) => (
                ApiRequest::put("/user/update-user-mobile-no").json_of(p)?,
                "Mobile number updated successfully",
            ),
            UserUpdate::TwoFactor(f) => (
                ApiRequest::put("/user/two-step-verification").json_of(f)?,
                "User updated successfully",
            ),
            UserUpdate::Suspend(id) => (
                ApiRequest::put(format!("/user/{id}/suspend")),
                "User suspended successfully",
            ),
            UserUpdate::Activate(id) => (
                ApiRequest::put(format!("/user/{id}/activate")),
                "User activated successfully",
            ),
            UserUpdate::Profile(p) => (
                ApiRequest::put("/user/update").json_of(p)?,
                "Profile updated successfully",
            ),
            UserUpdate::RequirePasswordChange(f) => (
                ApiRequest::put("/user/require-password-change").json_of(f)?,
                "User updated successfully",
            ),
            UserUpdate::Status(f) => (
                ApiRequest::put("/user/update-user-status").json_of(f)?,
                "User updated successfully",
            ),
            UserUpdate::Verification(f) => (
                ApiRequest::put("/user/update-user-verification-status").json_of(f)?,
                "User updated successfully",
            ),
        })
    }
}

pub struct UserEdit;

#[async_trait]
impl ResourceSlice for UserEdit {
    const NAME: &'static str = "user.edit";
    type Payload = UserUpdate;
    type Data = Ack;
    type Context = Api;

    fn validate(update: &UserUpdate) -> Result<(), ActionError> {
        require_id("User ID", update.user_id())?;
        match update {
            UserUpdate::Password(p) => require_password(&p.password),
            UserUpdate::Email(p) if !is_valid_email(&p.email) => Err(ActionError::Validation(
                "Invalid email address".to_string(),
            )),
            UserUpdate::Mobile(p) if !is_valid_mobile(&p.mobile) => Err(ActionError::Validation(
                "Invalid Indian mobile number".to_string(),
            )),
            UserUpdate::Profile(p) => require_id("Name", &p.name),
            _ => Ok(()),
        }
    }

    async fn perform(update: UserUpdate, api: &Api) -> Result<Ack, ActionError> {
        let (request, success) = update.request()?;
        api::ack(api, request, UPDATE, success).await
    }
}

/// The user store actors, waiting for their context.
pub struct UserActors {
    register: StoreActor<UserRegister>,
    list: StoreActor<UserList>,
    profile: StoreActor<UserProfileFetch>,
    logs: StoreActor<UserLogs>,
    edit: StoreActor<UserEdit>,
}

impl UserActors {
    pub fn run(self, api: Api) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.register.run(api.clone())),
            tokio::spawn(self.list.run(api.clone())),
            tokio::spawn(self.profile.run(api.clone())),
            tokio::spawn(self.logs.run(api.clone())),
            tokio::spawn(self.edit.run(api)),
        ]
    }
}

/// Creates the user store actors and their client.
pub fn new(options: StoreOptions) -> (UserActors, UserClient) {
    let (register, register_client) = StoreActor::new(options);
    let (list, list_client) = StoreActor::new(options);
    let (profile, profile_client) = StoreActor::new(options);
    let (logs, logs_client) = StoreActor::new(options);
    let (edit, edit_client) = StoreActor::new(options);

    let actors = UserActors {
        register,
        list,
        profile,
        logs,
        edit,
    };
    let client = UserClient::new(
        register_client,
        list_client,
        profile_client,
        logs_client,
        edit_client,
    );
    (actors, client)
}
