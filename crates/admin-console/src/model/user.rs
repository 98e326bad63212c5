use regex::Regex;
use resource_slice::ActionError;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MOBILE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$"));
static EMAIL: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

fn matches(pattern: &LazyLock<Result<Regex, regex::Error>>, text: &str) -> bool {
    pattern.as_ref().map(|re| re.is_match(text)).unwrap_or(false)
}

/// Indian mobile number: ten digits starting with 6-9.
pub fn is_valid_mobile(mobile: &str) -> bool {
    matches(&MOBILE, mobile)
}

pub fn is_valid_email(email: &str) -> bool {
    matches(&EMAIL, email)
}

/// Which channels of a new account count as verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verification {
    #[serde(rename = "E")]
    EmailOnly,
    #[default]
    #[serde(rename = "M")]
    MobileOnly,
    #[serde(rename = "1")]
    Both,
    #[serde(rename = "0")]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Project {
    #[default]
    Ims,
    Vendor,
}

/// Vendor code sent for IMS accounts, which have no vendor.
pub const NO_VENDOR: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    On,
    Off,
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

/// The "add user" form as filled in by an operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddUserForm {
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
    pub ask_password_change: bool,
    pub verification: Verification,
    pub project: Project,
    pub vendor: Option<String>,
}

impl AddUserForm {
    /// Checks the form, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ActionError> {
        let fail = |msg: &str| Err(ActionError::Validation(msg.to_string()));
        if self.username.trim().is_empty() {
            return fail("Username is required");
        }
        if !is_valid_email(&self.email) {
            return fail("Invalid email address");
        }
        if !is_valid_mobile(&self.mobile) {
            return fail("Invalid Indian mobile number");
        }
        if self.password.chars().count() < 8 {
            return fail("Password must be at least 8 characters");
        }
        if self.password != self.confirm_password {
            return fail("Passwords do not match");
        }
        let has_vendor = self.vendor.as_deref().is_some_and(|v| !v.trim().is_empty());
        if self.project == Project::Vendor && !has_vendor {
            return fail("Vendor is required when Project is Vendor");
        }
        Ok(())
    }

    pub fn to_payload(&self) -> AddUserPayload {
        let vendor = match self.project {
            Project::Ims => NO_VENDOR.to_string(),
            Project::Vendor => self.vendor.clone().unwrap_or_default(),
        };
        AddUserPayload {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile: self.mobile.clone(),
            password: self.password.clone(),
            asktochange: self.ask_password_change.into(),
            verification: self.verification,
            project: self.project,
            vendor,
        }
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddUserPayload {
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub asktochange: Switch,
    pub verification: Verification,
    pub project: Project,
    pub vendor: String,
}

/// Row of `GET /user/list/{type}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "userID", deserialize_with = "super::lenient::string")]
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub user_type: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(rename = "emailID", default)]
    pub email: String,
    #[serde(rename = "mobileNo", default)]
    pub mobile: String,
}

/// `GET /user/details/{id}`. The backend omits fields freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(rename = "userID", deserialize_with = "super::lenient::string")]
    pub user_id: String,
    pub user_name: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub status: String,
    pub gender: String,
    #[serde(rename = "twoFactoryAuth", deserialize_with = "super::lenient::string")]
    pub two_factor_auth: String,
    #[serde(rename = "registerDt")]
    pub register_date: String,
    #[serde(rename = "newsLetterSubscription")]
    pub newsletter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePassword {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub password: String,
    #[serde(rename = "askChangePassword")]
    pub ask_change_password: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateEmail {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "emailId")]
    pub email: String,
    #[serde(rename = "isVerified")]
    pub is_verified: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMobile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "mobileNo")]
    pub mobile: String,
    #[serde(rename = "isVerified")]
    pub is_verified: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub gender: String,
}

/// A `{userId, status}` switch. Used by two-factor, forced password change,
/// account status and verification status updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserFlag {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub status: String,
}

/// Row of `GET /org/user/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgUser {
    #[serde(default)]
    pub username: String,
    #[serde(rename = "custID", alias = "custid", deserialize_with = "super::lenient::string")]
    pub cust_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub status: String,
    #[serde(default)]
    pub company_id: String,
}

impl OrgUser {
    pub fn is_active(&self) -> bool {
        self.status == "1"
    }
}

/// Filters for the org user list. Both are optional query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgUserFilter {
    pub user_type: Option<String>,
    pub status: Option<String>,
}

impl OrgUserFilter {
    /// Active developers, the pool the changelog author picker draws from.
    pub fn active_developers() -> Self {
        Self {
            user_type: Some("developer".into()),
            status: Some("1".into()),
        }
    }
}

/// Body of `PUT /org/user/edit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgUserStatus {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> AddUserForm {
        AddUserForm {
            username: "asha".into(),
            email: "asha@example.com".into(),
            mobile: "9876543210".into(),
            password: "s3cretpass".into(),
            confirm_password: "s3cretpass".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_ims_form_sends_placeholder_vendor() {
        let form = valid_form();
        assert!(form.validate().is_ok());

        let payload = serde_json::to_value(form.to_payload()).unwrap();
        assert_eq!(payload["vendor"], json!("--"));
        assert_eq!(payload["project"], json!("ims"));
        assert_eq!(payload["verification"], json!("M"));
        assert_eq!(payload["asktochange"], json!("off"));
    }

    #[test]
    fn mobile_must_be_indian() {
        for bad in ["5876543210", "98765", "98765432101", "98765abcde"] {
            let form = AddUserForm {
                mobile: bad.into(),
                ..valid_form()
            };
            assert_eq!(
                form.validate(),
                Err(ActionError::Validation("Invalid Indian mobile number".into())),
                "{bad}"
            );
        }
    }

    #[test]
    fn each_rule_reports_its_message() {
        let cases = [
            (AddUserForm { username: " ".into(), ..valid_form() }, "Username is required"),
            (AddUserForm { email: "asha@".into(), ..valid_form() }, "Invalid email address"),
            (
                AddUserForm {
                    password: "short".into(),
                    confirm_password: "short".into(),
                    ..valid_form()
                },
                "Password must be at least 8 characters",
            ),
            (
                AddUserForm { confirm_password: "different1".into(), ..valid_form() },
                "Passwords do not match",
            ),
            (
                AddUserForm { project: Project::Vendor, vendor: None, ..valid_form() },
                "Vendor is required when Project is Vendor",
            ),
        ];
        for (form, message) in cases {
            assert_eq!(form.validate(), Err(ActionError::Validation(message.into())));
        }
    }

    #[test]
    fn vendor_project_keeps_selected_vendor() {
        let form = AddUserForm {
            project: Project::Vendor,
            vendor: Some("VEN0042".into()),
            ask_password_change: true,
            ..valid_form()
        };
        let payload = form.to_payload();
        assert_eq!(payload.vendor, "VEN0042");
        assert_eq!(payload.asktochange, Switch::On);
    }

    #[test]
    fn org_user_accepts_either_id_spelling() {
        let a: OrgUser = serde_json::from_value(json!({"custID": "C1", "status": "1"})).unwrap();
        let b: OrgUser = serde_json::from_value(json!({"custid": "C2", "status": 0})).unwrap();
        assert!(a.is_active());
        assert_eq!(b.cust_id, "C2");
        assert!(!b.is_active());
    }
}
