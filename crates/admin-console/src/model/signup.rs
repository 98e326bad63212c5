use super::user::{Project, Verification, NO_VENDOR};
use resource_slice::{require_id, ActionError};
use serde::{Deserialize, Serialize};

/// A pending self-service registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(rename = "custID", alias = "custid", deserialize_with = "super::lenient::string")]
    pub cust_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub mobile: String,
    #[serde(rename = "regDtTm", default)]
    pub registered_at: String,
}

/// Body of `POST /auth/signup/approve/{custid}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproveSignupPayload {
    pub company: String,
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub verification: Verification,
    pub project: Project,
    pub vendor: String,
}

impl ApproveSignupPayload {
    /// Prefills the approval form from a signup row.
    pub fn prefill(signup: &SignupRequest) -> Self {
        Self {
            company: String::new(),
            username: signup.username.clone(),
            email: signup.email.clone(),
            mobile: signup.mobile.clone(),
            verification: Verification::Both,
            project: Project::Ims,
            vendor: NO_VENDOR.to_string(),
        }
    }
}

/// An approval addressed to one signup.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproveSignup {
    pub cust_id: String,
    pub payload: ApproveSignupPayload,
}

impl ApproveSignup {
    pub fn validate(&self) -> Result<(), ActionError> {
        require_id("custid", &self.cust_id)?;
        require_id("Company", &self.payload.company)?;
        let vendor = self.payload.vendor.trim();
        if self.payload.project == Project::Vendor && (vendor.is_empty() || vendor == NO_VENDOR) {
            return Err(ActionError::Validation(
                "Vendor is required when Project is Vendor".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefill_uses_ims_defaults() {
        let signup: SignupRequest = serde_json::from_value(json!({
            "username": "ravi",
            "custID": "C100",
            "email": "ravi@example.com",
            "mobile": 9123456789u64,
            "regDtTm": "2024-05-01 10:00:00"
        }))
        .unwrap();

        let payload = serde_json::to_value(ApproveSignupPayload::prefill(&signup)).unwrap();
        assert_eq!(
            payload,
            json!({
                "company": "",
                "username": "ravi",
                "email": "ravi@example.com",
                "mobile": "9123456789",
                "verification": "1",
                "project": "ims",
                "vendor": "--"
            })
        );
    }

    #[test]
    fn vendor_project_needs_a_real_vendor() {
        let signup = SignupRequest {
            username: "ravi".into(),
            cust_id: "C100".into(),
            email: String::new(),
            mobile: String::new(),
            registered_at: String::new(),
        };
        let mut approval = ApproveSignup {
            cust_id: "C100".into(),
            payload: ApproveSignupPayload {
                company: "CMP01".into(),
                project: Project::Vendor,
                ..ApproveSignupPayload::prefill(&signup)
            },
        };
        assert!(approval.validate().is_err());

        approval.payload.vendor = "VEN0042".into();
        assert!(approval.validate().is_ok());
    }
}
