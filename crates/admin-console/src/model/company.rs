use resource_slice::ActionError;
use serde::{Deserialize, Serialize};

/// Row of the company management list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyListItem {
    #[serde(default)]
    pub company_name: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub company_id: String,
    #[serde(default)]
    pub company_pan_no: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub company_status: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub company_server: String,
}

impl CompanyListItem {
    pub fn status(&self) -> CompanyStatus {
        CompanyStatus::from_code(&self.company_status)
    }

    pub fn server(&self) -> ServerStatus {
        ServerStatus::from_code(&self.company_server)
    }
}

/// Account status of a company: `A` active, `B` blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyStatus {
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "B")]
    Blocked,
}

impl CompanyStatus {
    /// Anything other than `A` reads as blocked.
    pub fn from_code(code: &str) -> Self {
        if code.trim() == "A" {
            Self::Active
        } else {
            Self::Blocked
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Blocked,
            Self::Blocked => Self::Active,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Active => "A",
            Self::Blocked => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl ServerStatus {
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("ON") {
            Self::On
        } else {
            Self::Off
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// Full company record from `POST /company/compny_by_id`. Also the edit form.
///
/// Field names are the backend's, including `companey_city`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetail {
    #[serde(rename = "ID", deserialize_with = "super::lenient::string")]
    pub row_id: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub company_id: String,
    pub company_name: String,
    pub company_trade_name: String,
    pub company_pan_no: String,
    pub company_cin_no: String,
    pub company_email: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub company_mob: String,
    pub company_state: String,
    pub companey_city: String,
    pub company_address: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub company_pin_code: String,
    pub company_gst_no: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub company_status: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub company_server: String,
}

impl CompanyDetail {
    pub fn validate(&self) -> Result<(), ActionError> {
        let required = [
            (&self.company_id, "Company ID is required"),
            (&self.company_name, "Company name is required"),
            (&self.company_pan_no, "PAN number is required"),
            (&self.company_email, "Email address is required"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(ActionError::Validation(message.to_string()));
            }
        }
        Ok(())
    }

    /// Renames the form fields to what `POST /company/updateCompany` expects.
    pub fn to_update(&self) -> CompanyUpdate {
        CompanyUpdate {
            company_name: self.company_name.clone(),
            company_pan_no: self.company_pan_no.clone(),
            company_cin_no: self.company_cin_no.clone(),
            company_mobile: self.company_mob.clone(),
            company_state_name: self.company_state.clone(),
            company_city: self.companey_city.clone(),
            company_gstin: self.company_gst_no.clone(),
            company_pincode: self.company_pin_code.clone(),
            company_email: self.company_email.clone(),
            company_address: self.company_address.clone(),
            customer_id: self.company_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyUpdate {
    pub company_name: String,
    pub company_pan_no: String,
    pub company_cin_no: String,
    pub company_mobile: String,
    pub company_state_name: String,
    pub company_city: String,
    pub company_gstin: String,
    pub company_pincode: String,
    pub company_email: String,
    pub company_address: String,
    pub customer_id: String,
}

/// Body of both company toggle endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyToggle {
    pub comp_id: String,
    pub status: String,
}

impl CompanyToggle {
    /// Flips the account status of a listed company.
    pub fn status_of(company: &CompanyListItem) -> Self {
        Self {
            comp_id: company.company_id.clone(),
            status: company.status().toggled().code().to_string(),
        }
    }

    /// Flips the server switch of a listed company.
    pub fn server_of(company: &CompanyListItem) -> Self {
        Self {
            comp_id: company.company_id.clone(),
            status: company.server().toggled().code().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyIdQuery {
    pub company_id: String,
}
