use serde::{Deserialize, Serialize};

/// One autocomplete suggestion: companies, vendors, users and cost centers all
/// come back as `{id, text}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    #[serde(deserialize_with = "super::lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub text: String,
}

/// Body of the JSON search endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub search: String,
}
