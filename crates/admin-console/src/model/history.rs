use resource_slice::{require_id, ActionError};
use serde::{Deserialize, Serialize};

/// One changelog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(deserialize_with = "super::lenient::string")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub video_url: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub doc_url: String,
    #[serde(default, deserialize_with = "super::lenient::string")]
    pub created_by: String,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub created_date: String,
}

/// Changelog entry as sent to the create and edit endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryForm {
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    #[serde(rename = "docUrl")]
    pub doc_url: String,
    /// Customer id of the developer credited with the change.
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

impl HistoryForm {
    pub fn validate(&self) -> Result<(), ActionError> {
        require_id("Date", &self.date)?;
        require_id("Title", &self.title)?;
        require_id("Description", &self.description)?;
        require_id("Created by", &self.created_by)
    }
}

impl From<&HistoryItem> for HistoryForm {
    fn from(item: &HistoryItem) -> Self {
        Self {
            date: item.date.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            video_url: item.video_url.clone(),
            doc_url: item.doc_url.clone(),
            created_by: item.created_by.clone(),
        }
    }
}

/// Edit of an existing entry. `status` travels in the body and the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEdit {
    pub id: String,
    pub status: String,
    pub form: HistoryForm,
}

#[derive(Serialize)]
pub(crate) struct HistoryEditBody<'a> {
    #[serde(flatten)]
    pub form: &'a HistoryForm,
    pub status: &'a str,
}

impl HistoryEdit {
    pub fn validate(&self) -> Result<(), ActionError> {
        require_id("id", &self.id)?;
        require_id("status", &self.status)?;
        self.form.validate()
    }

    pub(crate) fn body(&self) -> HistoryEditBody<'_> {
        HistoryEditBody {
            form: &self.form,
            status: &self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_body_carries_status_next_to_fields() {
        let edit = HistoryEdit {
            id: "12".into(),
            status: "1".into(),
            form: HistoryForm {
                date: "2024-05-01".into(),
                title: "Batch import".into(),
                description: "CSV import for MIN".into(),
                created_by: "DEV01".into(),
                ..Default::default()
            },
        };
        assert!(edit.validate().is_ok());
        assert_eq!(
            serde_json::to_value(edit.body()).unwrap(),
            json!({
                "date": "2024-05-01",
                "title": "Batch import",
                "description": "CSV import for MIN",
                "videoUrl": "",
                "docUrl": "",
                "createdBy": "DEV01",
                "status": "1"
            })
        );
    }

    #[test]
    fn create_requires_author() {
        let form = HistoryForm {
            date: "2024-05-01".into(),
            title: "t".into(),
            description: "d".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate(),
            Err(ActionError::Validation("Created by is required".into()))
        );
    }
}
