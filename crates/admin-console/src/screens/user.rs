//! The add-user form.

use super::{options, search_field, Lookup, Notice};
use crate::clients::{LookupClient, UserClient};
use crate::model::{AddUserForm, LookupOption};
use resource_slice::{DebounceConfig, SearchField};
use tracing::instrument;

pub struct AddUserScreen {
    users: UserClient,
    lookups: LookupClient,
    vendor_field: SearchField,
}

impl AddUserScreen {
    pub fn new(users: UserClient, lookups: LookupClient, search: DebounceConfig) -> Self {
        let vendor_field = search_field(&lookups, Lookup::Vendors, search);
        Self {
            users,
            lookups,
            vendor_field,
        }
    }

    /// Registers the user. Validation failures come back as error notices
    /// without a request being sent.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn submit(&self, form: AddUserForm) -> Option<Notice> {
        Notice::from_ack(&self.users.register(form).await)
    }

    pub fn type_vendor(&self, text: impl Into<String>) {
        self.vendor_field.input(text);
    }

    pub fn vendor_options(&self) -> Vec<LookupOption> {
        if self.vendor_field.is_open() {
            options(self.lookups.vendors())
        } else {
            Vec::new()
        }
    }
}
