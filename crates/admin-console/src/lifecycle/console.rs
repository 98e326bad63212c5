use crate::api::Api;
use crate::clients::{
    CompanyClient, DashboardClient, HistoryClient, LookupClient, OrgUserClient, PoTeamClient,
    SignupClient, UserClient,
};
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::model::DateRange;
use crate::screens::{
    AddUserScreen, CompanyScreen, DashboardScreen, HistoryScreen, OrgUserScreen, PoTeamScreen,
    SignupScreen,
};
use crate::{
    company_actor, dashboard_actor, history_actor, lookup_actor, org_user_actor, po_team_actor,
    signup_actor, user_actor,
};
use resource_slice::{DebounceConfig, ReqwestTransport, StoreOptions};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Every store of the console, running, plus the clients to reach them.
pub struct AdminConsole {
    pub users: UserClient,
    pub org_users: OrgUserClient,
    pub companies: CompanyClient,
    pub lookups: LookupClient,
    pub signups: SignupClient,
    pub po_team: PoTeamClient,
    pub history: HistoryClient,
    pub dashboard: DashboardClient,
    search: DebounceConfig,
    handles: Vec<JoinHandle<()>>,
}

impl AdminConsole {
    /// Connects to the configured backend over HTTP.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let transport = ReqwestTransport::new(config.transport())?;
        info!(base_url = %transport.base_url(), "Starting admin console");
        let options = StoreOptions {
            timeout: Some(config.request_timeout),
            ..StoreOptions::default()
        };
        Ok(Self::with_transport(Arc::new(transport), options, config.search))
    }

    /// Starts all stores against `api`. Must be called inside a Tokio runtime.
    pub fn with_transport(api: Api, options: StoreOptions, search: DebounceConfig) -> Self {
        // Create every store first, then run them with the shared context.
        let (user_actors, users) = user_actor::new(options);
        let (org_user_actors, org_users) = org_user_actor::new(options);
        let (company_actors, companies) = company_actor::new(options);
        let (lookup_actors, lookups) = lookup_actor::new(options);
        let (signup_actors, signups) = signup_actor::new(options);
        let (po_team_actors, po_team) = po_team_actor::new(options);
        let (history_actors, history) = history_actor::new(options);
        let (dashboard_actors, dashboard) = dashboard_actor::new(options);

        let mut handles = Vec::new();
        handles.extend(user_actors.run(api.clone()));
        handles.extend(org_user_actors.run(api.clone()));
        handles.extend(company_actors.run(api.clone()));
        handles.extend(lookup_actors.run(api.clone()));
        handles.extend(signup_actors.run(api.clone()));
        handles.extend(po_team_actors.run(api.clone()));
        handles.extend(history_actors.run(api.clone()));
        handles.extend(dashboard_actors.run(api));
        info!(stores = handles.len(), "Admin console stores running");

        Self {
            users,
            org_users,
            companies,
            lookups,
            signups,
            po_team,
            history,
            dashboard,
            search,
            handles,
        }
    }

    pub fn signup_screen(&self) -> SignupScreen {
        SignupScreen::new(self.signups.clone(), self.lookups.clone(), self.search)
    }

    pub fn po_team_screen(&self) -> PoTeamScreen {
        PoTeamScreen::new(self.po_team.clone(), self.lookups.clone(), self.search)
    }

    pub fn company_screen(&self) -> CompanyScreen {
        CompanyScreen::new(self.companies.clone())
    }

    pub fn org_user_screen(&self) -> OrgUserScreen {
        OrgUserScreen::new(self.org_users.clone())
    }

    pub fn history_screen(&self) -> HistoryScreen {
        HistoryScreen::new(self.history.clone())
    }

    pub fn dashboard_screen(&self, range: DateRange) -> DashboardScreen {
        DashboardScreen::new(self.dashboard.clone(), range)
    }

    pub fn add_user_screen(&self) -> AddUserScreen {
        AddUserScreen::new(self.users.clone(), self.lookups.clone(), self.search)
    }

    /// Drops the clients so each store's channel closes, then waits for the
    /// store tasks. Screens and client clones must be dropped first, or this waits
    /// for them.
    pub async fn shutdown(mut self) -> Result<(), ConsoleError> {
        info!("Shutting down admin console");
        let handles = std::mem::take(&mut self.handles);
        drop(self);

        for handle in handles {
            handle.await?;
        }

        info!("Admin console shut down");
        Ok(())
    }
}
