//! # Feature Clients
//!
//! One client per feature. Each wraps the [`SliceClient`](resource_slice::SliceClient)s
//! of that feature's stores, names the operations in domain terms, and exposes
//! store snapshots for the screens to render from.

pub mod company_client;
pub mod dashboard_client;
pub mod history_client;
pub mod lookup_client;
pub mod org_user_client;
pub mod po_team_client;
pub mod signup_client;
pub mod user_client;

pub use company_client::CompanyClient;
pub use dashboard_client::DashboardClient;
pub use history_client::HistoryClient;
pub use lookup_client::LookupClient;
pub use org_user_client::OrgUserClient;
pub use po_team_client::PoTeamClient;
pub use signup_client::SignupClient;
pub use user_client::UserClient;
