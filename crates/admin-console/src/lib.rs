//! # Admin Console
//!
//! The back-office console for the IMS platform: signups, users, companies, the
//! PO mail team, the changelog and the operations dashboard. Every remote
//! resource is an Async Resource Slice from [`resource_slice`].
//!
//! - **[model]**: wire types and form validation
//! - **`*_actor`**: the slices of each feature and their store actors
//! - **[clients]**: typed handles on those stores
//! - **[screens]**: what each page does with them (gates, searches, refreshes, notices)
//! - **[lifecycle]**: wiring, startup and shutdown of all stores

pub mod api;
pub mod branch;
pub mod clients;
pub mod company_actor;
pub mod config;
pub mod dashboard_actor;
pub mod error;
pub mod history_actor;
pub mod lifecycle;
pub mod lookup_actor;
pub mod model;
pub mod org_user_actor;
pub mod po_team_actor;
pub mod screens;
pub mod signup_actor;
pub mod user_actor;

pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use lifecycle::AdminConsole;
