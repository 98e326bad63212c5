//! Subcommands and their handlers.

use admin_console::branch::{Branch, BranchPreference};
use admin_console::model::{
    AddUserForm, CompanyListItem, DateRange, HistoryForm, OrgUserFilter, Project, Verification,
};
use admin_console::screens::{CompanyScreen, Notice};
use admin_console::{AdminConsole, ConsoleConfig};
use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use resource_slice::AsyncResource;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "admin-console", version, about = "IMS back-office console")]
pub struct Cli {
    /// Overrides ADMIN_API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Overrides ADMIN_API_TOKEN.
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn apply(&self, config: &mut ConsoleConfig) {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.auth_token = Some(token.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Pending signups
    Signups {
        #[command(subcommand)]
        action: SignupAction,
    },
    /// PO mail team
    PoTeam {
        #[command(subcommand)]
        action: PoTeamAction,
    },
    /// Company master
    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },
    /// Organisation users
    OrgUsers {
        #[command(subcommand)]
        action: OrgUserAction,
    },
    /// Platform users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Changelog
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// IMS counters
    Dashboard {
        /// DD-MM-YYYY-DD-MM-YYYY. Defaults to ADMIN_DASHBOARD_RANGE or the last three months.
        #[arg(long)]
        range: Option<DateRange>,
    },
    /// Autocomplete lookups
    Search {
        #[arg(value_enum)]
        kind: SearchKind,
        text: String,
    },
    /// Company branch preference
    Branch {
        #[command(subcommand)]
        action: BranchAction,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Signups { .. } => "signups",
            Command::PoTeam { .. } => "po-team",
            Command::Companies { .. } => "companies",
            Command::OrgUsers { .. } => "org-users",
            Command::Users { .. } => "users",
            Command::History { .. } => "history",
            Command::Dashboard { .. } => "dashboard",
            Command::Search { .. } => "search",
            Command::Branch { .. } => "branch",
        }
    }
}

/// Destructive commands only run with `--yes`.
#[derive(Args)]
pub struct Confirm {
    #[arg(long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum SignupAction {
    List,
    Approve {
        cust_id: String,
        #[arg(long)]
        company: String,
        /// Vendor code. Implies the vendor project.
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long, value_enum, default_value_t = VerificationArg::Both)]
        verification: VerificationArg,
    },
    Reject {
        cust_id: String,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
pub enum PoTeamAction {
    List,
    Add {
        #[arg(long)]
        leader: String,
        #[arg(long)]
        member: String,
        #[arg(long)]
        cost_center: String,
    },
    /// Removes the row whose member id matches
    Delete {
        member_id: String,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
pub enum CompanyAction {
    List,
    Show { company_id: String },
    ToggleStatus { company_id: String },
    ToggleServer { company_id: String },
}

#[derive(Subcommand)]
pub enum OrgUserAction {
    List {
        #[arg(long = "type")]
        user_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Switches the user between active and inactive
    Toggle {
        cust_id: String,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    List {
        user_type: String,
    },
    Profile {
        user_id: String,
    },
    Logs {
        user_id: String,
        /// Activity instead of login logs
        #[arg(long)]
        activity: bool,
    },
    Add(AddUserArgs),
    Suspend {
        user_id: String,
    },
    Activate {
        user_id: String,
    },
}

#[derive(Args)]
pub struct AddUserArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    mobile: String,
    /// Read from ADMIN_NEW_USER_PASSWORD so it stays out of shell history.
    #[arg(long, env = "ADMIN_NEW_USER_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    ask_password_change: bool,
    #[arg(long, value_enum, default_value_t = VerificationArg::Mobile)]
    verification: VerificationArg,
    /// Vendor code. Implies the vendor project.
    #[arg(long)]
    vendor: Option<String>,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    List,
    Developers,
    Add {
        #[arg(long)]
        date: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        video_url: String,
        #[arg(long, default_value = "")]
        doc_url: String,
        #[arg(long)]
        created_by: String,
    },
    /// Sets the status of an entry, keeping its other fields
    SetStatus {
        id: String,
        status: String,
    },
    Delete {
        id: String,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
pub enum BranchAction {
    Get,
    Set { code: String },
    List,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SearchKind {
    Companies,
    Vendors,
    Users,
    CostCenters,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VerificationArg {
    Email,
    Mobile,
    Both,
    None,
}

impl From<VerificationArg> for Verification {
    fn from(arg: VerificationArg) -> Self {
        match arg {
            VerificationArg::Email => Verification::EmailOnly,
            VerificationArg::Mobile => Verification::MobileOnly,
            VerificationArg::Both => Verification::Both,
            VerificationArg::None => Verification::None,
        }
    }
}

fn project_for(vendor: &Option<String>) -> Project {
    if vendor.is_some() {
        Project::Vendor
    } else {
        Project::Ims
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Shows the notice. An error notice fails the command.
fn report(notice: Option<Notice>) -> anyhow::Result<()> {
    match notice {
        Some(notice) if notice.is_error() => Err(anyhow!(notice.message)),
        Some(notice) => {
            eprintln!("{notice}");
            Ok(())
        }
        None => Ok(()),
    }
}

fn print_loaded<T: Serialize + Clone + std::fmt::Debug>(notice: Option<Notice>, state: AsyncResource<T>) -> anyhow::Result<()> {
    report(notice)?;
    match state.data() {
        Some(data) => print_json(data),
        None => print_json(&serde_json::Value::Null),
    }
}

fn require_yes(confirm: &Confirm, what: &str) -> anyhow::Result<()> {
    if confirm.yes {
        Ok(())
    } else {
        bail!("Refusing to {what} without --yes")
    }
}

pub async fn run(command: Command, console: &AdminConsole, config: &ConsoleConfig) -> anyhow::Result<()> {
    match command {
        Command::Signups { action } => signups(action, console).await,
        Command::PoTeam { action } => po_team(action, console).await,
        Command::Companies { action } => companies(action, console).await,
        Command::OrgUsers { action } => org_users(action, console).await,
        Command::Users { action } => users(action, console).await,
        Command::History { action } => history(action, console).await,
        Command::Dashboard { range } => {
            let mut screen = console.dashboard_screen(config.dashboard_range());
            let notice = match range {
                Some(range) => screen.set_range(range).await,
                None => screen.load().await,
            };
            print_loaded(notice, screen.counters())
        }
        Command::Search { kind, text } => {
            let lookups = &console.lookups;
            let options = match kind {
                SearchKind::Companies => lookups.search_companies(text).await,
                SearchKind::Vendors => lookups.search_vendors(text).await,
                SearchKind::Users => lookups.search_users(text).await,
                SearchKind::CostCenters => lookups.search_cost_centers(text).await,
            }
            .map_err(|e| anyhow!(e.message()))?;
            print_json(&options)
        }
        Command::Branch { action } => branch(action, config),
    }
}

async fn signups(action: SignupAction, console: &AdminConsole) -> anyhow::Result<()> {
    let mut screen = console.signup_screen();
    let notice = screen.load().await;
    match action {
        SignupAction::List => print_loaded(notice, screen.rows()),
        SignupAction::Approve {
            cust_id,
            company,
            vendor,
            verification,
        } => {
            report(notice)?;
            let rows = screen.rows();
            let row = rows
                .data()
                .and_then(|rows| rows.iter().find(|row| row.cust_id == cust_id))
                .ok_or_else(|| anyhow!("No pending signup {cust_id}"))?;
            let mut approval = screen.approval_draft(row);
            approval.payload.company = company;
            approval.payload.verification = verification.into();
            approval.payload.project = project_for(&vendor);
            if let Some(vendor) = vendor {
                approval.payload.vendor = vendor;
            }
            report(screen.approve(approval).await)
        }
        SignupAction::Reject { cust_id, confirm } => {
            report(notice)?;
            screen.request_reject(cust_id)?;
            if let Err(e) = require_yes(&confirm, "reject a signup") {
                screen.cancel_reject()?;
                return Err(e);
            }
            report(screen.confirm_reject().await?)
        }
    }
}

async fn po_team(action: PoTeamAction, console: &AdminConsole) -> anyhow::Result<()> {
    let mut screen = console.po_team_screen();
    match action {
        PoTeamAction::List => print_loaded(screen.load().await, screen.rows()),
        PoTeamAction::Add {
            leader,
            member,
            cost_center,
        } => report(screen.add(&leader, &member, &cost_center).await),
        PoTeamAction::Delete { member_id, confirm } => {
            report(screen.load().await)?;
            let member = screen
                .rows()
                .data()
                .and_then(|rows| rows.iter().find(|row| row.member_id == member_id).cloned())
                .ok_or_else(|| anyhow!("No team member {member_id}"))?;
            screen.request_delete(member)?;
            if let Err(e) = require_yes(&confirm, "delete a team member") {
                screen.cancel_delete()?;
                return Err(e);
            }
            report(screen.confirm_delete().await?)
        }
    }
}

async fn companies(action: CompanyAction, console: &AdminConsole) -> anyhow::Result<()> {
    let screen = console.company_screen();
    match action {
        CompanyAction::List => print_loaded(screen.load().await, screen.rows()),
        CompanyAction::Show { company_id } => print_loaded(screen.open_edit(company_id).await, screen.editing()),
        CompanyAction::ToggleStatus { company_id } => {
            let row = company_row(&screen, &company_id).await?;
            report(screen.toggle_status(&row).await)
        }
        CompanyAction::ToggleServer { company_id } => {
            let row = company_row(&screen, &company_id).await?;
            report(screen.toggle_server(&row).await)
        }
    }
}

async fn company_row(screen: &CompanyScreen, company_id: &str) -> anyhow::Result<CompanyListItem> {
    report(screen.load().await)?;
    screen
        .rows()
        .data()
        .and_then(|rows| rows.iter().find(|row| row.company_id == company_id).cloned())
        .ok_or_else(|| anyhow!("No company {company_id}"))
}

async fn org_users(action: OrgUserAction, console: &AdminConsole) -> anyhow::Result<()> {
    let mut screen = console.org_user_screen();
    match action {
        OrgUserAction::List { user_type, status } => {
            let notice = screen.apply_filter(OrgUserFilter { user_type, status }).await;
            print_loaded(notice, screen.rows())
        }
        OrgUserAction::Toggle { cust_id, confirm } => {
            report(screen.load().await)?;
            let user = screen
                .rows()
                .data()
                .and_then(|rows| rows.iter().find(|row| row.cust_id == cust_id).cloned())
                .ok_or_else(|| anyhow!("No user {cust_id}"))?;
            screen.request_toggle(user)?;
            if let Err(e) = require_yes(&confirm, "change a user's status") {
                screen.cancel_toggle()?;
                return Err(e);
            }
            report(screen.confirm_toggle().await?)
        }
    }
}

async fn users(action: UserAction, console: &AdminConsole) -> anyhow::Result<()> {
    let users = &console.users;
    let failed = |e: resource_slice::ActionError| anyhow!(e.message());
    match action {
        UserAction::List { user_type } => print_json(&users.list(user_type).await.map_err(failed)?),
        UserAction::Profile { user_id } => print_json(&users.profile(user_id).await.map_err(failed)?),
        UserAction::Logs { user_id, activity } => {
            let logs = if activity {
                users.activity_logs(user_id).await
            } else {
                users.login_logs(user_id).await
            };
            print_json(&logs.map_err(failed)?)
        }
        UserAction::Add(args) => {
            let form = AddUserForm {
                username: args.username,
                email: args.email,
                mobile: args.mobile,
                confirm_password: args.password.clone(),
                password: args.password,
                ask_password_change: args.ask_password_change,
                verification: args.verification.into(),
                project: project_for(&args.vendor),
                vendor: args.vendor,
            };
            report(console.add_user_screen().submit(form).await)
        }
        UserAction::Suspend { user_id } => report(Notice::from_ack(&users.suspend(user_id).await)),
        UserAction::Activate { user_id } => report(Notice::from_ack(&users.activate(user_id).await)),
    }
}

async fn history(action: HistoryAction, console: &AdminConsole) -> anyhow::Result<()> {
    let mut screen = console.history_screen();
    match action {
        HistoryAction::List => print_loaded(screen.load().await, screen.rows()),
        HistoryAction::Developers => {
            let notice = screen.load_developers().await;
            print_loaded(notice, screen.developers())
        }
        HistoryAction::Add {
            date,
            title,
            description,
            video_url,
            doc_url,
            created_by,
        } => {
            let form = HistoryForm {
                date,
                title,
                description,
                video_url,
                doc_url,
                created_by,
            };
            report(screen.create(form).await)
        }
        HistoryAction::SetStatus { id, status } => {
            report(screen.load().await)?;
            let item = screen
                .rows()
                .data()
                .and_then(|rows| rows.iter().find(|row| row.id == id).cloned())
                .ok_or_else(|| anyhow!("No changelog entry {id}"))?;
            report(screen.edit(screen.edit_draft(&item, status)).await)
        }
        HistoryAction::Delete { id, confirm } => {
            screen.request_delete(id)?;
            if let Err(e) = require_yes(&confirm, "delete a changelog entry") {
                screen.cancel_delete()?;
                return Err(e);
            }
            report(screen.confirm_delete().await?)
        }
    }
}

fn branch(action: BranchAction, config: &ConsoleConfig) -> anyhow::Result<()> {
    let preference = BranchPreference::new(&config.state_dir);
    match action {
        BranchAction::Get => {
            let branch = preference.get()?;
            print_json(&serde_json::json!({"code": branch.code(), "label": branch.label()}))
        }
        BranchAction::Set { code } => {
            let branch: Branch = code.parse()?;
            preference
                .set(branch)
                .with_context(|| format!("Could not save branch {branch}"))?;
            eprintln!("{}", Notice::success(format!("Branch set to {}", branch.label())));
            Ok(())
        }
        BranchAction::List => {
            let branches: Vec<_> = Branch::ALL
                .iter()
                .map(|branch| serde_json::json!({"code": branch.code(), "label": branch.label()}))
                .collect();
            print_json(&branches)
        }
    }
}
