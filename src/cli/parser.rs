use crate::core::calculator::compliance::RevenueSource;
use crate::export::{ExportFormat, ExportTarget};
use crate::models::role::Role;
use crate::utils::date::Preset;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for tradetracker
/// Role-based job, crew and hours tracking for trades contractors
#[derive(Parser)]
#[command(
    name = "tradetracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track crews, job logs and worker hours, and check weekly payroll compliance using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Date filters shared by the listings.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Quick range relative to today (weeks run Sunday to Saturday)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Year, month, day or range: 2025, 2025-06, 2025-06-01, 2025-06:2025-08
    #[arg(long, short)]
    pub period: Option<String>,

    /// First date included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last date included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration, optionally creating the first admin
    Init {
        #[arg(long = "admin-email", requires_all = ["admin_password", "first_name", "last_name"])]
        admin_email: Option<String>,

        #[arg(long = "admin-password")]
        admin_password: Option<String>,

        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,
    },

    /// Sign in and store a session token next to the database
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Close the current session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Role-specific overview
    Dashboard,

    /// View or edit your own profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage user accounts (admin)
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage crews (admin)
    Crew {
        #[command(subcommand)]
        action: CrewAction,
    },

    /// Manage trades (admin)
    Trade {
        #[command(subcommand)]
        action: TradeAction,
    },

    /// Manage job templates
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// Manage job elevations
    Elevation {
        #[command(subcommand)]
        action: ElevationAction,
    },

    /// Record and browse work done against job templates
    #[command(name = "joblog")]
    JobLog {
        #[command(subcommand)]
        action: JobLogAction,
    },

    /// Submit and browse worked hours
    Hours {
        #[command(subcommand)]
        action: HoursAction,
    },

    /// Flat job records from before job templates existed
    #[command(name = "legacy-job")]
    LegacyJob {
        #[command(subcommand)]
        action: LegacyJobAction,
    },

    /// Payroll compliance reports (admin)
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log (admin)
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, help = "Only the newest N rows")]
        limit: Option<usize>,
    },

    /// Create a backup copy of the database (admin)
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export job logs, hours or a weekly report (admin)
    Export {
        #[arg(long, value_enum, default_value = "job-logs")]
        what: ExportTarget,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Case-insensitive text filter")]
        search: Option<String>,

        #[arg(long, help = "Crew id (job logs filter, required for weekly)")]
        crew: Option<String>,

        #[arg(long = "week-start", help = "Week start for the weekly report (YYYY-MM-DD)")]
        week_start: Option<String>,

        #[arg(long, value_enum, default_value = "legacy")]
        source: RevenueSource,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show your profile and crew
    Show,

    /// Update your name or phone number (empty phone clears it)
    Update {
        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List all users, newest first
    List,

    Get {
        id: String,
    },

    /// Create an account with its profile
    Create {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, value_enum, default_value = "worker")]
        role: Role,

        #[arg(long)]
        crew: Option<String>,

        #[arg(long)]
        rate: Option<f64>,
    },

    /// Change role, crew, rate or contact details
    Update {
        id: String,

        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long, conflicts_with = "clear_phone")]
        phone: Option<String>,

        #[arg(long = "clear-phone")]
        clear_phone: bool,

        #[arg(long, value_enum)]
        role: Option<Role>,

        #[arg(long, conflicts_with = "no_crew")]
        crew: Option<String>,

        #[arg(long = "no-crew", help = "Remove the user from their crew")]
        no_crew: bool,

        #[arg(long, conflicts_with = "clear_rate")]
        rate: Option<f64>,

        #[arg(long = "clear-rate")]
        clear_rate: bool,
    },
}

#[derive(Subcommand)]
pub enum CrewAction {
    List,

    Get {
        id: String,
    },

    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        trade: Option<String>,
    },

    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        trade: Option<String>,
    },

    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TradeAction {
    List,

    Get {
        id: String,
    },

    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum JobAction {
    /// List templates (foremen only see active ones)
    List {
        #[arg(long, help = "Only active templates")]
        active: bool,

        #[arg(long, help = "Include each template's elevations")]
        elevations: bool,
    },

    Get {
        id: String,
    },

    Create {
        #[arg(long)]
        name: String,

        #[arg(long, help = "Create the template archived")]
        inactive: bool,
    },

    Update {
        id: String,

        #[arg(long)]
        name: String,
    },

    /// Hide a template from foremen
    Archive {
        id: String,
    },

    Reactivate {
        id: String,
    },

    /// Delete a template with its elevations and logs
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ElevationAction {
    List {
        #[arg(long)]
        job: String,
    },

    Get {
        id: String,
    },

    Add {
        #[arg(long)]
        job: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        yardage: f64,

        #[arg(long)]
        rate: f64,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        yardage: Option<f64>,

        #[arg(long)]
        rate: Option<f64>,
    },

    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum JobLogAction {
    /// Record work for your crew (foreman)
    Add {
        #[arg(long)]
        job: String,

        #[arg(long)]
        elevation: String,

        #[arg(long)]
        lot: String,

        #[arg(long, help = "Date worked (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List logs: own crew for foremen; --crew, --job or all for admins
    List {
        #[arg(long)]
        crew: Option<String>,

        #[arg(long, conflicts_with = "crew")]
        job: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        search: Option<String>,

        #[arg(
            long,
            conflicts_with_all = ["search", "crew", "job"],
            help = "Group by job with per-job totals (admin)"
        )]
        grouped: bool,
    },

    /// Count, yardage and revenue
    Stats {
        #[arg(long)]
        crew: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum HoursAction {
    /// Submit hours for one day
    Submit {
        #[arg(long, help = "Date worked (YYYY-MM-DD)")]
        date: String,

        #[arg(long)]
        hours: f64,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Change one of your entries
    Update {
        id: String,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        hours: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    Delete {
        id: String,
    },

    /// Your entries, or everyone's with --all (admin)
    List {
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, requires = "all")]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LegacyJobAction {
    Add {
        #[arg(long = "job-name")]
        job_name: String,

        #[arg(long)]
        elevation: Option<String>,

        #[arg(long = "lot-address")]
        lot_address: Option<String>,

        #[arg(long)]
        yardage: f64,

        #[arg(long)]
        rate: f64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    List {
        #[arg(long)]
        crew: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        limit: Option<usize>,
    },

    Stats {
        #[arg(long)]
        crew: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Weekly crew compliance: revenue against minimum pay
    Weekly {
        #[arg(long)]
        crew: String,

        #[arg(long = "week-start", help = "First day of the week (YYYY-MM-DD, usually a Monday)")]
        week_start: String,

        #[arg(long, value_enum, default_value = "legacy")]
        source: RevenueSource,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}
