//! CLI argument definitions for the review dashboard client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use medrev_model::{MedicineStatus, Role};
use medrev_select::{DateWindow, MedicineOrder, UserOrder};

#[derive(Parser)]
#[command(
    name = "medrev",
    version,
    about = "Pharmacy review dashboard - terminal client",
    long_about = "Terminal client for the pharmacy administration service.\n\n\
                  Browse and manage employee accounts, review medicine records\n\
                  awaiting certification, and inspect Look-Alike-Sound-Alike\n\
                  similarity reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the service (overrides MEDREV_API_URL).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and print the bearer token for subsequent calls.
    Login(LoginArgs),

    /// Employee account management.
    #[command(subcommand)]
    Employees(EmployeeCommand),

    /// Medicine review surfaces.
    #[command(subcommand)]
    Medicines(MedicineCommand),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Employee id.
    #[arg(long)]
    pub id: String,

    /// Password.
    #[arg(long)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// List employee accounts.
    List(EmployeeListArgs),

    /// Show one employee account.
    Show {
        /// Employee id.
        id: String,
    },

    /// Create an employee account.
    Create(EmployeeCreateArgs),

    /// Update an employee profile; only the given fields change.
    Update(EmployeeUpdateArgs),

    /// Delete an employee account. Irreversible.
    Delete {
        /// Employee id.
        id: String,
    },
}

#[derive(Args)]
pub struct EmployeeListArgs {
    /// Free-text search over first name, surname, and id.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Restrict to these roles (repeatable). Omitting the flag shows all.
    #[arg(long = "role", value_enum)]
    pub roles: Vec<RoleArg>,

    /// Sort direction over employee id.
    #[arg(long = "sort", value_enum, default_value = "asc")]
    pub sort: UserOrderArg,
}

#[derive(Args)]
pub struct EmployeeCreateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub firstname: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, value_enum)]
    pub role: RoleArg,
}

#[derive(Args)]
pub struct EmployeeUpdateArgs {
    /// Employee id.
    pub id: String,

    #[arg(long)]
    pub firstname: Option<String>,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,
}

#[derive(Subcommand)]
pub enum MedicineCommand {
    /// List medicine records for one review surface.
    List(MedicineListArgs),

    /// Show one medicine record by product name.
    Show {
        /// Product name.
        name: String,

        /// Also fetch the LASA report for this analyzed response id.
        #[arg(long = "similar", value_name = "RESPONSE_ID")]
        similar: Option<String>,
    },

    /// Certify a medicine. Refused when already approved.
    Approve {
        /// Product name.
        name: String,
    },

    /// Decline a medicine. Refused when already completed.
    Decline {
        /// Product name.
        name: String,
    },

    /// Edit packaging fields of a medicine; only the given fields change.
    Edit(MedicineEditArgs),

    /// Show the LASA similarity report for an analyzed response.
    Similar {
        /// Response id of the analyzed medicine.
        response_id: String,
    },
}

#[derive(Args)]
pub struct MedicineListArgs {
    /// Review surface to list (waiting = pending, certified = approved).
    #[arg(long, value_enum, default_value = "pending")]
    pub status: StatusArg,

    /// Restrict to these category buckets (repeatable). Use
    /// "No Category" for records without one.
    #[arg(long = "category", value_name = "BUCKET")]
    pub categories: Vec<String>,

    /// Free-text search over product name, metadata id, category, and
    /// manufacturer.
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Only records created within the given window.
    #[arg(long, value_enum)]
    pub within: Option<WindowArg>,

    /// Sort direction over creation time.
    #[arg(long = "sort", value_enum, default_value = "new")]
    pub sort: MedicineOrderArg,
}

#[derive(Args)]
pub struct MedicineEditArgs {
    /// Product name of the record to edit.
    pub name: String,

    #[arg(long = "product-name")]
    pub product_name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long = "intake-method")]
    pub intake_method: Option<String>,
    #[arg(long)]
    pub manufacturer: Option<String>,
    #[arg(long = "manufacturing-country")]
    pub manufacturing_country: Option<String>,
    #[arg(long = "country-registration")]
    pub country_registration: Option<String>,
    #[arg(long)]
    pub barcode: Option<String>,
    #[arg(long = "type-packaging")]
    pub type_packaging: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Pharm,
    Tech,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Pharm => Role::Pharm,
            RoleArg::Tech => Role::Tech,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Approved,
    Completed,
}

impl From<StatusArg> for MedicineStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => MedicineStatus::Pending,
            StatusArg::Approved => MedicineStatus::Approved,
            StatusArg::Completed => MedicineStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UserOrderArg {
    Asc,
    Desc,
}

impl From<UserOrderArg> for UserOrder {
    fn from(arg: UserOrderArg) -> Self {
        match arg {
            UserOrderArg::Asc => UserOrder::Asc,
            UserOrderArg::Desc => UserOrder::Desc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MedicineOrderArg {
    New,
    Old,
}

impl From<MedicineOrderArg> for MedicineOrder {
    fn from(arg: MedicineOrderArg) -> Self {
        match arg {
            MedicineOrderArg::New => MedicineOrder::New,
            MedicineOrderArg::Old => MedicineOrder::Old,
        }
    }
}

/// Recency window choices for the medicine list.
#[derive(Clone, Copy, ValueEnum)]
pub enum WindowArg {
    /// Last 24 hours.
    #[value(name = "1d")]
    OneDay,
    /// Last three weeks.
    #[value(name = "3w")]
    ThreeWeeks,
}

impl From<WindowArg> for DateWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::OneDay => DateWindow::OneDay,
            WindowArg::ThreeWeeks => DateWindow::ThreeWeeks,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
