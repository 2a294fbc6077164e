//! Clap derive structures for the `stocklet` CLI.
//!
//! Defines the complete command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

use stocklet_core::{PurchaseStatus, SortField, SortOrder};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stocklet -- command-line client for inventory backends
#[derive(Debug, Parser)]
#[command(
    name = "stocklet",
    version,
    about = "Manage a stocklet inventory backend from the command line",
    long_about = "A CLI for stocklet inventory servers.\n\n\
        Sessions persist between invocations: log in once, then run\n\
        product and purchase commands until the token expires.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API root URL (overrides the config file)
    #[arg(long, short = 'a', env = "STOCKLET_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOCKLET_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist the session
    Login(LoginArgs),

    /// Create a customer account and log in
    Register(RegisterArgs),

    /// Drop the persisted session
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Manage products
    #[command(alias = "prod", alias = "p")]
    Products(ProductsArgs),

    /// View and create purchases
    #[command(alias = "pur")]
    Purchases(PurchasesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password (prompted when omitted; prefer the prompt or the env var)
    #[arg(long, env = "STOCKLET_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Email address (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "STOCKLET_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ProductListArgs),

    /// Add a product (admin)
    Add {
        /// Product name
        #[arg(long, short = 'n')]
        name: String,

        /// Units in stock
        #[arg(long, short = 'Q', default_value = "0")]
        quantity: u32,

        /// Unit price
        #[arg(long, short = 'p')]
        price: f64,
    },

    /// Overwrite a product's fields (admin)
    Edit {
        /// Product id
        id: i64,

        /// Product name
        #[arg(long, short = 'n')]
        name: String,

        /// Units in stock
        #[arg(long, short = 'Q')]
        quantity: u32,

        /// Unit price
        #[arg(long, short = 'p')]
        price: f64,
    },

    /// Delete a product (admin, asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Product id
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    /// Case-insensitive substring filter on the name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort column
    #[arg(long, value_enum)]
    pub sort: Option<SortFieldArg>,

    /// Sort direction
    #[arg(long, value_enum, default_value = "asc")]
    pub order: SortOrderArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortFieldArg {
    Name,
    Quantity,
    Price,
}

impl From<SortFieldArg> for SortField {
    fn from(arg: SortFieldArg) -> Self {
        match arg {
            SortFieldArg::Name => Self::Name,
            SortFieldArg::Quantity => Self::Quantity,
            SortFieldArg::Price => Self::Price,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortOrderArg {
    Asc,
    Desc,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Asc => Self::Asc,
            SortOrderArg::Desc => Self::Desc,
        }
    }
}

// ── Purchases ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PurchasesArgs {
    #[command(subcommand)]
    pub command: PurchasesCommand,
}

#[derive(Debug, Subcommand)]
pub enum PurchasesCommand {
    /// List all purchases (admin)
    #[command(alias = "ls")]
    List,

    /// Check out a product
    Create(PurchaseCreateArgs),

    /// Change an order's status (admin)
    SetStatus {
        /// Purchase id
        id: i64,

        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },
}

#[derive(Debug, Args)]
pub struct PurchaseCreateArgs {
    /// Product id to buy
    #[arg(long, short = 'p')]
    pub product: i64,

    /// Units to buy
    #[arg(long, short = 'Q', default_value = "1")]
    pub quantity: u32,

    /// Customer name
    #[arg(long)]
    pub name: String,

    /// Customer email
    #[arg(long)]
    pub email: String,

    /// Customer mobile number
    #[arg(long)]
    pub mobile: String,

    /// Delivery address
    #[arg(long)]
    pub address: String,

    /// Free-form order notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl From<StatusArg> for PurchaseStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Confirmed => Self::Confirmed,
            StatusArg::Shipped => Self::Shipped,
            StatusArg::Delivered => Self::Delivered,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
