//! Command-line surface for `gratiswag-admin`.

#![deny(clippy::all, clippy::pedantic)]

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gratiswag_admin::config::ConfigOverrides;
use gratiswag_api_types::{OrderStatus, RevenueFilter};

#[derive(Parser, Debug)]
#[command(
    name = "gratiswag-admin",
    version,
    about = "GratiSwag marketplace administration console",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOverrides,

    /// How results are written to stdout
    #[arg(long, global = true, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, sign out and reset a forgotten password
    Auth(AuthArgs),
    /// The signed-in administrator's profile
    Profile(ProfileArgs),
    /// Headline figures and the revenue report
    Dashboard(DashboardArgs),
    /// Blog management
    Blogs(BlogsArgs),
    /// Product categories
    Categories(CategoriesArgs),
    /// Live products
    Products(ProductsArgs),
    /// Order management
    Orders(OrdersArgs),
    /// Company onboarding requests
    Shops(ShopsArgs),
    /// Product requests raised by companies
    ProductRequests(ProductRequestsArgs),
    /// Wallet revenue and payment history
    Wallet(WalletArgs),
}

#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthCmd,
}

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
    /// Sign in; the password is read from stdin when not given as a file
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password_file: Option<PathBuf>,
        /// Admin path to continue to after signing in
        #[arg(long)]
        callback_url: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Request a one-time code by email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Verify the one-time code from the email
    VerifyOtp {
        #[arg(long)]
        otp: String,
    },
    /// Set a new password after the code was verified (read from stdin when no file)
    ResetPassword {
        #[arg(long)]
        password_file: Option<PathBuf>,
    },
    /// Change the password of the signed-in administrator (prompts on stdin for missing files)
    ChangePassword {
        #[arg(long)]
        current_password_file: Option<PathBuf>,
        #[arg(long)]
        new_password_file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileCmd,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCmd {
    /// Show the profile
    Show,
    /// Update name, email, phone and optionally the photo
    Update {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
pub struct DashboardArgs {
    #[command(subcommand)]
    pub action: DashboardCmd,
}

#[derive(Subcommand, Debug)]
pub enum DashboardCmd {
    /// Totals shown on the dashboard cards
    Summary,
    /// Revenue per day, week, month or year
    Revenue {
        #[arg(long, default_value_t = RevenueFilterArg::Year)]
        filter: RevenueFilterArg,
    },
}

/// Paging shared by every list command.
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

/// Confirmation shared by destructive commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y', default_value_t = false)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct BlogsArgs {
    #[command(subcommand)]
    pub action: BlogsCmd,
}

#[derive(Subcommand, Debug)]
pub enum BlogsCmd {
    /// List blogs
    List(PageArgs),
    /// Show a blog
    Show { id: String },
    /// Create a blog
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Replace a blog's title, description and optionally its image
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a blog listed on the given page
    Delete {
        id: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: CategoriesCmd,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCmd {
    /// List categories
    List(PageArgs),
    /// Show a category
    Show { id: String },
    /// Create a category
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Rename a category and optionally replace its thumbnail
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a category listed on the given page
    Delete {
        id: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Parser, Debug)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub action: ProductsCmd,
}

/// Editable product fields.
#[derive(Args, Debug, Clone)]
pub struct ProductFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub description_file: Option<PathBuf>,
    #[arg(long)]
    pub price: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: i64,
    /// Category id
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ProductsCmd {
    /// List live products
    List(PageArgs),
    /// Show a product
    Show { id: String },
    /// Create a product
    Create(ProductFields),
    /// Replace a product's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product listed on the given page
    Delete {
        id: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Category ids and titles to pick from
    Categories,
}

#[derive(Parser, Debug)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub action: OrdersCmd,
}

#[derive(Subcommand, Debug)]
pub enum OrdersCmd {
    /// List orders
    List(PageArgs),
    /// Move an order listed on the given page to another status
    SetStatus {
        id: String,
        #[arg(long)]
        status: OrderStatusArg,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Parser, Debug)]
pub struct ShopsArgs {
    #[command(subcommand)]
    pub action: ShopsCmd,
}

#[derive(Subcommand, Debug)]
pub enum ShopsCmd {
    /// List company requests
    List(PageArgs),
    /// Show a company listed on the given page
    Show {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Approve a company listed on the given page
    Approve {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Reject a company listed on the given page
    Reject {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Parser, Debug)]
pub struct ProductRequestsArgs {
    #[command(subcommand)]
    pub action: ProductRequestsCmd,
}

#[derive(Subcommand, Debug)]
pub enum ProductRequestsCmd {
    /// List product requests
    List(PageArgs),
    /// Approve a pending request listed on the given page
    Approve {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Reject a pending request listed on the given page
    Reject {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Parser, Debug)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub action: WalletCmd,
}

#[derive(Subcommand, Debug)]
pub enum WalletCmd {
    /// Total revenue
    Summary,
    /// Payment history
    Payments(WalletListArgs),
    /// Revenue per product
    Products(WalletListArgs),
}

/// Paging plus the free-text filter of the wallet tables.
#[derive(Args, Debug, Clone)]
pub struct WalletListArgs {
    #[command(flatten)]
    pub paging: PageArgs,
    /// Keep rows whose company, product title or transaction id contains this text
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrderStatusArg {
    Pending,
    Approved,
    Rejected,
    Delivered,
}

impl From<OrderStatusArg> for OrderStatus {
    fn from(value: OrderStatusArg) -> Self {
        match value {
            OrderStatusArg::Pending => OrderStatus::Pending,
            OrderStatusArg::Approved => OrderStatus::Approved,
            OrderStatusArg::Rejected => OrderStatus::Rejected,
            OrderStatusArg::Delivered => OrderStatus::Delivered,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RevenueFilterArg {
    Day,
    Week,
    Month,
    Year,
}

impl From<RevenueFilterArg> for RevenueFilter {
    fn from(value: RevenueFilterArg) -> Self {
        match value {
            RevenueFilterArg::Day => RevenueFilter::Day,
            RevenueFilterArg::Week => RevenueFilter::Week,
            RevenueFilterArg::Month => RevenueFilter::Month,
            RevenueFilterArg::Year => RevenueFilter::Year,
        }
    }
}

impl fmt::Display for RevenueFilterArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(RevenueFilter::from(*self).as_str())
    }
}
