use crate::api::models::SearchParams;
use crate::storage::credentials::ACCESS_TOKEN_ENV;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sp-listings")]
#[command(about = "Search Selling Partner API listings items from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// LWA access token sent as x-amz-access-token
    #[arg(long, global = true, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
    pub access_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a seller's listings items
    Search(SearchArgs),
    /// Profile configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the active profile
    Show,
    /// Set a profile value (endpoint, region, timeout_ms, marketplace_id)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Selling partner identifier
    #[arg(long, env = "SP_API_SELLER_ID")]
    pub seller_id: String,

    /// Marketplace to search; defaults to the profile's marketplace_id
    #[arg(long)]
    pub marketplace_id: Option<String>,

    #[arg(long)]
    pub issue_locale: Option<String>,

    /// Response sections to include (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub included_data: Vec<String>,

    /// Identifier to match (repeatable, up to 20)
    #[arg(long = "identifier", action = clap::ArgAction::Append)]
    pub identifiers: Vec<String>,

    #[arg(long)]
    pub identifiers_type: Option<String>,

    #[arg(long)]
    pub variation_parent_sku: Option<String>,

    #[arg(long)]
    pub package_hierarchy_sku: Option<String>,

    #[arg(long)]
    pub created_after: Option<String>,

    #[arg(long)]
    pub created_before: Option<String>,

    #[arg(long)]
    pub last_updated_after: Option<String>,

    #[arg(long)]
    pub last_updated_before: Option<String>,

    #[arg(long, action = clap::ArgAction::Append)]
    pub with_issue_severity: Vec<String>,

    #[arg(long, action = clap::ArgAction::Append)]
    pub with_status: Vec<String>,

    #[arg(long, action = clap::ArgAction::Append)]
    pub without_status: Vec<String>,

    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub sort_order: Option<String>,

    #[arg(long)]
    pub page_size: Option<u32>,

    #[arg(long)]
    pub page_token: Option<String>,

    /// Print the raw JSON response instead of a table
    #[arg(long)]
    pub json: bool,
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}

impl SearchArgs {
    pub fn into_params(self, marketplace_id: String) -> SearchParams {
        SearchParams {
            seller_id: self.seller_id,
            marketplace_ids: vec![marketplace_id],
            issue_locale: self.issue_locale,
            included_data: non_empty(self.included_data),
            identifiers: non_empty(self.identifiers),
            identifiers_type: self.identifiers_type,
            variation_parent_sku: self.variation_parent_sku,
            package_hierarchy_sku: self.package_hierarchy_sku,
            created_after: self.created_after,
            created_before: self.created_before,
            last_updated_after: self.last_updated_after,
            last_updated_before: self.last_updated_before,
            with_issue_severity: non_empty(self.with_issue_severity),
            with_status: non_empty(self.with_status),
            without_status: non_empty(self.without_status),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            page_size: self.page_size,
            page_token: self.page_token,
        }
    }
}
