use clap::{Parser, Subcommand, ValueEnum};
use warddata_query::SortOrder;

#[derive(Parser)]
#[command(name = "warddata")]
#[command(about = "WardData CLI: read-only queries over the hospital ward database")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (defaults to ./warddata.toml)
    #[arg(short, long, global = true, env = "WARDDATA_CONFIG")]
    pub config: Option<String>,

    /// Restrict results to one specialty code
    #[arg(short, long, global = true, env = "WARDDATA_SPECIALTY")]
    pub specialty: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configuration without connecting
    Check,
    /// List specialties with admitted patients
    Specialties,
    /// List the ids of every admitted episode
    Ids,
    /// Most recent admissions
    Recent,
    /// Paginated, sorted patient listing
    List(ListArgs),
    /// Full details of one episode
    Show(ShowArgs),
    /// Most recent episode id for a patient name fragment
    Find(FindArgs),
    /// Details by episode id or patient name
    Search(SearchArgs),
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OrderArg {
    Asc,
    #[default]
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
    /// Sort key (admission_date, name, room, bed, episode_id, specialty)
    #[arg(long, default_value = "admission_date")]
    pub sort: String,
    /// Sort direction
    #[arg(long, value_enum, default_value = "desc")]
    pub order: OrderArg,
    /// Episode id or name fragment
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(clap::Args)]
pub struct ShowArgs {
    /// Episode id
    pub id: String,
}

#[derive(clap::Args)]
pub struct FindArgs {
    /// Patient name fragment
    pub name: String,
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Episode id or patient name fragment
    pub term: String,
}
