//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use model::{ExportFormat, LawId};
use sdk::config::{API_KEY_ENV, BASE_URL_ENV, TIMEOUT_MS_ENV};

#[derive(Debug, Parser)]
#[command(name = "normativa")]
#[command(about = "Query the Normativa legal-corpus API", version)]
pub struct Cli {
    /// API key, or a JWT when `--bearer` is given.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Send the credential as `Authorization: Bearer` instead of `X-API-Key`.
    #[arg(long, global = true)]
    pub bearer: bool,

    #[arg(long, env = BASE_URL_ENV, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = TIMEOUT_MS_ENV, global = true)]
    pub timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Laws(LawsArgs),
    Search(SearchArgs),
    Bulk(BulkArgs),
    Export(ExportArgs),
    Webhooks(WebhooksArgs),
    Changelog(ChangelogArgs),
    Stats,
}

// ---------------------------------------------------------------------------
// Shared arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PageArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

fn parse_law_id(raw: &str) -> Result<LawId, String> {
    LawId::new(raw).ok_or_else(|| "law id must not be empty".to_string())
}

fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    ExportFormat::new(raw.to_ascii_lowercase()).ok_or_else(|| "format must not be empty".to_string())
}

// ---------------------------------------------------------------------------
// laws
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct LawsArgs {
    #[command(subcommand)]
    pub command: LawsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LawsCommand {
    /// List laws, one page at a time.
    List {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        jurisdiction: Option<String>,
        #[arg(long)]
        law_type: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        ordering: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one law with its articles.
    Get {
        #[arg(value_parser = parse_law_id)]
        id: LawId,
    },
    /// List a law's articles.
    Articles {
        #[arg(value_parser = parse_law_id)]
        id: LawId,
        #[command(flatten)]
        page: PageArgs,
    },
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    #[arg(long)]
    pub domain: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub law_type: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub date_from: Option<String>,
    #[arg(long)]
    pub date_to: Option<String>,
    #[arg(long)]
    pub sort: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}

// ---------------------------------------------------------------------------
// bulk
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct BulkArgs {
    #[command(subcommand)]
    pub command: BulkCommand,
}

#[derive(Debug, Subcommand)]
pub enum BulkCommand {
    /// Stream every matching article as JSON lines.
    Articles {
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long, value_parser = parse_law_id)]
        law_id: Option<LawId>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        updated_since: Option<String>,
        /// Stop after this many pages.
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Download a law in the given format.
    Download {
        #[arg(value_parser = parse_law_id)]
        id: LawId,
        #[arg(value_parser = parse_format)]
        format: ExportFormat,
        /// Target file; defaults to a name derived from the law id.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show the export allowance for a law.
    Quota {
        #[arg(value_parser = parse_law_id)]
        id: LawId,
    },
}

// ---------------------------------------------------------------------------
// webhooks
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct WebhooksArgs {
    #[command(subcommand)]
    pub command: WebhooksCommand,
}

#[derive(Debug, Subcommand)]
pub enum WebhooksCommand {
    Create {
        url: String,
        /// Event names to subscribe to; repeat or separate with commas.
        #[arg(long = "event", required = true, value_delimiter = ',')]
        events: Vec<String>,
        #[arg(long)]
        domain: Option<String>,
    },
    List,
    Delete {
        id: u64,
    },
    /// Ask the server to deliver a test event.
    Test {
        id: u64,
    },
}

// ---------------------------------------------------------------------------
// changelog
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Only changes at or after this RFC 3339 instant.
    #[arg(long)]
    pub since: Option<String>,
    #[arg(long, value_parser = parse_law_id)]
    pub law_id: Option<LawId>,
    #[arg(long)]
    pub change_type: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}
