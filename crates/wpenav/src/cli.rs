//! Clap derive structures for the `wpenav` CLI.
//!
//! Defines the command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wpenav -- jump between WP Engine installs from the command line
#[derive(Debug, Parser)]
#[command(
    name = "wpenav",
    version,
    about = "Discover and jump to related WP Engine installs",
    long_about = "Queries the WP Engine Account API for the sites and installs\n\
        under your hosting account, correlates them against the current\n\
        site's domain, and renders a related-installs menu or a live search.",
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
    /// Account profile to use
    #[arg(long, short = 'p', env = "WPE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Current site hostname (overrides the profile)
    #[arg(long, env = "WPE_HOST", global = true)]
    pub host: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WPE_OUTPUT",
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

    /// Request timeout in seconds (overrides the profile)
    #[arg(long, env = "WPE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
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
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

impl OutputFormat {
    /// Structured formats get machine-readable error envelopes too.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json | Self::JsonCompact | Self::Yaml)
    }
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
    /// Render the related-installs menu for the current site
    #[command(alias = "m")]
    Menu(MenuArgs),

    /// Search sites, installs, and domains
    #[command(alias = "s")]
    Search(SearchArgs),

    /// List everything under the account
    Sites(SitesArgs),

    /// Credential management
    Auth(AuthArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Menu ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Bypass the cache and fetch a fresh listing
    #[arg(long)]
    pub refresh: bool,
}

// ── Search ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query matched against site name, install name, and domain
    pub query: String,

    /// Bypass the cache and fetch a fresh listing
    #[arg(long)]
    pub refresh: bool,
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List all sites and installs in the account
    #[command(alias = "ls")]
    List {
        /// Bypass the cache and fetch a fresh listing
        #[arg(long)]
        refresh: bool,
    },
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Test API credentials and refresh the cached listing
    Test {
        /// Username to test (defaults to the stored one)
        #[arg(long)]
        username: Option<String>,

        /// Password to test (defaults to the stored one). The literal
        /// masked value `********` also means "use the stored password"
        /// -- kept for parity with the settings form this replaces,
        /// even though a real password of that value collides with it.
        #[arg(long)]
        password: Option<String>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile interactively
    Init {
        /// Account API username
        #[arg(long)]
        username: String,

        /// Current site hostname
        #[arg(long)]
        host: String,

        /// Cache TTL in seconds (non-positive falls back to 3600)
        #[arg(long)]
        cache_ttl: Option<i64>,

        /// Menu mode: current-first or matching-only
        #[arg(long)]
        menu_mode: Option<String>,
    },

    /// Print the resolved configuration (password redacted)
    Show,

    /// Print the config file path
    Path,

    /// Update the stored password (prompts; encrypted at rest)
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
