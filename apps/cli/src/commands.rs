//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use personscope_core::{PersonProfile, Profiler, ProgressReporter, needs_remediation};
use personscope_legal::{LegalClient, LegalOutcome, classify};
use personscope_shared::{AppConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// PersonScope — legal records and web presence for one person.
#[derive(Parser)]
#[command(
    name = "personscope",
    version,
    about = "Compose a person profile from legal records and web search results.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.personscope/personscope.toml).
    #[arg(long, global = true, env = "PERSONSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the full profile for a document number or a name.
    Profile {
        /// CPF/CNPJ (any punctuation) or full name.
        query: String,

        /// Free-text context added to the last web query (city, company, ...).
        #[arg(short, long, default_value = "")]
        context: String,

        /// Print only the legal-status HTML fragment.
        #[arg(long)]
        html: bool,
    },

    /// Run the web search battery for a name.
    Search {
        /// Full name.
        name: String,

        /// Free-text context added to the last web query.
        #[arg(short, long, default_value = "")]
        context: String,
    },

    /// List legal processes for a document number or a name.
    Legal {
        /// CPF/CNPJ or full name.
        query: String,
    },

    /// Aggregate legal summary for a document number or a name.
    Summary {
        /// CPF/CNPJ or full name.
        query: String,
    },

    /// Show whether an input is searched by document or by name.
    Classify {
        /// Raw input.
        input: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr so stdout stays pure JSON.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "personscope=info,personscope_legal=info,personscope_search=warn,personscope_core=info",
        1 => "personscope=debug,personscope_legal=debug,personscope_search=debug,personscope_core=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Profile {
            query,
            context,
            html,
        } => cmd_profile(config_path, &query, &context, html).await,
        Command::Search { name, context } => cmd_search(config_path, &name, &context).await,
        Command::Legal { query } => cmd_legal(config_path, &query).await,
        Command::Summary { query } => cmd_summary(config_path, &query).await,
        Command::Classify { input } => cmd_classify(&input),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(&path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| eyre!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Print remediation guidance for outcomes the user has to fix.
fn report_remediation<T>(outcome: &LegalOutcome<T>, config: &AppConfig) {
    if !needs_remediation(outcome) {
        return;
    }
    match outcome {
        LegalOutcome::Unconfigured => eprintln!(
            "  note: legal records skipped. Set {} to enable process lookups.",
            config.legal.token_env
        ),
        LegalOutcome::CreditsExhausted { .. } => eprintln!(
            "  note: legal-records credits exhausted. Recharge the provider account; retrying will not help."
        ),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_profile(config_path: Option<PathBuf>, query: &str, context: &str, html: bool) -> Result<()> {
    let config = resolve_config(config_path)?;
    let profiler = Profiler::from_config(&config)?;

    info!(
        legal_configured = profiler.legal().is_configured(),
        search_configured = profiler.search().is_configured(),
        "building profile"
    );

    let reporter = CliProgress::new();
    let profile = profiler.profile(query, context, &reporter).await;

    report_remediation(&profile.legal, &config);
    if profile.web.simulated {
        eprintln!("  note: web results are simulated placeholders, not live data.");
    }

    if html {
        println!("{}", profile.fragment);
        return Ok(());
    }
    print_json(&profile)
}

async fn cmd_search(config_path: Option<PathBuf>, name: &str, context: &str) -> Result<()> {
    let config = resolve_config(config_path)?;
    let profiler = Profiler::from_config(&config)?;

    if !profiler.search().is_configured() && !profiler.search().is_simulated() {
        eprintln!(
            "  note: search provider not configured. Set {} and {}.",
            config.search.api_key_env, config.search.cx_env
        );
    }

    let search = profiler.search_person(name, context).await;
    print_json(&search)
}

async fn cmd_legal(config_path: Option<PathBuf>, query: &str) -> Result<()> {
    let config = resolve_config(config_path)?;
    let client = LegalClient::from_config(&config.legal)?;

    let outcome = client.lookup(query).await;
    report_remediation(&outcome, &config);
    print_json(&outcome)
}

async fn cmd_summary(config_path: Option<PathBuf>, query: &str) -> Result<()> {
    let config = resolve_config(config_path)?;
    let client = LegalClient::from_config(&config.legal)?;

    let outcome = client.summarize(query).await;
    report_remediation(&outcome, &config);
    print_json(&outcome)
}

fn cmd_classify(input: &str) -> Result<()> {
    print_json(&classify(input))
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("  Created config: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let content = toml::to_string_pretty(&config)
        .map_err(|e| eyre!("failed to render config: {e}"))?;
    println!("{content}");
    println!(
        "# legal token: {}",
        if config.legal.credentials().is_some() { "set" } else { "missing" }
    );
    println!(
        "# search key/cx: {}",
        if config.search.credentials().is_some() { "set" } else { "missing" }
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _profile: &PersonProfile) {
        self.spinner.finish_and_clear();
    }
}
