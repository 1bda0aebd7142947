mod fetch;
mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "filmloc")]
#[command(about = "Extract filming locations from movie web pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract filming locations from one or more pages
    Extract(ExtractArgs),
    /// Parse a coordinate pair out of a text fragment
    ParseCoords {
        text: String,
        /// Reject out-of-range latitude/longitude
        #[arg(long)]
        validate: bool,
    },
    /// List the known locations-listing layouts
    Layouts,
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Page URLs to process
    #[arg(required = true)]
    urls: Vec<String>,
    /// Read the page from a saved HTML file instead of fetching it (one URL only)
    #[arg(long)]
    html_file: Option<PathBuf>,
    /// Use this file as the raw wiki markup for the page
    #[arg(long)]
    markup_file: Option<PathBuf>,
    /// Movie title hint
    #[arg(long)]
    title: Option<String>,
    /// Release year hint
    #[arg(long)]
    year: Option<String>,
    /// Skip the raw markup path
    #[arg(long)]
    no_markup: bool,
    /// Reject out-of-range coordinates
    #[arg(long)]
    validate_coordinates: bool,
    /// Directory for records.jsonl and audit snapshots
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Print records as JSON lines instead of writing output files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = filmloc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Extract(args) => run::run_extract(&config, args).await,
        Commands::ParseCoords { text, validate } => {
            run::run_parse_coords(&text, validate || config.validate_coordinates);
            Ok(())
        }
        Commands::Layouts => run::run_layouts(&config),
    }
}
