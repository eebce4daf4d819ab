use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use paper_harvest::config::{
    find_config_file, get_config, load_config, write_default_config, Config, ConfigFileError, CONFIG_FILE_NAME,
};
use paper_harvest::export::{ExportFormat, Exporter};
use paper_harvest::pipeline::Pipeline;
use paper_harvest::ui::{print_status, print_summary, MatchProgress, Status};
use paper_harvest::web::{serve, AppState};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// paper-harvest - Find the arXiv versions of a conference's accepted papers
#[derive(Parser, Debug)]
#[command(name = "paper-harvest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch a conference's accepted papers and search for them on arXiv", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Accepted-papers page to scrape (defaults to the configured listing)
    #[arg(long)]
    url: Option<String>,

    /// Keywords to filter papers by (case-insensitive, any may match)
    #[arg(long, num_args = 0..)]
    keywords: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    output: OutputFormat,

    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Pause between arXiv lookups in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Directory results are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Comma-separated values with a UTF-8 BOM
    Csv,
    /// Excel workbook (.xlsx)
    Excel,
    /// Standalone HTML page
    Html,
    /// Markdown report
    Markdown,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Excel => ExportFormat::Excel,
            OutputFormat::Html => ExportFormat::Html,
            OutputFormat::Markdown => ExportFormat::Markdown,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web front end
    Serve {
        /// Address to bind (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Write a config file with every default filled in
    InitConfig {
        /// Where to write it
        #[arg(default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
    },
}

/// Load the config file (explicit, discovered or none) and apply CLI overrides
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()?
    };

    if let Some(url) = &cli.url {
        config.listing.url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.requests.timeout_seconds = timeout;
    }
    if let Some(delay) = cli.delay {
        config.requests.delay_seconds = delay;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paper_harvest={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = resolve_config(&cli)?;

    match &cli.command {
        Some(Commands::Serve { host, port }) => {
            let host = host.clone().unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            // interactive requests are not throttled
            let pipeline = Pipeline::from_config(&config)?.with_delay(Duration::ZERO);
            let state = AppState::new(
                pipeline,
                Exporter::new(config.output.directory.clone()),
                config.listing.url.clone(),
            );

            if !cli.quiet {
                print_status(Status::Info, &format!("Serving on http://{}:{}", host, port));
            }
            serve(state, &host, port).await?;
        }
        Some(Commands::InitConfig { path }) => match write_default_config(path) {
            Ok(()) => print_status(Status::Success, &format!("Wrote {}", path.display())),
            Err(ConfigFileError::Exists(existing)) => {
                print_status(Status::Warning, &format!("{} already exists, leaving it alone", existing))
            }
            Err(e) => return Err(e.into()),
        },
        None => run_batch(&cli, &config).await?,
    }

    Ok(())
}

/// Scrape, filter, match and export
///
/// Runs that find nothing to match print a message and still exit cleanly.
async fn run_batch(cli: &Cli, config: &Config) -> Result<()> {
    let url = &config.listing.url;
    let pipeline = Pipeline::from_config(config)?;

    if !cli.quiet {
        print_status(Status::Search, &format!("Fetching papers from {}", url));
    }

    let records = match pipeline.collect(url, cli.keywords.as_slice()).await {
        Ok(records) => records,
        Err(e) => {
            print_status(Status::Error, &e.to_string());
            return Ok(());
        }
    };

    if !cli.quiet {
        print_status(Status::Info, &format!("Searching arXiv for {} papers", records.len()));
    }

    let progress = MatchProgress::new(records.len(), cli.quiet);
    let table = pipeline
        .match_records_with(&records, |position, total, record| {
            progress.update(position, total, record.title())
        })
        .await;
    progress.finish(table.matched_count(), table.len());

    let exporter = Exporter::new(config.output.directory.clone());
    let keywords = (!cli.keywords.is_empty()).then_some(cli.keywords.as_slice());
    match exporter.export(&table, cli.output.into(), keywords) {
        Ok(path) => {
            if !cli.quiet {
                print_summary(&table, &path);
            }
        }
        Err(e) => print_status(Status::Error, &format!("Could not save results: {}", e)),
    }

    Ok(())
}
