//! aspect-analyze: classify images in S3 as taller or wider than 2:3.

mod render;

use anyhow::Result;
use aspect_analyzer::{AnalysisRequest, Analyzer};
use aspect_cli::output::{set_color, Status};
use aspect_cli::progress::fetch_spinner;
use aspect_core::config::{Config, OutputFormat};
use aspect_core::error::exit_codes;
use aspect_store::{LocalStore, ObjectStore, OfflineStore, S3Client, StoreConfig};
use aspect_telemetry::TelemetryConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aspect-analyze")]
#[command(about = "Classify images in S3 as taller or wider than 2:3")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    output: Option<Format>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => OutputFormat::Human,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an object's aspect ratio
    Analyze(AnalyzeArgs),

    /// Read dimensions from a local image file
    Inspect {
        /// Path to image file
        path: PathBuf,
    },

    /// Parse a size like "1.06 MB" and show the size-based estimate
    #[command(name = "estimate-size")]
    EstimateSize {
        /// Size string or byte count
        #[arg(allow_hyphen_values = true)]
        size: String,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Bucket name
    bucket: String,

    /// Object key
    key: String,

    /// Known width, skips detection when given with --height
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Known height, skips detection when given with --width
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Access key id
    #[arg(long)]
    aws_access_key: Option<String>,

    /// Secret access key
    #[arg(long)]
    aws_secret_key: Option<String>,

    /// Region
    #[arg(long)]
    aws_region: Option<String>,

    /// Custom S3-compatible endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Never contact the store; rely on the key alone
    #[arg(long, conflicts_with = "local_root")]
    offline: bool,

    /// Read objects from <DIR>/<bucket>/<key> instead of S3
    #[arg(long, value_name = "DIR")]
    local_root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    aspect_telemetry::init_with_config(
        TelemetryConfig::with_level(level).json(cli.log_json || config.schema.logging.json),
    )?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    if cli.no_color || !config.schema.output.color {
        set_color(false);
    }

    let format = cli
        .output
        .map_or(config.schema.output.format, OutputFormat::from);

    let exit_code = match cli.command {
        Commands::Analyze(args) => run_analyze(&args, &config, format)?,
        Commands::Inspect { path } => render::inspect(&path, format)?,
        Commands::EstimateSize { size } => render::estimate_size(&size, format)?,
    };

    std::process::exit(exit_code);
}

fn run_analyze(args: &AnalyzeArgs, config: &Config, format: OutputFormat) -> Result<i32> {
    let store = match build_store(args, config) {
        Ok(store) => store,
        Err(e) => {
            Status::error(&e.to_string());
            return Ok(e.exit_code());
        }
    };

    let request = AnalysisRequest::new(&args.bucket, &args.key).with_dimensions(args.width, args.height);
    let analyzer = Analyzer::new(store);

    let spinner = fetch_spinner(&args.bucket, &args.key);
    let result = analyzer.analyze(&request);
    spinner.finish_and_clear();

    render::analysis(&result, format)?;
    Ok(exit_codes::SUCCESS)
}

/// Pick the store and merge store settings: file < environment < flags.
fn build_store(args: &AnalyzeArgs, config: &Config) -> aspect_core::Result<Box<dyn ObjectStore>> {
    if args.offline {
        return Ok(Box::new(OfflineStore));
    }
    if let Some(root) = &args.local_root {
        return Ok(Box::new(LocalStore::new(root)));
    }

    let mut store_config = StoreConfig::from_settings(&config.schema.store).with_env();
    if let Some(region) = &args.aws_region {
        store_config = store_config.with_region(region);
    }
    if let Some(endpoint) = &args.endpoint {
        store_config = store_config.with_endpoint(endpoint);
    }
    match (&args.aws_access_key, &args.aws_secret_key) {
        (Some(id), Some(secret)) => {
            store_config = store_config.with_credentials(id, secret);
            store_config.session_token = None;
        }
        (None, None) => {}
        _ => {
            return Err(aspect_core::Error::validation(
                "--aws-access-key and --aws-secret-key must be given together",
            ));
        }
    }

    Ok(Box::new(S3Client::new(store_config)?))
}
