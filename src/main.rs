use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use pilot_bid_engine::api::{AppState, AwardRequest, AwardResponse, create_router, perform_award};
use pilot_bid_engine::config::ConfigLoader;
use pilot_bid_engine::error::EngineError;
use pilot_bid_engine::telemetry::{self, TelemetryError};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

const DEFAULT_CONFIG_DIR: &str = "./config/pilotbid";

#[derive(Parser, Debug)]
#[command(
    name = "pilot-bid",
    about = "Award pilot bids in seniority order",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one award from a JSON request file and print the response
    Award(AwardArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Directory holding engine.yaml and bid_types.yaml
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config: PathBuf,
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_DIR),
            host: None,
            port: None,
        }
    }
}

#[derive(Args, Debug)]
struct AwardArgs {
    /// JSON file with the same body as POST /award
    #[arg(long)]
    input: PathBuf,
    /// Directory holding engine.yaml and bid_types.yaml
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config: PathBuf,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read '{path}': {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid award request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Award(args) => run_award_file(args),
    }
}

async fn run_server(args: ServeArgs) -> Result<(), CliError> {
    let config = ConfigLoader::load(&args.config)?;
    telemetry::init(&config.metadata().log_level)?;

    let host = args
        .host
        .unwrap_or_else(|| config.metadata().server.host.clone());
    let port = args.port.unwrap_or(config.metadata().server.port);

    info!(
        name = %config.metadata().name,
        version = %config.metadata().version,
        bid_types = config.config().bid_types().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!(address = %listener.local_addr()?, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn run_award_file(args: AwardArgs) -> Result<(), CliError> {
    let config = ConfigLoader::load(&args.config)?;
    telemetry::init(&config.metadata().log_level)?;

    let body = std::fs::read_to_string(&args.input).map_err(|source| CliError::Input {
        path: args.input.display().to_string(),
        source,
    })?;
    let request: AwardRequest = serde_json::from_str(&body)?;

    let start_time = Instant::now();
    let result = perform_award(request, &config)?;
    let duration = start_time.elapsed();

    let response = AwardResponse {
        run_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        engine_version: config.metadata().version.clone(),
        duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
