//! User Store - batch CLI over the in-memory user repository.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult};
use domain::IdStrategy;
use user_store_lib::config::UserStoreConfig;

#[derive(Parser)]
#[command(name = "user-store")]
#[command(author, version, about = "In-memory user record store", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Identity strategy for new users (uuid | sequential)
    #[arg(long, global = true, env = "USER_STORE_ID_STRATEGY")]
    id_strategy: Option<IdStrategy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON array of operations against a fresh store
    Apply {
        /// Batch file, or "-" for stdin
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match UserStoreConfig::from_env() {
        Ok(config) => config.with_id_strategy(cli.id_strategy),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, &config.service.log_level);
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Apply { file } => apply(&config, file).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn apply(config: &UserStoreConfig, file: PathBuf) -> AppResult<()> {
    let input = read_input(&file)?;
    let outcomes = user_store_lib::run_batch(config, &input).await?;

    for outcome in outcomes {
        let line = serde_json::to_string(&outcome).map_err(|e| AppError::internal(e.to_string()))?;
        println!("{}", line);
    }

    Ok(())
}

fn read_input(file: &Path) -> AppResult<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

/// Initialize tracing subscriber (verbose mode forces debug level)
fn init_tracing(verbose: bool, level: &str) {
    let filter = if verbose { "debug" } else { level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
