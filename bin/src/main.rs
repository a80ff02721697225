//! Fundus CLI binary.
//!
//! Provides command-line interface for the fundus feature pipeline.

mod cmd;
mod config;
mod data;
mod models;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fundus_features::TableOptions;

use crate::config::FundusConfig;

#[derive(Parser)]
#[command(name = "fundus")]
#[command(about = "Point-in-time fundamental features and bagging ensembles", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file (defaults to $FUNDUS_CONFIG, then fundus.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalogued metric columns
    Columns {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Extract quarterly and daily window features
    Features {
        /// Quarterly fundamentals CSV (ticker, date, metric columns)
        #[arg(short, long)]
        quarterly: PathBuf,

        /// Daily market data CSV (ticker, date, aggregate columns)
        #[arg(short, long)]
        daily: Option<PathBuf>,

        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Keep only quarterly rows with this dimension (e.g. ARQ)
        #[arg(long)]
        dimension: Option<String>,

        /// Keep at most this many of the newest quarters per ticker
        #[arg(long)]
        max_rows: Option<usize>,
    },

    /// Fit a bagging ensemble and score a feature table
    FitPredict {
        /// Labelled training CSV
        #[arg(long)]
        train: PathBuf,

        /// Target column in the training CSV
        #[arg(long)]
        target: String,

        /// CSV to score
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV (input plus a prediction column)
        #[arg(short, long)]
        output: PathBuf,

        /// Base models to draw from
        #[arg(short, long, value_delimiter = ',', default_value = "ridge,logistic")]
        models: Vec<String>,

        /// Fit regressors on ln(target) and predict exp
        #[arg(long)]
        log_target: bool,

        /// Override the configured bootstrap seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundus=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = FundusConfig::load(&FundusConfig::resolve_path(cli.config.as_deref()))?;

    match cli.command {
        Commands::Columns { category, verbose } => {
            cmd::columns::list_columns(category, verbose, &config.features)?;
        }
        Commands::Features {
            quarterly,
            daily,
            output,
            dimension,
            max_rows,
        } => {
            let options = TableOptions {
                dimension,
                max_rows,
            };
            cmd::features::extract_features(
                &quarterly,
                daily.as_deref(),
                &output,
                &options,
                &config.features,
            )?;
        }
        Commands::FitPredict {
            train,
            target,
            input,
            output,
            models,
            log_target,
            seed,
        } => {
            let mut ensemble = config.ensemble;
            if seed.is_some() {
                ensemble.seed = seed;
            }
            cmd::fit_predict::fit_predict(
                &train,
                &target,
                &input,
                &output,
                &models,
                log_target,
                &ensemble,
            )?;
        }
    }

    Ok(())
}
