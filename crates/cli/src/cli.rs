//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Vehicle Model - validating front end for pluggable vehicle motion models
#[derive(Parser, Debug)]
#[command(
    name = "vehicle-model",
    author,
    version,
    about = "Validate and run vehicle motion model predictions",
    long_about = "Loads a vehicle motion model library and its kinematic limits from a \n\
                  parameter file, checks prediction requests against those limits and \n\
                  forwards valid requests to the model."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "VEHICLE_MODEL_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "VEHICLE_MODEL_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a prediction request and run it through the model
    Predict(PredictArgs),

    /// Validate a parameter file without loading the model
    Validate(ValidateArgs),

    /// Display the loaded kinematic limits
    Info(InfoArgs),
}

/// Arguments for the `predict` command
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Path to parameter file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "params.toml",
        env = "VEHICLE_MODEL_PARAMS"
    )]
    pub params: PathBuf,

    /// Path to JSON prediction request
    #[arg(short, long)]
    pub request: PathBuf,

    /// Override the vehicle model library from the parameter file
    #[arg(long, env = "VEHICLE_MODEL_LIB_PATH")]
    pub lib_path: Option<PathBuf>,

    /// Validate the request and exit without loading the model
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "VEHICLE_MODEL_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to parameter file to validate
    #[arg(short, long, default_value = "params.toml")]
    pub params: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to parameter file
    #[arg(short, long, default_value = "params.toml")]
    pub params: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
