//! # Vehicle Model CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 参数文件加载与验证
//! - 预测请求校验与执行

mod cli;
mod commands;
mod error;
mod request;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_predict, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Vehicle Model CLI starting"
    );

    // Execute command
    let result = match &cli.command {
        Commands::Predict(args) => run_predict(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(observability::ObservabilityConfig {
        log_format: cli.log_format.clone().into(),
        metrics_port: None,
        default_log_level: default_log_level.to_string(),
        // -q wins over RUST_LOG
        respect_rust_log: !cli.quiet,
    })
}
