mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::creation::CreateFutureArgs;
use commands::pricing::{AccruedInterestArgs, CouponPvArgs, PriceFutureArgs};
use commands::schedule::CouponScheduleArgs;
use rate_futures_core::PricingConfig;

/// Theoretical pricing for bond futures
#[derive(Parser)]
#[command(
    name = "rfp",
    version,
    about = "Theoretical pricing for bond futures",
    long_about = "A CLI for pricing interest-rate futures off their underlying bond with \
                  decimal precision. Supports cost-of-carry theoretical price, contract \
                  value, initial margin, accrued interest, coupon present value and \
                  coupon schedule generation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Pricing configuration file (.json, .yaml or .yml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log pricing steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a future: theoretical price, contract value and initial margin
    PriceFuture(PriceFutureArgs),
    /// Accrued interest of a bond at a valuation date
    AccruedInterest(AccruedInterestArgs),
    /// Present value of a bond's coupon schedule
    CouponPv(CouponPvArgs),
    /// Generate a regular coupon schedule
    CouponSchedule(CouponScheduleArgs),
    /// Create a future from a request and price it against its underlying
    CreateFuture(CreateFutureArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::PriceFuture(args) => commands::pricing::run_price_future(args, &config),
        Commands::AccruedInterest(args) => commands::pricing::run_accrued_interest(args, &config),
        Commands::CouponPv(args) => commands::pricing::run_coupon_pv(args, &config),
        Commands::CouponSchedule(args) => commands::schedule::run_coupon_schedule(args),
        Commands::CreateFuture(args) => commands::creation::run_create_future(args, &config),
        Commands::Version => {
            println!("rfp {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("rate_futures_core={default_level},rfp={default_level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<PricingConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(PricingConfig::default());
    };
    let resolved = input::resolve_path(path)?;
    let config = PricingConfig::from_path(&resolved)?;
    tracing::debug!(path = %resolved.display(), rate = %config.risk_free_rate, "loaded pricing config");
    Ok(config)
}
