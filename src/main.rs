use chrono::NaiveDate;
use clap::Parser;
use hardwood::backtest::BacktestOptions;
use hardwood::cli::{Cli, Commands};
use hardwood::config::AppConfig;
use hardwood::commands::{self, price::PriceFilter};
use hardwood::error::{HardwoodError, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::load_from(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            eprintln!("Using default configuration");
            AppConfig::default()
        }
    };
    init_logging(&config.logging.level);

    if let Err(errors) = config.validate() {
        for e in &errors {
            error!("config: {e}");
        }
        return Err(HardwoodError::Validation(errors.join("; ")));
    }

    match &cli.command {
        Commands::BuildFeatures => {
            info!("building rolling feature table");
            commands::build::run(&config)?;
        }
        Commands::Train { ensemble } => {
            info!("training win-probability model");
            commands::train::run(&config, *ensemble)?;
        }
        Commands::Evaluate {
            runs,
            min_train,
            block,
        } => {
            let options = BacktestOptions {
                min_train: *min_train,
                block_size: *block,
                n_runs: *runs,
            };
            commands::evaluate::run(&config, options)?;
        }
        Commands::Price { from, live } => {
            let from = from
                .as_deref()
                .map(|d| {
                    NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
                        HardwoodError::MalformedQuery(format!(
                            "invalid date '{d}', expected YYYY-MM-DD"
                        ))
                    })
                })
                .transpose()?;
            commands::price::run(&config, PriceFilter { from, live: *live })?;
        }
        Commands::Serve { bind } => {
            commands::serve::run(&config, bind.clone()).await?;
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hardwood={level},tower_http=info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
