use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hardwood")]
#[command(version = "0.1.0")]
#[command(about = "NBA money-line pricing pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (expects default.toml inside)
    #[arg(short, long, default_value = "config")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the rolling feature table from raw game logs
    BuildFeatures,
    /// Train the win-probability model and isotonic calibrator
    Train {
        /// Train a bootstrap ensemble of this many members instead of a
        /// single model
        #[arg(long)]
        ensemble: Option<usize>,
    },
    /// Backtest the model over seeded time splits
    Evaluate {
        /// Number of backtest runs
        #[arg(long, default_value = "5")]
        runs: usize,
        /// Minimum training-prefix size in games
        #[arg(long, default_value = "200")]
        min_train: usize,
        /// Evaluation block size in games
        #[arg(long, default_value = "100")]
        block: usize,
    },
    /// Price games into American money-lines
    Price {
        /// Only price games on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Only price games without a final score yet
        #[arg(long)]
        live: bool,
    },
    /// Serve the priced odds table over HTTP
    Serve {
        /// Bind address override (host:port)
        #[arg(short, long)]
        bind: Option<String>,
    },
}
