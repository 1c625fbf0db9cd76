//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Customer segmentation CLI: RFM analysis and K-Means clustering with
/// ranked segment labels
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input transaction CSV file
    #[arg(short, long, default_value = "transactions.csv")]
    pub input: String,

    /// Number of clusters for K-Means
    #[arg(short = 'k', long, default_value = "3")]
    pub clusters: usize,

    /// Random seed for centroid initialization
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of independent restarts; the lowest-inertia run is kept
    #[arg(long, default_value = "10")]
    pub n_init: usize,

    /// Maximum iterations per restart
    #[arg(long, default_value = "300")]
    pub max_iters: usize,

    /// Output path for the scatter plot (the size chart lands next to it)
    #[arg(short, long, default_value = "segments.png")]
    pub output: String,

    /// Optional path for the labeled-customer CSV export
    #[arg(short, long)]
    pub export: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
