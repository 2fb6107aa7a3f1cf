//! CLI for analyzing a running A/B experiment.
//!
//! # Usage
//!
//! ```bash
//! # Analyze with the default configuration (N = 5,000)
//! experiment-terminator \
//!   --planned-control 2000 --planned-test 2000 \
//!   --completed-control 1000 --completed-test 1000 \
//!   --successes-control 250 --successes-test 270
//!
//! # Quick, reproducible run with a lift histogram
//! experiment-terminator --preset quick --seed 42 --histogram ...
//!
//! # Machine-readable output
//! experiment-terminator --json ...
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use experiment_terminator::output::{format_analysis, format_lift_histogram, to_json_pretty};
use experiment_terminator::{Config, ExperimentTerminator, ShapePolicy};

/// Configuration preset.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// N = 1,000
    Quick,
    /// N = 5,000
    Balanced,
    /// N = 10,000
    Thorough,
}

/// Bayesian early-termination analysis for A/B experiments
#[derive(Parser, Debug)]
#[command(name = "experiment-terminator")]
#[command(about = "Decide whether a running A/B experiment can be terminated early")]
#[command(version)]
struct Args {
    /// Trials planned for the control arm
    #[arg(long)]
    planned_control: u64,

    /// Trials planned for the test arm
    #[arg(long)]
    planned_test: u64,

    /// Trials completed so far in the control arm
    #[arg(long)]
    completed_control: u64,

    /// Trials completed so far in the test arm
    #[arg(long)]
    completed_test: u64,

    /// Successes observed so far in the control arm
    #[arg(long)]
    successes_control: u64,

    /// Successes observed so far in the test arm
    #[arg(long)]
    successes_test: u64,

    /// Configuration preset
    #[arg(short, long, value_enum, default_value = "balanced")]
    preset: Preset,

    /// Monte Carlo sample count N (overrides preset)
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Significance level of the end-of-experiment credible interval
    #[arg(long)]
    alpha: Option<f64>,

    /// Terminate with "no difference" below this predictive probability
    #[arg(long)]
    lower: Option<f64>,

    /// Terminate with "difference" above this predictive probability
    #[arg(long)]
    upper: Option<f64>,

    /// Deterministic seed
    #[arg(long)]
    seed: Option<u64>,

    /// Replace zero Beta shapes with this floor instead of failing
    #[arg(long, value_name = "EPS")]
    floor_shapes: Option<f64>,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,

    /// Print a histogram of the lift samples
    #[arg(long)]
    histogram: bool,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = match self.preset {
            Preset::Quick => Config::quick(),
            Preset::Balanced => Config::balanced(),
            Preset::Thorough => Config::thorough(),
        };

        // Out-of-range values are reported by validate()
        if let Some(samples) = self.samples {
            config.monte_carlo_samples = samples;
        }
        if let Some(alpha) = self.alpha {
            config.significance_level = alpha;
        }
        if let Some(lower) = self.lower {
            config.termination_lower_bound = lower;
        }
        if let Some(upper) = self.upper {
            config.termination_upper_bound = upper;
        }
        if let Some(eps) = self.floor_shapes {
            config.shape_policy = ShapePolicy::Floor(eps);
        }
        config.seed = self.seed;
        config
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.config();
    config.validate().context("invalid configuration")?;

    let analysis = ExperimentTerminator::with_config(config)
        .analyze_counts(
            args.planned_control,
            args.planned_test,
            args.completed_control,
            args.completed_test,
            args.successes_control,
            args.successes_test,
        )
        .context("analysis failed")?;

    if args.json {
        println!("{}", to_json_pretty(&analysis)?);
        return Ok(());
    }

    print!("{}", format_analysis(&analysis));
    if args.histogram {
        println!();
        print!("{}", format_lift_histogram(&analysis.result.lift_samples, None));
    }

    Ok(())
}
