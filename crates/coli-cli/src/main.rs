use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use coli_acquire::config::{
    BASE_URL, CALCULATOR_GUID, DEFAULT_SALARY, DEFAULT_TIMEOUT, DESTINATION_ID, DESTINATION_NAME,
};
use coli_acquire::{pipeline, CalculatorConfig, FailurePolicy, HttpCalculator, RunOptions};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "coli")]
#[command(about = "Scrape cost-of-living comparisons for every calculator metro into CSV")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every metro against the destination and write both CSV files
    Scrape {
        #[command(flatten)]
        calculator: CalculatorArgs,

        /// Directory for cost_of_living_index.csv and avg_prices.csv
        #[arg(short = 'O', long, default_value = ".")]
        output_dir: PathBuf,

        /// Skip metros whose comparison fails instead of aborting the run
        #[arg(long)]
        keep_going: bool,

        /// Save every fetched page under this directory
        #[arg(long)]
        cache_html: Option<PathBuf>,
    },

    /// List the metros offered by the calculator (id<TAB>name)
    Metros {
        #[command(flatten)]
        calculator: CalculatorArgs,
    },
}

#[derive(Args)]
struct CalculatorArgs {
    /// Salary entered into the comparison form
    #[arg(long, default_value_t = DEFAULT_SALARY)]
    salary: u32,

    /// Destination metro id every metro is compared against
    #[arg(long, default_value_t = DESTINATION_ID)]
    to_id: u32,

    /// Destination metro display name
    #[arg(long, default_value = DESTINATION_NAME)]
    to_name: String,

    /// Calculator session GUID
    #[arg(long, default_value = CALCULATOR_GUID)]
    guid: String,

    /// Calculator page URL
    #[arg(long, default_value = BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl CalculatorArgs {
    fn into_config(self) -> CalculatorConfig {
        CalculatorConfig {
            base_url: self.base_url,
            guid: self.guid,
            salary: self.salary,
            destination_id: self.to_id,
            destination_name: self.to_name,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2015-08-27 12:55:23.123 -05:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Scrape {
            calculator,
            output_dir,
            keep_going,
            cache_html,
        } => {
            let calculator = HttpCalculator::new(calculator.into_config())?;
            let config = calculator.config();
            tracing::info!(
                salary = config.salary,
                to_id = config.destination_id,
                to = %config.destination_name,
                output_dir = %output_dir.display(),
                "Scraping cost-of-living comparisons"
            );

            let options = RunOptions {
                output_dir,
                policy: if keep_going { FailurePolicy::Skip } else { FailurePolicy::Abort },
                cache_html,
            };

            let summary = pipeline::run(&calculator, &options).await?;
            if !summary.failures.is_empty() {
                let ids: Vec<String> = summary
                    .failures
                    .iter()
                    .map(|f| f.metro.id.to_string())
                    .collect();
                anyhow::bail!(
                    "{} of {} metros failed ({}); output written without them",
                    summary.failures.len(),
                    summary.metros,
                    ids.join(", ")
                );
            }
        }
        Commands::Metros { calculator } => {
            let calculator = HttpCalculator::new(calculator.into_config())?;
            let catalog = pipeline::harvest(&calculator, None).await?;
            for metro in &catalog {
                println!("{}\t{}", metro.id, metro.name);
            }
        }
    }

    Ok(())
}
