//! Command-line front end: reads a bar CSV and prints indicators or a forecast as JSON

use clap::{Parser, Subcommand};
use fx_forecast::data::load_bars_csv;
use fx_forecast::{
    EngineConfig, FallbackPolicy, ForecastConfig, ForecastError, ForecastService,
    IndicatorEngine, NoiseConfig,
};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fx-forecast")]
#[command(about = "Indicator overlays and price forecasts for daily rate series", long_about = None)]
struct Cli {
    /// JSON file overriding indicator and forecast settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the closing price forward
    Forecast {
        /// CSV with date,open,high,low,close,volume columns
        #[arg(short, long)]
        input: PathBuf,

        /// Number of days to forecast
        #[arg(long, default_value_t = 30)]
        horizon: usize,

        /// trend, linear_regression, exponential_smoothing, arima_lite or ensemble
        #[arg(short, long, default_value = "ensemble")]
        algorithm: String,

        /// Seed for jitter in the trend projection (no jitter when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Jitter standard deviation as a fraction of the last price
        #[arg(long, default_value_t = 0.001)]
        jitter: f64,

        /// Fail on an unknown algorithm instead of running the ensemble
        #[arg(long)]
        strict: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Annotate bars with SMA, Bollinger Bands and RSI
    Indicators {
        /// CSV with date,open,high,low,close,volume columns
        #[arg(short, long)]
        input: PathBuf,

        /// Print only the latest close, change, RSI and volatility
        #[arg(long)]
        summary: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ForecastError> {
    let output = match &cli.command {
        Commands::Forecast { output, .. } | Commands::Indicators { output, .. } => output.clone(),
    };
    let value = execute(cli)?;
    write_json(output, &value)
}

/// Forecast settings after applying the command-line flags
fn forecast_config(
    base: ForecastConfig,
    seed: Option<u64>,
    jitter: f64,
    strict: bool,
) -> Result<ForecastConfig, ForecastError> {
    let mut config = base;
    if strict {
        config = config.with_fallback(FallbackPolicy::Reject);
    }
    if let Some(seed) = seed {
        config = config.with_noise(NoiseConfig::new(seed, jitter)?);
    }
    Ok(config)
}

/// Run a subcommand and return the JSON document it prints
fn execute(cli: Cli) -> Result<Value, ForecastError> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Forecast {
            input,
            horizon,
            algorithm,
            seed,
            jitter,
            strict,
            ..
        } => {
            let bars = load_bars_csv(&input)?;
            tracing::info!("Loaded {} bars from {}", bars.len(), input.display());

            let forecast = forecast_config(config.forecast, seed, jitter, strict)?;
            let service = ForecastService::new(forecast)?;
            let algorithm = service.resolve(&algorithm)?;
            let result = service.forecast_bars(&bars, horizon, algorithm)?;
            tracing::info!(
                "{} forecast: {} days, confidence {:.2}, accuracy {:.4}",
                result.algorithm,
                result.points.len(),
                result.confidence,
                result.accuracy()
            );

            Ok(serde_json::to_value(&result)?)
        }
        Commands::Indicators { input, summary, .. } => {
            let bars = load_bars_csv(&input)?;
            tracing::info!("Loaded {} bars from {}", bars.len(), input.display());

            let engine = IndicatorEngine::new(config.indicators)?;
            let annotated = engine.annotate(&bars)?;

            if summary {
                Ok(serde_json::to_value(engine.summarize(&annotated))?)
            } else {
                Ok(serde_json::to_value(&annotated)?)
            }
        }
    }
}

fn write_json(output: Option<PathBuf>, value: &Value) -> Result<(), ForecastError> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
