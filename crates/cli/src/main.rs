//! Rebar cut planner CLI

mod logging;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rebar_cut_core::api::{optimize_request, ErrorResponse, OptimizeRequest, OptimizeResponse};
use rebar_cut_core::{CutOptimizer, OptimizerConfig};
use tracing::{debug, error};

/// Request printed by `rebar-cut sample`.
pub(crate) const SAMPLE_REQUEST: &str = r#"{
  "version": "1.0",
  "stock": [
    { "stockId": "stock-a", "specKey": "G60", "lengthIn": 120, "quantity": 1 },
    { "stockId": "stock-b", "specKey": "G60", "lengthIn": 96, "quantity": 1, "allowKeepRemnants": true }
  ],
  "requirements": [
    { "partId": "part-1", "specKey": "G60", "lengthIn": 36, "quantity": 2 },
    { "partId": "part-2", "specKey": "G60", "lengthIn": 24, "quantity": 1 }
  ],
  "kerfIn": 0.125,
  "toleranceIn": 0.25
}"#;

#[derive(Parser)]
#[command(name = "rebar-cut")]
#[command(about = "Plan cuts of rebar parts from stock bars")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a cut plan from a JSON request
    Plan {
        /// Path to the request file, or `-` for stdin
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Minimum part and remnant length in inches (overrides the request)
        #[arg(long)]
        min_part_length: Option<f64>,

        /// Scrap-free threshold in percent (overrides the request)
        #[arg(long)]
        scrap_threshold: Option<f64>,
    },

    /// Print a sample request
    Sample,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Response envelope as pretty JSON
    Json,
    /// Human-readable cut list
    Table,
}

fn read_request(file: &Path) -> anyhow::Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read request file {}", file.display()))
    }
}

/// Parses the request and applies command-line overrides.
fn build_request(
    raw: &str,
    min_part_length: Option<f64>,
    scrap_threshold: Option<f64>,
) -> serde_json::Result<OptimizeRequest> {
    let mut request: OptimizeRequest = serde_json::from_str(raw)?;
    if let Some(min) = min_part_length {
        request.input.min_part_length_in = Some(min);
    }
    if let Some(pct) = scrap_threshold {
        request.scrap_threshold_pct = Some(pct);
    }
    Ok(request)
}

/// 0 on success, 2 when the request was at fault, 1 otherwise.
fn exit_status(response: &OptimizeResponse) -> u8 {
    match &response.error {
        None => 0,
        Some(e) if e.is_client_error() => 2,
        Some(_) => 1,
    }
}

fn plan(
    file: &Path,
    format: Format,
    min_part_length: Option<f64>,
    scrap_threshold: Option<f64>,
) -> anyhow::Result<ExitCode> {
    let raw = read_request(file)?;
    let optimizer = CutOptimizer::new(OptimizerConfig::default());

    let response = match build_request(&raw, min_part_length, scrap_threshold) {
        Ok(request) => optimize_request(&optimizer, &request),
        Err(e) => {
            debug!(error = %e, "request rejected");
            OptimizeResponse::failure(ErrorResponse::invalid_request(format!(
                "Failed to parse request: {e}"
            )))
        }
    };

    if let Some(err) = &response.error {
        error!(kind = %err.kind, class = %err.class, "{}", err.message);
    }

    let text = match format {
        Format::Json => response
            .to_json_pretty()
            .context("Failed to serialize response")?,
        Format::Table => render::table(&response).context("Failed to render cut list")?,
    };
    println!("{}", text);

    Ok(ExitCode::from(exit_status(&response)))
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            file,
            format,
            min_part_length,
            scrap_threshold,
        } => plan(&file, format, min_part_length, scrap_threshold),
        Commands::Sample => {
            println!("{}", SAMPLE_REQUEST);
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
