//! Symptom checker command-line runner.
//!
//! Reads a JSON check request from `SYMPTOM_SESSION_PATH` (or stdin), runs it
//! against the reference data in `SYMPTOM_DATA_PATH`, and prints the report.

use std::fs::File;
use std::io::{self, BufReader};

use symptom_loader::LoadConfig;
use symptom_service::{CheckRequest, SymptomChecker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DATA_PATH: &str = "data";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let data_path =
        std::env::var("SYMPTOM_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
    let config = if env_flag("SYMPTOM_LENIENT") {
        LoadConfig::lenient()
    } else {
        LoadConfig::default()
    };

    tracing::info!("Loading reference data from: {}", data_path);
    let checker = SymptomChecker::load(&data_path, &config)?;

    let request = match std::env::var("SYMPTOM_SESSION_PATH") {
        Ok(path) => {
            tracing::info!("Reading check request from: {}", path);
            CheckRequest::from_reader(BufReader::new(File::open(&path)?))?
        }
        Err(_) => CheckRequest::from_reader(io::stdin().lock())?,
    };

    let report = checker.check(&request)?;
    tracing::info!(
        "Check finished: {:?}, {} predictions, {} medications",
        report.outcome,
        report.predictions.len(),
        report.medications.len()
    );

    match std::env::var("SYMPTOM_OUTPUT").as_deref() {
        Ok("text") => print!("{}", report),
        _ => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
