use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use symptom_advisor::{config, init_tracing, load_advisor};

/// Symptom Advisor - map a symptom list to a likely condition and its remediation guidance
#[derive(Parser, Debug)]
#[command(name = "symptom-advisor")]
#[command(version)]
#[command(about = "Map a comma-separated symptom list to a condition and remediation guidance", long_about = None)]
struct Args {
    /// Data directory holding the model and remediation database
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Symptoms, comma-separated or as separate arguments
    #[arg(value_name = "SYMPTOMS", required = true)]
    symptoms: Vec<String>,
}

impl Args {
    /// Explicit `--data-dir`, else the configured default
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(config::data_dir)
    }

    /// Separate arguments behave like comma-separated entries.
    fn symptom_text(&self) -> String {
        self.symptoms.join(",")
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let data_dir = args.data_dir();
    let advisor = match load_advisor(&data_dir) {
        Ok(advisor) => advisor,
        Err(e) => {
            tracing::error!(error = %e, data_dir = %data_dir.display(), "Startup failed");
            return ExitCode::from(1);
        }
    };

    let outcome = advisor.advise_text(&args.symptom_text());
    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize outcome");
            ExitCode::from(1)
        }
    }
}
