use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Symptom Advisor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "SYMPTOM_ADVISOR_DATA";

/// Remediation database file inside the data directory.
pub const DATABASE_FILE: &str = "remediation.db";

/// Model locations tried in order, relative to the data directory.
pub const MODEL_CANDIDATES: &[&str] = &["model.json", "models/model.json"];

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "symptom_advisor=info"
}

/// Get the application data directory.
/// `$SYMPTOM_ADVISOR_DATA` if set, else ~/SymptomAdvisor/, else the working directory.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join("SymptomAdvisor"),
        None => PathBuf::from("."),
    }
}

pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// First model candidate that exists under `data_dir`.
pub fn find_model(data_dir: &Path) -> Option<PathBuf> {
    MODEL_CANDIDATES
        .iter()
        .map(|candidate| data_dir.join(candidate))
        .find(|path| path.is_file())
}
