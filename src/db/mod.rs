pub mod remediation;
pub mod sqlite;

pub use remediation::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Not a remediation store, missing tables: {}", missing.join(", "))]
    NotRemediationStore { missing: Vec<String> },

    #[error("Schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i64, supported: i64 },
}
