//! Remediation store lifecycle.
//!
//! Writers go through [`open_database`], which creates the schema on first
//! use. Startup reads go through [`open_remediation_store`], which opens the
//! file read-only and refuses anything that is not a remediation store, so a
//! misplaced SQLite file is reported instead of silently gaining our tables.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::DatabaseError;

/// Highest schema version this build understands.
pub const SCHEMA_VERSION: i64 = 1;

/// Tables a remediation store must contain.
pub const REMEDIATION_TABLES: &[&str] = &[
    "schema_version",
    "descriptions",
    "precautions",
    "medications",
    "diets",
    "workouts",
];

const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../resources/migrations/001_remediation.sql"),
)];

/// Open (or create) a writable remediation store at `path` and bring its
/// schema up to date.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=DELETE;")?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Fresh in-memory store with the current schema.
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an existing store read-only for loading. Nothing is created or
/// migrated; the schema must already be a supported remediation schema.
pub fn open_remediation_store(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    verify_schema(&conn)?;
    Ok(conn)
}

/// Check that every remediation table exists and the recorded schema
/// version is one this build can read.
pub fn verify_schema(conn: &Connection) -> Result<(), DatabaseError> {
    let mut missing = Vec::new();
    for table in REMEDIATION_TABLES {
        if !table_exists(conn, table)? {
            missing.push(table.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(DatabaseError::NotRemediationStore { missing });
    }

    let found = recorded_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DatabaseError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(())
}

pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current = recorded_version(conn)?;
    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        tracing::info!(version, "Applying remediation schema migration");
        conn.execute_batch(sql)
            .map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
    }
    Ok(())
}

/// Schema version recorded in the store; 0 before the first migration.
fn recorded_version(conn: &Connection) -> Result<i64, DatabaseError> {
    if !table_exists(conn, "schema_version")? {
        return Ok(0);
    }
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, DatabaseError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists)
}
