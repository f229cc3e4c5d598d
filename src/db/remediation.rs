//! Remediation table storage: row inserts and the one-shot startup load.

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection};
use serde_json::Value;

use super::DatabaseError;
use crate::remediation::{
    cell_to_text, DescriptionRecord, ListRecord, PrecautionRecord, RemediationTables,
};

/// The three tables whose content column holds a serialized-list cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTable {
    Medications,
    Diets,
    Workouts,
}

impl ListTable {
    fn table(&self) -> &'static str {
        match self {
            Self::Medications => "medications",
            Self::Diets => "diets",
            Self::Workouts => "workouts",
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Medications => "medication",
            Self::Diets => "diet",
            Self::Workouts => "workout",
        }
    }
}

pub fn insert_description(
    conn: &Connection,
    disease: &str,
    description: Option<&str>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO descriptions (disease, description) VALUES (?1, ?2)",
        params![disease, description],
    )?;
    Ok(())
}

pub fn insert_precautions(
    conn: &Connection,
    disease: &str,
    slots: [Option<&str>; 4],
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO precautions (disease, precaution_1, precaution_2, precaution_3, precaution_4)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![disease, slots[0], slots[1], slots[2], slots[3]],
    )?;
    Ok(())
}

/// Store a list cell as-is: text stays text, numbers stay numbers. Arrays
/// and objects are stored as their JSON text.
pub fn insert_list_row(
    conn: &Connection,
    table: ListTable,
    disease: &str,
    cell: &Value,
) -> Result<(), DatabaseError> {
    let sql = format!(
        "INSERT INTO {} (disease, {}) VALUES (?1, ?2)",
        table.table(),
        table.column()
    );
    conn.execute(&sql, params![disease, cell_to_sql(cell)])?;
    Ok(())
}

/// Read all five tables in insertion order.
pub fn load_remediation_tables(conn: &Connection) -> Result<RemediationTables, DatabaseError> {
    let tables = RemediationTables {
        descriptions: load_descriptions(conn)?,
        precautions: load_precautions(conn)?,
        medications: load_list_rows(conn, ListTable::Medications)?,
        diets: load_list_rows(conn, ListTable::Diets)?,
        workouts: load_list_rows(conn, ListTable::Workouts)?,
    };
    tracing::info!(
        descriptions = tables.descriptions.len(),
        precautions = tables.precautions.len(),
        medications = tables.medications.len(),
        diets = tables.diets.len(),
        workouts = tables.workouts.len(),
        "Remediation tables loaded"
    );
    Ok(tables)
}

fn load_descriptions(conn: &Connection) -> Result<Vec<DescriptionRecord>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT disease, description FROM descriptions ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok(DescriptionRecord {
            disease: row.get(0)?,
            description: cell_to_text(&sql_to_cell(row.get(1)?)),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn load_precautions(conn: &Connection) -> Result<Vec<PrecautionRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT disease, precaution_1, precaution_2, precaution_3, precaution_4
         FROM precautions ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        let slot = |i: usize| -> rusqlite::Result<Option<String>> {
            Ok(cell_to_text(&sql_to_cell(row.get(i)?)))
        };
        Ok(PrecautionRecord {
            disease: row.get(0)?,
            slots: [slot(1)?, slot(2)?, slot(3)?, slot(4)?],
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn load_list_rows(conn: &Connection, table: ListTable) -> Result<Vec<ListRecord>, DatabaseError> {
    let sql = format!(
        "SELECT disease, {} FROM {} ORDER BY rowid",
        table.column(),
        table.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(ListRecord {
            disease: row.get(0)?,
            cell: sql_to_cell(row.get(1)?),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn sql_to_cell(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(i),
        SqlValue::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(b) => Value::String(String::from_utf8_lossy(&b).into_owned()),
    }
}

fn cell_to_sql(cell: &Value) -> SqlValue {
    match cell {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::remediation::parse_list;

    #[test]
    fn empty_database_loads_empty_tables() {
        let conn = open_memory_database().unwrap();
        let tables = load_remediation_tables(&conn).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn rows_load_in_insertion_order() {
        let conn = open_memory_database().unwrap();
        insert_description(&conn, "GERD", Some("First.")).unwrap();
        insert_description(&conn, "Acne", Some("Skin.")).unwrap();
        insert_description(&conn, "GERD", Some("Second.")).unwrap();

        let tables = load_remediation_tables(&conn).unwrap();
        let names: Vec<&str> = tables.descriptions.iter().map(|d| d.disease.as_str()).collect();
        assert_eq!(names, ["GERD", "Acne", "GERD"]);
        assert_eq!(tables.descriptions[2].description.as_deref(), Some("Second."));
    }

    #[test]
    fn precaution_slots_keep_gaps() {
        let conn = open_memory_database().unwrap();
        insert_precautions(&conn, "Acne", [Some("wash face"), None, Some(" "), Some("avoid oil")])
            .unwrap();

        let tables = load_remediation_tables(&conn).unwrap();
        assert_eq!(
            tables.precautions[0].slots,
            [Some("wash face".to_string()), None, None, Some("avoid oil".to_string())]
        );
    }

    #[test]
    fn list_cells_keep_their_stored_type() {
        let conn = open_memory_database().unwrap();
        insert_list_row(&conn, ListTable::Medications, "GERD", &json!("['Omeprazole']")).unwrap();
        insert_list_row(&conn, ListTable::Diets, "GERD", &json!(12)).unwrap();
        insert_list_row(&conn, ListTable::Workouts, "GERD", &Value::Null).unwrap();

        let tables = load_remediation_tables(&conn).unwrap();
        assert_eq!(tables.medications[0].cell, json!("['Omeprazole']"));
        assert_eq!(tables.diets[0].cell, json!(12));
        assert_eq!(tables.workouts[0].cell, Value::Null);
    }

    #[test]
    fn array_cell_round_trips_through_json_text() {
        let conn = open_memory_database().unwrap();
        insert_list_row(&conn, ListTable::Workouts, "Acne", &json!(["Yoga", "Swim"])).unwrap();

        let tables = load_remediation_tables(&conn).unwrap();
        assert_eq!(parse_list(&tables.workouts[0].cell), vec!["Yoga", "Swim"]);
    }

    #[test]
    fn non_text_description_is_stringified() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO descriptions (disease, description) VALUES ('X', 42)",
            [],
        )
        .unwrap();
        let tables = load_remediation_tables(&conn).unwrap();
        assert_eq!(tables.descriptions[0].description.as_deref(), Some("42"));
    }
}
