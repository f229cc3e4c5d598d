//! Remediation content keyed by condition name.
//!
//! Tables are loaded once at startup and shared read-only. Lookups use the
//! condition name exactly as stored (case-sensitive); a condition with no
//! row in a table is normal and simply yields that field's default.

pub mod aggregate;
pub mod list_parser;

pub use aggregate::*;
pub use list_parser::*;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionRecord {
    pub disease: String,
    pub description: Option<String>,
}

/// Up to four ordered precaution slots; any slot may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecautionRecord {
    pub disease: String,
    pub slots: [Option<String>; 4],
}

/// A row whose content is a serialized-list cell (medications, diet, workout).
#[derive(Debug, Clone, PartialEq)]
pub struct ListRecord {
    pub disease: String,
    pub cell: Value,
}

/// All remediation record sets, rows in storage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemediationTables {
    pub descriptions: Vec<DescriptionRecord>,
    pub precautions: Vec<PrecautionRecord>,
    pub medications: Vec<ListRecord>,
    pub diets: Vec<ListRecord>,
    pub workouts: Vec<ListRecord>,
}

impl RemediationTables {
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
            && self.precautions.is_empty()
            && self.medications.is_empty()
            && self.diets.is_empty()
            && self.workouts.is_empty()
    }

    /// Total rows across all five tables.
    pub fn row_count(&self) -> usize {
        self.descriptions.len()
            + self.precautions.len()
            + self.medications.len()
            + self.diets.len()
            + self.workouts.len()
    }
}
