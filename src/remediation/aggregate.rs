use std::sync::Arc;

use serde::Serialize;

use super::list_parser::parse_list;
use super::{ListRecord, RemediationTables};

pub const NO_DESCRIPTION: &str = "No description available.";

/// Everything shown to the user for one predicted condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerBundle {
    pub disease: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diets: Vec<String>,
    pub workouts: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RemediationAggregator {
    tables: Arc<RemediationTables>,
}

impl RemediationAggregator {
    pub fn new(tables: Arc<RemediationTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RemediationTables {
        &self.tables
    }

    /// Join every table for `disease`. Missing rows degrade to per-field defaults.
    pub fn aggregate(&self, disease: &str) -> AnswerBundle {
        AnswerBundle {
            disease: disease.to_string(),
            description: self.description(disease),
            precautions: self.precautions(disease),
            medications: first_list(&self.tables.medications, disease),
            diets: first_list(&self.tables.diets, disease),
            workouts: first_list(&self.tables.workouts, disease),
        }
    }

    fn description(&self, disease: &str) -> String {
        let parts: Vec<&str> = self
            .tables
            .descriptions
            .iter()
            .filter(|r| r.disease == disease)
            .filter_map(|r| r.description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect();

        if parts.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            parts.join(" ")
        }
    }

    fn precautions(&self, disease: &str) -> Vec<String> {
        self.tables
            .precautions
            .iter()
            .find(|r| r.disease == disease)
            .map(|r| {
                r.slots
                    .iter()
                    .flatten()
                    .map(|p| p.trim())
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn first_list(rows: &[ListRecord], disease: &str) -> Vec<String> {
    rows.iter()
        .find(|r| r.disease == disease)
        .map(|r| parse_list(&r.cell))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::remediation::{DescriptionRecord, PrecautionRecord};

    fn list(disease: &str, cell: serde_json::Value) -> ListRecord {
        ListRecord {
            disease: disease.into(),
            cell,
        }
    }

    fn sample_tables() -> RemediationTables {
        RemediationTables {
            descriptions: vec![
                DescriptionRecord {
                    disease: "GERD".into(),
                    description: Some("Acid reflux into the esophagus.".into()),
                },
                DescriptionRecord {
                    disease: "Migraine".into(),
                    description: Some("Recurring headaches.".into()),
                },
                DescriptionRecord {
                    disease: "GERD".into(),
                    description: Some("  Often worse after meals. ".into()),
                },
            ],
            precautions: vec![
                PrecautionRecord {
                    disease: "GERD".into(),
                    slots: [
                        Some("avoid fatty food".into()),
                        None,
                        Some("  ".into()),
                        Some("eat smaller meals".into()),
                    ],
                },
                PrecautionRecord {
                    disease: "GERD".into(),
                    slots: [Some("ignored second row".into()), None, None, None],
                },
            ],
            medications: vec![
                list("GERD", json!("['Omeprazole', 'Antacids']")),
                list("GERD", json!("['Second row']")),
            ],
            diets: vec![list("GERD", json!("['Oatmeal', 'Ginger, fresh']"))],
            workouts: vec![list("GERD", json!("Walk after meals"))],
        }
    }

    fn aggregator() -> RemediationAggregator {
        RemediationAggregator::new(Arc::new(sample_tables()))
    }

    #[test]
    fn full_bundle_for_known_disease() {
        let bundle = aggregator().aggregate("GERD");
        assert_eq!(bundle.disease, "GERD");
        assert_eq!(
            bundle.description,
            "Acid reflux into the esophagus. Often worse after meals."
        );
        assert_eq!(bundle.precautions, vec!["avoid fatty food", "eat smaller meals"]);
        assert_eq!(bundle.medications, vec!["Omeprazole", "Antacids"]);
        assert_eq!(bundle.diets, vec!["Oatmeal", "Ginger, fresh"]);
        assert_eq!(bundle.workouts, vec!["Walk after meals"]);
    }

    #[test]
    fn unknown_disease_degrades_to_defaults() {
        let bundle = aggregator().aggregate("NoSuchDisease");
        assert_eq!(bundle.description, NO_DESCRIPTION);
        assert!(bundle.precautions.is_empty());
        assert!(bundle.medications.is_empty());
        assert!(bundle.diets.is_empty());
        assert!(bundle.workouts.is_empty());
    }

    #[test]
    fn partial_rows_fill_what_exists() {
        let bundle = aggregator().aggregate("Migraine");
        assert_eq!(bundle.description, "Recurring headaches.");
        assert!(bundle.precautions.is_empty());
        assert!(bundle.medications.is_empty());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let bundle = aggregator().aggregate("gerd");
        assert_eq!(bundle.description, NO_DESCRIPTION);
    }

    #[test]
    fn empty_tables_never_fail() {
        let agg = RemediationAggregator::new(Arc::new(RemediationTables::default()));
        assert_eq!(agg.aggregate("GERD").description, NO_DESCRIPTION);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let agg = aggregator();
        assert_eq!(agg.aggregate("GERD"), agg.aggregate("GERD"));
    }

    #[test]
    fn bundle_serializes_all_fields() {
        let json = serde_json::to_value(aggregator().aggregate("GERD")).unwrap();
        assert_eq!(json["disease"], "GERD");
        assert_eq!(json["medications"][1], "Antacids");
        assert!(json["workouts"].is_array());
    }
}
