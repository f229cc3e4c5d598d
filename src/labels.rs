//! Label map: classifier class index → condition name.
//!
//! The static table is the fixed index↔label contract of the bundled model.
//! Class indices follow label-encoding order: unique condition names sorted
//! by code point. [`LabelMap::from_training_labels`] reproduces that encoding
//! from a training outcome column, and the tests pin the two together.

use std::collections::{BTreeMap, BTreeSet};

/// Condition names in class-index order.
pub const DISEASE_LABELS: &[&str] = &[
    "(vertigo) Paroymsal Positional Vertigo",
    "AIDS",
    "Acne",
    "Alcoholic hepatitis",
    "Allergy",
    "Arthritis",
    "Bronchial Asthma",
    "Cervical spondylosis",
    "Chicken pox",
    "Chronic cholestasis",
    "Common Cold",
    "Dengue",
    "Diabetes",
    "Dimorphic hemmorhoids(piles)",
    "Drug Reaction",
    "Fungal infection",
    "GERD",
    "Gastroenteritis",
    "Heart attack",
    "Hepatitis B",
    "Hepatitis C",
    "Hepatitis D",
    "Hepatitis E",
    "Hypertension",
    "Hyperthyroidism",
    "Hypoglycemia",
    "Hypothyroidism",
    "Impetigo",
    "Jaundice",
    "Malaria",
    "Migraine",
    "Osteoarthristis",
    "Paralysis (brain hemorrhage)",
    "Peptic ulcer diseae",
    "Pneumonia",
    "Psoriasis",
    "Tuberculosis",
    "Typhoid",
    "Urinary tract infection",
    "Varicose veins",
    "hepatitis A",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: BTreeMap<usize, String>,
}

impl LabelMap {
    /// Label table of the bundled model.
    pub fn builtin() -> Self {
        Self::from_ordered(DISEASE_LABELS.iter().copied())
    }

    /// Bind names to indices `0..n` in the given order.
    pub fn from_ordered<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (i, name.into()))
            .collect();
        Self { labels }
    }

    /// Label-encode a training outcome column: unique names, sorted, indexed
    /// from zero. Row order of the column does not affect the result.
    pub fn from_training_labels<I, S>(column: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = column.into_iter().map(Into::into).collect();
        Self::from_ordered(unique)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_known_indices() {
        let map = LabelMap::builtin();
        assert_eq!(map.len(), 41);
        assert_eq!(map.label(0), Some("(vertigo) Paroymsal Positional Vertigo"));
        assert_eq!(map.label(15), Some("Fungal infection"));
        assert_eq!(map.label(16), Some("GERD"));
        assert_eq!(map.label(33), Some("Peptic ulcer diseae"));
        assert_eq!(map.label(40), Some("hepatitis A"));
    }

    #[test]
    fn unknown_index_is_none() {
        assert!(LabelMap::builtin().label(41).is_none());
    }

    #[test]
    fn derived_encoding_matches_builtin_table() {
        // Shuffled and repeated, the way a training column looks.
        let mut column: Vec<&str> = DISEASE_LABELS.iter().rev().copied().collect();
        column.extend(DISEASE_LABELS.iter().step_by(3).copied());
        assert_eq!(LabelMap::from_training_labels(column), LabelMap::builtin());
    }

    #[test]
    fn derived_encoding_sorts_by_code_point() {
        let map = LabelMap::from_training_labels(["flu", "Acne", "Cold", "Acne"]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.label(0), Some("Acne"));
        assert_eq!(map.label(1), Some("Cold"));
        assert_eq!(map.label(2), Some("flu"));
    }
}
