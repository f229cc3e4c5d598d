//! Symptom vocabulary: canonical symptom keys bound to feature-vector positions.
//!
//! The static table is the column order the shipped classifier was trained on.
//! Keys are stored verbatim, including the irregular spacing and punctuation the
//! training columns carry (`spotting_ urination`, `toxic_look_(typhos)`), because
//! the position of each key is the contract with the model.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("Duplicate symptom key: {0}")]
    DuplicateKey(String),

    #[error("Blank symptom key at position {0}")]
    BlankKey(usize),

    #[error("Vocabulary has no symptom keys")]
    Empty,
}

/// Training-column order of the bundled model. Position = feature index.
pub const SYMPTOM_KEYS: &[&str] = &[
    "itching", "skin_rash", "nodal_skin_eruptions", "continuous_sneezing", "shivering",
    "chills", "joint_pain", "stomach_pain", "acidity", "ulcers_on_tongue",
    "muscle_wasting", "vomiting", "burning_micturition", "spotting_ urination", "fatigue",
    "weight_gain", "anxiety", "cold_hands_and_feets", "mood_swings", "weight_loss",
    "restlessness", "lethargy", "patches_in_throat", "irregular_sugar_level", "cough",
    "high_fever", "sunken_eyes", "breathlessness", "sweating", "dehydration",
    "indigestion", "headache", "yellowish_skin", "dark_urine", "nausea",
    "loss_of_appetite", "pain_behind_the_eyes", "back_pain", "constipation", "abdominal_pain",
    "diarrhoea", "mild_fever", "yellow_urine", "yellowing_of_eyes", "acute_liver_failure",
    "fluid_overload", "swelling_of_stomach", "swelled_lymph_nodes", "malaise", "blurred_and_distorted_vision",
    "phlegm", "throat_irritation", "redness_of_eyes", "sinus_pressure", "runny_nose",
    "congestion", "chest_pain", "weakness_in_limbs", "fast_heart_rate", "pain_during_bowel_movements",
    "pain_in_anal_region", "bloody_stool", "irritation_in_anus", "neck_pain", "dizziness",
    "cramps", "bruising", "obesity", "swollen_legs", "swollen_blood_vessels",
    "puffy_face_and_eyes", "enlarged_thyroid", "brittle_nails", "swollen_extremeties", "excessive_hunger",
    "extra_marital_contacts", "drying_and_tingling_lips", "slurred_speech", "knee_pain", "hip_joint_pain",
    "muscle_weakness", "stiff_neck", "swelling_joints", "movement_stiffness", "spinning_movements",
    "loss_of_balance", "unsteadiness", "weakness_of_one_body_side", "loss_of_smell", "bladder_discomfort",
    "foul_smell_of urine", "continuous_feel_of_urine", "passage_of_gases", "internal_itching", "toxic_look_(typhos)",
    "depression", "irritability", "muscle_pain", "altered_sensorium", "red_spots_over_body",
    "belly_pain", "abnormal_menstruation", "dischromic _patches", "watering_from_eyes", "increased_appetite",
    "polyuria", "family_history", "mucoid_sputum", "rusty_sputum", "lack_of_concentration",
    "visual_disturbances", "receiving_blood_transfusion", "receiving_unsterile_injections", "coma", "stomach_bleeding",
    "distention_of_abdomen", "history_of_alcohol_consumption", "fluid_overload.1", "blood_in_sputum", "prominent_veins_on_calf",
    "palpitations", "painful_walking", "pus_filled_pimples", "blackheads", "scurring",
    "skin_peeling", "silver_like_dusting", "small_dents_in_nails", "inflammatory_nails", "blister",
    "red_sore_around_nose", "yellow_crust_ooze",
];

/// Ordered, immutable set of canonical symptom keys.
#[derive(Debug, Clone)]
pub struct SymptomVocabulary {
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Vocabulary matching the bundled model's training columns.
    pub fn builtin() -> Self {
        // The static table is checked for duplicates by the tests below.
        let keys: Vec<String> = SYMPTOM_KEYS.iter().map(|k| k.to_string()).collect();
        let index = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        Self { keys, index }
    }

    /// Derive a vocabulary from training-dataset column names, in column order.
    /// The outcome column must already be excluded by the caller.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys = Vec::new();
        let mut index = HashMap::new();

        for (position, column) in columns.into_iter().enumerate() {
            let key: String = column.into();
            if key.trim().is_empty() {
                return Err(VocabularyError::BlankKey(position));
            }
            if index.insert(key.clone(), position).is_some() {
                return Err(VocabularyError::DuplicateKey(key));
            }
            keys.push(key);
        }

        if keys.is_empty() {
            return Err(VocabularyError::Empty);
        }

        Ok(Self { keys, index })
    }

    /// Feature-vector width.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Canonical key stored at `index`.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    /// Keys in index order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}
