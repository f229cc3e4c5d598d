//! One-time startup: build the shared vocabulary, labels, model and tables
//! from a data directory and hand back a ready [`SymptomAdvisor`].
//!
//! Missing pieces degrade (no model → predictions report unavailable, no
//! database → empty tables). Pieces that exist but cannot be read are hard
//! errors, so a corrupt model never masquerades as "not installed".

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config;
use crate::db::{self, DatabaseError};
use crate::labels::LabelMap;
use crate::pipeline::{
    Classifier, ClassifierAdapter, ClassifierError, FeatureEncoder, LinearClassifier,
    SymptomAdvisor, SymptomNormalizer,
};
use crate::remediation::{RemediationAggregator, RemediationTables};
use crate::vocabulary::SymptomVocabulary;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to load classifier: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Failed to load remediation tables: {0}")]
    Database(#[from] DatabaseError),

    #[error("Model expects {model} features but the vocabulary has {vocabulary}")]
    WidthMismatch { model: usize, vocabulary: usize },
}

pub fn load_advisor(data_dir: &Path) -> Result<SymptomAdvisor, BootstrapError> {
    let vocabulary = Arc::new(SymptomVocabulary::builtin());
    let labels = Arc::new(LabelMap::builtin());

    let classifier = match config::find_model(data_dir) {
        Some(path) => {
            let model = LinearClassifier::load(&path)?;
            let model_width = model.input_width();
            if model_width != vocabulary.len() {
                return Err(BootstrapError::WidthMismatch {
                    model: model_width,
                    vocabulary: vocabulary.len(),
                });
            }
            ClassifierAdapter::new(Box::new(model), labels)
        }
        None => {
            tracing::warn!(
                data_dir = %data_dir.display(),
                "No classifier model found, predictions unavailable"
            );
            ClassifierAdapter::unloaded(labels)
        }
    };

    let tables = load_tables(data_dir)?;

    let advisor = SymptomAdvisor::new(
        FeatureEncoder::new(SymptomNormalizer::new(vocabulary)),
        classifier,
        RemediationAggregator::new(Arc::new(tables)),
    );
    let status = advisor.status();
    tracing::info!(
        model_loaded = status.model_loaded,
        table_rows = status.table_rows,
        "{} v{} ready",
        config::APP_NAME,
        config::APP_VERSION
    );
    Ok(advisor)
}

fn load_tables(data_dir: &Path) -> Result<RemediationTables, BootstrapError> {
    let path = config::database_path(data_dir);
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "Remediation database missing, using empty tables");
        return Ok(RemediationTables::default());
    }
    let conn = db::open_remediation_store(&path)?;
    Ok(db::load_remediation_tables(&conn)?)
}
