//! End-to-end flow: raw symptom text → tokens → feature vector → prediction →
//! remediation bundle.

use serde::Serialize;

use super::classifier::{ClassifierAdapter, Prediction};
use super::encoder::FeatureEncoder;
use crate::remediation::{AnswerBundle, RemediationAggregator};

/// Characters stripped from both ends of each comma-separated token.
const TOKEN_DEBRIS: &[char] = &['[', ']', '\'', '"'];

/// Split free text into symptom tokens: comma-separated, trimmed, with stray
/// list brackets and quotes removed from the ends. Spacing inside a token is
/// left to the normalizer.
pub fn split_symptom_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(|token| token.trim().trim_matches(TOKEN_DEBRIS).trim())
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Result of one advice request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdviceOutcome {
    /// No token matched the vocabulary; the model was not consulted.
    NoRecognizedSymptoms { unrecognized: Vec<String> },
    ModelUnavailable,
    UnknownClass { index: usize },
    Diagnosis {
        answer: AnswerBundle,
        matched: usize,
        unrecognized: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisorStatus {
    pub model_loaded: bool,
    pub tables_loaded: bool,
    pub table_rows: usize,
    pub vocabulary_size: usize,
    pub label_count: usize,
}

/// Request-scoped entry point over the process-wide, read-only components.
#[derive(Debug)]
pub struct SymptomAdvisor {
    encoder: FeatureEncoder,
    classifier: ClassifierAdapter,
    aggregator: RemediationAggregator,
}

impl SymptomAdvisor {
    pub fn new(
        encoder: FeatureEncoder,
        classifier: ClassifierAdapter,
        aggregator: RemediationAggregator,
    ) -> Self {
        Self {
            encoder,
            classifier,
            aggregator,
        }
    }

    /// Advise on a comma-separated symptom string as typed by the user.
    pub fn advise_text(&self, text: &str) -> AdviceOutcome {
        self.advise(&split_symptom_text(text))
    }

    pub fn advise<S: AsRef<str>>(&self, tokens: &[S]) -> AdviceOutcome {
        let encoding = self.encoder.encode(tokens);
        if encoding.is_empty() {
            tracing::info!(
                tokens = tokens.len(),
                "No recognized symptoms, skipping prediction"
            );
            return AdviceOutcome::NoRecognizedSymptoms {
                unrecognized: encoding.unrecognized,
            };
        }

        match self.classifier.predict(&encoding.vector) {
            Prediction::Disease(disease) => {
                tracing::info!(
                    matched = encoding.matched,
                    unrecognized = encoding.unrecognized.len(),
                    "Prediction resolved"
                );
                AdviceOutcome::Diagnosis {
                    answer: self.aggregator.aggregate(&disease),
                    matched: encoding.matched,
                    unrecognized: encoding.unrecognized,
                }
            }
            Prediction::Unavailable => AdviceOutcome::ModelUnavailable,
            Prediction::UnknownClass(index) => AdviceOutcome::UnknownClass { index },
        }
    }

    pub fn status(&self) -> AdvisorStatus {
        AdvisorStatus {
            model_loaded: self.classifier.is_loaded(),
            tables_loaded: !self.aggregator.tables().is_empty(),
            table_rows: self.aggregator.tables().row_count(),
            vocabulary_size: self.encoder.width(),
            label_count: self.classifier.labels().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::labels::LabelMap;
    use crate::pipeline::{Classifier, ClassifierError, FeatureVector, SymptomNormalizer};
    use crate::remediation::{DescriptionRecord, ListRecord, RemediationTables};
    use crate::vocabulary::SymptomVocabulary;

    /// Predicts a fixed class and counts how often it was asked.
    struct CountingClassifier {
        class: usize,
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for CountingClassifier {
        fn predict(&self, _features: &FeatureVector) -> Result<usize, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.class)
        }

        fn input_width(&self) -> usize {
            132
        }
    }

    fn tables() -> RemediationTables {
        RemediationTables {
            descriptions: vec![DescriptionRecord {
                disease: "Fungal infection".into(),
                description: Some("A skin infection caused by fungi.".into()),
            }],
            workouts: vec![ListRecord {
                disease: "Fungal infection".into(),
                cell: json!("['Keep skin dry', 'Wear breathable fabric']"),
            }],
            ..Default::default()
        }
    }

    fn advisor_with(classifier: Option<Box<dyn Classifier>>) -> SymptomAdvisor {
        let vocab = Arc::new(SymptomVocabulary::builtin());
        let labels = Arc::new(LabelMap::builtin());
        let adapter = match classifier {
            Some(model) => ClassifierAdapter::new(model, labels),
            None => ClassifierAdapter::unloaded(labels),
        };
        SymptomAdvisor::new(
            FeatureEncoder::new(SymptomNormalizer::new(vocab)),
            adapter,
            RemediationAggregator::new(Arc::new(tables())),
        )
    }

    fn counting(class: usize) -> (SymptomAdvisor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = CountingClassifier {
            class,
            calls: Arc::clone(&calls),
        };
        (advisor_with(Some(Box::new(model))), calls)
    }

    #[test]
    fn split_strips_list_debris() {
        assert_eq!(
            split_symptom_text("['itching', \"skin rash\" , ]  , 'nodal skin eruptions']"),
            vec!["itching", "skin rash", "nodal skin eruptions"]
        );
    }

    #[test]
    fn split_leaves_inner_spacing_alone() {
        assert_eq!(split_symptom_text(" joint  pain ,"), vec!["joint  pain"]);
        assert!(split_symptom_text("").is_empty());
        assert!(split_symptom_text(" , ,[]").is_empty());
    }

    #[test]
    fn full_flow_produces_diagnosis() {
        let (advisor, calls) = counting(15);
        let outcome = advisor.advise_text("itching, skin rash, purple elbows");
        match outcome {
            AdviceOutcome::Diagnosis {
                answer,
                matched,
                unrecognized,
            } => {
                assert_eq!(answer.disease, "Fungal infection");
                assert_eq!(answer.description, "A skin infection caused by fungi.");
                assert_eq!(answer.workouts, vec!["Keep skin dry", "Wear breathable fabric"]);
                assert_eq!(matched, 2);
                assert_eq!(unrecognized, vec!["purple elbows".to_string()]);
            }
            other => panic!("expected diagnosis, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn nothing_recognized_skips_model() {
        let (advisor, calls) = counting(15);
        let outcome = advisor.advise_text("purple elbows, glowing hair");
        assert_eq!(
            outcome,
            AdviceOutcome::NoRecognizedSymptoms {
                unrecognized: vec!["purple elbows".into(), "glowing hair".into()],
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_model_reported() {
        let advisor = advisor_with(None);
        assert_eq!(advisor.advise(&["itching"]), AdviceOutcome::ModelUnavailable);
    }

    #[test]
    fn unknown_class_reported() {
        let (advisor, _) = counting(77);
        assert_eq!(
            advisor.advise(&["itching"]),
            AdviceOutcome::UnknownClass { index: 77 }
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(AdviceOutcome::ModelUnavailable).unwrap();
        assert_eq!(json["status"], "model_unavailable");

        let (advisor, _) = counting(15);
        let json = serde_json::to_value(advisor.advise(&["itching"])).unwrap();
        assert_eq!(json["status"], "diagnosis");
        assert_eq!(json["answer"]["disease"], "Fungal infection");
    }

    #[test]
    fn status_reflects_loaded_parts() {
        let status = advisor_with(None).status();
        assert!(!status.model_loaded);
        assert!(status.tables_loaded);
        assert_eq!(status.table_rows, 2);
        assert_eq!(status.vocabulary_size, 132);
        assert_eq!(status.label_count, 41);
    }

    #[test]
    fn advisor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SymptomAdvisor>();
    }
}
