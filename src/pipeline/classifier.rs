use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::encoder::FeatureVector;
use super::ClassifierError;
use crate::labels::LabelMap;

/// Single-vector inference over a trained model.
pub trait Classifier: Send + Sync {
    /// Class index predicted for `features`.
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError>;

    /// Feature width the model was trained on.
    fn input_width(&self) -> usize;
}

/// What the adapter resolved a feature vector to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Disease(String),
    /// No model is loaded, or inference failed.
    Unavailable,
    /// The model emitted a class the label map does not know.
    UnknownClass(usize),
}

impl Prediction {
    pub fn disease(&self) -> Option<&str> {
        match self {
            Prediction::Disease(name) => Some(name),
            _ => None,
        }
    }
}

pub struct ClassifierAdapter {
    model: Option<Box<dyn Classifier>>,
    labels: Arc<LabelMap>,
}

impl ClassifierAdapter {
    pub fn new(model: Box<dyn Classifier>, labels: Arc<LabelMap>) -> Self {
        Self {
            model: Some(model),
            labels,
        }
    }

    /// Adapter with no model; every prediction is [`Prediction::Unavailable`].
    pub fn unloaded(labels: Arc<LabelMap>) -> Self {
        Self {
            model: None,
            labels,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        let Some(model) = &self.model else {
            return Prediction::Unavailable;
        };

        let index = match model.predict(features) {
            Ok(index) => index,
            Err(e) => {
                tracing::error!(error = %e, "Classifier inference failed");
                return Prediction::Unavailable;
            }
        };

        match self.labels.label(index) {
            Some(name) => Prediction::Disease(name.to_string()),
            None => {
                tracing::warn!(class_index = index, "Predicted class has no label");
                Prediction::UnknownClass(index)
            }
        }
    }
}

impl std::fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("model_loaded", &self.is_loaded())
            .field("labels", &self.labels.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════
// Linear model
// ═══════════════════════════════════════════════════════════

/// One weight row and intercept per class; the highest score wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<usize>,
    coefficients: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

impl LinearClassifier {
    pub fn new(
        classes: Vec<usize>,
        coefficients: Vec<Vec<f32>>,
        intercepts: Vec<f32>,
    ) -> Result<Self, ClassifierError> {
        let model = Self {
            classes,
            coefficients,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a model from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, ClassifierError> {
        let model: LinearClassifier = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model file written by the training export.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let json = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            classes = model.classes.len(),
            width = model.input_width(),
            "Linear classifier loaded"
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::Shape("model has no classes".into()));
        }
        if self.coefficients.len() != self.classes.len()
            || self.intercepts.len() != self.classes.len()
        {
            return Err(ClassifierError::Shape(format!(
                "{} classes, {} weight rows, {} intercepts",
                self.classes.len(),
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        let width = self.coefficients[0].len();
        if width == 0 {
            return Err(ClassifierError::Shape("weight rows are empty".into()));
        }
        if let Some(row) = self.coefficients.iter().position(|r| r.len() != width) {
            return Err(ClassifierError::Shape(format!(
                "weight row {row} has width {}, expected {width}",
                self.coefficients[row].len()
            )));
        }
        Ok(())
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError> {
        let expected = self.input_width();
        if features.width() != expected {
            return Err(ClassifierError::DimensionMismatch {
                expected,
                actual: features.width(),
            });
        }

        let x = features.as_slice();
        let mut best: Option<(usize, f32)> = None;
        for (position, (row, bias)) in self.coefficients.iter().zip(&self.intercepts).enumerate() {
            let score = row
                .iter()
                .zip(x)
                .map(|(w, bit)| w * f32::from(*bit))
                .sum::<f32>()
                + bias;
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((position, score)),
            }
        }

        best.map(|(position, _)| self.classes[position])
            .ok_or_else(|| ClassifierError::Shape("model has no classes".into()))
    }

    fn input_width(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }
}
