pub mod classifier;
pub mod encoder;
pub mod normalize;
pub mod orchestrator;

pub use classifier::*;
pub use encoder::*;
pub use normalize::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Feature width mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Malformed model: {0}")]
    Shape(String),

    #[error("Model parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
