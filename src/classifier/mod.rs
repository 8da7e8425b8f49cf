//! Classifier module - feature extraction, model contract, prediction history
//!
//! Note: in the browser the model runs in JavaScript (onnxruntime-web).
//! Rust handles feature extraction and everything after the model output.

mod buffer;
mod features;
mod model;

pub use buffer::PredictionHistory;
pub use features::{FeatureVector, LandmarkNormalizer, CHANNEL_COUNT, FEATURE_LEN};
pub use model::{ClassificationResult, Classifier, Distribution, LabelSet, ASL_LABELS};

#[cfg(test)]
pub(crate) use features::tests::palm_with;
