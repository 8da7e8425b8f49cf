//! Classifier contract and its outputs
//!
//! The model itself is external (onnxruntime-web in the browser, any
//! implementation of `Classifier` natively). This module only defines what
//! goes in (a `FeatureVector`) and what comes out (a label distribution).

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;
use crate::error::RecognitionError;

/// Sign labels of the reference deployment (order matches training)
pub const ASL_LABELS: [&str; 28] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J",
    "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T",
    "U", "V", "W", "X", "Y", "Z", "SPACE", "NOTHING",
];

/// One label with its probability
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub probability: f32,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Output of one classifier invocation: label → probability
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    results: Vec<ClassificationResult>,
}

impl Distribution {
    pub fn new(results: Vec<ClassificationResult>) -> Self {
        Self { results }
    }

    /// Highest-probability result; ties go to the earliest entry.
    /// Non-finite probabilities never win.
    pub fn top(&self) -> Option<&ClassificationResult> {
        self.results
            .iter()
            .filter(|r| r.probability.is_finite())
            .fold(None, |best: Option<&ClassificationResult>, r| match best {
                Some(b) if b.probability >= r.probability => Some(b),
                _ => Some(r),
            })
    }

    pub fn probability(&self, label: &str) -> Option<f32> {
        self.results
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.probability)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter()
    }
}

/// The closed label set a model was trained on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// 26 letters plus SPACE and NOTHING
    pub fn asl() -> Self {
        Self::new(ASL_LABELS)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// Map a dense probability array (label order) to a distribution
    pub fn distribution(&self, probabilities: &[f32]) -> Result<Distribution, RecognitionError> {
        if probabilities.len() != self.labels.len() {
            return Err(RecognitionError::ClassifierUnavailable(format!(
                "expected {} probabilities, got {}",
                self.labels.len(),
                probabilities.len()
            )));
        }
        Ok(Distribution::new(
            self.labels
                .iter()
                .zip(probabilities)
                .map(|(label, p)| ClassificationResult::new(label.clone(), *p))
                .collect(),
        ))
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::asl()
    }
}

/// A model mapping features to a label distribution.
///
/// Failures are reported as `ClassifierUnavailable` and cost only the
/// current round.
pub trait Classifier {
    fn classify(&mut self, features: &FeatureVector) -> Result<Distribution, RecognitionError>;
}

impl<F> Classifier for F
where
    F: FnMut(&FeatureVector) -> Result<Distribution, RecognitionError>,
{
    fn classify(&mut self, features: &FeatureVector) -> Result<Distribution, RecognitionError> {
        self(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_prefers_highest_then_earliest() {
        let dist = Distribution::new(vec![
            ClassificationResult::new("A", 0.2),
            ClassificationResult::new("B", 0.4),
            ClassificationResult::new("C", 0.4),
            ClassificationResult::new("D", f32::NAN),
        ]);
        assert_eq!(dist.top().map(|r| r.label.as_str()), Some("B"));
        assert_eq!(Distribution::default().top(), None);
    }

    #[test]
    fn test_asl_label_set() {
        let labels = LabelSet::asl();
        assert_eq!(labels.len(), 28);
        assert_eq!(labels.get(0), Some("A"));
        assert_eq!(labels.get(26), Some("SPACE"));
        assert!(labels.contains("NOTHING"));
        assert!(!labels.contains("a"));
    }

    #[test]
    fn test_dense_probabilities_mapped_in_order() {
        let labels = LabelSet::new(["A", "B", "NOTHING"]);
        let dist = labels.distribution(&[0.1, 0.7, 0.2]).unwrap();
        assert_eq!(dist.probability("B"), Some(0.7));
        assert_eq!(dist.top().map(|r| r.label.as_str()), Some("B"));
    }

    #[test]
    fn test_length_mismatch_is_unavailable() {
        let labels = LabelSet::new(["A", "B"]);
        assert!(matches!(
            labels.distribution(&[1.0]),
            Err(RecognitionError::ClassifierUnavailable(_))
        ));
    }
}
