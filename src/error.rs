//! Error types for the recognition pipeline
//!
//! None of these are fatal. Geometry and classifier errors mean "skip this
//! frame"; configuration errors are reported once, before a session starts.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::landmarks::Joint;

/// Why a frame's hand geometry could not be turned into features
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryFault {
    #[error("hand confidence {confidence:.2} does not exceed floor {floor:.2}")]
    LowHandConfidence { confidence: f32, floor: f32 },

    #[error("reference joint {0:?} missing or below confidence floor")]
    ReferenceJointMissing(Joint),

    #[error("only {valid} valid joints, {required} required")]
    TooFewValidJoints { valid: usize, required: usize },
}

/// Per-frame recognition errors, all recovered locally
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecognitionError {
    #[error("insufficient geometry: {0}")]
    InsufficientGeometry(#[from] GeometryFault),

    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),
}

/// Invalid recognizer configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("min_support {min_support} cannot exceed window {window}")]
    SupportExceedsWindow { min_support: usize, window: usize },

    #[error("max_plane_correction must be at least 1, got {0}")]
    CorrectionBelowOne(f32),

    #[error("min_valid_joints {0} exceeds the 21 tracked joints")]
    TooManyRequiredJoints(usize),

    #[error("unknown profile '{0}' (expected 'permissive' or 'strict')")]
    UnknownProfile(String),

    #[error("invalid config object: {0}")]
    Malformed(String),
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<RecognitionError> for JsValue {
    fn from(err: RecognitionError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
