//! Gating module - decides which frames reach the classifier
//!
//! Re-exports only. All logic in submodules.

mod confidence_gate;
mod throttle;

pub use confidence_gate::{ConfidenceGate, ReferenceJoints};
pub use throttle::InferenceThrottle;
