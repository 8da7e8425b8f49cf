//! Classifier integration - hands features to JS, takes model output back
//!
//! The model runs in JavaScript (onnxruntime-web). Rust prepares the
//! `[1, 3, 21]` input tensor and interprets the softmax output.

use wasm_bindgen::prelude::*;

use super::session::{dispatch_events, with_state};
use crate::classifier::{LabelSet, FEATURE_LEN};
use crate::error::RecognitionError;
use crate::pipeline::FrameOutcome;

/// Called from JS when the model is loaded
#[wasm_bindgen]
pub fn set_classifier_ready() {
    with_state(|state| state.model_ready = true);
    log::info!("sign classifier ready");
}

#[wasm_bindgen]
pub fn is_classifier_ready() -> bool {
    with_state(|state| state.model_ready)
}

/// Replace the model's output labels (defaults to A-Z, SPACE, NOTHING)
#[wasm_bindgen]
pub fn set_labels(labels: JsValue) -> Result<(), JsValue> {
    let labels: Vec<String> = serde_wasm_bindgen::from_value(labels)?;
    if labels.is_empty() {
        return Err(JsValue::from_str("label list is empty"));
    }
    log::debug!("classifier labels set ({} classes)", labels.len());
    with_state(|state| state.labels = LabelSet::new(labels));
    Ok(())
}

/// Take the pending input tensor, channel-major `[x; 21] [y; 21] [c; 21]`
#[wasm_bindgen]
pub fn get_feature_buffer() -> Option<Vec<f32>> {
    with_state(|state| {
        let features = state.pending.take()?;
        state.awaiting_result = true;
        let flat = features.as_flat();
        debug_assert_eq!(flat.len(), FEATURE_LEN);
        Some(flat)
    })
}

#[wasm_bindgen]
pub fn is_inference_pending() -> bool {
    with_state(|state| state.pending.is_some())
}

/// Model output: one probability per label, in label order
#[wasm_bindgen]
pub fn set_classification_result(probabilities: &[f32]) {
    let outcome = with_state(|state| {
        if !state.awaiting_result {
            log::warn!("classification result with no inference in flight, ignored");
            return None;
        }
        state.awaiting_result = false;
        let distribution = state.labels.distribution(probabilities);
        Some(state.recognizer.accept(distribution))
    });

    if let Some(FrameOutcome::Evaluated { completed: true, .. }) = outcome {
        log::info!("lesson complete");
    }
    dispatch_events();
}

/// The model threw; the round counts as a classifier failure
#[wasm_bindgen]
pub fn set_classifier_failed(reason: &str) {
    with_state(|state| {
        if !state.awaiting_result {
            return;
        }
        state.awaiting_result = false;
        state
            .recognizer
            .accept(Err(RecognitionError::ClassifierUnavailable(reason.to_string())));
    });
}
