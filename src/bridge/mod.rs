//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.
//!
//! Per frame, JS calls `apply_hand_landmarks`. When it returns true, JS
//! fetches `get_feature_buffer`, runs the model with onnxruntime-web and
//! reports back with `set_classification_result` (or
//! `set_classifier_failed`). Recognitions and lesson completion arrive
//! through the `on_recognition` / `on_lesson_complete` callbacks, in order.

mod classifier_integration;
mod hand_landmarks;
mod session;

pub use classifier_integration::{
    get_feature_buffer,
    is_classifier_ready,
    is_inference_pending,
    set_classification_result,
    set_classifier_failed,
    set_classifier_ready,
    set_labels,
};

pub use hand_landmarks::{
    apply_hand_landmarks,
    clear_hand,
};

pub use session::{
    configure,
    get_stability,
    is_lesson_complete,
    on_lesson_complete,
    on_recognition,
    start_lesson,
    start_session,
    stop_session,
    use_profile,
};
