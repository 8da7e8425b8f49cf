//! Session state shared by the bridge entry points
//!
//! One recognizer per page. JS drives it in this order:
//! `start_session` → per video frame `apply_hand_landmarks` →
//! `get_feature_buffer` → model → `set_classification_result`.
//! Recognition and completion callbacks fire after each accepted result.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::classifier::{FeatureVector, LabelSet};
use crate::config::{Profile, RecognizerConfig};
use crate::error::ConfigError;
use crate::pipeline::{EventReceiver, Recognizer, SignEvent};

pub(super) struct BridgeState {
    pub recognizer: Recognizer,
    events: EventReceiver,
    /// Features waiting for JS to pick them up
    pub pending: Option<FeatureVector>,
    /// Features handed out, result not back yet
    pub awaiting_result: bool,
    pub labels: LabelSet,
    pub model_ready: bool,
    pub capturing: bool,
    on_recognition: Option<js_sys::Function>,
    on_complete: Option<js_sys::Function>,
}

impl Default for BridgeState {
    fn default() -> Self {
        let mut recognizer = Recognizer::from_profile(Profile::Permissive);
        let events = recognizer.subscribe();
        Self {
            recognizer,
            events,
            pending: None,
            awaiting_result: false,
            labels: LabelSet::asl(),
            model_ready: false,
            capturing: false,
            on_recognition: None,
            on_complete: None,
        }
    }
}

thread_local! {
    static BRIDGE_STATE: RefCell<BridgeState> = RefCell::new(BridgeState::default());
}

pub(super) fn with_state<R>(f: impl FnOnce(&mut BridgeState) -> R) -> R {
    BRIDGE_STATE.with(|state_cell| f(&mut state_cell.borrow_mut()))
}

/// Deliver queued events to the registered callbacks.
///
/// Callbacks run after the state borrow is released, so they may call
/// back into the bridge.
pub(super) fn dispatch_events() {
    let (events, on_recognition, on_complete) = with_state(|state| {
        let events: Vec<SignEvent> = state.events.try_iter().collect();
        (events, state.on_recognition.clone(), state.on_complete.clone())
    });

    for event in events {
        let callback = match &event {
            SignEvent::Recognized(_) => on_recognition.as_ref(),
            SignEvent::LessonCompleted { .. } => on_complete.as_ref(),
        };
        let Some(callback) = callback else {
            continue;
        };
        let payload = match serde_wasm_bindgen::to_value(&event) {
            Ok(payload) => payload,
            Err(err) => {
                log::error!("could not serialize {:?}: {}", event, err);
                continue;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
            web_sys::console::error_2(&"event callback threw:".into(), &err);
        }
    }
}

// ============================================================================
// SESSION CONTROL
// ============================================================================

/// Camera started. `now_ms` is the clock used for landmark timestamps.
#[wasm_bindgen]
pub fn start_session(now_ms: f64) {
    with_state(|state| {
        state.recognizer.start_session(now_ms / 1000.0);
        state.pending = None;
        state.awaiting_result = false;
        state.capturing = true;
    });
}

/// Camera stopped. A result already in flight is still accepted.
#[wasm_bindgen]
pub fn stop_session() {
    with_state(|state| {
        state.capturing = false;
        state.pending = None;
    });
    log::info!("recognition session stopped");
}

#[wasm_bindgen]
pub fn start_lesson(target: &str) {
    with_state(|state| state.recognizer.start_lesson(target));
}

#[wasm_bindgen]
pub fn is_lesson_complete() -> bool {
    with_state(|state| {
        state
            .recognizer
            .lesson()
            .map(|lesson| lesson.is_completed())
            .unwrap_or(false)
    })
}

/// Switch to a built-in threshold profile ("permissive" or "strict")
#[wasm_bindgen]
pub fn use_profile(name: &str) -> Result<(), JsValue> {
    let profile: Profile = name.parse()?;
    apply_config(RecognizerConfig::for_profile(profile))?;
    log::info!("using {:?} profile", profile);
    Ok(())
}

/// Apply a config object; missing fields take permissive defaults
#[wasm_bindgen]
pub fn configure(config: JsValue) -> Result<(), JsValue> {
    let config: RecognizerConfig =
        serde_wasm_bindgen::from_value(config).map_err(|err| ConfigError::Malformed(err.to_string()))?;
    apply_config(config)?;
    Ok(())
}

fn apply_config(config: RecognizerConfig) -> Result<(), ConfigError> {
    with_state(|state| {
        state.recognizer.reconfigure(config)?;
        state.pending = None;
        state.awaiting_result = false;
        Ok(())
    })
}

/// Current stability streak as `{ label, rounds }`
#[wasm_bindgen]
pub fn get_stability() -> JsValue {
    with_state(|state| serde_wasm_bindgen::to_value(state.recognizer.stability()).unwrap_or(JsValue::NULL))
}

// ============================================================================
// CALLBACKS
// ============================================================================

/// Called with `{ kind: "recognized", label, confidence }`
#[wasm_bindgen]
pub fn on_recognition(callback: js_sys::Function) {
    with_state(|state| state.on_recognition = Some(callback));
}

/// Called once per lesson with `{ kind: "lesson_completed", target }`
#[wasm_bindgen]
pub fn on_lesson_complete(callback: js_sys::Function) {
    with_state(|state| state.on_complete = Some(callback));
}
