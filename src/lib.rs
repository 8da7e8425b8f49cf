//! Fingerspell Web - hand-sign recognition core
//!
//! Turns per-frame hand landmarks into debounced sign recognitions:
//! - `landmarks`: joint identities and per-frame observations
//! - `gating`: confidence gate and inference throttle
//! - `classifier`: feature normalization, model contract, prediction history
//! - `consensus`: sliding-window majority vote with stability hysteresis
//! - `lesson`: target-sign matching until a lesson is complete
//! - `pipeline`: the per-session recognizer, event channel, frame worker
//! - `bridge`: wasm_bindgen entry points for the browser
//!
//! Landmark detection and the model itself run outside this crate.

pub mod bridge;
pub mod classifier;
pub mod config;
pub mod consensus;
pub mod error;
pub mod gating;
pub mod landmarks;
pub mod lesson;
pub mod pipeline;

use wasm_bindgen::prelude::*;

pub use classifier::{ClassificationResult, Classifier, Distribution, FeatureVector, LabelSet};
pub use config::{Profile, RecognizerConfig};
pub use consensus::RecognitionEvent;
pub use error::{ConfigError, GeometryFault, RecognitionError};
pub use landmarks::{Frame, HandObservation, Joint, JointObservation};
pub use pipeline::{FrameOutcome, Recognizer, SignEvent};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize logging: "trace", "debug", "info", "warn" or "error"
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("fingerspell-web {} ready", env!("CARGO_PKG_VERSION"));
}
