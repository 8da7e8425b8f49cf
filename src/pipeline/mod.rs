//! Pipeline module - per-frame orchestration, event delivery, frame worker
//!
//! Re-exports only. All logic in submodules.

mod events;
mod recognizer;
#[cfg(not(target_arch = "wasm32"))]
mod worker;

pub use events::{EventPublisher, EventReceiver, SignEvent};
pub use recognizer::{Admission, FrameOutcome, Recognizer};
#[cfg(not(target_arch = "wasm32"))]
pub use worker::{FrameWorker, SharedRecognizer, WorkerStats};
