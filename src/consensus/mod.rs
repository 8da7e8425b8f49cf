//! Consensus module - temporal voting and stability hysteresis
//!
//! Re-exports only. All logic in submodules.

mod stability;
mod voter;

pub use stability::StabilityState;
pub use voter::{ConsensusVoter, RecognitionEvent, Tally, Verdict};
