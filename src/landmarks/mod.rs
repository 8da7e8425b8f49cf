//! Landmarks module - per-frame hand observations
//!
//! Re-exports only. All logic in submodules.

mod joints;
mod observation;

pub use joints::{Joint, JOINT_COUNT, REFERENCE_JOINTS};
pub use observation::{Frame, HandObservation, JointObservation, FLAT_HAND_LEN};
