//! Hand joint identities in canonical order
//!
//! The order here is the column order of every feature vector and must match
//! the order the classifier was trained on.

use serde::{Deserialize, Serialize};

/// Number of tracked hand joints
pub const JOINT_COUNT: usize = 21;

/// The 21 anatomical hand joints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Joints that anchor the hand frame: wrist, index base, pinky base
pub const REFERENCE_JOINTS: [Joint; 3] = [Joint::Wrist, Joint::IndexMcp, Joint::PinkyMcp];

impl Joint {
    /// Canonical order (feature vector column order)
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Wrist,
        Joint::ThumbCmc, Joint::ThumbMcp, Joint::ThumbIp, Joint::ThumbTip,
        Joint::IndexMcp, Joint::IndexPip, Joint::IndexDip, Joint::IndexTip,
        Joint::MiddleMcp, Joint::MiddlePip, Joint::MiddleDip, Joint::MiddleTip,
        Joint::RingMcp, Joint::RingPip, Joint::RingDip, Joint::RingTip,
        Joint::PinkyMcp, Joint::PinkyPip, Joint::PinkyDip, Joint::PinkyTip,
    ];

    /// Position in the canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}
