//! Confidence Gate - observation quality checks before normalization
//!
//! A frame passes only when the hand itself, the three reference joints and
//! enough of the remaining joints were detected with usable confidence.
//! Low-confidence joints are not an error: they are zero-filled downstream.

use crate::config::NormalizerConfig;
use crate::error::GeometryFault;
use crate::landmarks::{HandObservation, Joint, JointObservation};

/// Positions of the joints that anchor the hand frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceJoints {
    pub wrist: (f32, f32),
    pub index_mcp: (f32, f32),
    pub pinky_mcp: (f32, f32),
}

/// Confidence floors for one hand
pub struct ConfidenceGate {
    /// Overall hand confidence must exceed this
    hand_floor: f32,
    /// Reference joint confidence must exceed this
    reference_floor: f32,
    /// Per-joint admission floor
    joint_floor: f32,
    /// Minimum admitted joints per frame
    min_valid: usize,
}

impl ConfidenceGate {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            hand_floor: config.hand_confidence_floor,
            reference_floor: config.reference_confidence_floor,
            joint_floor: config.joint_confidence_floor,
            min_valid: config.min_valid_joints,
        }
    }

    /// Check hand confidence and the reference joints
    pub fn admit_hand(&self, hand: &HandObservation) -> Result<ReferenceJoints, GeometryFault> {
        if hand.confidence.is_nan() || hand.confidence <= self.hand_floor {
            return Err(GeometryFault::LowHandConfidence {
                confidence: hand.confidence,
                floor: self.hand_floor,
            });
        }

        let reference = |joint: Joint| {
            hand.get(joint)
                .filter(|j| j.confidence > self.reference_floor)
                .map(JointObservation::position)
                .ok_or(GeometryFault::ReferenceJointMissing(joint))
        };

        Ok(ReferenceJoints {
            wrist: reference(Joint::Wrist)?,
            index_mcp: reference(Joint::IndexMcp)?,
            pinky_mcp: reference(Joint::PinkyMcp)?,
        })
    }

    /// Whether a joint may enter the feature vector
    pub fn admits(&self, joint: &JointObservation) -> bool {
        joint.confidence > self.joint_floor && joint.x.is_finite() && joint.y.is_finite()
    }

    /// Reject frames with too few admitted joints
    pub fn check_valid_count(&self, valid: usize) -> Result<(), GeometryFault> {
        if valid < self.min_valid {
            Err(GeometryFault::TooFewValidJoints {
                valid,
                required: self.min_valid,
            })
        } else {
            Ok(())
        }
    }

    pub fn min_valid(&self) -> usize {
        self.min_valid
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}
