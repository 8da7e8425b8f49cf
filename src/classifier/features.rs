//! Landmark normalization into the classifier's feature layout
//!
//! Produces a 3 × 21 tensor (x, y, confidence per joint) matching the
//! training data format. Coordinates are expressed in a hand-centric frame:
//! origin at the midpoint of the index and pinky knuckles, unit length equal
//! to the knuckle width. This removes hand position and distance from the
//! camera; optional rotation alignment also removes in-plane rotation.

use nalgebra::{Rotation2, Vector2};

use crate::config::NormalizerConfig;
use crate::error::RecognitionError;
use crate::gating::ConfidenceGate;
use crate::landmarks::{HandObservation, Joint, JOINT_COUNT};

/// Channels per joint: normalized x, normalized y, confidence
pub const CHANNEL_COUNT: usize = 3;

/// Flattened feature length (3 × 21 = 63)
pub const FEATURE_LEN: usize = CHANNEL_COUNT * JOINT_COUNT;

/// Below this a vector length is treated as degenerate
const EPSILON: f32 = 1e-6;

/// Normalized hand geometry for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    /// [channel][joint]
    data: [[f32; JOINT_COUNT]; CHANNEL_COUNT],
    valid: usize,
}

impl FeatureVector {
    fn zeroed() -> Self {
        Self {
            data: [[0.0; JOINT_COUNT]; CHANNEL_COUNT],
            valid: 0,
        }
    }

    /// (x, y, confidence) for a joint; zeros if the joint was not admitted
    pub fn joint(&self, joint: Joint) -> (f32, f32, f32) {
        let i = joint.index();
        (self.data[0][i], self.data[1][i], self.data[2][i])
    }

    pub fn channel(&self, channel: usize) -> Option<&[f32; JOINT_COUNT]> {
        self.data.get(channel)
    }

    /// Number of joints that passed the confidence gate
    pub fn valid_joints(&self) -> usize {
        self.valid
    }

    /// Channel-major flat layout: [x0..x20, y0..y20, c0..c20]
    pub fn as_flat(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(FEATURE_LEN);
        for channel in &self.data {
            result.extend_from_slice(channel);
        }
        result
    }
}

/// Converts raw hand observations into feature vectors
pub struct LandmarkNormalizer {
    gate: ConfidenceGate,
    min_hand_scale: f32,
    /// (reference palm spread, max correction) when plane correction is on
    plane: Option<(f32, f32)>,
    align_rotation: bool,
}

impl LandmarkNormalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            gate: ConfidenceGate::new(config),
            min_hand_scale: config.min_hand_scale,
            plane: config
                .plane_correction
                .then_some((config.reference_palm_spread, config.max_plane_correction)),
            align_rotation: config.align_rotation,
        }
    }

    /// Normalize one frame, or fail with `InsufficientGeometry`
    pub fn normalize(&self, hand: &HandObservation) -> Result<FeatureVector, RecognitionError> {
        let refs = self.gate.admit_hand(hand)?;

        let wrist = Vector2::new(refs.wrist.0, refs.wrist.1);
        let index_mcp = Vector2::new(refs.index_mcp.0, refs.index_mcp.1);
        let pinky_mcp = Vector2::new(refs.pinky_mcp.0, refs.pinky_mcp.1);

        let scale = (index_mcp - pinky_mcp).norm().max(self.min_hand_scale);
        let center = (index_mcp + pinky_mcp) * 0.5;
        let correction = self.plane_correction(wrist, index_mcp, pinky_mcp);
        let rotation = self.alignment(wrist, center);

        let mut features = FeatureVector::zeroed();
        for joint in hand.joints().filter(|j| self.gate.admits(j)) {
            let p = Vector2::new(joint.x, joint.y);
            let local = rotation * ((p - center) / scale) * correction;
            let i = joint.joint.index();
            features.data[0][i] = local.x;
            features.data[1][i] = local.y;
            features.data[2][i] = joint.confidence;
            features.valid += 1;
        }

        self.gate.check_valid_count(features.valid)?;
        Ok(features)
    }

    /// Foreshortening factor `(sine / reference).clamp(1 / max, 1)`.
    ///
    /// The sine of the angle between wrist→index and wrist→pinky (2D cross
    /// product over the norms) shrinks as the palm turns away from the
    /// camera. Normalized coordinates are multiplied by the factor, which
    /// divides by a hand scale inflated by at most `max`.
    fn plane_correction(&self, wrist: Vector2<f32>, index_mcp: Vector2<f32>, pinky_mcp: Vector2<f32>) -> f32 {
        let Some((reference, max)) = self.plane else {
            return 1.0;
        };
        let a = index_mcp - wrist;
        let b = pinky_mcp - wrist;
        let denom = a.norm() * b.norm();
        if denom < EPSILON {
            return 1.0;
        }
        let sine = a.perp(&b).abs() / denom;
        (sine / reference).clamp(max.recip(), 1.0)
    }

    /// Rotation taking the wrist→center axis onto +y
    fn alignment(&self, wrist: Vector2<f32>, center: Vector2<f32>) -> Rotation2<f32> {
        let axis = center - wrist;
        if !self.align_rotation || axis.norm() < EPSILON {
            return Rotation2::identity();
        }
        Rotation2::rotation_between(&axis, &Vector2::y())
    }
}

impl Default for LandmarkNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}
