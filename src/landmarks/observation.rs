//! Hand observations as delivered by the landmark detector
//!
//! One `HandObservation` per video frame. Joints the detector did not report
//! are simply absent; nothing here fails on partial input.

use super::joints::{Joint, JOINT_COUNT};

/// Flat layout length: 21 joints × (x, y, confidence)
pub const FLAT_HAND_LEN: usize = JOINT_COUNT * 3;

/// A single detected joint (frame-normalized coordinates)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointObservation {
    pub joint: Joint,
    pub x: f32,
    pub y: f32,
    /// Detector confidence in [0, 1]
    pub confidence: f32,
}

impl JointObservation {
    pub fn new(joint: Joint, x: f32, y: f32, confidence: f32) -> Self {
        Self { joint, x, y, confidence }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// All joints detected for one hand in one frame
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    /// Overall hand-detection confidence
    pub confidence: f32,
    joints: [Option<JointObservation>; JOINT_COUNT],
}

impl HandObservation {
    /// Empty observation: no joints detected yet
    pub fn new(confidence: f32) -> Self {
        Self {
            confidence,
            joints: [None; JOINT_COUNT],
        }
    }

    /// Record a joint, replacing any earlier observation of the same joint
    pub fn set(&mut self, observation: JointObservation) {
        self.joints[observation.joint.index()] = Some(observation);
    }

    pub fn with_joint(mut self, joint: Joint, x: f32, y: f32, confidence: f32) -> Self {
        self.set(JointObservation::new(joint, x, y, confidence));
        self
    }

    pub fn get(&self, joint: Joint) -> Option<&JointObservation> {
        self.joints[joint.index()].as_ref()
    }

    /// Detected joints in canonical order
    pub fn joints(&self) -> impl Iterator<Item = &JointObservation> {
        self.joints.iter().flatten()
    }

    pub fn detected_count(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }

    /// Parse a flat `[x, y, confidence] × 21` array.
    ///
    /// Short input leaves the trailing joints absent. Entries with non-finite
    /// values are treated as undetected.
    pub fn from_flat(data: &[f32], confidence: f32) -> Self {
        let mut hand = Self::new(confidence);
        for (joint, chunk) in Joint::ALL.iter().zip(data.chunks_exact(3)) {
            let (x, y, c) = (chunk[0], chunk[1], chunk[2]);
            if x.is_finite() && y.is_finite() && c.is_finite() {
                hand.set(JointObservation::new(*joint, x, y, c.clamp(0.0, 1.0)));
            }
        }
        hand
    }
}

/// One frame from the frame source
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Capture time in seconds
    pub timestamp: f64,
    /// `None` when no hand was detected (occluded or out of view)
    pub hand: Option<HandObservation>,
}

impl Frame {
    pub fn new(timestamp: f64, hand: HandObservation) -> Self {
        Self { timestamp, hand: Some(hand) }
    }

    pub fn empty(timestamp: f64) -> Self {
        Self { timestamp, hand: None }
    }
}
