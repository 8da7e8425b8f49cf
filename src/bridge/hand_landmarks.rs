//! Hand landmark intake from the JS landmark detector
//!
//! The detector hands over `[x, y, confidence] × 21` per hand, packed back
//! to back. Only the first hand is recognized.

use wasm_bindgen::prelude::*;

use super::session::with_state;
use crate::landmarks::{Frame, HandObservation, FLAT_HAND_LEN};
use crate::pipeline::Admission;

/// Feed one video frame's landmarks.
///
/// Returns true when features are ready for `get_feature_buffer`.
#[wasm_bindgen]
pub fn apply_hand_landmarks(flat_data: &[f32], num_hands: usize, hand_confidence: f32, timestamp_ms: f64) -> bool {
    if num_hands == 0 {
        clear_hand(timestamp_ms);
        return false;
    }
    if flat_data.len() < FLAT_HAND_LEN {
        log::warn!(
            "hand landmark buffer too short: {} values, need {}",
            flat_data.len(),
            FLAT_HAND_LEN
        );
        return false;
    }

    let hand = HandObservation::from_flat(&flat_data[..FLAT_HAND_LEN], hand_confidence);
    submit(Frame::new(timestamp_ms / 1000.0, hand))
}

/// The detector saw no hand this frame
#[wasm_bindgen]
pub fn clear_hand(timestamp_ms: f64) {
    submit(Frame::empty(timestamp_ms / 1000.0));
}

fn submit(frame: Frame) -> bool {
    with_state(|state| {
        if !state.capturing || !state.model_ready {
            return false;
        }
        // One inference in flight at a time
        if state.awaiting_result || state.pending.is_some() {
            return false;
        }

        match state.recognizer.admit(&frame) {
            Admission::Infer(features) => {
                state.pending = Some(features);
                true
            }
            Admission::NoHand | Admission::Rejected(_) | Admission::Throttled => false,
        }
    })
}

#[cfg(test)]
pub(in crate::bridge) mod tests {
    use super::*;
    use crate::bridge::session::start_session;
    use crate::landmarks::JOINT_COUNT;

    /// 21 distinct points on a 5-wide grid, all confident
    pub(in crate::bridge) fn flat_palm() -> Vec<f32> {
        let mut data = Vec::with_capacity(FLAT_HAND_LEN);
        for i in 0..JOINT_COUNT {
            let column = (i % 5) as f32;
            let row = (i / 5) as f32;
            data.extend_from_slice(&[0.3 + 0.05 * column, 0.3 + 0.05 * row, 0.9]);
        }
        data
    }

    #[test]
    fn test_frames_ignored_until_model_ready() {
        start_session(0.0);
        with_state(|s| s.model_ready = false);
        assert!(!apply_hand_landmarks(&flat_palm(), 1, 0.9, 500.0));
    }

    #[test]
    fn test_short_buffer_rejected() {
        start_session(0.0);
        with_state(|s| s.model_ready = true);
        assert!(!apply_hand_landmarks(&[0.5; 10], 1, 0.9, 500.0));
        with_state(|s| assert!(s.pending.is_none()));
    }

    #[test]
    fn test_valid_hand_queues_features_once() {
        start_session(0.0);
        with_state(|s| s.model_ready = true);
        assert!(apply_hand_landmarks(&flat_palm(), 1, 0.9, 500.0));
        // Pending features block further frames
        assert!(!apply_hand_landmarks(&flat_palm(), 1, 0.9, 1000.0));
        with_state(|s| assert!(s.pending.is_some()));
    }
}
