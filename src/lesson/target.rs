//! Target-match state machine
//!
//! Counts consecutive recognition events that match the lesson's target
//! sign with enough confidence. Any other event resets the count. Reaching
//! the required count completes the lesson once and for all.

use serde::Serialize;

use crate::config::LessonConfig;
use crate::consensus::RecognitionEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LessonState {
    Practicing,
    /// Terminal
    Completed,
}

/// Result of feeding one event to the matcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonProgress {
    /// Matching event; `consecutive` correct so far
    Advanced { consecutive: u32 },
    /// Wrong label or not confident enough; count reset
    Reset,
    /// This event completed the lesson
    Completed,
    /// Lesson already completed; event ignored
    Ignored,
}

pub struct TargetMatcher {
    target: String,
    required_confidence: f32,
    required_consecutive: u32,
    consecutive: u32,
    state: LessonState,
}

impl TargetMatcher {
    pub fn new(target: impl Into<String>, config: &LessonConfig) -> Self {
        Self {
            target: target.into(),
            required_confidence: config.required_confidence,
            required_consecutive: config.required_consecutive.max(1),
            consecutive: 0,
            state: LessonState::Practicing,
        }
    }

    /// Feed one emitted recognition event
    pub fn observe(&mut self, event: &RecognitionEvent) -> LessonProgress {
        if self.state == LessonState::Completed {
            return LessonProgress::Ignored;
        }

        if event.label != self.target || event.confidence.is_nan() || event.confidence < self.required_confidence {
            if self.consecutive > 0 {
                log::debug!(
                    "lesson '{}': streak of {} reset by '{}' at {:.2}",
                    self.target,
                    self.consecutive,
                    event.label,
                    event.confidence
                );
            }
            self.consecutive = 0;
            return LessonProgress::Reset;
        }

        self.consecutive += 1;
        if self.consecutive >= self.required_consecutive {
            self.state = LessonState::Completed;
            log::info!("lesson '{}' completed", self.target);
            return LessonProgress::Completed;
        }
        LessonProgress::Advanced {
            consecutive: self.consecutive,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> LessonState {
        self.state
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    pub fn is_completed(&self) -> bool {
        self.state == LessonState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(label: &str, confidence: f32) -> RecognitionEvent {
        RecognitionEvent {
            label: label.to_string(),
            confidence,
        }
    }

    fn matcher() -> TargetMatcher {
        TargetMatcher::new("A", &LessonConfig::default())
    }

    #[test]
    fn test_three_consecutive_matches_complete() {
        let mut m = matcher();
        assert_eq!(m.observe(&event("A", 0.9)), LessonProgress::Advanced { consecutive: 1 });
        assert_eq!(m.observe(&event("A", 0.9)), LessonProgress::Advanced { consecutive: 2 });
        assert_eq!(m.observe(&event("A", 0.9)), LessonProgress::Completed);
        assert_eq!(m.state(), LessonState::Completed);
    }

    #[test]
    fn test_interruption_resets_count() {
        let mut m = matcher();
        m.observe(&event("A", 0.9));
        assert_eq!(m.observe(&event("B", 0.9)), LessonProgress::Reset);
        assert_eq!(m.consecutive(), 0);
        m.observe(&event("A", 0.9));
        assert_eq!(m.state(), LessonState::Practicing);
        assert_eq!(m.consecutive(), 1);
    }

    #[test]
    fn test_low_confidence_match_resets() {
        let mut m = matcher();
        m.observe(&event("A", 0.9));
        m.observe(&event("A", 0.9));
        assert_eq!(m.observe(&event("A", 0.84)), LessonProgress::Reset);
        // Threshold is inclusive
        assert_eq!(m.observe(&event("A", 0.85)), LessonProgress::Advanced { consecutive: 1 });
    }

    #[test]
    fn test_completion_reported_once() {
        let mut m = matcher();
        for _ in 0..3 {
            m.observe(&event("A", 0.95));
        }
        assert!(m.is_completed());
        assert_eq!(m.observe(&event("A", 0.95)), LessonProgress::Ignored);
        assert_eq!(m.observe(&event("B", 0.95)), LessonProgress::Ignored);
        assert_eq!(m.state(), LessonState::Completed);
    }
}
