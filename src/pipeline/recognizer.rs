//! Recognizer - one practice session's pipeline state
//!
//! Frame flow: observation → normalizer/gate → throttle → classifier →
//! consensus voter → optional event → lesson matcher → optional completion.
//!
//! All mutable session state (history, stability, throttle clock, lesson
//! progress) lives in this struct. Call `start_session` when the camera
//! starts; history and stability are cleared and the throttle clock armed.
//!
//! Gate rejections and frames without a hand do not touch the stability
//! counter. Only classifier rounds (low-confidence or non-qualifying) do.

use crate::classifier::{Classifier, Distribution, FeatureVector, LandmarkNormalizer};
use crate::config::{Profile, RecognizerConfig};
use crate::consensus::{ConsensusVoter, RecognitionEvent, StabilityState};
use crate::error::{ConfigError, RecognitionError};
use crate::gating::InferenceThrottle;
use crate::landmarks::Frame;
use crate::lesson::{LessonProgress, TargetMatcher};

use super::events::{EventPublisher, EventReceiver, SignEvent};

/// First half of a frame evaluation
#[derive(Clone, Debug, PartialEq)]
pub enum Admission {
    NoHand,
    Rejected(RecognitionError),
    /// Valid frame, but the classifier ran too recently
    Throttled,
    /// Classify these features, then call `accept`
    Infer(FeatureVector),
}

/// What happened to one frame
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    NoHand,
    Rejected(RecognitionError),
    Throttled,
    Evaluated {
        event: Option<RecognitionEvent>,
        /// This frame completed the lesson
        completed: bool,
    },
}

impl FrameOutcome {
    pub fn event(&self) -> Option<&RecognitionEvent> {
        match self {
            FrameOutcome::Evaluated { event, .. } => event.as_ref(),
            _ => None,
        }
    }
}

pub struct Recognizer {
    config: RecognizerConfig,
    normalizer: LandmarkNormalizer,
    throttle: InferenceThrottle,
    voter: ConsensusVoter,
    lesson: Option<TargetMatcher>,
    events: EventPublisher,
}

impl Recognizer {
    pub fn new(config: RecognizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Recognizer for a built-in profile (presets always validate)
    pub fn from_profile(profile: Profile) -> Self {
        Self::build(RecognizerConfig::for_profile(profile))
    }

    fn build(config: RecognizerConfig) -> Self {
        Self {
            normalizer: LandmarkNormalizer::new(&config.normalizer),
            throttle: InferenceThrottle::new(config.throttle_interval_secs),
            voter: ConsensusVoter::new(config.voter.clone()),
            lesson: None,
            events: EventPublisher::new(),
            config,
        }
    }

    /// Swap thresholds. History and stability are cleared; the subscription,
    /// the throttle clock and the lesson target survive, lesson progress
    /// restarts.
    pub fn reconfigure(&mut self, config: RecognizerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.normalizer = LandmarkNormalizer::new(&config.normalizer);
        let last_evaluation = self.throttle.last_evaluation();
        self.throttle = InferenceThrottle::new(config.throttle_interval_secs);
        if let Some(last) = last_evaluation {
            self.throttle.arm(last);
        }
        self.voter = ConsensusVoter::new(config.voter.clone());
        if let Some(target) = self.lesson.as_ref().map(|l| l.target().to_string()) {
            self.lesson = Some(TargetMatcher::new(target, &config.lesson));
        }
        self.config = config;
        Ok(())
    }

    /// Clear history and stability, start the throttle clock at `now`
    pub fn start_session(&mut self, now: f64) {
        self.voter.reset();
        self.throttle.arm(now);
        log::info!("recognition session started at {:.3}s", now);
    }

    /// Practice `target` from scratch
    pub fn start_lesson(&mut self, target: impl Into<String>) {
        let matcher = TargetMatcher::new(target, &self.config.lesson);
        log::info!("lesson started for '{}'", matcher.target());
        self.lesson = Some(matcher);
    }

    pub fn end_lesson(&mut self) {
        self.lesson = None;
    }

    /// Open the ordered event stream (replaces any previous subscriber)
    pub fn subscribe(&mut self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Gate, normalize and throttle one frame
    pub fn admit(&mut self, frame: &Frame) -> Admission {
        let Some(hand) = &frame.hand else {
            return Admission::NoHand;
        };

        let features = match self.normalizer.normalize(hand) {
            Ok(features) => features,
            Err(err) => {
                log::trace!("frame at {:.3}s skipped: {}", frame.timestamp, err);
                return Admission::Rejected(err);
            }
        };

        if !self.throttle.try_acquire(frame.timestamp) {
            return Admission::Throttled;
        }
        Admission::Infer(features)
    }

    /// Close a round with the classifier's answer
    pub fn accept(&mut self, result: Result<Distribution, RecognitionError>) -> FrameOutcome {
        let distribution = match result {
            Ok(distribution) => distribution,
            Err(err) => {
                log::warn!("no classification this round: {}", err);
                return FrameOutcome::Rejected(err);
            }
        };

        let Some(top) = distribution.top().cloned() else {
            let err = RecognitionError::ClassifierUnavailable("empty distribution".into());
            log::warn!("no classification this round: {}", err);
            return FrameOutcome::Rejected(err);
        };

        let verdict = self.voter.observe(top);
        let Some(event) = verdict.event().cloned() else {
            return FrameOutcome::Evaluated {
                event: None,
                completed: false,
            };
        };

        self.events.publish(SignEvent::Recognized(event.clone()));

        let completed = match self.lesson.as_mut().map(|lesson| lesson.observe(&event)) {
            Some(LessonProgress::Completed) => {
                let target = self.lesson.as_ref().map(|l| l.target().to_string()).unwrap_or_default();
                self.events.publish(SignEvent::LessonCompleted { target });
                true
            }
            _ => false,
        };

        FrameOutcome::Evaluated {
            event: Some(event),
            completed,
        }
    }

    /// Evaluate one frame end to end with a synchronous classifier
    pub fn process_frame<C: Classifier + ?Sized>(&mut self, frame: &Frame, classifier: &mut C) -> FrameOutcome {
        match self.admit(frame) {
            Admission::NoHand => FrameOutcome::NoHand,
            Admission::Rejected(err) => FrameOutcome::Rejected(err),
            Admission::Throttled => FrameOutcome::Throttled,
            Admission::Infer(features) => {
                let result = classifier.classify(&features);
                self.accept(result)
            }
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn stability(&self) -> &StabilityState {
        self.voter.stability()
    }

    pub fn voter(&self) -> &ConsensusVoter {
        &self.voter
    }

    pub fn lesson(&self) -> Option<&TargetMatcher> {
        self.lesson.as_ref()
    }
}
