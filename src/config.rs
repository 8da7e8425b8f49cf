//! Recognizer configuration and built-in profiles
//!
//! Every threshold of the pipeline is a plain field here. Two presets are
//! provided: `permissive` (short window, low floors, as shipped in the first
//! practice screen) and `strict` (longer window, higher floors, plane
//! correction). Both are configurations of the same pipeline.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::landmarks::JOINT_COUNT;

/// Landmark normalizer and feature gate thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Overall hand confidence must exceed this
    pub hand_confidence_floor: f32,
    /// Wrist, index MCP and pinky MCP confidence must exceed this
    pub reference_confidence_floor: f32,
    /// A joint enters the feature vector only above this confidence
    pub joint_confidence_floor: f32,
    /// Minimum number of admitted joints per frame
    pub min_valid_joints: usize,
    /// Lower bound on the index-pinky hand width
    pub min_hand_scale: f32,
    /// Correct palm foreshortening from the wrist/index/pinky triangle
    pub plane_correction: bool,
    /// Expected sine of the index/pinky spread angle for a frontal palm
    pub reference_palm_spread: f32,
    /// Upper bound on the perspective-correction scalar
    pub max_plane_correction: f32,
    /// Rotate so the wrist→knuckles axis points along +y
    pub align_rotation: bool,
}

impl NormalizerConfig {
    pub fn permissive() -> Self {
        Self {
            hand_confidence_floor: 0.3,
            reference_confidence_floor: 0.2,
            joint_confidence_floor: 0.2,
            min_valid_joints: 12,
            min_hand_scale: 0.1,
            plane_correction: false,
            reference_palm_spread: 0.5,
            max_plane_correction: 2.0,
            align_rotation: false,
        }
    }

    pub fn strict() -> Self {
        Self {
            hand_confidence_floor: 0.5,
            reference_confidence_floor: 0.3,
            joint_confidence_floor: 0.3,
            min_valid_joints: 15,
            min_hand_scale: 0.001,
            plane_correction: true,
            reference_palm_spread: 0.5,
            max_plane_correction: 2.0,
            align_rotation: true,
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Temporal consensus thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoterConfig {
    /// History window length N
    pub window: usize,
    /// Occurrences of the majority label required within the window
    pub min_support: usize,
    /// Results at or below this probability are discarded and reset stability
    pub min_confidence: f32,
    /// Mean probability of the majority label must exceed this
    pub min_aggregate_confidence: f32,
    /// Consecutive qualifying rounds before an event is emitted
    pub stability_rounds: u32,
}

impl VoterConfig {
    pub fn permissive() -> Self {
        Self {
            window: 2,
            min_support: 2,
            min_confidence: 0.4,
            min_aggregate_confidence: 0.7,
            stability_rounds: 1,
        }
    }

    pub fn strict() -> Self {
        Self {
            window: 10,
            min_support: 5,
            min_confidence: 0.6,
            min_aggregate_confidence: 0.75,
            stability_rounds: 3,
        }
    }
}

impl Default for VoterConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Lesson completion thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    /// An event counts toward completion only at or above this confidence
    pub required_confidence: f32,
    /// Consecutive matching events needed to complete the lesson
    pub required_consecutive: u32,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            required_confidence: 0.85,
            required_consecutive: 3,
        }
    }
}

/// Full pipeline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub normalizer: NormalizerConfig,
    /// Minimum seconds between classifier invocations
    pub throttle_interval_secs: f64,
    pub voter: VoterConfig,
    pub lesson: LessonConfig,
}

impl RecognizerConfig {
    pub fn permissive() -> Self {
        Self {
            normalizer: NormalizerConfig::permissive(),
            throttle_interval_secs: 0.1,
            voter: VoterConfig::permissive(),
            lesson: LessonConfig::default(),
        }
    }

    pub fn strict() -> Self {
        Self {
            normalizer: NormalizerConfig::strict(),
            throttle_interval_secs: 0.1,
            voter: VoterConfig::strict(),
            lesson: LessonConfig::default(),
        }
    }

    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Permissive => Self::permissive(),
            Profile::Strict => Self::strict(),
        }
    }

    /// Check every threshold is usable before a session starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = &self.normalizer;
        unit("hand_confidence_floor", n.hand_confidence_floor)?;
        unit("reference_confidence_floor", n.reference_confidence_floor)?;
        unit("joint_confidence_floor", n.joint_confidence_floor)?;
        if n.min_valid_joints > JOINT_COUNT {
            return Err(ConfigError::TooManyRequiredJoints(n.min_valid_joints));
        }
        positive("min_hand_scale", n.min_hand_scale)?;
        if n.plane_correction {
            positive("reference_palm_spread", n.reference_palm_spread)?;
            if n.max_plane_correction < 1.0 || !n.max_plane_correction.is_finite() {
                return Err(ConfigError::CorrectionBelowOne(n.max_plane_correction));
            }
        }

        if self.throttle_interval_secs < 0.0 || !self.throttle_interval_secs.is_finite() {
            return Err(ConfigError::NotPositive { field: "throttle_interval_secs" });
        }

        let v = &self.voter;
        if v.window == 0 {
            return Err(ConfigError::NotPositive { field: "window" });
        }
        if v.min_support == 0 {
            return Err(ConfigError::NotPositive { field: "min_support" });
        }
        if v.min_support > v.window {
            return Err(ConfigError::SupportExceedsWindow {
                min_support: v.min_support,
                window: v.window,
            });
        }
        unit("min_confidence", v.min_confidence)?;
        unit("min_aggregate_confidence", v.min_aggregate_confidence)?;
        if v.stability_rounds == 0 {
            return Err(ConfigError::NotPositive { field: "stability_rounds" });
        }

        unit("required_confidence", self.lesson.required_confidence)?;
        if self.lesson.required_consecutive == 0 {
            return Err(ConfigError::NotPositive { field: "required_consecutive" });
        }
        Ok(())
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field })
    }
}

/// Named preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Permissive,
    Strict,
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(Profile::Permissive),
            "strict" => Ok(Profile::Strict),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert_eq!(RecognizerConfig::permissive().validate(), Ok(()));
        assert_eq!(RecognizerConfig::strict().validate(), Ok(()));
    }

    #[test]
    fn test_strict_is_stricter() {
        let p = RecognizerConfig::permissive();
        let s = RecognizerConfig::strict();
        assert!(s.normalizer.min_valid_joints > p.normalizer.min_valid_joints);
        assert!(s.normalizer.joint_confidence_floor > p.normalizer.joint_confidence_floor);
        assert!(s.voter.window > p.voter.window);
        assert!(s.voter.min_confidence > p.voter.min_confidence);
    }

    #[test]
    fn test_support_exceeding_window_rejected() {
        let mut config = RecognizerConfig::permissive();
        config.voter.min_support = 3;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SupportExceedsWindow { min_support: 3, window: 2 })
        );
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut config = RecognizerConfig::strict();
        config.voter.min_aggregate_confidence = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfUnitRange { .. })));

        let mut config = RecognizerConfig::strict();
        config.throttle_interval_secs = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { .. })));

        let mut config = RecognizerConfig::strict();
        config.normalizer.min_valid_joints = 22;
        assert_eq!(config.validate(), Err(ConfigError::TooManyRequiredJoints(22)));
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("Strict".parse::<Profile>(), Ok(Profile::Strict));
        assert_eq!(" permissive ".parse::<Profile>(), Ok(Profile::Permissive));
        assert!(matches!("loose".parse::<Profile>(), Err(ConfigError::UnknownProfile(_))));
    }
}
