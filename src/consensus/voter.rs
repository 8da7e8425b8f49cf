//! Temporal consensus voter
//!
//! Turns noisy per-round classifier outputs into debounced recognition
//! events. Two gates must both hold before anything is emitted:
//! - window majority: the most frequent label in the last N results has
//!   enough support and a high enough mean probability
//! - stability: that same majority held for several consecutive rounds
//!
//! Ties in occurrence count go to the label inserted most recently.

use serde::Serialize;

use super::stability::StabilityState;
use crate::classifier::{ClassificationResult, PredictionHistory};
use crate::config::VoterConfig;

/// A debounced recognition
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecognitionEvent {
    pub label: String,
    /// Mean probability of the label across the window
    pub confidence: f32,
}

/// Occurrence statistics of one label within the window
#[derive(Clone, Debug, PartialEq)]
pub struct Tally {
    pub label: String,
    pub count: usize,
    pub mean_probability: f32,
    /// History index of the most recent occurrence
    pub last_seen: usize,
}

/// What one voting round decided
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    /// Result not above the confidence floor; not recorded, streak broken
    Discarded { probability: f32 },
    /// Majority label lacks support in the window
    NoConsensus { label: String, support: usize },
    /// Majority label's mean probability too low
    LowAgreement { label: String, confidence: f32 },
    /// Qualifying round, not yet stable
    Settling { label: String, rounds: u32 },
    Recognized(RecognitionEvent),
}

impl Verdict {
    pub fn event(&self) -> Option<&RecognitionEvent> {
        match self {
            Verdict::Recognized(event) => Some(event),
            _ => None,
        }
    }
}

/// Sliding-window majority vote with stability hysteresis
pub struct ConsensusVoter {
    config: VoterConfig,
    history: PredictionHistory,
    stability: StabilityState,
}

impl ConsensusVoter {
    pub fn new(config: VoterConfig) -> Self {
        Self {
            history: PredictionHistory::new(config.window),
            stability: StabilityState::new(),
            config,
        }
    }

    /// Run one voting round with the top-ranked result of a classifier call
    pub fn observe(&mut self, result: ClassificationResult) -> Verdict {
        if result.probability.is_nan() || result.probability <= self.config.min_confidence {
            self.stability.break_streak();
            return Verdict::Discarded {
                probability: result.probability,
            };
        }

        self.history.push(result);

        let Some(tally) = self.majority() else {
            self.stability.break_streak();
            return Verdict::NoConsensus {
                label: String::new(),
                support: 0,
            };
        };

        if tally.count < self.config.min_support {
            self.stability.break_streak();
            return Verdict::NoConsensus {
                label: tally.label,
                support: tally.count,
            };
        }

        if tally.mean_probability <= self.config.min_aggregate_confidence {
            self.stability.break_streak();
            return Verdict::LowAgreement {
                label: tally.label,
                confidence: tally.mean_probability,
            };
        }

        let rounds = self.stability.advance(&tally.label);
        if rounds < self.config.stability_rounds {
            log::trace!("'{}' settling ({}/{})", tally.label, rounds, self.config.stability_rounds);
            return Verdict::Settling {
                label: tally.label,
                rounds,
            };
        }

        log::debug!(
            "recognized '{}' at {:.2} ({} of {}, {} rounds)",
            tally.label,
            tally.mean_probability,
            tally.count,
            self.history.len(),
            rounds
        );
        Verdict::Recognized(RecognitionEvent {
            label: tally.label,
            confidence: tally.mean_probability,
        })
    }

    /// Most frequent label in the window.
    ///
    /// Equal counts resolve to the label whose latest occurrence is newest.
    pub fn majority(&self) -> Option<Tally> {
        let mut tallies: Vec<(Tally, f32)> = Vec::new();
        for (i, r) in self.history.iter().enumerate() {
            match tallies.iter_mut().find(|(t, _)| t.label == r.label) {
                Some((tally, sum)) => {
                    tally.count += 1;
                    tally.last_seen = i;
                    *sum += r.probability;
                }
                None => tallies.push((
                    Tally {
                        label: r.label.clone(),
                        count: 1,
                        mean_probability: 0.0,
                        last_seen: i,
                    },
                    r.probability,
                )),
            }
        }

        tallies
            .into_iter()
            .max_by(|(a, _), (b, _)| a.count.cmp(&b.count).then(a.last_seen.cmp(&b.last_seen)))
            .map(|(mut tally, sum)| {
                tally.mean_probability = sum / tally.count as f32;
                tally
            })
    }

    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }

    pub fn stability(&self) -> &StabilityState {
        &self.stability
    }

    pub fn config(&self) -> &VoterConfig {
        &self.config
    }

    /// Clear history and stability (session start)
    pub fn reset(&mut self) {
        self.history.clear();
        self.stability.reset();
    }
}

impl Default for ConsensusVoter {
    fn default() -> Self {
        Self::new(VoterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn voter(window: usize, min_support: usize, stability_rounds: u32) -> ConsensusVoter {
        ConsensusVoter::new(VoterConfig {
            window,
            min_support,
            min_confidence: 0.4,
            min_aggregate_confidence: 0.7,
            stability_rounds,
        })
    }

    fn feed(voter: &mut ConsensusVoter, label: &str, p: f32) -> Verdict {
        voter.observe(ClassificationResult::new(label, p))
    }

    #[test]
    fn test_steady_stream_emits_when_support_and_stability_met() {
        let mut v = voter(10, 5, 2);
        let verdicts: Vec<Verdict> = (0..8).map(|_| feed(&mut v, "A", 0.95)).collect();

        // Rounds 1-4: support below 5
        for verdict in &verdicts[..4] {
            assert!(matches!(verdict, Verdict::NoConsensus { .. }));
        }
        // Round 5: support met, first stable round
        assert_eq!(
            verdicts[4],
            Verdict::Settling { label: "A".into(), rounds: 1 }
        );
        // Round 6 onward: recognized every round
        for verdict in &verdicts[5..] {
            let event = verdict.event().unwrap();
            assert_eq!(event.label, "A");
            assert!((event.confidence - 0.95).abs() < 1e-6);
        }
    }

    #[test]
    fn test_low_confidence_discarded_and_breaks_streak() {
        let mut v = voter(3, 2, 2);
        feed(&mut v, "A", 0.9);
        feed(&mut v, "A", 0.9);
        assert_eq!(v.stability().rounds(), 1);

        let verdict = feed(&mut v, "A", 0.3);
        assert_eq!(verdict, Verdict::Discarded { probability: 0.3 });
        assert_eq!(v.stability().rounds(), 0);
        assert_eq!(v.history().len(), 2);

        // Streak restarts from scratch
        assert!(matches!(feed(&mut v, "A", 0.9), Verdict::Settling { rounds: 1, .. }));
        assert!(feed(&mut v, "A", 0.9).event().is_some());
    }

    #[test]
    fn test_result_at_floor_is_discarded() {
        let mut v = ConsensusVoter::new(VoterConfig::permissive());
        assert_eq!(feed(&mut v, "A", 0.4), Verdict::Discarded { probability: 0.4 });
        assert!(v.history().is_empty());
        assert!(matches!(feed(&mut v, "A", 0.41), Verdict::NoConsensus { .. }));
        assert_eq!(v.history().len(), 1);
    }

    #[test]
    fn test_alternating_labels_never_emit() {
        let mut v = voter(10, 6, 1);
        for i in 0..50 {
            let label = if i % 2 == 0 { "A" } else { "B" };
            assert!(feed(&mut v, label, 0.99).event().is_none());
        }
    }

    #[test]
    fn test_low_mean_probability_blocks_event() {
        let mut v = voter(2, 2, 1);
        feed(&mut v, "A", 0.5);
        let verdict = feed(&mut v, "A", 0.6);
        assert!(matches!(verdict, Verdict::LowAgreement { .. }));
        assert_eq!(v.stability().rounds(), 0);
    }

    #[test]
    fn test_majority_change_restarts_stability() {
        let mut v = voter(3, 2, 2);
        feed(&mut v, "A", 0.9);
        feed(&mut v, "A", 0.9);
        assert!(feed(&mut v, "A", 0.9).event().is_some());

        // B takes the majority: counted as a new label, not yet stable
        feed(&mut v, "B", 0.9);
        let verdict = feed(&mut v, "B", 0.9);
        assert_eq!(verdict, Verdict::Settling { label: "B".into(), rounds: 1 });
        assert_eq!(feed(&mut v, "B", 0.9).event().map(|e| e.label.as_str()), Some("B"));
    }

    #[test]
    fn test_tie_goes_to_most_recent_label() {
        let mut v = voter(4, 1, 1);
        feed(&mut v, "A", 0.9);
        feed(&mut v, "B", 0.9);
        feed(&mut v, "B", 0.9);
        feed(&mut v, "A", 0.9);
        let tally = v.majority().unwrap();
        assert_eq!(tally.label, "A");
        assert_eq!(tally.count, 2);

        feed(&mut v, "B", 0.9); // evicts the first A
        assert_eq!(v.majority().unwrap().label, "B");
    }

    #[test]
    fn test_reset_clears_state() {
        let mut v = voter(3, 1, 1);
        feed(&mut v, "A", 0.9);
        v.reset();
        assert!(v.history().is_empty());
        assert_eq!(v.stability().label(), None);
        assert_eq!(v.majority(), None);
    }

    proptest! {
        #[test]
        fn test_low_confidence_never_emits_or_increments(
            labels in proptest::collection::vec((0u8..3, 0.4f32..1.0), 0..30),
            p in 0.0f32..=0.4,
        ) {
            let mut v = voter(5, 2, 1);
            for (l, prob) in &labels {
                feed(&mut v, &l.to_string(), *prob);
            }
            let verdict = feed(&mut v, "A", p);
            prop_assert!(verdict.event().is_none());
            prop_assert_eq!(v.stability().rounds(), 0);
        }

        #[test]
        fn test_majority_is_deterministic(
            labels in proptest::collection::vec(0u8..4, 1..20),
        ) {
            let mut first = voter(8, 1, 1);
            let mut second = voter(8, 1, 1);
            for l in &labels {
                feed(&mut first, &l.to_string(), 0.9);
                feed(&mut second, &l.to_string(), 0.9);
            }
            prop_assert_eq!(first.majority(), second.majority());
        }

        #[test]
        fn test_steady_stream_never_emits_other_label(
            window in 2usize..12,
            stability in 1u32..4,
        ) {
            let min_support = window / 2 + 1;
            let mut v = voter(window, min_support, stability);
            let mut first_event = None;
            for round in 1..=(window + stability as usize + 2) {
                if let Some(event) = feed(&mut v, "A", 0.95).event() {
                    prop_assert_eq!(event.label.as_str(), "A");
                    first_event.get_or_insert(round);
                }
            }
            // Support first holds at round `min_support`, then `stability - 1` more rounds
            prop_assert_eq!(first_event, Some(min_support + stability as usize - 1));
        }
    }
}
