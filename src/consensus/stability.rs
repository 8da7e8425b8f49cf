//! Stability counter - cross-round hysteresis on the majority label
//!
//! A majority only counts once it has held for several consecutive
//! qualifying rounds. A change of majority restarts the count at 1; a
//! non-qualifying round breaks the streak.

use serde::Serialize;

/// Last confirmed majority label and its consecutive-round count
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StabilityState {
    label: Option<String>,
    rounds: u32,
}

impl StabilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a qualifying round for `label`; returns the updated count
    pub fn advance(&mut self, label: &str) -> u32 {
        if self.label.as_deref() == Some(label) {
            self.rounds = self.rounds.saturating_add(1);
        } else {
            self.label = Some(label.to_string());
            self.rounds = 1;
        }
        self.rounds
    }

    /// Non-qualifying round: the streak is over, the label is remembered
    pub fn break_streak(&mut self) {
        self.rounds = 0;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn reset(&mut self) {
        self.label = None;
        self.rounds = 0;
    }
}
