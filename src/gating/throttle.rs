//! Inference throttle - bounds the classifier call rate
//!
//! Landmarks arrive at camera rate (~30 Hz); classification runs at most once
//! per interval. Frames arriving in between are dropped silently.
//!
//! Times are compared as whole microseconds, so a frame exactly one interval
//! after the last evaluation is always due, whatever the float rounding of
//! its timestamp.

const TICKS_PER_SEC: f64 = 1_000_000.0;

fn to_ticks(secs: f64) -> i64 {
    (secs * TICKS_PER_SEC).round() as i64
}

fn to_secs(ticks: i64) -> f64 {
    ticks as f64 / TICKS_PER_SEC
}

/// Minimum-interval gate measured from the last evaluation
pub struct InferenceThrottle {
    /// Minimum microseconds between evaluations
    interval: i64,
    /// Time of the last evaluation (or session start), in microseconds
    last: Option<i64>,
}

impl InferenceThrottle {
    pub fn new(interval: f64) -> Self {
        Self {
            interval: to_ticks(interval.max(0.0)),
            last: None,
        }
    }

    /// Start the clock at session start.
    ///
    /// The first evaluation of a session happens one interval after `now`.
    pub fn arm(&mut self, now: f64) {
        self.last = Some(to_ticks(now));
    }

    /// Whether an evaluation may run at `now`
    pub fn is_due(&self, now: f64) -> bool {
        match self.last {
            None => true,
            Some(last) => to_ticks(now) - last >= self.interval,
        }
    }

    /// Record an evaluation at `now`
    pub fn mark(&mut self, now: f64) {
        self.last = Some(to_ticks(now));
    }

    /// Check and record in one step; returns false when throttled
    pub fn try_acquire(&mut self, now: f64) -> bool {
        if self.is_due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }

    pub fn last_evaluation(&self) -> Option<f64> {
        self.last.map(to_secs)
    }

    pub fn interval(&self) -> f64 {
        to_secs(self.interval)
    }

    /// Forget the last evaluation time
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for InferenceThrottle {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_throttle_is_due() {
        let throttle = InferenceThrottle::new(0.1);
        assert!(throttle.is_due(0.0));
    }

    #[test]
    fn test_armed_throttle_waits_one_interval() {
        let mut throttle = InferenceThrottle::new(0.1);
        throttle.arm(10.0);
        assert!(!throttle.is_due(10.05));
        assert!(throttle.is_due(10.1));
    }

    #[test]
    fn test_exact_interval_from_millisecond_clock_is_due() {
        // Browser timestamps arrive as milliseconds and are divided by 1000
        for start_ms in (0..120_000).step_by(997) {
            let mut throttle = InferenceThrottle::new(0.1);
            throttle.arm(start_ms as f64 / 1000.0);
            assert!(!throttle.is_due((start_ms + 99) as f64 / 1000.0), "{}ms", start_ms);
            assert!(throttle.is_due((start_ms + 100) as f64 / 1000.0), "{}ms", start_ms);
        }
    }

    #[test]
    fn test_last_evaluation_round_trips() {
        let mut throttle = InferenceThrottle::new(0.1);
        throttle.mark(10.1);
        let mut resumed = InferenceThrottle::new(0.25);
        resumed.arm(throttle.last_evaluation().unwrap());
        assert!(!resumed.is_due(10.3));
        assert!(resumed.is_due(10.35));
    }

    #[test]
    fn test_frames_between_evaluations_dropped() {
        let mut throttle = InferenceThrottle::new(0.1);
        let accepted: Vec<bool> = (0..10)
            .map(|i| throttle.try_acquire(i as f64 / 30.0))
            .collect();
        // 30 Hz input, ~10 Hz evaluation: frames 0, 3, 6, 9
        assert_eq!(
            accepted,
            vec![true, false, false, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_reset_makes_due() {
        let mut throttle = InferenceThrottle::new(1.0);
        throttle.mark(5.0);
        assert!(!throttle.is_due(5.5));
        throttle.reset();
        assert!(throttle.is_due(5.5));
        assert_eq!(throttle.last_evaluation(), None);
    }
}
