//! Interval timers for the non-simulation phases
//!
//! Each timer lives inside the phase variant that owns it. Replacing the phase
//! drops the timer, so a finished phase can never fire again.

use serde::{Deserialize, Serialize};

/// Repeating timer that fires once per `interval_ms` of fed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl Cadence {
    pub fn every(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Add wall-clock time
    pub fn feed(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    /// Consume one due fire, if any
    pub fn poll(&mut self) -> bool {
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}

/// Timed dialogue steps: entry `i` is `(delay before leaving step i, next step)`
///
/// Opening line for 5 s, the exclamation jump for 1 s, then 3 s before the
/// visitor walks in. Later steps are driven by the player.
pub const DIALOGUE_SCHEDULE: &[(u32, u8)] = &[(5000, 1), (1000, 2), (3000, 3)];

/// Pending automatic dialogue advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueCue {
    pub timer: Cadence,
    pub next: u8,
}

impl DialogueCue {
    /// Cue scheduled for `step`, or `None` once the script hands over to the player
    pub fn for_step(step: u8) -> Option<Self> {
        DIALOGUE_SCHEDULE
            .get(step as usize)
            .map(|&(delay_ms, next)| Self {
                timer: Cadence::every(delay_ms),
                next,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_fires_per_interval() {
        let mut timer = Cadence::every(30);
        timer.feed(29);
        assert!(!timer.poll());
        timer.feed(1);
        assert!(timer.poll());
        assert!(!timer.poll());
    }

    #[test]
    fn test_cadence_accumulates_multiple_fires() {
        let mut timer = Cadence::every(30);
        timer.feed(95);
        let fires = std::iter::from_fn(|| timer.poll().then_some(())).count();
        assert_eq!(fires, 3);
        // Remainder carries over
        timer.feed(25);
        assert!(timer.poll());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut timer = Cadence::every(0);
        assert_eq!(timer.interval_ms(), 1);
        timer.feed(2);
        assert!(timer.poll());
        assert!(timer.poll());
        assert!(!timer.poll());
    }

    #[test]
    fn test_dialogue_cues_follow_script() {
        let cue = DialogueCue::for_step(0).unwrap();
        assert_eq!(cue.timer.interval_ms(), 5000);
        assert_eq!(cue.next, 1);
        assert_eq!(DialogueCue::for_step(1).unwrap().next, 2);
        assert_eq!(DialogueCue::for_step(2).unwrap().timer.interval_ms(), 3000);
        assert!(DialogueCue::for_step(3).is_none());
    }
}
