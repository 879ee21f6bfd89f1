use serde::{Deserialize, Serialize};

use crate::generator::Verdict;

/// Running counters for the current session. Kept in memory only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: u32,
    pub correct: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: Verdict) {
        self.answered += 1;
        match verdict {
            Verdict::Correct => {
                self.correct += 1;
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
            }
            Verdict::Incorrect => self.streak = 0,
        }
    }

    pub fn incorrect(&self) -> u32 {
        self.answered - self.correct
    }

    pub fn accuracy(&self) -> f32 {
        if self.answered == 0 {
            return 0.0;
        }
        self.correct as f32 / self.answered as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tracks_counts_and_streaks() {
        let mut stats = SessionStats::new();
        stats.record(Verdict::Correct);
        stats.record(Verdict::Correct);
        stats.record(Verdict::Incorrect);
        stats.record(Verdict::Correct);
        assert_eq!(stats.answered, 4);
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.incorrect(), 1);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.best_streak, 2);
        assert_relative_eq!(stats.accuracy(), 0.75);
    }

    #[test]
    fn empty_session_has_zero_accuracy() {
        assert_relative_eq!(SessionStats::new().accuracy(), 0.0);
    }
}
