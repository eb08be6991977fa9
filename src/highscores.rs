//! Best results leaderboard
//!
//! Kept in memory for the lifetime of the process and shown on the menu.

use serde::{Deserialize, Serialize};

use crate::sim::{GameMode, SessionSummary};

/// Maximum number of results to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub mode: GameMode,
    /// Level reached
    pub level: u32,
    pub victory: bool,
}

impl From<&SessionSummary> for HighScoreEntry {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            score: summary.score,
            mode: summary.mode,
            level: summary.level,
            victory: summary.victory,
        }
    }
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished session.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn record(&mut self, summary: &SessionSummary) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }

        // Ties go below existing entries
        let pos = self.entries.iter().position(|e| summary.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, summary.into());
                i + 1
            }
            None => {
                self.entries.push(summary.into());
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("New best result #{} ({} points)", rank, summary.score);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u64) -> SessionSummary {
        SessionSummary {
            mode: GameMode::Basic,
            score,
            level: 1,
            lives: 0,
            victory: false,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut hs = HighScores::new();
        assert_eq!(hs.record(&summary(0)), None);
        assert!(hs.is_empty());
    }

    #[test]
    fn test_sorted_best_first() {
        let mut hs = HighScores::new();
        assert_eq!(hs.record(&summary(300)), Some(1));
        assert_eq!(hs.record(&summary(500)), Some(1));
        assert_eq!(hs.record(&summary(400)), Some(2));
        let scores: Vec<u64> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![500, 400, 300]);
        assert_eq!(hs.top_score(), Some(500));
    }

    #[test]
    fn test_truncates_to_max() {
        let mut hs = HighScores::new();
        for i in 1..=(MAX_HIGH_SCORES as u64 + 2) {
            hs.record(&summary(i * 100));
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        // Lowest surviving score must be beaten to get in
        assert!(!hs.qualifies(300));
        assert!(hs.qualifies(800));
        assert_eq!(hs.record(&summary(100)), None);
    }
}
