//! Score, combo, and progress bookkeeping for a session.

use lane_rush_core::{
    SessionStats, INITIAL_SCORE, MISS_PENALTY, PROGRESS_GOAL, PROGRESS_PENALTY, SCORE_PER_HIT,
};

/// Result of inspecting the counters after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Terminal {
    /// Neither end condition holds.
    Continue,
    /// Progress reached the goal.
    Won,
    /// Score reached zero.
    Lost,
}

/// Counters mutated by hits and misses.
#[derive(Clone, Debug)]
pub(crate) struct ScoreState {
    score: u32,
    progress: f32,
    combo: u32,
    stats: SessionStats,
}

impl ScoreState {
    /// Creates counters for a freshly started session.
    pub(crate) fn new() -> Self {
        Self {
            score: INITIAL_SCORE,
            progress: 0.0,
            combo: 0,
            stats: SessionStats::default(),
        }
    }

    /// Records a hit worth `progress_step` progress.
    pub(crate) fn apply_hit(&mut self, progress_step: f32) {
        self.combo = self.combo.saturating_add(1);
        self.score = self.score.saturating_add(SCORE_PER_HIT);
        self.progress = (self.progress + progress_step).clamp(0.0, PROGRESS_GOAL);
        self.stats.hits = self.stats.hits.saturating_add(1);
        self.stats.max_combo = self.stats.max_combo.max(self.combo);
    }

    /// Records a miss.
    pub(crate) fn apply_miss(&mut self) {
        self.combo = 0;
        self.score = self.score.saturating_sub(MISS_PENALTY);
        self.progress = (self.progress - PROGRESS_PENALTY).clamp(0.0, PROGRESS_GOAL);
        self.stats.misses = self.stats.misses.saturating_add(1);
    }

    /// Inspects the counters for an end condition. Loss takes precedence.
    pub(crate) fn check_terminal(&self) -> Terminal {
        if self.score == 0 {
            Terminal::Lost
        } else if self.progress >= PROGRESS_GOAL {
            Terminal::Won
        } else {
            Terminal::Continue
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn progress(&self) -> f32 {
        self.progress
    }

    pub(crate) fn combo(&self) -> u32 {
        self.combo
    }

    pub(crate) fn stats(&self) -> SessionStats {
        self.stats
    }
}
