//! Human and machine readable descriptions of a run.

use std::fmt::Write as _;

use lane_rush_core::{Event, GameState, MissCause, ModeName, SessionStats};
use lane_rush_headless::GameLoop;
use serde::Serialize;

/// Final state of a headless run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) mode: Option<ModeName>,
    pub(crate) seed: u64,
    pub(crate) outcome: GameState,
    pub(crate) ticks: u64,
    pub(crate) score: u32,
    pub(crate) progress: f32,
    pub(crate) combo: u32,
    pub(crate) stats: SessionStats,
}

impl RunSummary {
    /// Captures the observers of the game loop.
    pub(crate) fn capture(game: &GameLoop, seed: u64) -> Self {
        Self {
            mode: game.mode(),
            seed,
            outcome: game.state(),
            ticks: game.ticks(),
            score: game.score(),
            progress: game.progress(),
            combo: game.combo(),
            stats: game.stats(),
        }
    }

    /// Renders the summary as aligned text lines.
    pub(crate) fn render_text(&self) -> String {
        let outcome = match self.outcome {
            GameState::Idle => "idle",
            GameState::Running => "unfinished",
            GameState::Won => "won",
            GameState::Lost => "lost",
        };
        let mode = self.mode.map_or("none", ModeName::name);

        let mut text = String::new();
        let _ = writeln!(text, "mode:      {mode}");
        let _ = writeln!(text, "seed:      {:#x}", self.seed);
        let _ = writeln!(text, "outcome:   {outcome}");
        let _ = writeln!(text, "ticks:     {}", self.ticks);
        let _ = writeln!(text, "score:     {}", self.score);
        let _ = writeln!(text, "progress:  {:.1}%", self.progress);
        let _ = writeln!(text, "combo:     {}", self.combo);
        let _ = writeln!(text, "max combo: {}", self.stats.max_combo);
        let _ = writeln!(
            text,
            "hits:      {} / misses: {}",
            self.stats.hits, self.stats.misses
        );
        text
    }
}

/// Describes an event for the log, or `None` for clock bookkeeping.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::SessionStarted { mode } => format!("session started ({mode})"),
        Event::SessionEnded => "session ended".to_owned(),
        Event::TimeAdvanced { .. } => return None,
        Event::NoteSpawned { note, lane } => {
            format!("{} note {} spawned", lane.symbol(), note.get())
        }
        Event::NoteHit {
            note,
            lane,
            distance,
        } => format!("{} note {} hit, {distance:.1} off", lane.symbol(), note.get()),
        Event::NoteMissed {
            lane,
            cause: MissCause::Expired,
            ..
        } => format!("{} note expired", lane.symbol()),
        Event::NoteMissed {
            lane,
            cause: MissCause::EmptyActivation,
            ..
        } => format!("{} struck an empty lane", lane.symbol()),
        Event::GameWon => "game won".to_owned(),
        Event::GameLost => "game lost".to_owned(),
    };
    Some(line)
}
