//! Per-tick difficulty ramp.

use std::time::Duration;

use lane_rush_core::{
    INITIAL_NOTE_SPEED, NOTE_SPEED_CEILING, NOTE_SPEED_GROWTH, SPAWN_INTERVAL_DECAY,
    SPAWN_INTERVAL_FLOOR,
};

/// Spawn cadence and fall speed, both tightened as the session goes on.
///
/// The interval only shrinks toward [`SPAWN_INTERVAL_FLOOR`] and the speed only
/// grows toward [`NOTE_SPEED_CEILING`]. Both move per event rather than per
/// elapsed second, so the curve depends on the host's tick rate.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DifficultyRamp {
    spawn_interval: Duration,
    note_speed: f32,
}

impl DifficultyRamp {
    /// Starts the ramp from the mode's initial interval.
    pub(crate) fn new(spawn_interval: Duration) -> Self {
        Self {
            spawn_interval: spawn_interval.max(SPAWN_INTERVAL_FLOOR),
            note_speed: INITIAL_NOTE_SPEED,
        }
    }

    /// Shortens the interval after a spawn.
    pub(crate) fn on_spawn(&mut self) {
        let decayed = self.spawn_interval.mul_f32(SPAWN_INTERVAL_DECAY);
        self.spawn_interval = decayed.clamp(SPAWN_INTERVAL_FLOOR, self.spawn_interval);
    }

    /// Raises the fall speed after a tick.
    pub(crate) fn accelerate(&mut self) {
        self.note_speed = (self.note_speed + NOTE_SPEED_GROWTH).min(NOTE_SPEED_CEILING);
    }

    pub(crate) fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    pub(crate) fn note_speed(&self) -> f32 {
        self.note_speed
    }
}
