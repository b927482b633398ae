#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting note spawn commands.

use std::time::Duration;

use lane_rush_core::{Command, Event, GameState, LaneId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration drawing lanes from the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that emits at most one spawn command per tick.
///
/// Time since the last spawn accumulates from `Event::TimeAdvanced`. Once it
/// strictly exceeds the current spawn interval a lane is drawn uniformly from
/// the active mode and the accumulator restarts from zero. The random stream
/// is seeded once at construction and carries over between sessions, so every
/// session draws a fresh lane sequence while a given seed still replays
/// identically.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
    since_last_spawn: Duration,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            since_last_spawn: Duration::ZERO,
        }
    }

    /// Time accumulated toward the next spawn.
    #[must_use]
    pub fn since_last_spawn(&self) -> Duration {
        self.since_last_spawn
    }

    /// Consumes world events and the session's cadence to emit spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        state: GameState,
        spawn_interval: Duration,
        lanes: &[LaneId],
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::SessionStarted { .. } => self.restart(),
                Event::TimeAdvanced { dt } => {
                    self.since_last_spawn = self.since_last_spawn.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if state != GameState::Running {
            self.since_last_spawn = Duration::ZERO;
            return;
        }

        if lanes.is_empty() || self.since_last_spawn <= spawn_interval {
            return;
        }

        self.since_last_spawn = Duration::ZERO;
        let lane = self.select_lane(lanes);
        out.push(Command::SpawnNote { lane });
    }

    fn restart(&mut self) {
        self.since_last_spawn = Duration::ZERO;
    }

    fn select_lane(&mut self, lanes: &[LaneId]) -> LaneId {
        debug_assert!(!lanes.is_empty(), "select_lane requires lanes");
        lanes[self.rng.gen_range(0..lanes.len())]
    }
}
