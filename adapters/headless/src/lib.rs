#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless adapter that runs Lane Rush sessions on a fixed-step clock.
//!
//! [`GameLoop`] owns the authoritative world and the spawning system and
//! exposes the synchronous entry points a host drives: [`GameLoop::start`],
//! [`GameLoop::tick`], and [`GameLoop::on_lane_activated`]. Every entry point
//! runs to completion before returning, so a host that serialises its calls
//! never observes a half-applied step. Events accumulate until the host
//! drains them.

use std::time::Duration;

use lane_rush_core::{
    Command, Event, GameState, InvalidModeError, LaneId, ModeName, NoteView, SessionStats,
};
use lane_rush_system_spawning::{self as spawning, Spawning};
use lane_rush_world::{self as world, query, World};
use log::trace;

/// Fixed simulation step matching a 60 Hz display refresh.
pub const DEFAULT_STEP: Duration = Duration::from_nanos(16_666_667);

/// Seed used for lane selection when the host does not provide one.
pub const DEFAULT_SEED: u64 = 0x4c61_6e65_5275_7368;

/// Configuration parameters required to construct a game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    step: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration with an explicit step and lane selection seed.
    #[must_use]
    pub const fn new(step: Duration, rng_seed: u64) -> Self {
        Self { step, rng_seed }
    }

    /// Simulated time covered by every tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Seed feeding the lane selection stream.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_STEP, DEFAULT_SEED)
    }
}

/// Fixed-step driver tying the world and systems together.
#[derive(Debug)]
pub struct GameLoop {
    world: World,
    spawning: Spawning,
    step: Duration,
    last_mode: Option<ModeName>,
    pending_events: Vec<Event>,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl GameLoop {
    /// Creates an idle game loop.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            world: World::new(),
            spawning: Spawning::new(spawning::Config::new(config.rng_seed)),
            step: config.step,
            last_mode: None,
            pending_events: Vec::new(),
        }
    }

    /// Starts a session in the named mode, discarding any session in progress.
    ///
    /// Unknown names are rejected without touching the current state.
    pub fn start(&mut self, mode: &str) -> Result<(), InvalidModeError> {
        let mode = mode.parse::<ModeName>()?;
        self.start_mode(mode);
        Ok(())
    }

    /// Starts a session in the provided mode.
    pub fn start_mode(&mut self, mode: ModeName) {
        self.last_mode = Some(mode);
        self.dispatch(Command::StartSession { mode });
    }

    /// Restarts the most recently selected mode.
    ///
    /// Returns `false` when no mode was ever selected.
    pub fn retry(&mut self) -> bool {
        match self.last_mode {
            Some(mode) => {
                self.start_mode(mode);
                true
            }
            None => false,
        }
    }

    /// Discards the current session and returns to idle.
    pub fn reset(&mut self) {
        self.dispatch(Command::EndSession);
    }

    /// Advances the session by one fixed step.
    ///
    /// The step spawns a note when the cadence allows it, moves every note,
    /// sweeps expired notes as misses, and raises the fall speed. Ticks outside
    /// a running session do nothing.
    pub fn tick(&mut self) {
        if self.state() != GameState::Running {
            return;
        }
        self.dispatch(Command::Tick { dt: self.step });
        self.dispatch(Command::AdvanceNotes);
    }

    /// Forwards a lane activation from the input layer.
    ///
    /// Activations outside a running session or on lanes the mode does not use
    /// are ignored.
    pub fn on_lane_activated(&mut self, lane: LaneId) {
        if self.state() != GameState::Running {
            return;
        }
        self.dispatch(Command::ActivateLane { lane });
    }

    /// Removes and returns every event emitted since the previous drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending_events)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> GameState {
        query::state(&self.world)
    }

    /// Mode of the current or last finished session.
    #[must_use]
    pub fn mode(&self) -> Option<ModeName> {
        query::mode(&self.world)
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        query::score(&self.world)
    }

    /// Current progress in the range `0.0..=100.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        query::progress(&self.world)
    }

    /// Current run of consecutive hits.
    #[must_use]
    pub fn combo(&self) -> u32 {
        query::combo(&self.world)
    }

    /// Hit and miss totals for the session.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        query::stats(&self.world)
    }

    /// Live notes in spawn order.
    #[must_use]
    pub fn active_notes(&self) -> NoteView {
        query::note_view(&self.world)
    }

    /// Interval that must elapse before the next spawn.
    #[must_use]
    pub fn spawn_interval(&self) -> Option<Duration> {
        query::spawn_interval(&self.world)
    }

    /// Distance every note falls per tick.
    #[must_use]
    pub fn note_speed(&self) -> Option<f32> {
        query::note_speed(&self.world)
    }

    /// Ticks processed by the current session.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        query::tick_index(&self.world)
    }

    /// Simulated time covered by every tick.
    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    fn dispatch(&mut self, command: Command) {
        trace!("dispatching {command:?}");
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.pump_systems(events);
    }

    fn pump_systems(&mut self, pending_events: Vec<Event>) {
        let mut events = pending_events;

        loop {
            if events.is_empty() {
                break;
            }

            let state = query::state(&self.world);
            let interval = query::spawn_interval(&self.world).unwrap_or(Duration::MAX);
            let lanes = query::mode_config(&self.world)
                .map(|config| config.directions())
                .unwrap_or_default();
            let mut commands = Vec::new();
            self.spawning
                .handle(&events, state, interval, lanes, &mut commands);

            self.pending_events.append(&mut events);

            if commands.is_empty() {
                break;
            }

            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
    }
}
