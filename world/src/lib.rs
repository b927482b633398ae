#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Lane Rush.

mod judgment;
mod notes;
mod ramp;
mod score;

use lane_rush_core::{
    Command, Event, GameState, LaneId, MissCause, ModeConfig, ModeName, MISS_BOUNDARY,
};
use log::{debug, info, trace};

use self::{
    judgment::{JudgmentEngine, Outcome},
    notes::NoteTrack,
    ramp::DifficultyRamp,
    score::{ScoreState, Terminal},
};

/// Represents the authoritative Lane Rush world state.
#[derive(Debug, Default)]
pub struct World {
    state: GameState,
    session: Option<Session>,
    tick_index: u64,
}

#[derive(Debug)]
struct Session {
    mode: ModeName,
    config: ModeConfig,
    score: ScoreState,
    ramp: DifficultyRamp,
    notes: NoteTrack,
    judgment: JudgmentEngine,
}

impl Session {
    fn new(mode: ModeName) -> Self {
        let config = mode.config();
        Self {
            mode,
            config,
            score: ScoreState::new(),
            ramp: DifficultyRamp::new(config.spawn_interval()),
            notes: NoteTrack::new(),
            judgment: JudgmentEngine::new(&config),
        }
    }
}

impl World {
    /// Creates an idle world with no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn running_session_mut(&mut self) -> Option<&mut Session> {
        if self.state != GameState::Running {
            return None;
        }
        self.session.as_mut()
    }

    fn start_session(&mut self, mode: ModeName, out_events: &mut Vec<Event>) {
        self.session = Some(Session::new(mode));
        self.state = GameState::Running;
        self.tick_index = 0;
        info!("session started in {mode} mode");
        out_events.push(Event::SessionStarted { mode });
    }

    fn end_session(&mut self, out_events: &mut Vec<Event>) {
        if self.state == GameState::Idle {
            return;
        }
        self.session = None;
        self.state = GameState::Idle;
        info!("session discarded");
        out_events.push(Event::SessionEnded);
    }

    fn spawn_note(&mut self, lane: LaneId, out_events: &mut Vec<Event>) {
        let Some(session) = self.running_session_mut() else {
            return;
        };
        if !session.config.contains(lane) {
            debug!("ignored spawn request for inactive lane {lane}");
            return;
        }

        let note = session.notes.spawn(lane);
        session.ramp.on_spawn();
        debug!(
            "note {} spawned in lane {lane}, next interval {:?}",
            note.id.get(),
            session.ramp.spawn_interval()
        );
        out_events.push(Event::NoteSpawned {
            note: note.id,
            lane,
        });
    }

    fn advance_notes(&mut self, out_events: &mut Vec<Event>) {
        let Some(session) = self.running_session_mut() else {
            return;
        };

        session.notes.advance(session.ramp.note_speed());

        let mut terminal = Terminal::Continue;
        while let Some(note) = session.notes.pop_expired(MISS_BOUNDARY) {
            session.score.apply_miss();
            debug!("note {} expired in lane {}", note.id.get(), note.lane);
            out_events.push(Event::NoteMissed {
                note: Some(note.id),
                lane: note.lane,
                cause: MissCause::Expired,
            });
            terminal = session.score.check_terminal();
            if terminal != Terminal::Continue {
                break;
            }
        }

        if terminal == Terminal::Continue {
            session.ramp.accelerate();
        }
        self.conclude(terminal, out_events);
    }

    fn activate_lane(&mut self, lane: LaneId, out_events: &mut Vec<Event>) {
        let Some(session) = self.running_session_mut() else {
            return;
        };
        if !session.config.contains(lane) {
            return;
        }

        match session.judgment.judge(lane, &mut session.notes) {
            Outcome::Hit { note, distance } => {
                session.score.apply_hit(session.config.progress_step());
                debug!(
                    "note {} hit in lane {lane} at distance {distance:.1}, combo {}",
                    note.id.get(),
                    session.score.combo()
                );
                out_events.push(Event::NoteHit {
                    note: note.id,
                    lane,
                    distance,
                });
            }
            Outcome::Miss => {
                session.score.apply_miss();
                debug!("empty activation in lane {lane}");
                out_events.push(Event::NoteMissed {
                    note: None,
                    lane,
                    cause: MissCause::EmptyActivation,
                });
            }
        }

        let terminal = session.score.check_terminal();
        self.conclude(terminal, out_events);
    }

    fn conclude(&mut self, terminal: Terminal, out_events: &mut Vec<Event>) {
        match terminal {
            Terminal::Continue => {}
            Terminal::Won => {
                self.state = GameState::Won;
                info!("session won after {} ticks", self.tick_index);
                out_events.push(Event::GameWon);
            }
            Terminal::Lost => {
                self.state = GameState::Lost;
                info!("session lost after {} ticks", self.tick_index);
                out_events.push(Event::GameLost);
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands other than `StartSession` and `EndSession` are ignored unless a
/// session is running. Spawn requests and activations targeting lanes outside
/// the active mode are ignored as well.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { mode } => world.start_session(mode, out_events),
        Command::EndSession => world.end_session(out_events),
        Command::Tick { dt } => {
            if world.state != GameState::Running {
                return;
            }
            world.tick_index = world.tick_index.saturating_add(1);
            trace!("tick {}", world.tick_index);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SpawnNote { lane } => world.spawn_note(lane, out_events),
        Command::AdvanceNotes => world.advance_notes(out_events),
        Command::ActivateLane { lane } => world.activate_lane(lane, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use lane_rush_core::{GameState, ModeConfig, ModeName, NoteView, SessionStats, INITIAL_SCORE};

    use super::World;

    /// Current lifecycle state.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.state
    }

    /// Mode of the current or last finished session.
    #[must_use]
    pub fn mode(world: &World) -> Option<ModeName> {
        world.session.as_ref().map(|session| session.mode)
    }

    /// Configuration of the current or last finished session.
    #[must_use]
    pub fn mode_config(world: &World) -> Option<ModeConfig> {
        world.session.as_ref().map(|session| session.config)
    }

    /// Current score. Reports the starting score while idle.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world
            .session
            .as_ref()
            .map_or(INITIAL_SCORE, |session| session.score.score())
    }

    /// Current progress in the range `0.0..=100.0`.
    #[must_use]
    pub fn progress(world: &World) -> f32 {
        world
            .session
            .as_ref()
            .map_or(0.0, |session| session.score.progress())
    }

    /// Current run of consecutive hits.
    #[must_use]
    pub fn combo(world: &World) -> u32 {
        world
            .session
            .as_ref()
            .map_or(0, |session| session.score.combo())
    }

    /// Hit and miss totals for the session.
    #[must_use]
    pub fn stats(world: &World) -> SessionStats {
        world
            .session
            .as_ref()
            .map(|session| session.score.stats())
            .unwrap_or_default()
    }

    /// Interval that must elapse before the next spawn.
    #[must_use]
    pub fn spawn_interval(world: &World) -> Option<Duration> {
        world
            .session
            .as_ref()
            .map(|session| session.ramp.spawn_interval())
    }

    /// Distance every note falls per tick.
    #[must_use]
    pub fn note_speed(world: &World) -> Option<f32> {
        world
            .session
            .as_ref()
            .map(|session| session.ramp.note_speed())
    }

    /// Captures a read-only view of the live notes.
    #[must_use]
    pub fn note_view(world: &World) -> NoteView {
        world
            .session
            .as_ref()
            .map(|session| NoteView::from_snapshots(session.notes.snapshots()))
            .unwrap_or_default()
    }

    /// Number of ticks processed by the current session.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
