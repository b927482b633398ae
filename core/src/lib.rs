#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Rush engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to. Nothing in this crate performs I/O.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Distance from the spawn point at which a note sits perfectly on the hit zone.
pub const HIT_ZONE_DISTANCE: f32 = 670.0;

/// Distance from the spawn point beyond which a live note counts as missed.
pub const MISS_BOUNDARY: f32 = 740.0;

/// Score granted to every freshly started session.
pub const INITIAL_SCORE: u32 = 100;

/// Score awarded for each successful hit.
pub const SCORE_PER_HIT: u32 = 15;

/// Score deducted for each miss.
pub const MISS_PENALTY: u32 = 30;

/// Progress deducted for each miss.
pub const PROGRESS_PENALTY: f32 = 1.0;

/// Progress value that wins the session.
pub const PROGRESS_GOAL: f32 = 100.0;

/// Fall speed, in units per tick, assigned when a session starts.
pub const INITIAL_NOTE_SPEED: f32 = 5.0;

/// Upper bound for the fall speed in units per tick.
pub const NOTE_SPEED_CEILING: f32 = 15.0;

/// Fall speed added after every processed tick.
pub const NOTE_SPEED_GROWTH: f32 = 0.012;

/// Lower bound for the interval separating two spawns.
pub const SPAWN_INTERVAL_FLOOR: Duration = Duration::from_millis(400);

/// Multiplicative decay applied to the spawn interval after each spawn.
pub const SPAWN_INTERVAL_DECAY: f32 = 0.995;

/// Input lanes along which notes fall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneId {
    /// Upward arrow lane.
    Up,
    /// Downward arrow lane.
    Down,
    /// Leftward arrow lane.
    Left,
    /// Rightward arrow lane.
    Right,
    /// Letter `Q` lane.
    Q,
    /// Letter `W` lane.
    W,
    /// Letter `E` lane.
    E,
}

impl LaneId {
    /// Every lane known to the engine, in declaration order.
    pub const ALL: [LaneId; 7] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Q,
        Self::W,
        Self::E,
    ];

    /// Lower-case identifier used when parsing and printing lanes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Q => "q",
            Self::W => "w",
            Self::E => "e",
        }
    }

    /// Glyph shown on notes travelling down the lane.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Up => '↑',
            Self::Down => '↓',
            Self::Left => '←',
            Self::Right => '→',
            Self::Q => 'Q',
            Self::W => 'W',
            Self::E => 'E',
        }
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LaneId {
    type Err = UnknownLaneError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lane| lane.name() == normalized)
            .ok_or_else(|| UnknownLaneError {
                name: value.to_owned(),
            })
    }
}

/// Reported when a lane name does not match any known lane.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown lane `{name}`")]
pub struct UnknownLaneError {
    name: String,
}

impl UnknownLaneError {
    /// Name that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Reported when a session is requested for a mode outside the preset table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown game mode `{name}`, expected one of easy, hard, crazy")]
pub struct InvalidModeError {
    name: String,
}

impl InvalidModeError {
    /// Name that failed to resolve to a preset.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Named difficulty presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    /// Three lanes with the slowest cadence and widest window.
    Easy,
    /// Four arrow lanes.
    Hard,
    /// Six lanes mixing letters and arrows.
    Crazy,
}

impl ModeName {
    /// Every preset, ordered from easiest to hardest.
    pub const ALL: [ModeName; 3] = [Self::Easy, Self::Hard, Self::Crazy];

    /// Lower-case identifier of the preset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
            Self::Crazy => "crazy",
        }
    }

    /// Static configuration associated with the preset.
    #[must_use]
    pub const fn config(self) -> ModeConfig {
        match self {
            Self::Easy => EASY,
            Self::Hard => HARD,
            Self::Crazy => CRAZY,
        }
    }
}

impl fmt::Display for ModeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModeName {
    type Err = InvalidModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == value)
            .ok_or_else(|| InvalidModeError {
                name: value.to_owned(),
            })
    }
}

/// Resolves the configuration registered under the provided preset name.
pub fn select_mode(name: &str) -> Result<ModeConfig, InvalidModeError> {
    name.parse::<ModeName>().map(ModeName::config)
}

const EASY: ModeConfig = ModeConfig::new(
    &[LaneId::Left, LaneId::Down, LaneId::Right],
    Duration::from_millis(900),
    210.0,
    0.5,
);

const HARD: ModeConfig = ModeConfig::new(
    &[LaneId::Up, LaneId::Left, LaneId::Down, LaneId::Right],
    Duration::from_millis(750),
    190.0,
    0.5,
);

const CRAZY: ModeConfig = ModeConfig::new(
    &[
        LaneId::Q,
        LaneId::W,
        LaneId::E,
        LaneId::Left,
        LaneId::Down,
        LaneId::Right,
    ],
    Duration::from_millis(600),
    180.0,
    0.5,
);

/// Immutable per-difficulty parameters selected at session start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeConfig {
    directions: &'static [LaneId],
    spawn_interval: Duration,
    hit_window: f32,
    progress_step: f32,
}

impl ModeConfig {
    const fn new(
        directions: &'static [LaneId],
        spawn_interval: Duration,
        hit_window: f32,
        progress_step: f32,
    ) -> Self {
        Self {
            directions,
            spawn_interval,
            hit_window,
            progress_step,
        }
    }

    /// Active lanes in display order.
    #[must_use]
    pub const fn directions(&self) -> &'static [LaneId] {
        self.directions
    }

    /// Interval between spawns at the start of a session.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Maximum distance from the hit zone that still counts as a hit.
    #[must_use]
    pub const fn hit_window(&self) -> f32 {
        self.hit_window
    }

    /// Progress awarded for each hit.
    #[must_use]
    pub const fn progress_step(&self) -> f32 {
        self.progress_step
    }

    /// Reports whether the lane participates in this mode.
    #[must_use]
    pub fn contains(&self, lane: LaneId) -> bool {
        self.directions.contains(&lane)
    }
}

/// Unique identifier assigned to a note when it spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(u32);

impl NoteId {
    /// Creates a new note identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Lifecycle of the game loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// No session has been started, or the last one was discarded.
    #[default]
    Idle,
    /// A session is accepting ticks and lane activations.
    Running,
    /// Progress reached the goal.
    Won,
    /// Score dropped to zero.
    Lost,
}

impl GameState {
    /// Reports whether the state ends a session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reason a miss was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissCause {
    /// The note fell past the miss boundary without being struck.
    Expired,
    /// A lane was activated while no note sat inside the hit window.
    EmptyActivation,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh session in the provided mode, discarding any previous one.
    StartSession {
        /// Preset that configures the session.
        mode: ModeName,
    },
    /// Discards the current session and returns to idle.
    EndSession,
    /// Advances the session clock by one fixed step.
    Tick {
        /// Simulated time covered by the step.
        dt: Duration,
    },
    /// Requests a new note at the top of the provided lane.
    SpawnNote {
        /// Lane that receives the note.
        lane: LaneId,
    },
    /// Moves every live note by the current fall speed and sweeps expired notes.
    AdvanceNotes,
    /// Forwards a player's lane activation.
    ActivateLane {
        /// Lane the player struck.
        lane: LaneId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Announces that a session began.
    SessionStarted {
        /// Preset that configures the session.
        mode: ModeName,
    },
    /// Announces that the session was discarded and the world is idle.
    SessionEnded,
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Simulated time covered by the step.
        dt: Duration,
    },
    /// Confirms that a note entered a lane.
    NoteSpawned {
        /// Identifier assigned to the note.
        note: NoteId,
        /// Lane the note falls along.
        lane: LaneId,
    },
    /// Confirms that a lane activation struck a note.
    NoteHit {
        /// Identifier of the consumed note.
        note: NoteId,
        /// Lane of the consumed note.
        lane: LaneId,
        /// Absolute distance between the note and the hit zone.
        distance: f32,
    },
    /// Reports a miss.
    NoteMissed {
        /// Note that expired, absent when an activation found nothing to hit.
        note: Option<NoteId>,
        /// Lane the miss happened in.
        lane: LaneId,
        /// What produced the miss.
        cause: MissCause,
    },
    /// Progress reached the goal and the session ended.
    GameWon,
    /// Score dropped to zero and the session ended.
    GameLost,
}

/// Immutable representation of a single note used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteSnapshot {
    /// Identifier assigned to the note.
    pub id: NoteId,
    /// Lane the note falls along.
    pub lane: LaneId,
    /// Distance fallen since the note spawned.
    pub position: f32,
}

/// Read-only snapshot of every live note.
#[derive(Clone, Debug, Default)]
pub struct NoteView {
    snapshots: Vec<NoteSnapshot>,
}

impl NoteView {
    /// Creates a new note view ordered by spawn.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<NoteSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured notes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &NoteSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no note is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<NoteSnapshot> {
        self.snapshots
    }
}

/// Running totals gathered over a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionStats {
    /// Notes struck inside the hit window.
    pub hits: u32,
    /// Expired notes plus activations that found no note.
    pub misses: u32,
    /// Longest combo observed.
    pub max_combo: u32,
}
