//! Scripted player that strikes notes as they reach the hit zone.

use std::collections::BTreeSet;

use lane_rush_core::{LaneId, NoteId, HIT_ZONE_DISTANCE};
use lane_rush_headless::GameLoop;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Distance before the hit zone at which the bot reacts to a note.
const REACTION_DISTANCE: f32 = 10.0;

/// Bot deciding once per note whether to strike it.
#[derive(Debug)]
pub(crate) struct Autoplay {
    rng: ChaCha8Rng,
    accuracy: f64,
    decided: BTreeSet<NoteId>,
}

impl Autoplay {
    /// Creates a bot that strikes each note with probability `accuracy`.
    pub(crate) fn new(seed: u64, accuracy: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            decided: BTreeSet::new(),
        }
    }

    /// Activates the lanes of notes that reached the hit zone this tick.
    pub(crate) fn play(&mut self, game: &mut GameLoop) {
        let view = game.active_notes();
        self.decided
            .retain(|id| view.iter().any(|note| note.id == *id));

        let mut strikes: Vec<LaneId> = Vec::new();
        for note in view.iter() {
            if note.position < HIT_ZONE_DISTANCE - REACTION_DISTANCE {
                continue;
            }
            if !self.decided.insert(note.id) {
                continue;
            }
            if self.rng.gen_bool(self.accuracy) {
                strikes.push(note.lane);
            }
        }

        for lane in strikes {
            game.on_lane_activated(lane);
        }
    }
}
