//! Hit judgment for lane activations.

use lane_rush_core::{LaneId, ModeConfig, HIT_ZONE_DISTANCE};

use crate::notes::{Note, NoteTrack};

/// Verdict produced for a single lane activation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Outcome {
    /// A note was consumed.
    Hit {
        /// The consumed note.
        note: Note,
        /// Absolute distance between the note and the hit zone.
        distance: f32,
    },
    /// No note in the lane was inside the window.
    Miss,
}

/// Matches activations against the live notes of a session.
#[derive(Clone, Copy, Debug)]
pub(crate) struct JudgmentEngine {
    hit_zone: f32,
    hit_window: f32,
}

impl JudgmentEngine {
    /// Creates an engine judging against the mode's hit window.
    pub(crate) fn new(config: &ModeConfig) -> Self {
        Self {
            hit_zone: HIT_ZONE_DISTANCE,
            hit_window: config.hit_window(),
        }
    }

    /// Judges an activation of `lane`, consuming the matched note.
    pub(crate) fn judge(&self, lane: LaneId, notes: &mut NoteTrack) -> Outcome {
        match notes.remove_match(lane, self.hit_zone, self.hit_window) {
            Some(note) => Outcome::Hit {
                note,
                distance: (note.position - self.hit_zone).abs(),
            },
            None => Outcome::Miss,
        }
    }
}
