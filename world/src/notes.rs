//! Ordered storage for the notes falling through a session.

use lane_rush_core::{LaneId, NoteId, NoteSnapshot};

/// Logical note owned by the track until it is hit or expires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Note {
    /// Identifier allocated by the track.
    pub(crate) id: NoteId,
    /// Lane the note falls along.
    pub(crate) lane: LaneId,
    /// Distance fallen since the note spawned.
    pub(crate) position: f32,
}

/// Live notes kept in spawn order.
#[derive(Debug)]
pub(crate) struct NoteTrack {
    notes: Vec<Note>,
    next_note_id: NoteId,
}

impl NoteTrack {
    /// Creates an empty track with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_note_id: NoteId::new(0),
        }
    }

    /// Places a new note at the top of the lane.
    pub(crate) fn spawn(&mut self, lane: LaneId) -> Note {
        let note = Note {
            id: self.next_note_id,
            lane,
            position: 0.0,
        };
        self.next_note_id = NoteId::new(self.next_note_id.get().saturating_add(1));
        self.notes.push(note);
        note
    }

    /// Moves every live note down by `delta` units.
    ///
    /// Negative deltas are ignored so positions never decrease.
    pub(crate) fn advance(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        for note in &mut self.notes {
            note.position += delta;
        }
    }

    /// Removes the oldest note that fell past `threshold`.
    ///
    /// Notes behind it stay on the track until the next call.
    pub(crate) fn pop_expired(&mut self, threshold: f32) -> Option<Note> {
        let index = self
            .notes
            .iter()
            .position(|note| note.position > threshold)?;
        Some(self.notes.remove(index))
    }

    /// Removes the oldest note in `lane` lying strictly inside the window
    /// around `hit_threshold`.
    ///
    /// The first qualifying note wins even when a younger note sits closer to
    /// the threshold.
    pub(crate) fn remove_match(
        &mut self,
        lane: LaneId,
        hit_threshold: f32,
        hit_window: f32,
    ) -> Option<Note> {
        let index = self.notes.iter().position(|note| {
            note.lane == lane && (note.position - hit_threshold).abs() < hit_window
        })?;
        Some(self.notes.remove(index))
    }

    /// Captures the live notes for read-only consumers.
    pub(crate) fn snapshots(&self) -> Vec<NoteSnapshot> {
        self.notes
            .iter()
            .map(|note| NoteSnapshot {
                id: note.id,
                lane: note.lane,
                position: note.position,
            })
            .collect()
    }
}
