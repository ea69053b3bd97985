use failure::Fail;
use serde_derive::Deserialize;

use crate::midi::types::{U4, U7};
use crate::notes::LinkedNote;
use crate::time::TicksTime;

/// One edit of a batch.
///
/// With `is_delete` the note at `note_index` is removed. Otherwise the note at
/// `note_index` is replaced by `new_note`, or `new_note` is added when the
/// index is past the end of the group.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct NoteEdit {
  pub group_index: usize,
  pub note_index: usize,
  pub new_note: LinkedNote,
  pub is_delete: bool,
}

impl NoteEdit {
  pub fn delete(group_index: usize, note_index: usize) -> NoteEdit {
    NoteEdit {
      group_index,
      note_index,
      new_note: LinkedNote::default(),
      is_delete: true,
    }
  }

  pub fn modify(group_index: usize, note_index: usize, new_note: LinkedNote) -> NoteEdit {
    NoteEdit {
      group_index,
      note_index,
      new_note,
      is_delete: false,
    }
  }

  /// `note_index` should be the current length of the group
  pub fn add(group_index: usize, note_index: usize, new_note: LinkedNote) -> NoteEdit {
    NoteEdit::modify(group_index, note_index, new_note)
  }
}

/// The serialised form of an edit, as found in edit scripts.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NoteEditSpec {
  pub group: usize,
  pub note: usize,
  pub delete: bool,
  pub on: u64,
  pub off: u64,
  pub pitch: U7,
  pub velocity: U7,
}

impl From<&NoteEditSpec> for NoteEdit {
  fn from(spec: &NoteEditSpec) -> Self {
    NoteEdit {
      group_index: spec.group,
      note_index: spec.note,
      new_note: LinkedNote {
        on_tick: TicksTime::new(spec.on),
        off_tick: TicksTime::new(spec.off),
        pitch: spec.pitch,
        velocity: spec.velocity,
      },
      is_delete: spec.delete,
    }
  }
}

/// Problems found while applying a batch. None of them stops the batch.
#[derive(Debug, Fail, PartialEq, Clone)]
pub enum EditWarning {
  #[fail(display = "Group {} does not exist", group_index)]
  InvalidGroup { group_index: usize },

  #[fail(display = "Group {} refers to missing track {}", group_index, track_index)]
  InvalidTrack {
    group_index: usize,
    track_index: usize,
  },

  #[fail(display = "Note {} does not exist in group {}", note_index, group_index)]
  InvalidNote {
    group_index: usize,
    note_index: usize,
  },

  #[fail(
    display = "No raw events for key {} [{}, {}] on channel {} of track {}",
    pitch, on_tick, off_tick, channel, track_index
  )]
  RawEventsNotFound {
    track_index: usize,
    channel: U4,
    pitch: U7,
    on_tick: TicksTime,
    off_tick: TicksTime,
  },

  #[fail(
    display = "Note {} of group {} was shorter than one tick and got extended",
    note_index, group_index
  )]
  NoteLengthClamped {
    group_index: usize,
    note_index: usize,
  },
}
