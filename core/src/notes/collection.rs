use crate::midi::types::U4;
use crate::notes::note::LinkedNote;

/// Identifies a note by position.
///
/// Notes have no stable identity: any edit batch may shift or reorder them,
/// so selections built from ids must be cleared after every batch.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct NoteId {
  pub group_index: usize,
  pub note_index: usize,
}

impl NoteId {
  pub fn new(group_index: usize, note_index: usize) -> NoteId {
    NoteId {
      group_index,
      note_index,
    }
  }
}

/// The notes of one channel of one source track, ordered by note-on tick.
#[derive(Debug, PartialEq, Clone)]
pub struct NoteGroup {
  name: String,
  track_index: usize,
  channel_index: U4,
  pub(crate) notes: Vec<LinkedNote>,
}

impl NoteGroup {
  pub fn new<T>(name: T, track_index: usize, channel_index: U4) -> NoteGroup
  where
    T: Into<String>,
  {
    NoteGroup {
      name: name.into(),
      track_index,
      channel_index,
      notes: Vec::new(),
    }
  }

  pub fn get_name(&self) -> &str {
    self.name.as_str()
  }

  pub fn track_index(&self) -> usize {
    self.track_index
  }

  pub fn channel_index(&self) -> U4 {
    self.channel_index
  }

  pub fn notes(&self) -> &[LinkedNote] {
    self.notes.as_slice()
  }

  pub fn note(&self, index: usize) -> Option<&LinkedNote> {
    self.notes.get(index)
  }

  pub fn len(&self) -> usize {
    self.notes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.notes.is_empty()
  }

  /// Stable sort by note-on tick
  pub fn sort_notes(&mut self) {
    self.notes.sort_by_key(|note| note.on_tick);
  }

  pub fn is_sorted(&self) -> bool {
    self
      .notes
      .windows(2)
      .all(|pair| pair[0].on_tick <= pair[1].on_tick)
  }
}

/// All the note groups of a file, one per (track, channel) pair holding notes.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct LinkedCollection {
  pub(crate) groups: Vec<NoteGroup>,
}

impl LinkedCollection {
  pub fn new() -> LinkedCollection {
    LinkedCollection::default()
  }

  pub fn groups(&self) -> &[NoteGroup] {
    self.groups.as_slice()
  }

  pub fn group(&self, index: usize) -> Option<&NoteGroup> {
    self.groups.get(index)
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  pub fn note(&self, id: NoteId) -> Option<&LinkedNote> {
    self
      .groups
      .get(id.group_index)
      .and_then(|group| group.note(id.note_index))
  }

  pub fn find_group(&self, track_index: usize, channel_index: U4) -> Option<usize> {
    self.groups.iter().position(|group| {
      group.track_index == track_index && group.channel_index == channel_index
    })
  }

  pub fn num_notes(&self) -> usize {
    self.groups.iter().map(|group| group.len()).sum()
  }

  pub fn sort_all(&mut self) {
    for group in self.groups.iter_mut() {
      group.sort_notes();
    }
  }
}
