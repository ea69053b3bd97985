use crate::notes::collection::{LinkedCollection, NoteId};
use crate::notes::note::LinkedNote;

/// Walks the notes of a collection group by group.
pub struct NotesCursor<'a> {
  collection: &'a LinkedCollection,
  position: NoteId,
}

impl<'a> NotesCursor<'a> {
  /// Starts on the first note, skipping leading empty groups
  pub fn new(collection: &'a LinkedCollection) -> NotesCursor<'a> {
    let mut cursor = NotesCursor {
      collection,
      position: NoteId::new(0, 0),
    };
    cursor.skip_empty_groups();
    cursor
  }

  pub fn position(&self) -> NoteId {
    self.position
  }

  pub fn is_valid(&self) -> bool {
    self.collection.note(self.position).is_some()
  }

  pub fn current(&self) -> Option<&'a LinkedNote> {
    self.collection.note(self.position)
  }

  /// Moves to the next note. Returns false once past the last note.
  pub fn advance(&mut self) -> bool {
    if self.position.group_index >= self.collection.len() {
      return false;
    }
    self.position.note_index += 1;
    self.skip_empty_groups();
    self.is_valid()
  }

  fn skip_empty_groups(&mut self) {
    while let Some(group) = self.collection.group(self.position.group_index) {
      if self.position.note_index < group.len() {
        break;
      }
      self.position = NoteId::new(self.position.group_index + 1, 0);
    }
  }
}

impl<'a> Iterator for NotesCursor<'a> {
  type Item = (NoteId, &'a LinkedNote);

  fn next(&mut self) -> Option<Self::Item> {
    let position = self.position;
    let note = self.current()?;
    self.advance();
    Some((position, note))
  }
}

#[cfg(test)]
mod test {

  use super::NotesCursor;
  use crate::notes::{LinkedCollection, LinkedNote, NoteGroup, NoteId};
  use crate::time::TicksTime;

  fn group(track_index: usize, pitches: &[u8]) -> NoteGroup {
    let mut group = NoteGroup::new("", track_index, 0);
    group.notes = pitches
      .iter()
      .enumerate()
      .map(|(i, pitch)| LinkedNote {
        on_tick: TicksTime::new(i as u64 * 10),
        off_tick: TicksTime::new(i as u64 * 10 + 5),
        pitch: *pitch,
        velocity: 100,
      })
      .collect();
    group
  }

  #[test]
  pub fn empty_collection_is_invalid() {
    let collection = LinkedCollection::new();
    let mut cursor = NotesCursor::new(&collection);
    assert!(!cursor.is_valid());
    assert_eq!(cursor.current(), None);
    assert!(!cursor.advance());
  }

  #[test]
  /// The cursor crosses groups and skips the empty ones
  pub fn walks_all_groups() {
    let collection = LinkedCollection {
      groups: vec![group(0, &[]), group(1, &[60, 61]), group(2, &[]), group(3, &[70])],
    };

    let mut cursor = NotesCursor::new(&collection);
    assert_eq!(cursor.position(), NoteId::new(1, 0));
    assert_eq!(cursor.current().map(|note| note.pitch), Some(60));

    assert!(cursor.advance());
    assert_eq!(cursor.position(), NoteId::new(1, 1));

    assert!(cursor.advance());
    assert_eq!(cursor.position(), NoteId::new(3, 0));
    assert_eq!(cursor.current().map(|note| note.pitch), Some(70));

    assert!(!cursor.advance());
    assert!(!cursor.is_valid());
  }

  #[test]
  pub fn iterates_ids_and_notes() {
    let collection = LinkedCollection {
      groups: vec![group(0, &[60]), group(1, &[62, 64])],
    };

    let ids: Vec<(NoteId, u8)> = NotesCursor::new(&collection)
      .map(|(id, note)| (id, note.pitch))
      .collect();

    assert_eq!(
      ids,
      vec![
        (NoteId::new(0, 0), 60),
        (NoteId::new(1, 0), 62),
        (NoteId::new(1, 1), 64),
      ]
    );
  }
}
