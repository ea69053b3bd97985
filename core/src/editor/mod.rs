pub mod edit;
pub mod events;

use std::collections::BTreeMap;

use crossbeam_channel::Receiver;
use log::{debug, info, warn};

use crate::config::Editor as EditorConfig;
use crate::midi::{MidiFile, MidiTrack};
use crate::notes::{self, LinkedCollection, NoteGroup};
use crate::notify::{ChangeNotifier, FileChanged, ListenerId};

pub use self::edit::{EditWarning, NoteEdit, NoteEditSpec};

/// A MIDI file together with its linked notes.
///
/// Note edits go through `modify_notes`, which keeps the raw events and the
/// linked notes in step. Raw events added by edits are appended at the end of
/// their track; call `sort_all_tracks` before relying on their order.
pub struct MutableMidiFile {
  file: MidiFile,
  notes: LinkedCollection,
  config: EditorConfig,
  notifier: ChangeNotifier,
}

impl MutableMidiFile {
  pub fn new(file: MidiFile, config: EditorConfig) -> MutableMidiFile {
    let notes = notes::build(Some(&file));
    MutableMidiFile {
      file,
      notes,
      config,
      notifier: ChangeNotifier::new(),
    }
  }

  pub fn from_file(file: MidiFile) -> MutableMidiFile {
    MutableMidiFile::new(file, EditorConfig::default())
  }

  pub fn file(&self) -> &MidiFile {
    &self.file
  }

  pub fn notes(&self) -> &LinkedCollection {
    &self.notes
  }

  pub fn config(&self) -> &EditorConfig {
    &self.config
  }

  pub fn into_file(self) -> MidiFile {
    self.file
  }

  /// Links the notes again from the raw events.
  pub fn rebuild(&mut self) {
    self.notes = notes::build(Some(&self.file));
    info!(
      "Rebuilt {} note groups with {} notes",
      self.notes.len(),
      self.notes.num_notes()
    );
  }

  pub fn sort_all_tracks(&mut self) {
    self.file.sort_all_tracks();
  }

  pub fn subscribe(&mut self) -> (ListenerId, Receiver<FileChanged>) {
    self.notifier.subscribe()
  }

  pub fn unsubscribe(&mut self, id: &ListenerId) -> bool {
    self.notifier.unsubscribe(id)
  }

  /// Applies a batch of edits.
  ///
  /// Edits are grouped by note group. Within a group deletions run first, from
  /// the highest note index down, then modifications and additions in the order
  /// given. Every group is sorted again afterwards, so note indices from before
  /// the batch must not be reused. Listeners are notified and `on_complete`
  /// is called once, even if some edits were skipped.
  pub fn modify_notes(
    &mut self,
    edits: &[NoteEdit],
    on_complete: Option<&mut dyn FnMut(&[NoteEdit])>,
  ) -> Vec<EditWarning> {
    let mut warnings = Vec::new();

    let mut edits_by_group: BTreeMap<usize, Vec<&NoteEdit>> = BTreeMap::new();
    for edit in edits {
      edits_by_group
        .entry(edit.group_index)
        .or_insert_with(Vec::new)
        .push(edit);
    }

    for (group_index, group_edits) in edits_by_group {
      let group = match self.notes.groups.get_mut(group_index) {
        Some(group) => group,
        None => {
          report(&mut warnings, EditWarning::InvalidGroup { group_index });
          continue;
        }
      };

      let track_index = group.track_index();
      let track = match self.file.track_mut(track_index) {
        Some(track) => track,
        None => {
          report(
            &mut warnings,
            EditWarning::InvalidTrack {
              group_index,
              track_index,
            },
          );
          continue;
        }
      };

      let mut group_editor = GroupEditor {
        group_index,
        group,
        track,
        strict_raw_match: self.config.strict_raw_match,
        warnings: &mut warnings,
      };
      group_editor.apply(&group_edits);
    }

    self.notes.sort_all();

    debug!(
      "Applied {} edits with {} warnings",
      edits.len(),
      warnings.len()
    );

    self.notifier.notify(FileChanged {
      batch_size: edits.len(),
    });

    if let Some(on_complete) = on_complete {
      on_complete(edits);
    }

    warnings
  }
}

fn report(warnings: &mut Vec<EditWarning>, warning: EditWarning) {
  warn!("{}", warning);
  warnings.push(warning);
}

struct GroupEditor<'a> {
  group_index: usize,
  group: &'a mut NoteGroup,
  track: &'a mut MidiTrack,
  strict_raw_match: bool,
  warnings: &'a mut Vec<EditWarning>,
}

impl<'a> GroupEditor<'a> {
  fn apply(&mut self, edits: &[&NoteEdit]) {
    let mut deletions: Vec<usize> = edits
      .iter()
      .filter(|edit| edit.is_delete)
      .map(|edit| edit.note_index)
      .collect();
    deletions.sort_unstable_by(|a, b| b.cmp(a));
    deletions.dedup();

    for note_index in deletions {
      self.delete(note_index);
    }

    for edit in edits.iter().filter(|edit| !edit.is_delete) {
      self.modify_or_add(edit);
    }
  }

  fn delete(&mut self, note_index: usize) {
    let note = match self.group.note(note_index) {
      Some(note) => *note,
      None => {
        self.invalid_note(note_index);
        return;
      }
    };

    if !self.remove_raw_events(note_index) && self.strict_raw_match {
      return;
    }

    self.group.notes.remove(note_index);
    debug!(
      "Deleted note {} [{}, {}] from group {}",
      note.pitch, note.on_tick, note.off_tick, self.group_index
    );
  }

  fn modify_or_add(&mut self, edit: &NoteEdit) {
    let (new_note, length_clamped) = edit.new_note.clamped();

    let channel = self.group.channel_index();
    if edit.note_index < self.group.len() {
      if !self.remove_raw_events(edit.note_index) && self.strict_raw_match {
        return;
      }
      self.group.notes[edit.note_index] = new_note;
    } else {
      self.group.notes.push(new_note);
    }

    events::add_note_events(self.track, &new_note, channel);

    if length_clamped {
      report(
        self.warnings,
        EditWarning::NoteLengthClamped {
          group_index: self.group_index,
          note_index: edit.note_index,
        },
      );
    }
  }

  /// Removes the raw events of the note at `note_index`, warning when they are missing
  fn remove_raw_events(&mut self, note_index: usize) -> bool {
    let channel = self.group.channel_index();
    let note = match self.group.note(note_index) {
      Some(note) => *note,
      None => return false,
    };

    let removed = events::remove_note_events(self.track, &note, channel);
    if !removed {
      report(
        self.warnings,
        EditWarning::RawEventsNotFound {
          track_index: self.group.track_index(),
          channel,
          pitch: note.pitch,
          on_tick: note.on_tick,
          off_tick: note.off_tick,
        },
      );
    }
    removed
  }

  fn invalid_note(&mut self, note_index: usize) {
    report(
      self.warnings,
      EditWarning::InvalidNote {
        group_index: self.group_index,
        note_index,
      },
    );
  }
}
