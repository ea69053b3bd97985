use std::collections::HashMap;

use log::debug;

use crate::midi::types::{U4, U7};
use crate::midi::{MidiFile, MidiTrack};
use crate::notes::collection::{LinkedCollection, NoteGroup};
use crate::notes::note::LinkedNote;
use crate::time::TicksTime;

const DEFAULT_TRACK_NAME: &str = "Track";

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
struct NoteKey {
  pitch: U7,
  channel: U4,
}

#[derive(Debug, Clone, Copy)]
struct OpenNote {
  on_tick: TicksTime,
  velocity: U7,
}

/// Links the note-on/note-off events of a file into note groups.
///
/// Groups follow the order in which (track, channel) pairs first show a
/// note-on. A file without any note-on gets one empty group per track on the
/// track's primary channel. Note-ons never closed before the end of their
/// track are dropped, and a second note-on on an open key replaces the first.
pub fn build(file: Option<&MidiFile>) -> LinkedCollection {
  let file = match file {
    Some(file) => file,
    None => return LinkedCollection::new(),
  };

  let mut channels = discover_channels(file);
  if channels.is_empty() {
    channels = file
      .tracks()
      .enumerate()
      .map(|(track_index, track)| (track_index, track.primary_channel()))
      .collect();
  }

  let mut collection = LinkedCollection {
    groups: channels
      .iter()
      .filter_map(|(track_index, channel)| {
        file
          .track(*track_index)
          .map(|track| NoteGroup::new(group_name(track, *channel), *track_index, *channel))
      })
      .collect(),
  };

  for (track_index, track) in file.tracks().enumerate() {
    link_track(track_index, track, &mut collection);
  }

  collection.sort_all();

  debug!(
    "Linked {} notes into {} groups from {} tracks",
    collection.num_notes(),
    collection.len(),
    file.num_tracks()
  );

  collection
}

fn discover_channels(file: &MidiFile) -> Vec<(usize, U4)> {
  let mut channels = Vec::new();
  for (track_index, track) in file.tracks().enumerate() {
    for event in track.events() {
      if !event.message.is_note_on() {
        continue;
      }
      if let Some(channel) = event.message.channel() {
        let entry = (track_index, channel);
        if !channels.contains(&entry) {
          channels.push(entry);
        }
      }
    }
  }
  channels
}

fn group_name(track: &MidiTrack, channel: U4) -> String {
  match track.get_name() {
    Some(name) if track.primary_channel() == channel => name.to_string(),
    name => format!("{} Ch:{}", name.unwrap_or(DEFAULT_TRACK_NAME), channel),
  }
}

fn link_track(track_index: usize, track: &MidiTrack, collection: &mut LinkedCollection) {
  let mut open_notes: HashMap<NoteKey, OpenNote> = HashMap::new();

  for event in track.events() {
    let message = &event.message;
    let (channel, pitch) = match (message.channel(), message.key()) {
      (Some(channel), Some(pitch)) => (channel, pitch),
      _ => continue,
    };
    let key = NoteKey { pitch, channel };

    if message.is_note_on() {
      let velocity = message.velocity().unwrap_or(0);
      open_notes.insert(
        key,
        OpenNote {
          on_tick: event.tick,
          velocity,
        },
      );
    } else if message.is_note_off() {
      let open_note = match open_notes.remove(&key) {
        Some(open_note) => open_note,
        None => continue,
      };

      if event.tick < open_note.on_tick {
        debug!(
          "Track {}: note-off for key {} at tick {} precedes its note-on at {}",
          track_index, pitch, event.tick, open_note.on_tick
        );
        continue;
      }

      if let Some(group_index) = collection.find_group(track_index, channel) {
        collection.groups[group_index].notes.push(LinkedNote {
          on_tick: open_note.on_tick,
          off_tick: event.tick,
          pitch,
          velocity: open_note.velocity,
        });
      }
    }
  }

  if !open_notes.is_empty() {
    debug!(
      "Track {}: dropped {} notes without a note-off",
      track_index,
      open_notes.len()
    );
  }
}
