use crate::midi::types::U4;
use crate::midi::{Message, MidiTrack};
use crate::notes::LinkedNote;

/// Positions of the note-on and note-off events of a note, searching from the
/// end of the track. With several candidates the last one in the track wins.
pub fn find_note_events(track: &MidiTrack, note: &LinkedNote, channel: U4) -> Option<(usize, usize)> {
  let mut on_index = None;
  let mut off_index = None;

  for (index, event) in track.events().iter().enumerate().rev() {
    let message = &event.message;
    if message.channel() != Some(channel) || message.key() != Some(note.pitch) {
      continue;
    }

    if on_index.is_none() && message.is_note_on() && event.tick == note.on_tick {
      on_index = Some(index);
    } else if off_index.is_none() && message.is_note_off() && event.tick == note.off_tick {
      off_index = Some(index);
    }

    if let (Some(on), Some(off)) = (on_index, off_index) {
      return Some((on, off));
    }
  }

  None
}

/// Removes both raw events of a note. Nothing is removed unless both are found.
pub fn remove_note_events(track: &mut MidiTrack, note: &LinkedNote, channel: U4) -> bool {
  match find_note_events(track, note, channel) {
    Some((on_index, off_index)) => {
      let (last, first) = if on_index > off_index {
        (on_index, off_index)
      } else {
        (off_index, on_index)
      };
      track.remove_event(last);
      track.remove_event(first);
      true
    }
    None => false,
  }
}

/// Appends the raw events of a note at the end of the track, out of tick order.
pub fn add_note_events(track: &mut MidiTrack, note: &LinkedNote, channel: U4) {
  track
    .push(note.on_tick, Message::note_on(channel, note.pitch, note.velocity))
    .push(note.off_tick, Message::note_off(channel, note.pitch));
}

#[cfg(test)]
mod test {

  use super::{add_note_events, find_note_events, remove_note_events};
  use crate::midi::{Message, MidiTrack};
  use crate::notes::LinkedNote;
  use crate::time::TicksTime;

  fn note(on: u64, off: u64, pitch: u8) -> LinkedNote {
    LinkedNote {
      on_tick: TicksTime::new(on),
      off_tick: TicksTime::new(off),
      pitch,
      velocity: 100,
    }
  }

  #[test]
  /// Matching filters by channel, key and tick
  pub fn find_filters_channel_key_and_tick() {
    let mut track = MidiTrack::new();
    track
      .push(0u64, Message::note_on(1, 60, 100))
      .push(0u64, Message::note_on(0, 60, 100))
      .push(0u64, Message::note_on(0, 61, 100))
      .push(10u64, Message::note_off(0, 61))
      .push(10u64, Message::note_off(0, 60))
      .push(10u64, Message::note_off(1, 60));

    assert_eq!(find_note_events(&track, &note(0, 10, 60), 0), Some((1, 4)));
    assert_eq!(find_note_events(&track, &note(0, 10, 60), 1), Some((0, 5)));
    assert_eq!(find_note_events(&track, &note(0, 11, 60), 0), None);
  }

  #[test]
  /// Among identical candidates the last ones in the track are picked
  pub fn find_prefers_last_match() {
    let mut track = MidiTrack::new();
    track
      .push(0u64, Message::note_on(0, 60, 100))
      .push(10u64, Message::note_off(0, 60))
      .push(0u64, Message::note_on(0, 60, 80))
      .push(10u64, Message::note_on(0, 60, 0));

    assert_eq!(find_note_events(&track, &note(0, 10, 60), 0), Some((2, 3)));
  }

  #[test]
  pub fn remove_and_add() {
    let mut track = MidiTrack::new();
    track
      .push(0u64, Message::ControlChange {
        channel: 0,
        controller: 7,
        value: 100,
      })
      .push(0u64, Message::note_on(0, 60, 100))
      .push(100u64, Message::note_off(0, 60));

    assert!(remove_note_events(&mut track, &note(0, 100, 60), 0));
    assert_eq!(track.len(), 1);
    assert!(!remove_note_events(&mut track, &note(0, 100, 60), 0));

    add_note_events(&mut track, &note(40, 50, 72), 3);
    assert_eq!(track.len(), 3);
    assert_eq!(track.events()[1].message, Message::note_on(3, 72, 100));
    assert_eq!(track.events()[2].tick, TicksTime::new(50));
    assert!(track.events()[2].message.is_note_off());
  }
}
