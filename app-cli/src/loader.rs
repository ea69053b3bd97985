use failure::{Error, Fail};
use log::{debug, info};
use midly::{MetaMessage, MidiMessage, Smf, TrackEvent, TrackEventKind};

use pianoroll_core::midi::{Message, MidiFile, MidiTrack};

const TRACK_NAME_META: u8 = 0x03;

#[derive(Debug, Fail)]
pub enum LoaderError {
  #[fail(display = "Failed to parse MIDI file {}: {}", path, cause)]
  Parse { path: String, cause: String },
}

pub fn load_midi_file(path: &str) -> Result<MidiFile, Error> {
  info!("Loading MIDI file from {} ...", path);

  let data = std::fs::read(path)?;
  let smf = Smf::parse(&data).map_err(|err| LoaderError::Parse {
    path: path.to_string(),
    cause: err.to_string(),
  })?;

  let tracks: Vec<MidiTrack> = smf.tracks.iter().map(|events| convert_track(events)).collect();
  debug!("Loaded {} tracks", tracks.len());

  Ok(MidiFile::with_tracks(tracks))
}

fn convert_track(events: &[TrackEvent]) -> MidiTrack {
  let mut track = MidiTrack::new();
  let mut tick: u64 = 0;
  let mut skipped = 0;

  for event in events {
    tick += u64::from(event.delta.as_int());
    match event.kind {
      TrackEventKind::Midi { channel, message } => {
        track.push(tick, convert_message(channel.as_int(), message));
      }
      TrackEventKind::Meta(MetaMessage::TrackName(name)) => {
        track.set_name(String::from_utf8_lossy(name).into_owned());
        track.push(
          tick,
          Message::Meta {
            kind: TRACK_NAME_META,
            data: name.to_vec(),
          },
        );
      }
      TrackEventKind::SysEx(data) | TrackEventKind::Escape(data) => {
        track.push(tick, Message::Unknown(data.to_vec()));
      }
      TrackEventKind::Meta(_) => skipped += 1,
    }
  }

  if skipped > 0 {
    debug!("Skipped {} meta events", skipped);
  }

  track
}

fn convert_message(channel: u8, message: MidiMessage) -> Message {
  match message {
    MidiMessage::NoteOff { key, vel } => Message::NoteOff {
      channel,
      key: key.as_int(),
      velocity: vel.as_int(),
    },
    MidiMessage::NoteOn { key, vel } => Message::NoteOn {
      channel,
      key: key.as_int(),
      velocity: vel.as_int(),
    },
    MidiMessage::Aftertouch { key, vel } => Message::PolyphonicKeyPressure {
      channel,
      key: key.as_int(),
      value: vel.as_int(),
    },
    MidiMessage::Controller { controller, value } => Message::ControlChange {
      channel,
      controller: controller.as_int(),
      value: value.as_int(),
    },
    MidiMessage::ProgramChange { program } => Message::ProgramChange {
      channel,
      value: program.as_int(),
    },
    MidiMessage::ChannelAftertouch { vel } => Message::ChannelPressure {
      channel,
      value: vel.as_int(),
    },
    MidiMessage::PitchBend { bend } => Message::PitchBend {
      channel,
      value: bend.0.as_int(),
    },
  }
}

#[cfg(test)]
mod test {

  use super::{convert_message, convert_track};
  use midly::num::{u28, u4, u7};
  use midly::{MetaMessage, MidiMessage, TrackEvent, TrackEventKind};
  use pianoroll_core::midi::Message;
  use pianoroll_core::time::TicksTime;

  #[test]
  /// Deltas become absolute ticks and the track name is picked up
  pub fn convert_track_with_name() {
    let events = vec![
      TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(b"Piano")),
      },
      TrackEvent {
        delta: u28::new(10),
        kind: TrackEventKind::Midi {
          channel: u4::new(2),
          message: MidiMessage::NoteOn {
            key: u7::new(60),
            vel: u7::new(100),
          },
        },
      },
      TrackEvent {
        delta: u28::new(90),
        kind: TrackEventKind::Midi {
          channel: u4::new(2),
          message: MidiMessage::NoteOff {
            key: u7::new(60),
            vel: u7::new(0),
          },
        },
      },
      TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
      },
    ];

    let track = convert_track(&events);

    assert_eq!(track.get_name(), Some("Piano"));
    assert_eq!(track.len(), 3);
    assert_eq!(track.primary_channel(), 2);
    assert_eq!(track.events()[1].tick, TicksTime::new(10));
    assert_eq!(track.events()[2].tick, TicksTime::new(100));
    assert_eq!(track.events()[2].message, Message::note_off(2, 60));
  }

  #[test]
  pub fn convert_controller() {
    let message = convert_message(
      1,
      MidiMessage::Controller {
        controller: u7::new(7),
        value: u7::new(64),
      },
    );
    assert_eq!(
      message,
      Message::ControlChange {
        channel: 1,
        controller: 7,
        value: 64,
      }
    );
  }
}
