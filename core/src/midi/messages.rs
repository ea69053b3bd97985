use crate::midi::types::{U14, U4, U7};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Message {
  NoteOff {
    channel: U4,
    key: U7,
    velocity: U7,
  },

  NoteOn {
    channel: U4,
    key: U7,
    velocity: U7,
  },

  PolyphonicKeyPressure {
    channel: U4,
    key: U7,
    value: U7,
  },

  ControlChange {
    channel: U4,
    controller: U7,
    value: U7,
  },

  ProgramChange {
    channel: U4,
    value: U7,
  },

  ChannelPressure {
    channel: U4,
    value: U7,
  },

  PitchBend {
    channel: U4,
    value: U14,
  },

  /// Meta events (track names, tempo, ...) kept as their raw payload
  Meta {
    kind: u8,
    data: Vec<u8>,
  },

  Unknown(Vec<u8>),
}

impl Message {
  pub fn note_on(channel: U4, key: U7, velocity: U7) -> Message {
    Message::NoteOn {
      channel,
      key,
      velocity,
    }
  }

  pub fn note_off(channel: U4, key: U7) -> Message {
    Message::NoteOff {
      channel,
      key,
      velocity: 0,
    }
  }

  /// A note-on with velocity zero is a note-off.
  pub fn is_note_on(&self) -> bool {
    match self {
      Message::NoteOn { velocity, .. } => *velocity > 0,
      _ => false,
    }
  }

  pub fn is_note_off(&self) -> bool {
    match self {
      Message::NoteOff { .. } => true,
      Message::NoteOn { velocity, .. } => *velocity == 0,
      _ => false,
    }
  }

  pub fn channel(&self) -> Option<U4> {
    match self {
      Message::NoteOff { channel, .. }
      | Message::NoteOn { channel, .. }
      | Message::PolyphonicKeyPressure { channel, .. }
      | Message::ControlChange { channel, .. }
      | Message::ProgramChange { channel, .. }
      | Message::ChannelPressure { channel, .. }
      | Message::PitchBend { channel, .. } => Some(*channel),
      _ => None,
    }
  }

  pub fn key(&self) -> Option<U7> {
    match self {
      Message::NoteOff { key, .. }
      | Message::NoteOn { key, .. }
      | Message::PolyphonicKeyPressure { key, .. } => Some(*key),
      _ => None,
    }
  }

  pub fn velocity(&self) -> Option<U7> {
    match self {
      Message::NoteOff { velocity, .. } | Message::NoteOn { velocity, .. } => Some(*velocity),
      _ => None,
    }
  }
}
