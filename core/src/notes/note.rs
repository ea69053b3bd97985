use failure::Fail;

use crate::midi::types::{MAX_U7, U7};
use crate::time::TicksTime;

#[derive(Debug, Fail, PartialEq)]
pub enum NoteError {
  #[fail(display = "Pitch {} is out of range [0, 127]", pitch)]
  InvalidPitch { pitch: U7 },

  #[fail(display = "Velocity {} is out of range [1, 127]", velocity)]
  InvalidVelocity { velocity: U7 },

  #[fail(
    display = "Note-off at tick {} must be at least one tick after note-on at {}",
    off_tick, on_tick
  )]
  InvalidLength {
    on_tick: TicksTime,
    off_tick: TicksTime,
  },
}

/// A note-on and note-off pair linked into a single note.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LinkedNote {
  pub on_tick: TicksTime,
  pub off_tick: TicksTime,
  pub pitch: U7,
  pub velocity: U7,
}

/// The shortest valid note: one tick long at tick zero.
impl Default for LinkedNote {
  fn default() -> Self {
    LinkedNote {
      on_tick: TicksTime::zero(),
      off_tick: TicksTime::one(),
      pitch: 0,
      velocity: 1,
    }
  }
}

impl LinkedNote {
  pub fn new<T>(on_tick: T, off_tick: T, pitch: U7, velocity: U7) -> Result<LinkedNote, NoteError>
  where
    T: Into<TicksTime>,
  {
    let note = LinkedNote {
      on_tick: on_tick.into(),
      off_tick: off_tick.into(),
      pitch,
      velocity,
    };
    note.validate().map(|_| note)
  }

  pub fn validate(&self) -> Result<(), NoteError> {
    if self.pitch > MAX_U7 {
      Err(NoteError::InvalidPitch { pitch: self.pitch })
    } else if self.velocity == 0 || self.velocity > MAX_U7 {
      Err(NoteError::InvalidVelocity {
        velocity: self.velocity,
      })
    } else if self.off_tick < self.on_tick + TicksTime::one() {
      Err(NoteError::InvalidLength {
        on_tick: self.on_tick,
        off_tick: self.off_tick,
      })
    } else {
      Ok(())
    }
  }

  /// Brings pitch, velocity and length into range. The flag tells whether the length changed.
  pub fn clamped(&self) -> (LinkedNote, bool) {
    let min_off_tick = self.on_tick + TicksTime::one();
    let length_clamped = self.off_tick < min_off_tick;
    let note = LinkedNote {
      on_tick: self.on_tick,
      off_tick: self.off_tick.max(min_off_tick),
      pitch: self.pitch.min(MAX_U7),
      velocity: self.velocity.max(1).min(MAX_U7),
    };
    (note, length_clamped)
  }

  pub fn length(&self) -> TicksTime {
    self.off_tick - self.on_tick
  }
}
