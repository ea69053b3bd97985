/// MIDI channel, 0-15
pub type U4 = u8;

/// Key, velocity and controller data, 0-127
pub type U7 = u8;

/// Pitch bend value, 0-16383
pub type U14 = u16;

pub const MAX_U7: U7 = 0x7f;
