//! Links the note-on/note-off events of MIDI tracks into notes, and edits
//! those notes while keeping the raw events in step.

pub mod color;
pub mod config;
pub mod editor;
pub mod midi;
pub mod notes;
pub mod notify;
pub mod time;
pub mod visualization;
