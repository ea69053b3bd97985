pub mod file;
pub mod messages;
pub mod track;
pub mod types;

pub use self::file::MidiFile;
pub use self::messages::Message;
pub use self::track::{MidiEvent, MidiTrack};
