use log::debug;

use crate::midi::track::MidiTrack;

/// The raw side of a song: one event list per track.
#[derive(Debug, Clone, Default)]
pub struct MidiFile {
  tracks: Vec<MidiTrack>,
}

impl MidiFile {
  pub fn new() -> MidiFile {
    MidiFile::default()
  }

  pub fn with_tracks(tracks: Vec<MidiTrack>) -> MidiFile {
    MidiFile { tracks }
  }

  pub fn num_tracks(&self) -> usize {
    self.tracks.len()
  }

  pub fn track(&self, index: usize) -> Option<&MidiTrack> {
    self.tracks.get(index)
  }

  pub fn track_mut(&mut self, index: usize) -> Option<&mut MidiTrack> {
    self.tracks.get_mut(index)
  }

  pub fn tracks(&self) -> impl Iterator<Item = &MidiTrack> {
    self.tracks.iter()
  }

  pub fn add_track(&mut self, track: MidiTrack) -> &mut Self {
    self.tracks.push(track);
    self
  }

  /// Restores tick order in every track after edits appended events.
  pub fn sort_all_tracks(&mut self) {
    for (index, track) in self.tracks.iter_mut().enumerate() {
      if !track.is_sorted() {
        debug!("Sorting {} events of track {}", track.len(), index);
        track.sort_events();
      }
    }
  }
}
