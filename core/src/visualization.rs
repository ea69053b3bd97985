use crate::color::Color;
use crate::midi::types::U4;
use crate::midi::MidiFile;
use crate::notes::LinkedCollection;

/// How a piano roll shows the notes of one track or note group.
#[derive(Debug, PartialEq, Clone)]
pub struct TrackVisualization {
  pub visible: bool,
  pub color: Color,
  pub name: String,
  pub track_index: usize,
  /// Unset for entries that cover every channel of the track
  pub channel_index: Option<U4>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct VisualizationData {
  tracks: Vec<TrackVisualization>,
}

impl VisualizationData {
  pub fn new(tracks: Vec<TrackVisualization>) -> VisualizationData {
    VisualizationData { tracks }
  }

  /// One visible entry per raw track, colors taken in turn from the palette
  pub fn for_file(file: &MidiFile, palette: &[Color]) -> VisualizationData {
    let tracks = file
      .tracks()
      .enumerate()
      .map(|(track_index, track)| TrackVisualization {
        visible: true,
        color: palette_color(palette, track_index),
        name: track.get_name().unwrap_or_default().to_string(),
        track_index,
        channel_index: None,
      })
      .collect();
    VisualizationData { tracks }
  }

  /// One visible entry per note group
  pub fn for_notes(collection: &LinkedCollection, palette: &[Color]) -> VisualizationData {
    let tracks = collection
      .groups()
      .iter()
      .enumerate()
      .map(|(group_index, group)| TrackVisualization {
        visible: true,
        color: palette_color(palette, group_index),
        name: group.get_name().to_string(),
        track_index: group.track_index(),
        channel_index: Some(group.channel_index()),
      })
      .collect();
    VisualizationData { tracks }
  }

  pub fn tracks(&self) -> &[TrackVisualization] {
    self.tracks.as_slice()
  }

  pub fn tracks_mut(&mut self) -> &mut [TrackVisualization] {
    self.tracks.as_mut_slice()
  }

  /// The entry for a track and channel, or failing that the first entry of the track
  pub fn lookup(&self, track_index: usize, channel_index: U4) -> Option<&TrackVisualization> {
    self
      .tracks
      .iter()
      .find(|vis| vis.track_index == track_index && vis.channel_index == Some(channel_index))
      .or_else(|| {
        self
          .tracks
          .iter()
          .find(|vis| vis.track_index == track_index)
      })
  }
}

fn palette_color(palette: &[Color], index: usize) -> Color {
  if palette.is_empty() {
    Color::WHITE
  } else {
    palette[index % palette.len()]
  }
}

#[cfg(test)]
mod test {

  use super::VisualizationData;
  use crate::color::Color;
  use crate::midi::{Message, MidiFile, MidiTrack};
  use crate::notes;

  fn file() -> MidiFile {
    let mut drums = MidiTrack::with_name("Drums");
    drums.set_primary_channel(9);
    drums
      .push(0u64, Message::note_on(9, 36, 100))
      .push(10u64, Message::note_off(9, 36))
      .push(0u64, Message::note_on(10, 40, 100))
      .push(10u64, Message::note_off(10, 40));
    let bass = MidiTrack::with_name("Bass");
    MidiFile::with_tracks(vec![drums, bass])
  }

  #[test]
  /// Colors cycle through the palette
  pub fn for_file() {
    let palette = vec![Color::from_rgb(1, 1, 1)];
    let vis = VisualizationData::for_file(&file(), &palette);

    assert_eq!(vis.tracks().len(), 2);
    assert!(vis.tracks().iter().all(|track| track.visible));
    assert!(vis.tracks().iter().all(|track| track.color == palette[0]));
    assert_eq!(vis.tracks()[1].name, "Bass");
    assert_eq!(vis.tracks()[1].channel_index, None);
  }

  #[test]
  pub fn for_notes_without_palette() {
    let collection = notes::build(Some(&file()));
    let vis = VisualizationData::for_notes(&collection, &[]);

    let keys: Vec<_> = vis
      .tracks()
      .iter()
      .map(|track| (track.name.as_str(), track.track_index, track.channel_index))
      .collect();
    assert_eq!(keys, vec![("Drums", 0, Some(9)), ("Drums Ch:10", 0, Some(10))]);
    assert!(vis.tracks().iter().all(|track| track.color == Color::WHITE));
  }

  #[test]
  /// Lookup prefers the exact channel and falls back to the track
  pub fn lookup() {
    let palette = vec![Color::from_rgb(1, 0, 0), Color::from_rgb(0, 1, 0)];
    let collection = notes::build(Some(&file()));
    let mut vis = VisualizationData::for_notes(&collection, &palette);
    vis.tracks_mut()[1].visible = false;

    assert_eq!(vis.lookup(0, 10).map(|track| track.visible), Some(false));
    assert_eq!(vis.lookup(0, 9).map(|track| track.color), Some(palette[0]));
    assert_eq!(vis.lookup(0, 3).map(|track| track.channel_index), Some(Some(9)));
    assert_eq!(vis.lookup(1, 0), None);

    let by_track = VisualizationData::for_file(&file(), &palette);
    assert_eq!(by_track.lookup(1, 5).map(|track| track.name.as_str()), Some("Bass"));
  }
}
