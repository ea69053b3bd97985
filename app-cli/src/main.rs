use std::path::Path;

use log::{debug, info, warn, LevelFilter};

use failure::{Error, Fail};

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};

use pianoroll_core::{
  color::Color, config::Config, editor::{MutableMidiFile, NoteEdit}, midi::MidiFile,
  notes::NotesCursor, visualization::VisualizationData,
};

mod loader;

mod script;
use crate::script::EditScript;

const PIANOROLL_CONFIG: &str = "PIANOROLL_CONFIG";
const DEFAULT_PIANOROLL_CONFIG: &str = "pianoroll.toml";

const PIANOROLL_LOG_CONFIG: &str = "PIANOROLL_LOG_CONFIG";
const DEFAULT_PIANOROLL_LOG_CONFIG: &str = "log4rs.yaml";

const MAX_LISTED_NOTES: usize = 8;

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },

  #[fail(display = "Usage: pianoroll-cli <file.mid> [edits.toml]")]
  Usage,
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let config = init_config()?;
  let palette = config.visualization.palette()?;

  let mut args = std::env::args().skip(1);
  let midi_path = args.next().ok_or(MainError::Usage)?;
  let edits_path = args.next();

  let file = loader::load_midi_file(midi_path.as_str())?;
  let mut file = MutableMidiFile::new(file, config.editor.clone());
  info!(
    "Linked {} notes in {} groups",
    file.notes().num_notes(),
    file.notes().len()
  );

  if let Some(edits_path) = edits_path {
    apply_edit_script(&mut file, edits_path.as_str())?;
  }

  file.sort_all_tracks();

  print_notes(&file, &palette);
  print_tracks(&file.into_file());

  Ok(())
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(PIANOROLL_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_PIANOROLL_LOG_CONFIG.to_string());

  if Path::new(&log_config_path).exists() {
    log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
      MainError::LoggingInit {
        cause: err.to_string(),
      }
    })?;
  } else {
    let stdout = ConsoleAppender::builder().build();
    let log_config = LogConfig::builder()
      .appender(Appender::builder().build("stdout", Box::new(stdout)))
      .build(Root::builder().appender("stdout").build(LevelFilter::Info))
      .map_err(|err| MainError::LoggingInit {
        cause: err.to_string(),
      })?;
    log4rs::init_config(log_config).map_err(|err| MainError::LoggingInit {
      cause: err.to_string(),
    })?;
  }

  Ok(())
}

fn init_config() -> Result<Config, Error> {
  let config_path =
    std::env::var(PIANOROLL_CONFIG).unwrap_or_else(|_| DEFAULT_PIANOROLL_CONFIG.to_string());

  if !Path::new(&config_path).exists() {
    info!("No configuration at {}, using defaults", config_path);
    return Ok(Config::default());
  }

  info!("Loading configuration from {} ...", config_path);
  let config = Config::from_file(config_path.as_str())?;
  debug!("{:#?}", config);

  Ok(config)
}

fn apply_edit_script(file: &mut MutableMidiFile, path: &str) -> Result<(), Error> {
  info!("Applying edits from {} ...", path);

  let script = EditScript::from_file(path)?;
  for (index, err) in script.invalid_notes() {
    warn!("Edit {}: {}, the note will be clamped", index, err);
  }
  let edits = script.edits();
  debug!("Editing with {:?}", file.config());

  let (listener, changes) = file.subscribe();
  let mut on_complete = |batch: &[NoteEdit]| info!("Completed a batch of {} edits", batch.len());
  let warnings = file.modify_notes(&edits, Some(&mut on_complete));
  file.unsubscribe(&listener);

  debug!("{} change notifications", changes.try_iter().count());
  if !warnings.is_empty() {
    info!("{} edits were applied with warnings", warnings.len());
  }

  Ok(())
}

fn print_notes(file: &MutableMidiFile, palette: &[Color]) {
  let notes = file.notes();
  let visualization = VisualizationData::for_notes(notes, palette);

  for (group_index, group) in notes.groups().iter().enumerate() {
    let color = visualization
      .lookup(group.track_index(), group.channel_index())
      .map(|vis| vis.color)
      .unwrap_or(Color::WHITE);
    println!(
      "[{}] {} (track {}, channel {}) {} notes {}",
      group_index,
      group.get_name(),
      group.track_index(),
      group.channel_index(),
      group.len(),
      color
    );
  }

  for (id, note) in NotesCursor::new(notes).take(MAX_LISTED_NOTES) {
    println!(
      "  {}:{} key {} vel {} [{}, {})",
      id.group_index, id.note_index, note.pitch, note.velocity, note.on_tick, note.off_tick
    );
  }
}

fn print_tracks(file: &MidiFile) {
  for (track_index, track) in file.tracks().enumerate() {
    println!(
      "Track {} {:?}: {} events",
      track_index,
      track.get_name().unwrap_or("-"),
      track.len()
    );
  }
}
