use failure::Error;
use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use pianoroll_core::editor::{NoteEdit, NoteEditSpec};
use pianoroll_core::notes::{LinkedNote, NoteError};

/// A batch of note edits read from TOML, one `[[edit]]` table per edit.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EditScript {
  pub edit: Vec<NoteEditSpec>,
}

impl EditScript {
  pub fn from_file<'a, T>(path: T) -> Result<EditScript, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let mut file = File::open(path.into())?;
    file.read_to_string(&mut content)?;
    EditScript::from_str(content.as_str())
  }

  pub fn from_str<'a, T>(content: T) -> Result<EditScript, Error>
  where
    T: Into<&'a str>,
  {
    let script: EditScript = toml::from_str(content.into())?;
    Ok(script)
  }

  pub fn edits(&self) -> Vec<NoteEdit> {
    self.edit.iter().map(NoteEdit::from).collect()
  }

  /// Positions of the non-delete edits whose note is out of range, with the reason.
  /// The editor still applies them, clamped.
  pub fn invalid_notes(&self) -> Vec<(usize, NoteError)> {
    self
      .edit
      .iter()
      .enumerate()
      .filter(|(_, spec)| !spec.delete)
      .filter_map(|(index, spec)| {
        LinkedNote::new(spec.on, spec.off, spec.pitch, spec.velocity)
          .err()
          .map(|err| (index, err))
      })
      .collect()
  }
}

#[cfg(test)]
mod test {

  use super::EditScript;
  use pianoroll_core::notes::NoteError;
  use pianoroll_core::time::TicksTime;

  #[test]
  pub fn from_str() {
    let script = EditScript::from_str(
      r#"
[[edit]]
group = 1
note = 2
delete = true

[[edit]]
group = 0
note = 4
on = 480
off = 960
pitch = 64
velocity = 90
"#,
    )
    .unwrap();

    let edits = script.edits();
    assert_eq!(edits.len(), 2);
    assert!(edits[0].is_delete);
    assert_eq!((edits[0].group_index, edits[0].note_index), (1, 2));
    assert!(!edits[1].is_delete);
    assert_eq!(edits[1].new_note.on_tick, TicksTime::new(480));
    assert_eq!(edits[1].new_note.off_tick, TicksTime::new(960));
    assert_eq!(edits[1].new_note.pitch, 64);
    assert_eq!(edits[1].new_note.velocity, 90);
  }

  #[test]
  pub fn invalid_notes() {
    let script = EditScript::from_str(
      r#"
[[edit]]
group = 0
note = 0
delete = true

[[edit]]
group = 0
note = 1
on = 10
off = 20
pitch = 60
velocity = 100

[[edit]]
group = 0
note = 2
on = 30
off = 30
pitch = 60
velocity = 100

[[edit]]
group = 0
note = 3
on = 40
off = 50
pitch = 60
"#,
    )
    .unwrap();

    assert_eq!(
      script.invalid_notes(),
      vec![
        (
          2,
          NoteError::InvalidLength {
            on_tick: TicksTime::new(30),
            off_tick: TicksTime::new(30),
          }
        ),
        (3, NoteError::InvalidVelocity { velocity: 0 }),
      ]
    );
  }

  #[test]
  pub fn empty_script() {
    assert!(EditScript::from_str("").unwrap().edits().is_empty());
  }
}
