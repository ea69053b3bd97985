use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::color::Color;

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Editor {
  /// Skip edits whose raw events are missing instead of editing the notes anyway
  pub strict_raw_match: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Visualization {
  pub default_track_colors: Vec<String>,
}

impl Default for Visualization {
  fn default() -> Visualization {
    Visualization {
      default_track_colors: vec![
        "#4e79a7".to_string(),
        "#f28e2b".to_string(),
        "#e15759".to_string(),
        "#76b7b2".to_string(),
        "#59a14f".to_string(),
        "#edc948".to_string(),
        "#b07aa1".to_string(),
        "#ff9da7".to_string(),
      ],
    }
  }
}

impl Visualization {
  pub fn palette(&self) -> Result<Vec<Color>, Error> {
    let palette = self
      .default_track_colors
      .iter()
      .map(|value| Color::from_hex(value))
      .collect::<Result<Vec<Color>, _>>()?;
    Ok(palette)
  }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
  pub editor: Editor,
  pub visualization: Visualization,
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}
