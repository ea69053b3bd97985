use std::fmt;

use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum ColorError {
  #[fail(display = "Invalid color '{}', expected #rrggbb", value)]
  InvalidHex { value: String },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Color {
  r: u8,
  g: u8,
  b: u8,
}

impl Color {
  pub const WHITE: Color = Color {
    r: 255,
    g: 255,
    b: 255,
  };

  pub fn from_rgb(r: u8, g: u8, b: u8) -> Color {
    Color { r, g, b }
  }

  pub fn from_hex(value: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidHex {
      value: value.to_string(),
    };

    let digits = value.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
      return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
      u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    Ok(Color::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
  }

  pub fn rgb(&self) -> (u8, u8, u8) {
    (self.r, self.g, self.b)
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "rgb({},{},{})", self.r, self.g, self.b)
  }
}

#[cfg(test)]
mod test {

  use super::{Color, ColorError};

  #[test]
  pub fn from_rgb() {
    let color = Color::from_rgb(10, 20, 30);
    assert_eq!(color.rgb(), (10, 20, 30));
    assert_eq!(color.to_string(), "rgb(10,20,30)");
  }

  #[test]
  pub fn from_hex() {
    assert_eq!(Color::from_hex("#0a141e"), Ok(Color::from_rgb(10, 20, 30)));
    assert_eq!(Color::from_hex("#FFFFFF"), Ok(Color::WHITE));
  }

  #[test]
  pub fn from_hex_invalid() {
    for value in &["0a141e", "#0a141", "#0a141g", "#0a141e0"] {
      assert_eq!(
        Color::from_hex(value),
        Err(ColorError::InvalidHex {
          value: value.to_string()
        })
      );
    }
  }
}
