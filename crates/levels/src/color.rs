//! RGB color values

use crate::error::{LevelError, Result};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,

    /// Green channel
    pub g: u8,

    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string.
    ///
    /// This is the form background and entity colors are stored in;
    /// anything else is rejected.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| LevelError::InvalidColor(text.to_string()))?;

        let parse = |range| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| LevelError::InvalidColor(text.to_string()))
        };

        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }
}
