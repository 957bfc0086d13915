//! RGB colours for habitué colour roles.

use std::fmt;

use crate::error::AppError;

/// 24-bit colour stored as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Preset palette offered by `/set_color`, matching Discord's brand colours.
pub const PRESETS: &[(&str, Rgb)] = &[
    ("blue", Rgb::from_u32(0x3498db)),
    ("blurple", Rgb::from_u32(0x5865f2)),
    ("fuchsia", Rgb::from_u32(0xeb459e)),
    ("gold", Rgb::from_u32(0xf1c40f)),
    ("green", Rgb::from_u32(0x2ecc71)),
    ("greyple", Rgb::from_u32(0x99aab5)),
    ("magenta", Rgb::from_u32(0xe91e63)),
    ("og_blurple", Rgb::from_u32(0x7289da)),
    ("orange", Rgb::from_u32(0xe67e22)),
    ("purple", Rgb::from_u32(0x9b59b6)),
    ("red", Rgb::from_u32(0xe74c3c)),
    ("teal", Rgb::from_u32(0x1abc9c)),
    ("yellow", Rgb::from_u32(0xfee75c)),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const fn from_u32(value: u32) -> Self {
        Self {
            red: ((value >> 16) & 0xff) as u8,
            green: ((value >> 8) & 0xff) as u8,
            blue: (value & 0xff) as u8,
        }
    }

    pub fn to_u32(self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    /// Parses a `#rrggbb` string.
    ///
    /// # Returns
    /// - `Ok(Rgb)` - Valid colour
    /// - `Err(AppError::BadRequest)` - Value is not `#` followed by six hex digits
    pub fn from_hex(value: &str) -> Result<Self, AppError> {
        let invalid = || AppError::BadRequest(format!("{} is not a valid hexadecimal color", value));

        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let parsed = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(Self::from_u32(parsed))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Looks up a colour from the preset palette by name.
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, rgb)| *rgb)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
