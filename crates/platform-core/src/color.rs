//! Fill colour for the covering windows.

use std::str::FromStr;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{input}': expected a color name or #RGB / #RRGGBB hex code")]
pub struct ColorParseError {
    pub input: String,
}

const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("white", Rgb::new(0xff, 0xff, 0xff)),
    ("red", Rgb::new(0xff, 0x00, 0x00)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("lime", Rgb::new(0x00, 0xff, 0x00)),
    ("blue", Rgb::new(0x00, 0x00, 0xff)),
    ("yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("gray", Rgb::new(0x80, 0x80, 0x80)),
    ("grey", Rgb::new(0x80, 0x80, 0x80)),
    ("silver", Rgb::new(0xc0, 0xc0, 0xc0)),
    ("orange", Rgb::new(0xff, 0xa5, 0x00)),
    ("purple", Rgb::new(0x80, 0x00, 0x80)),
    ("pink", Rgb::new(0xff, 0xc0, 0xcb)),
    ("brown", Rgb::new(0xa5, 0x2a, 0x2a)),
    ("navy", Rgb::new(0x00, 0x00, 0x80)),
    ("maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("olive", Rgb::new(0x80, 0x80, 0x00)),
    ("teal", Rgb::new(0x00, 0x80, 0x80)),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// GDI `COLORREF` layout: `0x00BBGGRR`.
    pub fn to_colorref(self) -> u32 {
        (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }

    fn from_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut channels = digits
                    .chars()
                    .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::new(
                    channels.next()??,
                    channels.next()??,
                    channels.next()??,
                ))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix('#') {
            Some(digits) => Self::from_hex(digits),
            None => {
                let lower = trimmed.to_ascii_lowercase();
                NAMED
                    .iter()
                    .find(|(name, _)| *name == lower)
                    .map(|(_, rgb)| *rgb)
            }
        };
        parsed.ok_or_else(|| ColorParseError {
            input: s.to_string(),
        })
    }
}
