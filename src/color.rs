use std::fmt;
use std::str::FromStr;

use crate::error::DialError;

/// Color representation for dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const TRANSPARENT: Color = Color::with_alpha(0x00, 0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a coverage multiplier in `0.0..=1.0`.
    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Color::new(0x00, 0x00, 0x00),
            "white" => Color::new(0xff, 0xff, 0xff),
            "red" => Color::new(0xff, 0x00, 0x00),
            "green" => Color::new(0x00, 0x80, 0x00),
            "lime" => Color::new(0x00, 0xff, 0x00),
            "blue" => Color::new(0x00, 0x00, 0xff),
            "yellow" => Color::new(0xff, 0xff, 0x00),
            "orange" => Color::new(0xff, 0xa5, 0x00),
            "gray" | "grey" => Color::new(0x80, 0x80, 0x80),
            "silver" => Color::new(0xc0, 0xc0, 0xc0),
            "maroon" => Color::new(0x80, 0x00, 0x00),
            "navy" => Color::new(0x00, 0x00, 0x80),
            "teal" => Color::new(0x00, 0x80, 0x80),
            "purple" => Color::new(0x80, 0x00, 0x80),
            "transparent" => Color::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    fn from_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => Some(Color::new(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Color::with_alpha(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Color::new(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::with_alpha(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    // rgb(r, g, b) and rgba(r, g, b, a) with a in 0..=1
    fn from_function(s: &str) -> Option<Self> {
        let (args, with_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else {
            (s.strip_prefix("rgb(")?.strip_suffix(')')?, false)
        };
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |p: &str| p.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
        match (parts.as_slice(), with_alpha) {
            ([r, g, b], false) => Some(Color::new(channel(r)?, channel(g)?, channel(b)?)),
            ([r, g, b, a], true) => {
                let alpha = a.parse::<f64>().ok()?.clamp(0.0, 1.0);
                Some(Color::with_alpha(
                    channel(r)?,
                    channel(g)?,
                    channel(b)?,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = DialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let parsed = if let Some(digits) = trimmed.strip_prefix('#') {
            Color::from_hex(digits)
        } else if trimmed.starts_with("rgb") {
            Color::from_function(&trimmed)
        } else {
            Color::named(&trimmed)
        };
        parsed.ok_or_else(|| DialError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
