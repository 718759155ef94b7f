//! Nearest named color lookup.
//!
//! The palette holds exactly the colors the cut-type table knows, so every
//! resolved color has a cut type.

use std::fmt;

use thiserror::Error;

/// Palette colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    White,
    Grey,
    DodgerBlue,
    Red,
}

/// Palette in lookup order (first wins on equal distance)
const PALETTE: [(NamedColor, [u8; 3]); 5] = [
    (NamedColor::Black, [0, 0, 0]),
    (NamedColor::White, [255, 255, 255]),
    (NamedColor::Grey, [128, 128, 128]),
    (NamedColor::DodgerBlue, [30, 144, 255]),
    (NamedColor::Red, [255, 0, 0]),
];

impl NamedColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Grey => "grey",
            Self::DodgerBlue => "dodgerblue",
            Self::Red => "red",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        PALETTE
            .iter()
            .find(|(color, _)| *color == self)
            .map_or([0, 0, 0], |(_, rgb)| *rgb)
    }

    /// Palette color by CSS keyword (`gray` is accepted for `grey`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name == "gray" {
            return Some(Self::Grey);
        }
        PALETTE
            .iter()
            .map(|(color, _)| *color)
            .find(|color| color.as_str() == name)
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color text that could not be read
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected `rgb(r,g,b)`, got `{0}`")]
    Syntax(String),

    #[error("expected 3 channels in `{input}`, found {found}")]
    Arity { input: String, found: usize },

    #[error("channel `{channel}` in `{input}` is not an integer in 0..=255")]
    Channel { input: String, channel: String },

    #[error("invalid hex color `{0}`")]
    Hex(String),

    #[error("unknown color `{0}`")]
    Unknown(String),
}

/// Map an RGB triple to the palette: exact match, else nearest by squared
/// euclidean distance.
pub fn resolve(rgb: [u8; 3]) -> NamedColor {
    if let Some((color, _)) = PALETTE.iter().find(|(_, anchor)| *anchor == rgb) {
        return *color;
    }

    let mut best = (NamedColor::Black, u32::MAX);
    for (color, anchor) in PALETTE {
        let distance = distance_sq(rgb, anchor);
        if distance < best.1 {
            best = (color, distance);
        }
    }
    best.0
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b)
        .map(|(&x, y)| {
            let d = i32::from(x) - i32::from(y);
            d.unsigned_abs() * d.unsigned_abs()
        })
        .sum()
}

/// Parse `rgb(r,g,b)` with integer channels.
pub fn parse_rgb(input: &str) -> Result<[u8; 3], ColorError> {
    let inner = input
        .trim()
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ColorError::Syntax(input.to_string()))?;

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ColorError::Arity {
            input: input.to_string(),
            found: parts.len(),
        });
    }

    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part.parse::<u8>().map_err(|_| ColorError::Channel {
            input: input.to_string(),
            channel: (*part).to_string(),
        })?;
    }
    Ok(rgb)
}

/// Parse `#rrggbb` or `#rgb`.
pub fn parse_hex(input: &str) -> Result<[u8; 3], ColorError> {
    let invalid = || ColorError::Hex(input.to_string());
    let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, i) in rgb.iter_mut().zip(0..3) {
                // `#abc` is `#aabbcc`
                *slot = channel(&hex[i..=i])? * 17;
            }
            Ok(rgb)
        }
        _ => Err(invalid()),
    }
}

/// Resolve a paint value (`rgb(...)`, hex, or palette keyword) to a palette
/// color.
pub fn resolve_str(input: &str) -> Result<NamedColor, ColorError> {
    let value = input.trim();
    if value.starts_with("rgb") {
        return parse_rgb(value).map(resolve);
    }
    if value.starts_with('#') {
        return parse_hex(value).map(resolve);
    }
    NamedColor::from_name(value).ok_or_else(|| ColorError::Unknown(value.to_string()))
}
