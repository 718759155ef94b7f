//! Cut type inference from an element's paint style.
//!
//! Affinity Designer writes paint into `style="fill:rgb(..);stroke:rgb(..)"`.
//! Shaper Studio encodes cut types as colors, so the fill/stroke pair is
//! reduced to one nominal color and looked up:
//!
//! | nominal    | cut type |
//! |------------|----------|
//! | black      | outside  |
//! | white      | inside   |
//! | grey       | pocket   |
//! | dodgerblue | guide    |
//! | red        | anchor   |
//! | nonegrey   | online   |

use std::fmt;

use thiserror::Error;

use super::color::{self, NamedColor};
use super::token::CutType;
use crate::log;

/// A resolved `fill` or `stroke` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    None,
    Color(NamedColor),
}

impl Paint {
    /// Resolve a paint value. Unreadable colors are reported and fall back
    /// to black.
    pub fn resolve(value: &str) -> Self {
        let value = value.trim();
        if value == "none" {
            return Self::None;
        }
        match color::resolve_str(value) {
            Ok(named) => Self::Color(named),
            Err(err) => {
                log!("warning"; "{}, using black", err);
                Self::Color(NamedColor::Black)
            }
        }
    }
}

/// The single color a fill/stroke pair stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nominal {
    Paint(Paint),
    /// No fill with a grey stroke: a line cut
    NoneGrey,
}

impl Nominal {
    /// Combine fill and stroke.
    ///
    /// Stroke only counts when the fill is `none`; without a fill the
    /// element is treated as black.
    pub fn from_paints(fill: Option<Paint>, stroke: Option<Paint>) -> Self {
        match (fill, stroke) {
            (Some(Paint::None), Some(Paint::Color(NamedColor::Grey))) => Self::NoneGrey,
            (Some(Paint::None), Some(stroke)) => Self::Paint(stroke),
            (Some(fill), _) => Self::Paint(fill),
            (None, _) => Self::Paint(Paint::Color(NamedColor::Black)),
        }
    }

    /// Cut type for this color, `None` when the table has no entry.
    pub fn cut_type(self) -> Option<CutType> {
        match self {
            Self::Paint(Paint::Color(NamedColor::Black)) => Some(CutType::Outside),
            Self::Paint(Paint::Color(NamedColor::White)) => Some(CutType::Inside),
            Self::Paint(Paint::Color(NamedColor::Grey)) => Some(CutType::Pocket),
            Self::Paint(Paint::Color(NamedColor::DodgerBlue)) => Some(CutType::Guide),
            Self::Paint(Paint::Color(NamedColor::Red)) => Some(CutType::Anchor),
            Self::NoneGrey => Some(CutType::Online),
            Self::Paint(Paint::None) => None,
        }
    }
}

impl fmt::Display for Nominal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paint(Paint::None) => f.write_str("none"),
            Self::Paint(Paint::Color(named)) => f.write_str(named.as_str()),
            Self::NoneGrey => f.write_str("nonegrey"),
        }
    }
}

/// `fill` and `stroke` declarations of a style attribute
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PaintStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

impl PaintStyle {
    /// Read a `property:value;...` declaration list. Later declarations win.
    pub fn parse(style: &str) -> Self {
        let mut paint = Self::default();
        for declaration in style.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim().to_string();
            match property.trim() {
                "fill" => paint.fill = Some(value),
                "stroke" => paint.stroke = Some(value),
                _ => {}
            }
        }
        paint
    }

    pub fn nominal(&self) -> Nominal {
        Nominal::from_paints(
            self.fill.as_deref().map(Paint::resolve),
            self.stroke.as_deref().map(Paint::resolve),
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no cut type for color `{0}`")]
pub struct UnmappedColor(pub Nominal);

/// Infer the cut type of an element from its `style` attribute.
///
/// A missing style means black.
pub fn infer_cut_type(style: Option<&str>) -> Result<CutType, UnmappedColor> {
    let nominal = style.map(PaintStyle::parse).unwrap_or_default().nominal();
    nominal.cut_type().ok_or(UnmappedColor(nominal))
}
