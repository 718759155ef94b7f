//! `shaper:<name>=<value>` tokens.
//!
//! Affinity Designer has no custom attributes, so cut settings are typed into
//! layer names: `Outline shaper:cutType=outside shaper:cutDepth=6mm`. Words
//! without the `shaper:` prefix are free text and ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::log;

/// Prefix that marks a word of a layer name as a token
pub const TOKEN_PREFIX: &str = "shaper:";

// ============================================================================
// Vocabulary
// ============================================================================

/// Attribute names Shaper Studio understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaperAttr {
    CutDepth,
    ToolDia,
    CutOffset,
    CutType,
}

impl ShaperAttr {
    pub const ALL: [Self; 4] = [Self::CutDepth, Self::ToolDia, Self::CutOffset, Self::CutType];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CutDepth => "cutDepth",
            Self::ToolDia => "toolDia",
            Self::CutOffset => "cutOffset",
            Self::CutType => "cutType",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.as_str() == name)
    }
}

impl fmt::Display for ShaperAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cut types.
///
/// `Online` and `Anchor` only come out of style inference; users pick from
/// the other four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutType {
    Guide,
    Inside,
    Outside,
    Pocket,
    Online,
    Anchor,
}

impl CutType {
    pub const ALL: [Self; 6] = [
        Self::Guide,
        Self::Inside,
        Self::Outside,
        Self::Pocket,
        Self::Online,
        Self::Anchor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guide => "guide",
            Self::Inside => "inside",
            Self::Outside => "outside",
            Self::Pocket => "pocket",
            Self::Online => "online",
            Self::Anchor => "anchor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cut| cut.as_str() == name)
    }

    /// Whether users may request this cut type in a layer name.
    pub fn is_user_value(self) -> bool {
        matches!(self, Self::Guide | Self::Inside | Self::Outside | Self::Pocket)
    }

    /// Fill color Shaper Studio uses to display this cut type.
    pub fn fill(self) -> &'static str {
        match self {
            Self::Outside => "#000000",
            Self::Inside => "#FFFFFF",
            Self::Pocket => "#7F7F7F",
            Self::Guide => "#0068FF",
            Self::Online => "none",
            Self::Anchor => "#FF0000",
        }
    }
}

impl fmt::Display for CutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Token
// ============================================================================

/// Malformed token text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("`{0}` does not start with `shaper:`")]
    MissingPrefix(String),

    #[error("`{0}` has no `=value` part")]
    MissingValue(String),

    #[error("`{0}` has an invalid attribute name")]
    InvalidName(String),
}

/// Outcome of checking a well-formed token against the known vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    Ok,
    UnknownName,
    UnknownCutType,
}

/// One `shaper:<name>=<value>` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShaperToken {
    pub name: String,
    pub value: String,
}

impl ShaperToken {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The known attribute this token sets, if any.
    pub fn attr(&self) -> Option<ShaperAttr> {
        ShaperAttr::from_name(&self.name)
    }

    /// Check name and, for `cutType`, value. User input may only name the
    /// four selectable cut types.
    pub fn check(&self) -> TokenCheck {
        match self.attr() {
            None => TokenCheck::UnknownName,
            Some(ShaperAttr::CutType)
                if !CutType::from_name(&self.value).is_some_and(CutType::is_user_value) =>
            {
                TokenCheck::UnknownCutType
            }
            Some(_) => TokenCheck::Ok,
        }
    }

    /// Log a warning for tokens outside the vocabulary. They are still applied.
    pub fn warn_if_unknown(&self, origin: &str) {
        match self.check() {
            TokenCheck::Ok => {}
            TokenCheck::UnknownName => {
                log!("warning"; "unsupported shaper attribute `{}` in {}", self.name, origin);
            }
            TokenCheck::UnknownCutType => {
                log!("warning"; "unsupported cut type `{}` in {}", self.value, origin);
            }
        }
    }
}

impl fmt::Display for ShaperToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}={}", TOKEN_PREFIX, self.name, self.value)
    }
}

impl FromStr for ShaperToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let body = s
            .strip_prefix(TOKEN_PREFIX)
            .ok_or_else(|| TokenError::MissingPrefix(s.to_string()))?;
        let (name, value) = body
            .split_once('=')
            .ok_or_else(|| TokenError::MissingValue(s.to_string()))?;
        if !is_valid_name(name) {
            return Err(TokenError::InvalidName(s.to_string()));
        }
        Ok(Self::new(name, value))
    }
}

impl TryFrom<String> for ShaperToken {
    type Error = TokenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ShaperToken> for String {
    fn from(token: ShaperToken) -> Self {
        token.to_string()
    }
}

/// The name becomes the local part of an XML attribute, so it must be one.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Extract the tokens of a layer name.
///
/// Malformed `shaper:` words are reported and skipped; well-formed tokens
/// with unknown names or cut types are reported and kept.
pub fn extract_tokens(layer_name: &str) -> Vec<ShaperToken> {
    layer_name
        .split_whitespace()
        .filter(|word| word.starts_with(TOKEN_PREFIX))
        .filter_map(|word| match word.parse::<ShaperToken>() {
            Ok(token) => {
                token.warn_if_unknown(&format!("layer `{layer_name}`"));
                Some(token)
            }
            Err(err) => {
                log!("warning"; "ignoring {} in layer `{}`", err, layer_name);
                None
            }
        })
        .collect()
}
