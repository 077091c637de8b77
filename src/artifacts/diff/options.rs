use crate::artifacts::core::{DiffError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How whitespace takes part in unit equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceMode {
    /// Whitespace compares like any other character
    #[default]
    None,
    /// A whitespace run on one side matches a whitespace run of any length on
    /// the other, but both sides must have a run at that point
    Collapse,
    /// Whitespace is dropped from both sides before comparing
    Ignore,
}

/// Strategy used to find the shortest edit script
///
/// Every strategy returns exactly the same script; they only differ in
/// time and memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// O((N+M)·D) time, O(D²) memory
    #[default]
    Myers,
    /// Full LCS table: O(N·M) time and memory, no early exit
    Minimal,
    /// Strips the common prefix, then runs `Myers` on the rest
    Trimmed,
}

/// Which pairwise diff leads when both start at the same base offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreak {
    PreferLeft,
    #[default]
    PreferRight,
}

/// Selector accepted in configuration files: a name or a numeric code
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Selector {
    Code(u32),
    Name(String),
}

impl FromStr for WhitespaceMode {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(WhitespaceMode::None),
            "collapse" => Ok(WhitespaceMode::Collapse),
            "ignore" => Ok(WhitespaceMode::Ignore),
            other => Err(DiffError::invalid_config(format!(
                "unknown whitespace mode '{other}'"
            ))),
        }
    }
}

impl TryFrom<u32> for WhitespaceMode {
    type Error = DiffError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(WhitespaceMode::None),
            1 => Ok(WhitespaceMode::Collapse),
            2 => Ok(WhitespaceMode::Ignore),
            other => Err(DiffError::invalid_config(format!(
                "unknown whitespace mode {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for WhitespaceMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Selector::deserialize(deserializer)? {
            Selector::Code(code) => WhitespaceMode::try_from(code),
            Selector::Name(name) => name.parse(),
        }
        .map_err(de::Error::custom)
    }
}

impl fmt::Display for WhitespaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhitespaceMode::None => write!(f, "none"),
            WhitespaceMode::Collapse => write!(f, "collapse"),
            WhitespaceMode::Ignore => write!(f, "ignore"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "myers" | "default" => Ok(Algorithm::Myers),
            "minimal" => Ok(Algorithm::Minimal),
            "trimmed" => Ok(Algorithm::Trimmed),
            other => Err(DiffError::invalid_config(format!(
                "unknown diff algorithm '{other}'"
            ))),
        }
    }
}

impl TryFrom<u32> for Algorithm {
    type Error = DiffError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Algorithm::Myers),
            1 => Ok(Algorithm::Minimal),
            2 => Ok(Algorithm::Trimmed),
            other => Err(DiffError::invalid_config(format!(
                "unknown diff algorithm {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Selector::deserialize(deserializer)? {
            Selector::Code(code) => Algorithm::try_from(code),
            Selector::Name(name) => name.parse(),
        }
        .map_err(de::Error::custom)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Myers => write!(f, "myers"),
            Algorithm::Minimal => write!(f, "minimal"),
            Algorithm::Trimmed => write!(f, "trimmed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiffOptions {
    pub ignore_case: bool,
    #[serde(rename = "whitespaceMode")]
    pub whitespace: WhitespaceMode,
    pub algorithm: Algorithm,
    #[serde(rename = "wordLevelHighlighting")]
    pub word_level: bool,
    pub tie_break: TieBreak,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            ignore_case: false,
            whitespace: WhitespaceMode::None,
            algorithm: Algorithm::Myers,
            word_level: true,
            tie_break: TieBreak::PreferRight,
        }
    }
}

impl DiffOptions {
    /// Parses options from JSON; unknown selector values are configuration
    /// errors rather than JSON errors
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|error| DiffError::invalid_config(error.to_string()))
    }
}
