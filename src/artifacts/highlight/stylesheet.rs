use crate::artifacts::core::{DiffError, Result};
use crate::artifacts::highlight::markers::{DIFF_CLASS, DIFF_ID_ATTRIBUTE, Style};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `#rrggbb`, the leading hash being optional
const RGB_REGEX: &str = r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$";

const WORD_CLASS: &str = "dd-word";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        let re = regex::Regex::new(RGB_REGEX)
            .map_err(|error| DiffError::invalid_config(format!("colour pattern: {error}")))?;
        let caps = re
            .captures(s.trim())
            .ok_or_else(|| DiffError::invalid_config(format!("invalid colour: {s}")))?;

        let channel = |i: usize| {
            u8::from_str_radix(&caps[i], 16)
                .map_err(|_| DiffError::invalid_config(format!("invalid colour: {s}")))
        };

        Ok(Rgb(channel(1)?, channel(2)?, channel(3)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = DiffError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Background and optional text colour of one marker style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub background: Rgb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Rgb>,
}

impl Swatch {
    pub const fn background(background: Rgb) -> Self {
        Swatch {
            background,
            text: None,
        }
    }
}

/// Palette used to render diff markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorSettings {
    pub changed: Swatch,
    pub deleted: Swatch,
    pub selected_changed: Swatch,
    pub selected_deleted: Swatch,
    pub snapshot_changed: Swatch,
    pub snapshot_deleted: Swatch,
    pub selected_snapshot_changed: Swatch,
    pub selected_snapshot_deleted: Swatch,
    pub word: Swatch,
    pub selected_word: Swatch,
}

impl Default for ColorSettings {
    fn default() -> Self {
        ColorSettings {
            changed: Swatch::background(Rgb(0xff, 0xff, 0x40)),
            deleted: Swatch::background(Rgb(0xc0, 0xc0, 0xc0)),
            selected_changed: Swatch::background(Rgb(0xff, 0x40, 0x40)),
            selected_deleted: Swatch::background(Rgb(0xf0, 0xc0, 0xc0)),
            snapshot_changed: Swatch::background(Rgb(0xff, 0xff, 0xc0)),
            snapshot_deleted: Swatch::background(Rgb(0xe0, 0xe0, 0xe0)),
            selected_snapshot_changed: Swatch::background(Rgb(0xff, 0xa0, 0xa0)),
            selected_snapshot_deleted: Swatch::background(Rgb(0xf0, 0xe0, 0xe0)),
            word: Swatch::background(Rgb(0xf0, 0xc0, 0x00)),
            selected_word: Swatch::background(Rgb(0xff, 0x80, 0x00)),
        }
    }
}

impl ColorSettings {
    pub fn swatch(&self, style: Style, selected: bool) -> Swatch {
        match (style, selected) {
            (Style::Changed, false) => self.changed,
            (Style::Changed, true) => self.selected_changed,
            (Style::Deleted, false) => self.deleted,
            (Style::Deleted, true) => self.selected_deleted,
            (Style::SnapshotChanged, false) => self.snapshot_changed,
            (Style::SnapshotChanged, true) => self.selected_snapshot_changed,
            (Style::SnapshotDeleted, false) => self.snapshot_deleted,
            (Style::SnapshotDeleted, true) => self.selected_snapshot_deleted,
        }
    }
}

/// Renders the rules colouring every marker style, plus the selected
/// variants for diff `selected` when there is one
pub fn stylesheet(selected: Option<usize>, colors: &ColorSettings) -> String {
    let mut css = String::new();

    for style in Style::ALL {
        css.push_str(&rule(
            &format!(".{}", style.class_name()),
            colors.swatch(style, false),
        ));
    }
    css.push_str(&rule(&format!(".{WORD_CLASS}"), colors.word));

    if let Some(index) = selected {
        let id = format!("[{DIFF_ID_ATTRIBUTE}=\"{index}\"]");
        for style in Style::ALL {
            css.push_str(&rule(
                &format!(".{}{id}", style.class_name()),
                colors.swatch(style, true),
            ));
        }
        css.push_str(&rule(
            &format!(".{DIFF_CLASS}{id} .{WORD_CLASS}"),
            colors.selected_word,
        ));
    }

    css
}

fn rule(selector: &str, swatch: Swatch) -> String {
    let color = swatch
        .text
        .map(|text| format!("color: {text}; "))
        .unwrap_or_default();
    format!(
        "{selector} {{ {color}background-color: {}; }}\n",
        swatch.background
    )
}
