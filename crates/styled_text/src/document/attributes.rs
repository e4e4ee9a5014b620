// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Formatting attributes carried by every run of the document.
//!
//! Each dimension is a named field of [`AttributeSet`], so merging and
//! mutation logic can match on them exhaustively. [`Attribute`] is the
//! single-dimension update used by [`RunList::set_attribute`].
//!
//! [`RunList::set_attribute`]: crate::RunList::set_attribute

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ColorParseError;

/// Font size (points) of ordinary body text.
pub const BODY_FONT_SIZE: f32 = 17.0;

/// An opaque RGB colour, compared by value.
///
/// Serialized as a `#rrggbb` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Paragraph-level layout attributes.
///
/// Bulleted paragraphs are flagged explicitly rather than inferred from a
/// non-zero indent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub is_bulleted: bool,
    pub head_indent: f32,
    pub first_line_indent: f32,
    pub paragraph_spacing: f32,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            is_bulleted: false,
            head_indent: 0.0,
            first_line_indent: 0.0,
            paragraph_spacing: 0.0,
        }
    }
}

/// The full set of formatting attributes of one run.
///
/// `Default` is the "clear formatting" value: plain body text with no
/// colour, link or paragraph style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Color>,
    pub font_size: f32,
    pub paragraph_style: Option<ParagraphStyle>,
    /// Target of a link, from an inline link attachment or imported Markdown.
    pub link: Option<String>,
    pub background: Option<Color>,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            color: None,
            font_size: BODY_FONT_SIZE,
            paragraph_style: None,
            link: None,
            background: None,
        }
    }
}

impl AttributeSet {
    /// Overwrite the single dimension named by `attribute`.
    pub fn apply(&mut self, attribute: &Attribute) {
        match attribute {
            Attribute::Bold(v) => self.bold = *v,
            Attribute::Italic(v) => self.italic = *v,
            Attribute::Underline(v) => self.underline = *v,
            Attribute::Color(v) => self.color = *v,
            Attribute::FontSize(v) => self.font_size = *v,
            Attribute::ParagraphStyle(v) => self.paragraph_style = *v,
            Attribute::Link(v) => self.link = v.clone(),
            Attribute::Background(v) => self.background = *v,
        }
    }

    /// A copy with `attribute` applied.
    pub fn with(mut self, attribute: &Attribute) -> Self {
        self.apply(attribute);
        self
    }

    /// Whether this run belongs to a bulleted paragraph.
    pub fn is_bulleted(&self) -> bool {
        self.paragraph_style.is_some_and(|p| p.is_bulleted)
    }

    /// The attributes that typing next to a character with these
    /// attributes should produce. Link styling does not extend into
    /// newly typed text.
    pub(crate) fn for_typing(&self) -> Self {
        let mut typing = self.clone();
        if typing.link.take().is_some() {
            typing.background = None;
            typing.underline = false;
        }
        typing
    }

    /// These attributes with the link target and its tint removed.
    pub(crate) fn without_link(&self) -> Self {
        let mut plain = self.clone();
        plain.link = None;
        plain.background = None;
        plain
    }
}

/// A single attribute dimension together with its new value.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    Color(Option<Color>),
    FontSize(f32),
    ParagraphStyle(Option<ParagraphStyle>),
    Link(Option<String>),
    Background(Option<Color>),
}

/// Heading levels offered by the toolbar.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    Title,
    Heading,
    Body,
}

impl HeadingLevel {
    /// Headings are set in a bold weight; body text is not.
    pub fn is_bold(&self) -> bool {
        !matches!(self, HeadingLevel::Body)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::{Attribute, AttributeSet, Color, HeadingLevel};

    #[test]
    fn colors_parse_and_print_as_hex() {
        let c = Color::from_str("#ff8000").unwrap();
        assert_eq!(c, Color::rgb(255, 128, 0));
        assert_eq!(c.to_string(), "#ff8000");
    }

    #[test]
    fn malformed_colors_are_rejected() {
        assert!(Color::from_str("ff8000").is_err());
        assert!(Color::from_str("#ff80").is_err());
        assert!(Color::from_str("#gg8000").is_err());
    }

    #[test]
    fn applying_an_attribute_changes_only_that_dimension() {
        let set = AttributeSet {
            italic: true,
            ..Default::default()
        }
        .with(&Attribute::Bold(true));
        assert!(set.bold);
        assert!(set.italic);
        assert!(!set.underline);
    }

    #[test]
    fn equal_colors_make_equal_sets() {
        let a = AttributeSet {
            color: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        };
        let b = AttributeSet::default()
            .with(&Attribute::Color(Some(Color::rgb(1, 2, 3))));
        assert_eq!(a, b);
    }

    #[test]
    fn typing_next_to_a_link_drops_link_styling() {
        let link = AttributeSet {
            link: Some("notes://a".to_string()),
            underline: true,
            background: Some(Color::rgb(0, 0, 0)),
            bold: true,
            ..Default::default()
        };
        let typing = link.for_typing();
        assert_eq!(typing.link, None);
        assert_eq!(typing.background, None);
        assert!(!typing.underline);
        assert!(typing.bold);
    }

    #[test]
    fn only_body_is_not_bold() {
        let bold: Vec<_> =
            HeadingLevel::iter().filter(|h| h.is_bold()).collect();
        assert_eq!(bold, vec![HeadingLevel::Title, HeadingLevel::Heading]);
        assert_eq!(
            HeadingLevel::from_str("heading").unwrap(),
            HeadingLevel::Heading
        );
    }
}
