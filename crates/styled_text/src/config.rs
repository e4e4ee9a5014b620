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

//! Engine configuration: the fixed sizes, glyphs and styles used by the
//! formatting commands.

use serde::Deserialize;

use crate::document::{
    AttributeSet, Color, HeadingLevel, ParagraphStyle, BODY_FONT_SIZE,
};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub body_font_size: f32,
    pub heading_font_size: f32,
    pub title_font_size: f32,
    /// Glyph placed (followed by one space) in front of bulleted
    /// paragraphs.
    pub bullet_marker: char,
    /// Paragraph style applied to bulleted paragraphs. `is_bulleted` is
    /// forced on when it is used.
    pub bullet_style: ParagraphStyle,
    /// Background tint of inserted note links.
    pub link_background: Color,
    /// When set, toggling bullets over paragraphs that are all already
    /// bulleted removes the markers instead of adding a second one.
    pub bullet_toggle_removes_markers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            body_font_size: BODY_FONT_SIZE,
            heading_font_size: 22.0,
            title_font_size: 28.0,
            bullet_marker: '•',
            bullet_style: ParagraphStyle {
                is_bulleted: true,
                head_indent: 18.0,
                first_line_indent: 0.0,
                paragraph_spacing: 4.0,
            },
            link_background: Color::rgb(0xe8, 0xf0, 0xfe),
            bullet_toggle_removes_markers: false,
        }
    }
}

impl EditorConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn font_size_for(&self, level: HeadingLevel) -> f32 {
        match level {
            HeadingLevel::Title => self.title_font_size,
            HeadingLevel::Heading => self.heading_font_size,
            HeadingLevel::Body => self.body_font_size,
        }
    }

    /// The attribute set that clear formatting resets to.
    pub fn default_attributes(&self) -> AttributeSet {
        AttributeSet {
            font_size: self.body_font_size,
            ..AttributeSet::default()
        }
    }

    /// Marker glyph plus one space.
    pub fn bullet_prefix(&self) -> String {
        format!("{} ", self.bullet_marker)
    }

    pub fn bulleted_paragraph_style(&self) -> ParagraphStyle {
        ParagraphStyle {
            is_bulleted: true,
            ..self.bullet_style
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::EditorConfig;
    use crate::{Color, HeadingLevel};

    #[test]
    fn default_prefix_is_bullet_and_space() {
        assert_eq!(EditorConfig::default().bullet_prefix(), "• ");
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = EditorConfig::from_toml_str(indoc! {r##"
            title_font_size = 34.0
            bullet_marker = "-"
            link_background = "#102030"

            [bullet_style]
            head_indent = 24.0
        "##})
        .unwrap();
        assert_eq!(config.font_size_for(HeadingLevel::Title), 34.0);
        assert_eq!(config.font_size_for(HeadingLevel::Heading), 22.0);
        assert_eq!(config.bullet_prefix(), "- ");
        assert_eq!(config.link_background, Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(config.bullet_style.head_indent, 24.0);
        assert!(config.bulleted_paragraph_style().is_bulleted);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(EditorConfig::from_toml_str("title_font_size = \"big\"")
            .is_err());
    }
}
