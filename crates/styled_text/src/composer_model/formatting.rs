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

//! Inline formatting: bold, italic, underline, colour, headings and
//! clearing.
//!
//! Every command has two modes. With a range selection the new value is
//! applied uniformly over the range, overwriting whatever mix was there.
//! With a caret only the pending-insertion attributes change and the
//! returned update is [`TextUpdate::Keep`](crate::TextUpdate::Keep).

use super::ComposerModel;
use crate::document::{Attribute, Color, HeadingLevel};
use crate::error::EditError;
use crate::formatting_state::FormattingState;
use crate::ComposerUpdate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InlineFormat {
    Bold,
    Italic,
    Underline,
}

impl InlineFormat {
    fn flag(&self, state: &FormattingState) -> bool {
        match self {
            InlineFormat::Bold => state.bold,
            InlineFormat::Italic => state.italic,
            InlineFormat::Underline => state.underline,
        }
    }

    fn attribute(&self, value: bool) -> Attribute {
        match self {
            InlineFormat::Bold => Attribute::Bold(value),
            InlineFormat::Italic => Attribute::Italic(value),
            InlineFormat::Underline => Attribute::Underline(value),
        }
    }
}

impl ComposerModel {
    /// Toggle an inline format.
    ///
    /// The new value is the negation of the current state flag, not a
    /// rescan of the range, so the flag must be kept in sync.
    fn toggle_inline_format(
        &mut self,
        format: InlineFormat,
    ) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let attribute = format.attribute(!format.flag(&self.state));

        if self.selection.is_caret() {
            self.pending.apply(&attribute);
            self.apply_to_state(&attribute);
            return Ok(self.create_update_keep());
        }

        self.document
            .set_attribute(&attribute, self.selection.range())?;
        self.after_document_change();
        Ok(self.create_update_replace_all())
    }

    /// Mirror a caret-mode attribute change into the toolbar state.
    fn apply_to_state(&mut self, attribute: &Attribute) {
        match attribute {
            Attribute::Bold(v) => self.state.bold = *v,
            Attribute::Italic(v) => self.state.italic = *v,
            Attribute::Underline(v) => self.state.underline = *v,
            Attribute::Color(v) => self.state.color = *v,
            _ => {}
        }
    }

    /// Toggle bold.
    pub fn bold(&mut self) -> Result<ComposerUpdate, EditError> {
        self.toggle_inline_format(InlineFormat::Bold)
    }

    /// Toggle italic.
    pub fn italic(&mut self) -> Result<ComposerUpdate, EditError> {
        self.toggle_inline_format(InlineFormat::Italic)
    }

    /// Toggle underline.
    pub fn underline(&mut self) -> Result<ComposerUpdate, EditError> {
        self.toggle_inline_format(InlineFormat::Underline)
    }

    /// Set the text colour. Colour is applied, never toggled.
    pub fn apply_color(
        &mut self,
        color: Color,
    ) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let attribute = Attribute::Color(Some(color));

        if self.selection.is_caret() {
            self.pending.apply(&attribute);
            self.apply_to_state(&attribute);
            return Ok(self.create_update_keep());
        }

        self.document
            .set_attribute(&attribute, self.selection.range())?;
        self.after_document_change();
        Ok(self.create_update_replace_all())
    }

    /// Apply a heading level.
    ///
    /// Over a range, each fragment gets the heading's font size while
    /// keeping its own bold and italic traits; a bold heading adds bold.
    /// At a caret, the pending size changes and bold is forced to the
    /// heading's own weight.
    pub fn apply_heading(
        &mut self,
        level: HeadingLevel,
    ) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let size = self.config.font_size_for(level);

        if self.selection.is_caret() {
            self.pending.font_size = size;
            self.pending.bold = level.is_bold();
            self.state.bold = level.is_bold();
            return Ok(self.create_update_keep());
        }

        self.document
            .update_attributes(self.selection.range(), |attrs| {
                attrs.font_size = size;
                attrs.bold |= level.is_bold();
            })?;
        self.after_document_change();
        Ok(self.create_update_replace_all())
    }

    /// Reset all formatting to plain body text. The toolbar state is reset
    /// in both modes.
    pub fn clear_formatting(&mut self) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let defaults = self.config.default_attributes();

        let update = if self.selection.is_caret() {
            self.pending = defaults;
            self.state = FormattingState::default();
            self.create_update_keep()
        } else {
            self.document
                .replace_attributes(&defaults, self.selection.range())?;
            self.after_document_change();
            self.state = FormattingState::default();
            self.create_update_replace_all()
        };
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Color, ComposerModel, FormattingState, HeadingLevel, Selection,
        TextUpdate,
    };

    fn model_with_text(text: &str) -> ComposerModel {
        let mut m = ComposerModel::new();
        m.replace_text(text).unwrap();
        m
    }

    fn bold_at(m: &ComposerModel, pos: usize) -> bool {
        m.document().attributes_at(pos).unwrap().bold
    }

    // ===================================================================
    // Selection mode
    // ===================================================================

    #[test]
    fn bolding_a_word_leaves_the_rest_alone() {
        let mut model = model_with_text("Hello world");
        model.select(Selection::new(0, 5));
        let update = model.bold().unwrap();
        assert_eq!(update.text_update, TextUpdate::ReplaceAll);
        assert!((0..5).all(|i| bold_at(&model, i)));
        assert!((5..11).all(|i| !bold_at(&model, i)));
        assert!(update.formatting_state.bold);
    }

    #[test]
    fn toggling_twice_restores_the_runs() {
        let mut model = model_with_text("aabbcc");
        let before = model.document().clone();
        model.select(Selection::new(2, 2));
        model.bold().unwrap();
        model.bold().unwrap();
        assert_eq!(model.document(), &before);
    }

    #[test]
    fn heterogeneous_selection_is_overwritten_uniformly() {
        let mut model = model_with_text("abcdef");
        model.select(Selection::new(3, 3));
        model.bold().unwrap();
        // First character is not bold, so the whole range becomes bold.
        model.select(Selection::new(0, 6));
        model.bold().unwrap();
        assert!((0..6).all(|i| bold_at(&model, i)));
        assert_eq!(model.document().runs().runs().len(), 1);
    }

    #[test]
    fn toggle_follows_the_state_flag_not_the_text() {
        let mut model = model_with_text("abcdef");
        model.select(Selection::new(0, 3));
        model.set_formatting_state(FormattingState {
            bold: true,
            ..Default::default()
        });
        model.bold().unwrap();
        // The flag claimed bold, so the toggle un-bolds (a no-op here).
        assert!((0..3).all(|i| !bold_at(&model, i)));
    }

    #[test]
    fn multiple_formats_on_same_range() {
        let mut model = model_with_text("abcdef");
        model.select(Selection::new(1, 3));
        model.bold().unwrap();
        model.italic().unwrap();
        model.underline().unwrap();
        let attrs = model.document().attributes_at(2).unwrap();
        assert!(attrs.bold && attrs.italic && attrs.underline);
        assert!(!model.document().attributes_at(0).unwrap().italic);
    }

    #[test]
    fn color_is_applied_not_toggled() {
        let red = Color::rgb(255, 0, 0);
        let mut model = model_with_text("abcdef");
        model.select(Selection::new(0, 3));
        model.apply_color(red).unwrap();
        model.apply_color(red).unwrap();
        assert_eq!(model.document().attributes_at(1).unwrap().color, Some(red));
        assert_eq!(model.formatting_state().color, Some(red));
    }

    #[test]
    fn heading_keeps_italic_and_adds_bold() {
        let mut model = model_with_text("abcdef");
        model.select(Selection::new(0, 2));
        model.italic().unwrap();
        model.select(Selection::new(0, 6));
        model.apply_heading(HeadingLevel::Title).unwrap();
        let first = model.document().attributes_at(0).unwrap();
        assert!(first.italic && first.bold);
        assert_eq!(first.font_size, 28.0);
        let last = model.document().attributes_at(5).unwrap();
        assert!(!last.italic && last.bold);
    }

    #[test]
    fn body_heading_keeps_existing_bold() {
        let mut model = model_with_text("abc");
        model.select(Selection::new(0, 3));
        model.apply_heading(HeadingLevel::Heading).unwrap();
        model.apply_heading(HeadingLevel::Body).unwrap();
        let attrs = model.document().attributes_at(0).unwrap();
        assert_eq!(attrs.font_size, 17.0);
        assert!(attrs.bold);
    }

    #[test]
    fn clearing_a_selection_resets_everything() {
        let mut model = model_with_text("abcdef");
        model.select(Selection::new(0, 6));
        model.bold().unwrap();
        model.apply_color(Color::rgb(0, 0, 255)).unwrap();
        model.apply_heading(HeadingLevel::Title).unwrap();
        let update = model.clear_formatting().unwrap();
        assert_eq!(update.formatting_state, FormattingState::default());
        let attrs = model.document().attributes_at(3).unwrap();
        assert_eq!(attrs, &model.config().default_attributes());
    }

    // ===================================================================
    // Caret mode
    // ===================================================================

    #[test]
    fn caret_toggle_changes_only_pending() {
        let mut model = model_with_text("aaabbb");
        model.select(Selection::caret(3));
        let before = model.document().clone();
        let update = model.bold().unwrap();
        assert_eq!(update.text_update, TextUpdate::Keep);
        assert_eq!(model.document(), &before);
        assert!(model.pending_attributes().bold);
        assert!(update.formatting_state.bold);
    }

    #[test]
    fn caret_toggle_twice_cancels() {
        let mut model = model_with_text("aaa");
        model.bold().unwrap();
        model.bold().unwrap();
        assert!(!model.pending_attributes().bold);
        assert!(!model.formatting_state().bold);
    }

    #[test]
    fn italic_in_empty_document_applies_to_typed_text() {
        let mut model = ComposerModel::new();
        model.italic().unwrap();
        assert!(model.pending_attributes().italic);
        model.replace_text("hi").unwrap();
        let runs = model.document().runs().runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].range, 0..2);
        assert!(runs[0].attributes.italic);
    }

    #[test]
    fn caret_heading_forces_bold_to_heading_weight() {
        let mut model = model_with_text("abc");
        model.bold().unwrap();
        model.apply_heading(HeadingLevel::Body).unwrap();
        assert!(!model.pending_attributes().bold);
        assert!(!model.formatting_state().bold);
        model.apply_heading(HeadingLevel::Heading).unwrap();
        assert!(model.formatting_state().bold);
        assert_eq!(model.pending_attributes().font_size, 22.0);
    }

    #[test]
    fn caret_color_goes_to_pending() {
        let green = Color::rgb(0, 255, 0);
        let mut model = model_with_text("abc");
        model.apply_color(green).unwrap();
        model.replace_text("d").unwrap();
        assert_eq!(
            model.document().attributes_at(3).unwrap().color,
            Some(green)
        );
        assert_eq!(model.document().attributes_at(2).unwrap().color, None);
    }

    #[test]
    fn caret_clear_resets_pending_and_state() {
        let mut model = model_with_text("abc");
        model.select(Selection::new(0, 3));
        model.bold().unwrap();
        model.select(Selection::caret(3));
        assert!(model.formatting_state().bold);
        let update = model.clear_formatting().unwrap();
        assert_eq!(update.text_update, TextUpdate::Keep);
        assert_eq!(update.formatting_state, FormattingState::default());
        model.replace_text("d").unwrap();
        assert!(!model.document().attributes_at(3).unwrap().bold);
    }

    #[test]
    fn formatting_with_an_out_of_bounds_selection_fails() {
        let mut model = model_with_text("abc");
        model.select(Selection::new(2, 5));
        assert!(model.bold().is_err());
        assert!(model.clear_formatting().is_err());
        assert_eq!(model.plain_text(), "abc");
    }
}
