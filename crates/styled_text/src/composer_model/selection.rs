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

//! Selection management.

use tracing::debug;

use super::ComposerModel;
use crate::selection::Selection;
use crate::ComposerUpdate;

impl ComposerModel {
    /// Move the selection or caret (UTF-16 code unit offsets).
    ///
    /// The selection is stored as given; mutation entry points reject it
    /// later if it does not fit the document. Pending attributes are
    /// recomputed from the document and the state re-derived.
    pub fn select(&mut self, selection: Selection) -> ComposerUpdate {
        debug!(
            location = selection.location,
            length = selection.length,
            "selection changed"
        );
        self.selection = selection;
        self.reset_pending();
        self.sync_state();
        self.create_update_keep()
    }

    pub fn get_selection(&self) -> Selection {
        self.selection
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_caret()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ComposerModel, Selection, TextUpdate};

    fn model_with_text(text: &str) -> ComposerModel {
        let mut m = ComposerModel::new();
        m.replace_text(text).unwrap();
        m
    }

    #[test]
    fn selecting_creates_a_keep_update() {
        let mut model = model_with_text("abcdef");
        let update = model.select(Selection::new(2, 4));
        assert_eq!(update.text_update, TextUpdate::Keep);
        assert_eq!(update.selection, Selection::new(2, 4));
        assert!(model.has_selection());
    }

    #[test]
    fn selecting_past_end_stores_selection() {
        let mut model = model_with_text("abcdefgh");
        model.select(Selection::new(4, 9));
        assert_eq!(model.get_selection(), Selection::new(4, 9));
    }

    #[test]
    fn selecting_clears_pending_formats() {
        let mut model = model_with_text("aaa");
        model.bold().unwrap();
        assert!(model.pending_attributes().bold);
        model.select(Selection::caret(1));
        assert!(!model.pending_attributes().bold);
        assert!(!model.formatting_state().bold);
    }

    #[test]
    fn caret_after_bold_text_reports_bold() {
        let mut model = model_with_text("aabb");
        model.select(Selection::new(0, 2));
        model.bold().unwrap();
        model.select(Selection::caret(2));
        assert!(model.formatting_state().bold);
        model.select(Selection::caret(3));
        assert!(!model.formatting_state().bold);
    }

    #[test]
    fn caret_at_start_inherits_the_first_character() {
        let mut model = model_with_text("ab");
        model.select(Selection::new(0, 2));
        model.italic().unwrap();
        model.select(Selection::caret(0));
        assert!(model.pending_attributes().italic);
        assert!(model.formatting_state().italic);
    }

    #[test]
    fn selecting_multiple_utf16_code_unit_characters() {
        // \u{1F4A9} is 2 UTF-16 code units
        let mut model = model_with_text("\u{1F4A9}\u{1F4A9}\u{1F4A9}");
        model.select(Selection::new(2, 2));
        model.bold().unwrap();
        assert!(model.document().attributes_at(2).unwrap().bold);
        assert!(!model.document().attributes_at(1).unwrap().bold);
        assert!(!model.document().attributes_at(4).unwrap().bold);
    }
}
