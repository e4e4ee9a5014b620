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

//! Text editing operations: replace_text, backspace, delete, enter.
//!
//! Inserted text takes the pending-insertion attributes.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use super::ComposerModel;
use crate::error::EditError;
use crate::selection::Selection;
use crate::ComposerUpdate;

impl ComposerModel {
    /// Replace the current selection with `new_text`.
    pub fn replace_text(
        &mut self,
        new_text: &str,
    ) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let range = self.selection.range();
        let attributes = self.pending.clone();
        let inserted =
            self.document
                .replace_range(range.clone(), new_text, &attributes)?;
        self.selection = Selection::caret(range.start + inserted);
        self.after_document_change();
        Ok(self.create_update_replace_all())
    }

    /// Delete backward from the cursor (backspace). A caret removes the
    /// whole grapheme cluster before it.
    pub fn backspace(&mut self) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let range = if self.selection.is_caret() {
            let end = self.selection.location;
            if end == 0 {
                return Ok(self.create_update_keep());
            }
            self.previous_grapheme_start(end)?..end
        } else {
            self.selection.range()
        };
        self.delete_range(range)
    }

    /// Delete forward from the cursor (delete key).
    pub fn delete(&mut self) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let range = if self.selection.is_caret() {
            let start = self.selection.location;
            if start >= self.document.len() {
                return Ok(self.create_update_keep());
            }
            start..self.next_grapheme_end(start)?
        } else {
            self.selection.range()
        };
        self.delete_range(range)
    }

    /// Insert a paragraph break.
    ///
    /// Inside a bulleted paragraph the new paragraph gets a marker too;
    /// pressing enter on a bullet with no text after its marker ends the
    /// list instead. With the caret before or inside the marker, the
    /// marker moves down with its paragraph and the break goes in front.
    pub fn enter(&mut self) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        if !self.pending.is_bulleted() {
            return self.replace_text("\n");
        }

        let prefix = self.config.bullet_prefix();
        let caret = self.selection.location;
        let paragraph =
            self.paragraph_start(caret)..self.paragraph_end(caret);
        let marker_end = paragraph.start + prefix.encode_utf16().count();
        if self.selection.is_caret()
            && caret < marker_end
            && marker_end <= paragraph.end
            && self.document.text_in(paragraph.start..marker_end)? == prefix
        {
            self.selection = Selection::caret(paragraph.start);
            return self.replace_text("\n");
        }

        if self.selection.is_caret()
            && self.document.text_in(paragraph.clone())? == prefix
        {
            let attributes = self.pending.clone();
            self.document
                .replace_range(paragraph.clone(), "", &attributes)?;
            self.selection = Selection::caret(paragraph.start);
            self.after_document_change();
            self.pending.paragraph_style = None;
            return Ok(self.create_update_replace_all());
        }

        self.replace_text(&format!("\n{prefix}"))
    }

    fn delete_range(
        &mut self,
        range: Range<usize>,
    ) -> Result<ComposerUpdate, EditError> {
        let attributes = self.pending.clone();
        self.document.replace_range(range.clone(), "", &attributes)?;
        self.selection = Selection::caret(range.start);
        self.after_document_change();
        Ok(self.create_update_replace_all())
    }

    /// Start of the grapheme cluster ending at `end`. Clusters never span
    /// a paragraph break, so only the current paragraph is segmented.
    fn previous_grapheme_start(&self, end: usize) -> Result<usize, EditError> {
        let start = self.paragraph_start(end);
        let text = self.document.text_in(start..end)?;
        Ok(match text.graphemes(true).next_back() {
            Some(g) => end - g.encode_utf16().count(),
            None => end - 1,
        })
    }

    fn next_grapheme_end(&self, start: usize) -> Result<usize, EditError> {
        let end = self.paragraph_end(start);
        let text = self.document.text_in(start..end)?;
        Ok(match text.graphemes(true).next() {
            Some(g) => start + g.encode_utf16().count(),
            None => start + 1,
        })
    }
}
