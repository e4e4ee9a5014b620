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

//! Content access: plain text, HTML, Markdown import and persistence.

use tracing::info;

use super::ComposerModel;
use crate::codec::{self, DecodeWarning};
use crate::document::StyledDocument;
use crate::error::{DecodeError, EditError, EncodeError};
use crate::selection::Selection;
use crate::{html, markdown, ComposerUpdate};

impl ComposerModel {
    /// Plain text with attachments rendered as nothing, for previews and
    /// search.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    pub fn to_html(&self) -> String {
        html::to_html(&self.document, &self.config)
    }

    /// Replace all content with Markdown.
    pub fn set_content_from_markdown(
        &mut self,
        markdown: &str,
    ) -> Result<ComposerUpdate, EditError> {
        let document = markdown::parse_markdown(markdown, &self.config)?;
        self.replace_document(document);
        Ok(self.create_update_replace_all())
    }

    /// Clear all content and return to an empty document.
    pub fn clear(&mut self) -> ComposerUpdate {
        self.replace_document(StyledDocument::new());
        self.create_update_replace_all()
    }

    /// Encode the document for storage.
    pub fn save(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode(&self.document)
    }

    /// Replace all content with a saved document. Attachments that could
    /// not be restored are returned; the rest of the note is loaded.
    pub fn load(
        &mut self,
        bytes: &[u8],
    ) -> Result<Vec<DecodeWarning>, DecodeError> {
        let loaded = codec::decode(bytes)?;
        info!(
            len = loaded.document.len(),
            dropped = loaded.warnings.len(),
            "loaded document"
        );
        self.replace_document(loaded.document);
        Ok(loaded.warnings)
    }

    fn replace_document(&mut self, document: StyledDocument) {
        self.document = document;
        self.selection = Selection::caret(0);
        self.after_document_change();
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::{ComposerModel, FormattingState, Selection, TextUpdate};

    fn model_with_text(text: &str) -> ComposerModel {
        let mut m = ComposerModel::new();
        m.replace_text(text).unwrap();
        m
    }

    // ===================================================================
    // Markdown
    // ===================================================================

    #[test]
    fn set_content_from_markdown_replaces_existing_text() {
        let mut model = model_with_text("old");
        let update = model
            .set_content_from_markdown(indoc! {"
                # Trip
                - passport
                - **tickets**
            "})
            .unwrap();
        assert_eq!(update.text_update, TextUpdate::ReplaceAll);
        assert_eq!(model.plain_text(), "Trip\n• passport\n• tickets");
        assert_eq!(model.get_selection(), Selection::caret(0));
        assert!(model.formatting_state().bold);
    }

    // ===================================================================
    // Clear
    // ===================================================================

    #[test]
    fn clear_resets_text_selection_and_state() {
        let mut model = model_with_text("abc");
        model.select(Selection::new(0, 3));
        model.bold().unwrap();
        model.clear();
        assert_eq!(model.plain_text(), "");
        assert_eq!(model.get_selection(), Selection::caret(0));
        assert_eq!(model.formatting_state(), FormattingState::default());
        assert_eq!(
            model.pending_attributes(),
            &model.config().default_attributes()
        );
    }

    // ===================================================================
    // Persistence
    // ===================================================================

    #[test]
    fn save_then_load_restores_the_document() {
        let mut model = model_with_text("Hello world");
        model.select(Selection::new(6, 5));
        model.italic().unwrap();
        let bytes = model.save().unwrap();

        let mut other = ComposerModel::new();
        let warnings = other.load(&bytes).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(other.document(), model.document());
        assert_eq!(other.get_selection(), Selection::caret(0));
    }

    #[test]
    fn loading_nothing_gives_an_empty_note() {
        let mut model = model_with_text("abc");
        model.load(&[]).unwrap();
        assert!(model.document().is_empty());
    }

    #[test]
    fn failed_load_keeps_the_current_content() {
        let mut model = model_with_text("abc");
        assert!(model.load(&[42, 0, 0]).is_err());
        assert_eq!(model.plain_text(), "abc");
    }
}
