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

use crate::config::EditorConfig;
use crate::document::{
    Attachment, AttributeSet, StyledDocument, ATTACHMENT_CHAR,
};
use crate::error::EditError;
use crate::formatting_state::{derive_state, FormattingState};
use crate::selection::Selection;
use crate::ComposerUpdate;

/// The editing session of one open note.
///
/// The host owns exactly one model per open note and drives it from a
/// single thread; nothing here is shared or global.
///
/// ## Pending-insertion attributes
///
/// With a caret selection, formatting commands change only `pending`,
/// the attributes the next typed character will carry. Whenever the
/// document changes or the selection moves, `pending` is recomputed from
/// the character before the caret (or the first selected character).
#[derive(Clone, Debug)]
pub struct ComposerModel {
    pub(crate) document: StyledDocument,

    pub(crate) selection: Selection,

    /// Attributes for the next inserted text at a caret.
    pub(crate) pending: AttributeSet,

    /// The authoritative toggle flags. Toggles negate these rather than
    /// rescanning the document.
    pub(crate) state: FormattingState,

    pub(crate) config: EditorConfig,
}

impl ComposerModel {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: StyledDocument::new(),
            selection: Selection::default(),
            pending: config.default_attributes(),
            state: FormattingState::default(),
            config,
        }
    }

    /// Open an existing document with the caret at its start.
    pub fn from_document(document: StyledDocument) -> Self {
        let mut model = Self::new();
        model.document = document;
        model.after_document_change();
        model
    }

    /// Rebuild a session from values held by the caller. The caller's
    /// `state` is taken as authoritative. `pending` is the value returned
    /// by the previous command; without it the pending attributes are
    /// recomputed from the document and seeded from `state`.
    pub fn from_parts(
        document: StyledDocument,
        selection: Selection,
        state: FormattingState,
        pending: Option<AttributeSet>,
    ) -> Self {
        let mut model = Self::from_document(document);
        model.selection = selection;
        match pending {
            Some(pending) => model.pending = pending,
            None => {
                model.reset_pending();
                model.pending.bold = state.bold;
                model.pending.italic = state.italic;
                model.pending.underline = state.underline;
                model.pending.color = state.color;
            }
        }
        model.state = state;
        model
    }

    pub fn document(&self) -> &StyledDocument {
        &self.document
    }

    pub fn into_document(self) -> StyledDocument {
        self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Mutation entry points refuse selections that do not fit.
    pub(crate) fn check_selection(&self) -> Result<(), EditError> {
        self.selection.validate(self.document.len())
    }

    /// Recompute `pending` from the document around the selection.
    pub(crate) fn reset_pending(&mut self) {
        let selection = self.selection.clamped(self.document.len());
        let source = if !selection.is_caret() || selection.location == 0 {
            self.document.attributes_at(selection.location).ok()
        } else {
            self.document.attributes_at(selection.location - 1).ok()
        };
        self.pending = source
            .map(AttributeSet::for_typing)
            .unwrap_or_else(|| self.config.default_attributes());
    }

    pub(crate) fn sync_state(&mut self) {
        self.state =
            derive_state(&self.document, self.selection, &self.pending);
    }

    /// Bring selection, pending attributes and state back in line after
    /// the document changed.
    pub(crate) fn after_document_change(&mut self) {
        self.selection = self.selection.clamped(self.document.len());
        self.reset_pending();
        self.sync_state();
        self.document.assert_invariants();
    }

    pub(crate) fn create_update_replace_all(&self) -> ComposerUpdate {
        ComposerUpdate::replace_all(self.selection, self.state)
    }

    pub(crate) fn create_update_keep(&self) -> ComposerUpdate {
        ComposerUpdate::keep(self.selection, self.state)
    }

    /// Return a debug tree representation of the document.
    pub fn to_tree(&self) -> String {
        let mut out = String::new();
        let sel_start = self.selection.location;
        let sel_end = self.selection.end();

        out.push_str(&format!("sel: ({sel_start},{sel_end})\n"));

        for run in self.document.runs() {
            let tags = describe_attributes(
                &run.attributes,
                self.config.body_font_size,
            );
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            let text = self.annotate_run(run.range.clone());
            out.push_str(&format!("│  \"{text}\"{tags}\n"));
        }

        // If cursor is at the very end, show it
        if sel_start == self.document.len() && sel_start == sel_end {
            out.push_str("│  |\n");
        }

        out
    }

    /// The text of `range` with `|` (caret) or `{…}` (range selection)
    /// markers, and attachments spelled out.
    fn annotate_run(&self, range: std::ops::Range<usize>) -> String {
        let sel_start = self.selection.location;
        let sel_end = self.selection.end();
        let text = self.document.text_in(range.clone()).unwrap_or_default();

        let mut result = String::new();
        let mut pos = range.start;
        for ch in text.chars() {
            if pos == sel_start {
                result.push(if sel_start == sel_end { '|' } else { '{' });
            }
            match (ch, self.document.attachment_at(pos)) {
                (ATTACHMENT_CHAR, Some(Attachment::Image { .. })) => {
                    result.push_str("<image>")
                }
                (ATTACHMENT_CHAR, Some(Attachment::Link { label, .. })) => {
                    result.push_str(&format!("<link {label}>"))
                }
                (ATTACHMENT_CHAR, None) => result.push_str("<missing>"),
                ('\n', _) => result.push_str("\\n"),
                _ => result.push(ch),
            }
            pos += ch.len_utf16();
            if pos == sel_end && sel_start != sel_end {
                result.push('}');
            }
        }
        result
    }
}

fn describe_attributes(attrs: &AttributeSet, body_size: f32) -> Vec<String> {
    let mut tags = Vec::new();
    if attrs.bold {
        tags.push("bold".to_string());
    }
    if attrs.italic {
        tags.push("italic".to_string());
    }
    if attrs.underline {
        tags.push("underline".to_string());
    }
    if let Some(color) = attrs.color {
        tags.push(format!("color={color}"));
    }
    if attrs.font_size != body_size {
        tags.push(format!("size={}", attrs.font_size));
    }
    if attrs.is_bulleted() {
        tags.push("bullet".to_string());
    }
    if let Some(link) = &attrs.link {
        tags.push(format!("link=\"{link}\""));
    }
    if let Some(background) = attrs.background {
        tags.push(format!("background={background}"));
    }
    tags
}

impl Default for ComposerModel {
    fn default() -> Self {
        Self::new()
    }
}
