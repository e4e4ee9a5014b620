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

//! Defines the [`ComposerModelInterface`] trait, the contract between the
//! engine and the host's editing surface.

use std::collections::HashMap;

use url::Url;

use crate::codec::DecodeWarning;
use crate::error::{DecodeError, EditError, EncodeError};
use crate::{
    ActionState, Color, Command, ComposerUpdate, FormatAction,
    FormattingState, HeadingLevel, Selection,
};

/// The operations a host text view invokes on an editing session.
///
/// Positions and ranges are UTF-16 code-unit offsets, matching platform
/// text APIs. Every mutating method returns a [`ComposerUpdate`] telling
/// the host whether to re-render, where the selection now is and what the
/// toolbar should show.
pub trait ComposerModelInterface {
    // -----------------------------------------------------------------------
    // Content lifecycle
    // -----------------------------------------------------------------------

    /// Replace all content with Markdown.
    fn set_content_from_markdown(
        &mut self,
        markdown: &str,
    ) -> Result<ComposerUpdate, EditError>;

    /// Clear all content and return to an empty document.
    fn clear(&mut self) -> ComposerUpdate;

    /// Replace all content with a saved document.
    fn load(&mut self, bytes: &[u8])
        -> Result<Vec<DecodeWarning>, DecodeError>;

    /// Encode the document for storage.
    fn save(&self) -> Result<Vec<u8>, EncodeError>;

    // -----------------------------------------------------------------------
    // Content access (read-only)
    // -----------------------------------------------------------------------

    /// Plain text, attachments rendered as nothing.
    fn plain_text(&self) -> String;

    /// HTML export of the document.
    fn to_html(&self) -> String;

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    fn select(&mut self, selection: Selection) -> ComposerUpdate;

    fn get_selection(&self) -> Selection;

    // -----------------------------------------------------------------------
    // Text manipulation
    // -----------------------------------------------------------------------

    /// Replace the current selection with text.
    fn replace_text(
        &mut self,
        new_text: &str,
    ) -> Result<ComposerUpdate, EditError>;

    /// Delete backward from the cursor (backspace key).
    fn backspace(&mut self) -> Result<ComposerUpdate, EditError>;

    /// Delete forward from the cursor (delete key).
    fn delete(&mut self) -> Result<ComposerUpdate, EditError>;

    /// Insert a paragraph break (enter key).
    fn enter(&mut self) -> Result<ComposerUpdate, EditError>;

    // -----------------------------------------------------------------------
    // Inline formatting
    // -----------------------------------------------------------------------

    fn bold(&mut self) -> Result<ComposerUpdate, EditError>;

    fn italic(&mut self) -> Result<ComposerUpdate, EditError>;

    fn underline(&mut self) -> Result<ComposerUpdate, EditError>;

    fn apply_color(&mut self, color: Color)
        -> Result<ComposerUpdate, EditError>;

    fn apply_heading(
        &mut self,
        level: HeadingLevel,
    ) -> Result<ComposerUpdate, EditError>;

    fn clear_formatting(&mut self) -> Result<ComposerUpdate, EditError>;

    // -----------------------------------------------------------------------
    // Block formatting
    // -----------------------------------------------------------------------

    /// Toggle bullets on the paragraphs touched by the selection.
    fn toggle_bullet_list(&mut self) -> Result<ComposerUpdate, EditError>;

    // -----------------------------------------------------------------------
    // Attachments
    // -----------------------------------------------------------------------

    fn insert_image(
        &mut self,
        data: Vec<u8>,
        width: f32,
        height: f32,
    ) -> Result<ComposerUpdate, EditError>;

    fn insert_link(
        &mut self,
        target: Url,
        label: String,
    ) -> Result<ComposerUpdate, EditError>;

    /// Run any toolbar command.
    fn apply(&mut self, command: Command)
        -> Result<ComposerUpdate, EditError>;

    // -----------------------------------------------------------------------
    // State queries
    // -----------------------------------------------------------------------

    fn formatting_state(&self) -> FormattingState;

    /// Let the host supply its own toggle flags.
    fn set_formatting_state(&mut self, state: FormattingState);

    /// Get the current action states for all toolbar buttons.
    fn action_states(&self) -> HashMap<FormatAction, ActionState>;

    // -----------------------------------------------------------------------
    // Debug / introspection
    // -----------------------------------------------------------------------

    /// Return a debug tree representation of the document.
    fn to_tree(&self) -> String;
}
