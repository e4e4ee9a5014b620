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

//! Implements [`ComposerModelInterface`] for [`ComposerModel`] by
//! delegating to its inherent methods.

use std::collections::HashMap;

use url::Url;

use super::ComposerModel;
use crate::codec::DecodeWarning;
use crate::composer_model_interface::ComposerModelInterface;
use crate::error::{DecodeError, EditError, EncodeError};
use crate::{
    ActionState, Color, Command, ComposerUpdate, FormatAction,
    FormattingState, HeadingLevel, Selection,
};

impl ComposerModelInterface for ComposerModel {
    // -------------------------------------------------------------------
    // Content lifecycle
    // -------------------------------------------------------------------

    fn set_content_from_markdown(
        &mut self,
        markdown: &str,
    ) -> Result<ComposerUpdate, EditError> {
        self.set_content_from_markdown(markdown)
    }

    fn clear(&mut self) -> ComposerUpdate {
        self.clear()
    }

    fn load(
        &mut self,
        bytes: &[u8],
    ) -> Result<Vec<DecodeWarning>, DecodeError> {
        self.load(bytes)
    }

    fn save(&self) -> Result<Vec<u8>, EncodeError> {
        self.save()
    }

    // -------------------------------------------------------------------
    // Content access (read-only)
    // -------------------------------------------------------------------

    fn plain_text(&self) -> String {
        self.plain_text()
    }

    fn to_html(&self) -> String {
        self.to_html()
    }

    // -------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------

    fn select(&mut self, selection: Selection) -> ComposerUpdate {
        self.select(selection)
    }

    fn get_selection(&self) -> Selection {
        self.get_selection()
    }

    // -------------------------------------------------------------------
    // Text manipulation
    // -------------------------------------------------------------------

    fn replace_text(
        &mut self,
        new_text: &str,
    ) -> Result<ComposerUpdate, EditError> {
        self.replace_text(new_text)
    }

    fn backspace(&mut self) -> Result<ComposerUpdate, EditError> {
        self.backspace()
    }

    fn delete(&mut self) -> Result<ComposerUpdate, EditError> {
        self.delete()
    }

    fn enter(&mut self) -> Result<ComposerUpdate, EditError> {
        self.enter()
    }

    // -------------------------------------------------------------------
    // Inline formatting
    // -------------------------------------------------------------------

    fn bold(&mut self) -> Result<ComposerUpdate, EditError> {
        self.bold()
    }

    fn italic(&mut self) -> Result<ComposerUpdate, EditError> {
        self.italic()
    }

    fn underline(&mut self) -> Result<ComposerUpdate, EditError> {
        self.underline()
    }

    fn apply_color(
        &mut self,
        color: Color,
    ) -> Result<ComposerUpdate, EditError> {
        self.apply_color(color)
    }

    fn apply_heading(
        &mut self,
        level: HeadingLevel,
    ) -> Result<ComposerUpdate, EditError> {
        self.apply_heading(level)
    }

    fn clear_formatting(&mut self) -> Result<ComposerUpdate, EditError> {
        self.clear_formatting()
    }

    // -------------------------------------------------------------------
    // Block formatting
    // -------------------------------------------------------------------

    fn toggle_bullet_list(&mut self) -> Result<ComposerUpdate, EditError> {
        self.toggle_bullet_list()
    }

    // -------------------------------------------------------------------
    // Attachments
    // -------------------------------------------------------------------

    fn insert_image(
        &mut self,
        data: Vec<u8>,
        width: f32,
        height: f32,
    ) -> Result<ComposerUpdate, EditError> {
        self.insert_image(data, width, height)
    }

    fn insert_link(
        &mut self,
        target: Url,
        label: String,
    ) -> Result<ComposerUpdate, EditError> {
        self.insert_link(target, label)
    }

    fn apply(
        &mut self,
        command: Command,
    ) -> Result<ComposerUpdate, EditError> {
        self.apply(command)
    }

    // -------------------------------------------------------------------
    // State queries
    // -------------------------------------------------------------------

    fn formatting_state(&self) -> FormattingState {
        self.formatting_state()
    }

    fn set_formatting_state(&mut self, state: FormattingState) {
        self.set_formatting_state(state)
    }

    fn action_states(&self) -> HashMap<FormatAction, ActionState> {
        self.action_states()
    }

    // -------------------------------------------------------------------
    // Debug / introspection
    // -------------------------------------------------------------------

    fn to_tree(&self) -> String {
        self.to_tree()
    }
}
