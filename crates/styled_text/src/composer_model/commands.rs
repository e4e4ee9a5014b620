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

use tracing::debug;

use super::ComposerModel;
use crate::command::Command;
use crate::error::EditError;
use crate::ComposerUpdate;

impl ComposerModel {
    /// Run a toolbar command against the current selection.
    pub fn apply(
        &mut self,
        command: Command,
    ) -> Result<ComposerUpdate, EditError> {
        debug!(
            command = command.name(),
            location = self.selection.location,
            length = self.selection.length,
            "applying command"
        );
        match command {
            Command::ToggleBold => self.bold(),
            Command::ToggleItalic => self.italic(),
            Command::ToggleUnderline => self.underline(),
            Command::ApplyColor(color) => self.apply_color(color),
            Command::ApplyHeading(level) => self.apply_heading(level),
            Command::ToggleBulletList => self.toggle_bullet_list(),
            Command::ClearFormatting => self.clear_formatting(),
            Command::InsertImage {
                data,
                width,
                height,
            } => self.insert_image(data, width, height),
            Command::InsertLink { target, label } => {
                self.insert_link(target, label)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Command, ComposerModel, Selection, TextUpdate};

    fn model_with_text(text: &str) -> ComposerModel {
        let mut m = ComposerModel::new();
        m.replace_text(text).unwrap();
        m
    }

    #[test]
    fn commands_dispatch_to_the_matching_operation() {
        let mut model = model_with_text("Hello world");
        model.select(Selection::new(6, 5));
        model.apply(Command::ToggleUnderline).unwrap();
        assert!(model.document().attributes_at(6).unwrap().underline);
        assert!(!model.document().attributes_at(5).unwrap().underline);
    }

    #[test]
    fn toggling_twice_restores_uniform_text() {
        let mut model = model_with_text("Hello world");
        let before = model.document().clone();
        model.select(Selection::new(0, 5));
        model.apply(Command::ToggleBold).unwrap();
        model.apply(Command::ToggleBold).unwrap();
        assert_eq!(model.document(), &before);
    }

    #[test]
    fn caret_commands_report_keep() {
        let mut model = model_with_text("abc");
        let update = model.apply(Command::ToggleItalic).unwrap();
        assert_eq!(update.text_update, TextUpdate::Keep);
        assert!(update.formatting_state.italic);
    }

    #[test]
    fn insert_commands_report_replace_all_at_a_caret() {
        let mut model = model_with_text("abc");
        let update = model
            .apply(Command::InsertImage {
                data: vec![9],
                width: 3.0,
                height: 4.0,
            })
            .unwrap();
        assert_eq!(update.text_update, TextUpdate::ReplaceAll);
        assert_eq!(update.selection, Selection::caret(4));
    }
}
