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

//! Toolbar commands and the value-in, value-out entry point for hosts that
//! keep the document, selection and state themselves.

use strum_macros::IntoStaticStr;
use url::Url;

use crate::composer_model::ComposerModel;
use crate::document::{AttributeSet, Color, HeadingLevel, StyledDocument};
use crate::error::EditError;
use crate::formatting_state::FormattingState;
use crate::selection::Selection;

#[derive(Clone, Debug, PartialEq, IntoStaticStr)]
pub enum Command {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ApplyColor(Color),
    ApplyHeading(HeadingLevel),
    ToggleBulletList,
    ClearFormatting,
    InsertImage {
        data: Vec<u8>,
        width: f32,
        height: f32,
    },
    InsertLink {
        target: Url,
        label: String,
    },
}

impl Command {
    /// Whether the command edits the buffer even with a caret selection.
    /// All other commands only touch the pending-insertion attributes
    /// when there is no selected text.
    pub fn edits_text_at_caret(&self) -> bool {
        matches!(
            self,
            Command::ToggleBulletList
                | Command::InsertImage { .. }
                | Command::InsertLink { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// What a command leaves behind: the document, the formatting state, the
/// selection and the attributes the next typed text will carry.
pub type CommandOutput =
    (StyledDocument, FormattingState, Selection, AttributeSet);

/// Apply `command` to `document` at `selection`, with `state` as the
/// caller's authoritative toggle flags.
///
/// `pending` is the fourth value returned by the previous call. Pass it
/// back so caret-mode formatting that has no toggle flag (a heading
/// size, say) survives until the next insertion; `None` recomputes it
/// from the document.
pub fn apply_command(
    document: StyledDocument,
    selection: Selection,
    command: Command,
    state: FormattingState,
    pending: Option<AttributeSet>,
) -> Result<CommandOutput, EditError> {
    let mut model =
        ComposerModel::from_parts(document, selection, state, pending);
    let update = model.apply(command)?;
    let pending = model.pending_attributes().clone();
    Ok((
        model.into_document(),
        update.formatting_state,
        update.selection,
        pending,
    ))
}
