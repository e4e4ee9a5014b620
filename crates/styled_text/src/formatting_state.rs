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

//! The toolbar-facing formatting snapshot and how it is derived from the
//! document and selection.

use strum_macros::{Display, EnumIter};

use crate::document::{AttributeSet, Color, StyledDocument};
use crate::selection::Selection;

/// Formatting flags shown as toggle-button highlighting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormattingState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Color>,
}

impl From<&AttributeSet> for FormattingState {
    fn from(attributes: &AttributeSet) -> Self {
        Self {
            bold: attributes.bold,
            italic: attributes.italic,
            underline: attributes.underline,
            color: attributes.color,
        }
    }
}

/// Derive the formatting state for `selection`.
///
/// - A range selection reports the attributes of its first character.
///   Mixed selections are not reported as mixed.
/// - A caret after position 0 reports the character before it.
/// - Otherwise (empty document, caret at 0) the pending-insertion
///   attributes are reported.
///
/// Out-of-bounds selections are clamped; this function never fails.
pub fn derive_state(
    document: &StyledDocument,
    selection: Selection,
    pending: &AttributeSet,
) -> FormattingState {
    let selection = selection.clamped(document.len());
    let source = if !selection.is_caret() {
        document.attributes_at(selection.location).ok()
    } else if selection.location > 0 {
        document.attributes_at(selection.location - 1).ok()
    } else {
        None
    };
    FormattingState::from(source.unwrap_or(pending))
}

/// Toolbar buttons whose highlighting the engine drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum FormatAction {
    Bold,
    Italic,
    Underline,
    BulletList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionState {
    Enabled,
    Reversed,
}

impl From<bool> for ActionState {
    fn from(active: bool) -> Self {
        if active {
            ActionState::Reversed
        } else {
            ActionState::Enabled
        }
    }
}
