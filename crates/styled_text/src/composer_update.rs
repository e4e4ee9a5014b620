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

use crate::formatting_state::FormattingState;
use crate::selection::Selection;

/// What happened to the document content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextUpdate {
    /// Content unchanged; nothing to re-render or persist.
    Keep,
    /// Content changed; the host should re-render and persist.
    ReplaceAll,
}

/// Returned by every model operation so the host can wire the results
/// back to its text view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposerUpdate {
    pub text_update: TextUpdate,
    pub selection: Selection,
    pub formatting_state: FormattingState,
}

impl ComposerUpdate {
    pub fn keep(
        selection: Selection,
        formatting_state: FormattingState,
    ) -> Self {
        Self {
            text_update: TextUpdate::Keep,
            selection,
            formatting_state,
        }
    }

    pub fn replace_all(
        selection: Selection,
        formatting_state: FormattingState,
    ) -> Self {
        Self {
            text_update: TextUpdate::ReplaceAll,
            selection,
            formatting_state,
        }
    }

    pub fn content_changed(&self) -> bool {
        self.text_update == TextUpdate::ReplaceAll
    }
}
