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
use url::Url;

use super::ComposerModel;
use crate::document::{Attachment, AttributeSet};
use crate::error::EditError;
use crate::selection::Selection;
use crate::ComposerUpdate;

impl ComposerModel {
    /// Insert an inline image at the start of the selection. Selected text
    /// is kept, not replaced.
    pub fn insert_image(
        &mut self,
        data: Vec<u8>,
        width: f32,
        height: f32,
    ) -> Result<ComposerUpdate, EditError> {
        let attributes = self.pending.clone();
        self.insert_attachment_at_selection(
            Attachment::image(data, width, height),
            attributes,
        )
    }

    /// Insert a link to another note. The slot is underlined and tinted,
    /// and carries the target as its link attribute.
    pub fn insert_link(
        &mut self,
        target: Url,
        label: impl Into<String>,
    ) -> Result<ComposerUpdate, EditError> {
        let mut attributes = self.pending.clone();
        attributes.link = Some(target.to_string());
        attributes.underline = true;
        attributes.background = Some(self.config.link_background);
        self.insert_attachment_at_selection(
            Attachment::link(target, label),
            attributes,
        )
    }

    fn insert_attachment_at_selection(
        &mut self,
        attachment: Attachment,
        attributes: AttributeSet,
    ) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        let location = self.selection.location;
        debug!(location, "inserting attachment");
        self.document
            .insert_attachment(location, attachment, &attributes)?;
        self.selection = Selection::caret(location + 1);
        self.after_document_change();
        Ok(self.create_update_replace_all())
    }
}
