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

//! Paragraph boundaries and bulleted lists.
//!
//! A bulleted paragraph is one whose text starts with the configured
//! marker glyph and a space, and whose characters carry a paragraph style
//! with `is_bulleted` set.

use std::ops::Range;

use tracing::debug;

use super::ComposerModel;
use crate::document::{Attribute, AttributeSet};
use crate::error::EditError;
use crate::selection::Selection;
use crate::ComposerUpdate;

const NEWLINE: u16 = b'\n' as u16;

/// One `\n`-delimited paragraph inside a paragraph range.
struct Paragraph {
    /// Absolute offset of the first code unit.
    start: usize,
    text: String,
}

impl Paragraph {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl ComposerModel {
    /// Toggle bullets on the paragraphs touched by the selection.
    ///
    /// With a caret only a marker is inserted and the bulleted style goes
    /// into the pending attributes. With a range every non-blank
    /// paragraph gets a marker and the whole paragraph range is restyled
    /// from its first character.
    pub fn toggle_bullet_list(&mut self) -> Result<ComposerUpdate, EditError> {
        self.check_selection()?;
        if self.selection.is_caret() {
            self.toggle_bullet_at_caret()
        } else {
            self.toggle_bullet_over_selection()
        }
    }

    fn toggle_bullet_at_caret(&mut self) -> Result<ComposerUpdate, EditError> {
        let caret = self.selection.location;
        let prefix = self.config.bullet_prefix();
        let prefix_len = prefix.encode_utf16().count();
        let start = self.paragraph_start(caret);

        if self.config.bullet_toggle_removes_markers
            && self.pending.is_bulleted()
            && self.paragraph_has_marker(start)?
        {
            debug!(start, "removing bullet marker at caret");
            let attributes = self.pending.clone();
            self.document.replace_range(
                start..start + prefix_len,
                "",
                &attributes,
            )?;
            let paragraph = start..self.paragraph_end(start);
            self.document
                .set_attribute(&Attribute::ParagraphStyle(None), paragraph)?;
            self.selection = Selection::caret(
                caret.saturating_sub(prefix_len).max(start),
            );
            self.after_document_change();
            self.pending.paragraph_style = None;
            return Ok(self.create_update_replace_all());
        }

        let mut attributes = self.pending.clone();
        attributes.paragraph_style =
            Some(self.config.bulleted_paragraph_style());
        self.document
            .replace_range(caret..caret, &prefix, &attributes)?;
        self.selection = Selection::caret(caret + prefix_len);
        self.after_document_change();
        self.pending.paragraph_style = attributes.paragraph_style;
        Ok(self.create_update_replace_all())
    }

    fn toggle_bullet_over_selection(
        &mut self,
    ) -> Result<ComposerUpdate, EditError> {
        let range = self.paragraph_range(self.selection);
        let prefix = self.config.bullet_prefix();
        let prefix_len = prefix.encode_utf16().count();
        let paragraphs = self.paragraphs_in(range.clone())?;
        let marked: Vec<&Paragraph> =
            paragraphs.iter().filter(|p| !p.is_blank()).collect();

        let remove = self.config.bullet_toggle_removes_markers
            && !marked.is_empty()
            && marked.iter().all(|p| p.text.starts_with(&prefix));

        let mut base =
            self.document.attributes_at(range.start)?.without_link();
        base.paragraph_style = if remove {
            None
        } else {
            Some(self.config.bulleted_paragraph_style())
        };

        // Back to front, so earlier offsets stay valid.
        for paragraph in marked.iter().rev() {
            let at = paragraph.start;
            if remove {
                self.document.replace_range(at..at + prefix_len, "", &base)?;
            } else {
                self.document.replace_range(at..at, &prefix, &base)?;
            }
        }

        let changed = marked.len() * prefix_len;
        let end = if remove {
            range.end - changed
        } else {
            range.end + changed
        };
        let span = range.start..end;
        debug!(
            start = span.start,
            end = span.end,
            paragraphs = paragraphs.len(),
            remove,
            "toggled bullets"
        );

        self.document.update_attributes(span.clone(), |attrs| {
            *attrs = restyled(attrs, &base);
        })?;

        self.selection = Selection::caret(span.end);
        self.after_document_change();
        Ok(self.create_update_replace_all())
    }

    /// Offset just after the last newline before `pos`, or 0.
    pub(crate) fn paragraph_start(&self, pos: usize) -> usize {
        let units = self.document.text().as_slice();
        let pos = pos.min(units.len());
        units[..pos]
            .iter()
            .rposition(|u| *u == NEWLINE)
            .map_or(0, |i| i + 1)
    }

    /// Offset of the first newline at or after `pos`, or the document
    /// length.
    pub(crate) fn paragraph_end(&self, pos: usize) -> usize {
        let units = self.document.text().as_slice();
        let pos = pos.min(units.len());
        units[pos..]
            .iter()
            .position(|u| *u == NEWLINE)
            .map_or(units.len(), |i| pos + i)
    }

    /// The paragraphs intersecting `selection`, including the newline
    /// that ends the last of them.
    pub(crate) fn paragraph_range(&self, selection: Selection) -> Range<usize> {
        let start = self.paragraph_start(selection.location);
        let last = if selection.is_caret() {
            selection.location
        } else {
            selection.end() - 1
        };
        let end = self.paragraph_end(last);
        if end < self.document.len() {
            start..end + 1
        } else {
            start..end
        }
    }

    fn paragraphs_in(
        &self,
        range: Range<usize>,
    ) -> Result<Vec<Paragraph>, EditError> {
        let text = self.document.text_in(range.clone())?;
        let mut start = range.start;
        Ok(text
            .split('\n')
            .map(|line| {
                let paragraph = Paragraph {
                    start,
                    text: line.to_owned(),
                };
                start += line.encode_utf16().count() + 1;
                paragraph
            })
            .collect())
    }

    fn paragraph_has_marker(&self, start: usize) -> Result<bool, EditError> {
        let end = self.paragraph_end(start);
        let text = self.document.text_in(start..end)?;
        Ok(text.starts_with(&self.config.bullet_prefix()))
    }
}

/// `base`, except that link slots keep their link styling.
fn restyled(current: &AttributeSet, base: &AttributeSet) -> AttributeSet {
    let mut styled = base.clone();
    if current.link.is_some() {
        styled.link.clone_from(&current.link);
        styled.background = current.background;
        styled.underline = current.underline;
    }
    styled
}
