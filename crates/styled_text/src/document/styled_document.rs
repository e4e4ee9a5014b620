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

use std::collections::BTreeMap;
use std::ops::Range;

use widestring::{Utf16Str, Utf16String};

use super::attachment::{Attachment, ATTACHMENT_CHAR};
use super::attributes::{Attribute, AttributeSet};
use super::runs::{Run, RunList};
use crate::error::{EditError, InvariantError};

/// A note's text buffer together with its attribute runs and attachments.
///
/// All offsets are UTF-16 code units. The document is the only mutator of
/// its buffer and runs, and keeps the two the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledDocument {
    text: Utf16String,
    runs: RunList,
    /// Attachments keyed by their slot offset. Each slot holds
    /// [`ATTACHMENT_CHAR`] in `text`.
    attachments: BTreeMap<usize, Attachment>,
}

impl StyledDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding `text` with uniform `attributes`.
    pub fn from_text(text: &str, attributes: AttributeSet) -> Self {
        let text = Utf16String::from_str(text);
        let runs = RunList::uniform(text.len(), attributes);
        Self {
            text,
            runs,
            attachments: BTreeMap::new(),
        }
    }

    /// Assemble a document from already validated parts.
    pub(crate) fn from_parts(
        text: Utf16String,
        runs: RunList,
        attachments: BTreeMap<usize, Attachment>,
    ) -> Self {
        Self {
            text,
            runs,
            attachments,
        }
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &Utf16Str {
        &self.text
    }

    pub fn runs(&self) -> &RunList {
        &self.runs
    }

    pub fn attachments(
        &self,
    ) -> impl Iterator<Item = (usize, &Attachment)> + '_ {
        self.attachments.iter().map(|(pos, a)| (*pos, a))
    }

    pub fn attachment_at(&self, pos: usize) -> Option<&Attachment> {
        self.attachments.get(&pos)
    }

    /// The attributes of the character at `pos`.
    pub fn attributes_at(
        &self,
        pos: usize,
    ) -> Result<&AttributeSet, EditError> {
        self.runs.attributes_at(pos)
    }

    pub fn runs_in(&self, range: Range<usize>) -> Result<Vec<Run>, EditError> {
        self.runs.runs_in(range)
    }

    pub fn set_attribute(
        &mut self,
        attribute: &Attribute,
        range: Range<usize>,
    ) -> Result<(), EditError> {
        self.runs.set_attribute(attribute, range)?;
        self.assert_invariants();
        Ok(())
    }

    pub fn replace_attributes(
        &mut self,
        attributes: &AttributeSet,
        range: Range<usize>,
    ) -> Result<(), EditError> {
        self.runs.replace_attributes(attributes, range)?;
        self.assert_invariants();
        Ok(())
    }

    pub fn update_attributes(
        &mut self,
        range: Range<usize>,
        f: impl FnMut(&mut AttributeSet),
    ) -> Result<(), EditError> {
        self.runs.update_range(range, f)?;
        self.assert_invariants();
        Ok(())
    }

    /// Plain text with attachment slots rendered as nothing.
    pub fn plain_text(&self) -> String {
        self.text.to_string().replace(ATTACHMENT_CHAR, "")
    }

    /// The text of `range`, attachment slots included as
    /// [`ATTACHMENT_CHAR`].
    pub fn text_in(&self, range: Range<usize>) -> Result<String, EditError> {
        self.check_range(&range)?;
        Ok(String::from_utf16_lossy(
            &self.text.as_slice()[range.start..range.end],
        ))
    }

    /// The code unit at `pos`, if in bounds.
    pub(crate) fn unit_at(&self, pos: usize) -> Option<u16> {
        self.text.as_slice().get(pos).copied()
    }

    /// Whether `pos` falls between two characters (not inside a
    /// surrogate pair).
    pub fn is_char_boundary(&self, pos: usize) -> bool {
        match self.unit_at(pos) {
            Some(unit) => !(0xDC00..=0xDFFF).contains(&unit),
            None => pos == self.len(),
        }
    }

    /// Replace `range` with `text` carrying `attributes`. Attachments
    /// inside the range are dropped; those after it shift. Returns the
    /// inserted length in code units.
    pub fn replace_range(
        &mut self,
        range: Range<usize>,
        text: &str,
        attributes: &AttributeSet,
    ) -> Result<usize, EditError> {
        self.check_range(&range)?;
        for pos in [range.start, range.end] {
            if !self.is_char_boundary(pos) {
                return Err(EditError::NotOnCharBoundary { position: pos });
            }
        }

        let inserted: Vec<u16> = text.encode_utf16().collect();
        let inserted_len = inserted.len();
        let mut units = std::mem::take(&mut self.text).into_vec();
        units.splice(range.clone(), inserted);
        // Both edges sit on char boundaries and the inserted units come
        // from a `str`, so the buffer stays valid UTF-16.
        self.text = Utf16String::from_vec(units).map_err(|_| {
            EditError::NotOnCharBoundary {
                position: range.start,
            }
        })?;

        self.runs.splice(range.clone(), inserted_len, attributes)?;
        self.shift_attachments(range, inserted_len);
        self.assert_invariants();
        Ok(inserted_len)
    }

    /// Insert `attachment` as a single slot at `pos`.
    pub fn insert_attachment(
        &mut self,
        pos: usize,
        attachment: Attachment,
        attributes: &AttributeSet,
    ) -> Result<(), EditError> {
        self.replace_range(pos..pos, &ATTACHMENT_CHAR.to_string(), attributes)?;
        self.attachments.insert(pos, attachment);
        self.assert_invariants();
        Ok(())
    }

    fn shift_attachments(&mut self, removed: Range<usize>, inserted: usize) {
        let old = std::mem::take(&mut self.attachments);
        self.attachments = old
            .into_iter()
            .filter(|(pos, _)| !removed.contains(pos))
            .map(|(pos, a)| {
                if pos >= removed.end {
                    (pos - removed.len() + inserted, a)
                } else {
                    (pos, a)
                }
            })
            .collect();
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), EditError> {
        if range.start > range.end || range.end > self.len() {
            return Err(EditError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Check the run invariants and that every attachment sits on a
    /// placeholder slot.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.runs.check_invariants(self.len())?;
        let placeholder = ATTACHMENT_CHAR as u32 as u16;
        for pos in self.attachments.keys() {
            if self.unit_at(*pos) != Some(placeholder) {
                return Err(InvariantError::MissingSlot { position: *pos });
            }
        }
        Ok(())
    }

    /// Panics if an invariant is broken. Only active with the
    /// `assert-invariants` feature.
    pub fn assert_invariants(&self) {
        #[cfg(feature = "assert-invariants")]
        if let Err(e) = self.check_invariants() {
            panic!("document invariant violated: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{Attachment, Attribute, AttributeSet, StyledDocument};

    fn link() -> Attachment {
        Attachment::link(Url::parse("notes://n/42").unwrap(), "Groceries")
    }

    #[test]
    fn from_text_is_a_single_run() {
        let doc = StyledDocument::from_text("Hello", AttributeSet::default());
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.runs().runs().len(), 1);
        doc.check_invariants().unwrap();
    }

    #[test]
    fn lengths_are_utf16_code_units() {
        let doc =
            StyledDocument::from_text("a\u{1F4A9}b", AttributeSet::default());
        assert_eq!(doc.len(), 4);
        assert!(doc.is_char_boundary(1));
        assert!(!doc.is_char_boundary(2));
        assert!(doc.is_char_boundary(4));
    }

    #[test]
    fn replacing_inside_a_surrogate_pair_is_rejected() {
        let mut doc =
            StyledDocument::from_text("\u{1F4A9}", AttributeSet::default());
        assert!(doc
            .replace_range(1..1, "x", &AttributeSet::default())
            .is_err());
        assert_eq!(doc.plain_text(), "\u{1F4A9}");
    }

    #[test]
    fn replace_range_edits_text_and_runs() {
        let mut doc =
            StyledDocument::from_text("Hello world", AttributeSet::default());
        let bold = AttributeSet {
            bold: true,
            ..Default::default()
        };
        let n = doc.replace_range(6..11, "there", &bold).unwrap();
        assert_eq!(n, 5);
        assert_eq!(doc.plain_text(), "Hello there");
        assert!(doc.attributes_at(6).unwrap().bold);
        assert!(!doc.attributes_at(5).unwrap().bold);
        doc.check_invariants().unwrap();
    }

    #[test]
    fn attachments_shift_with_edits() {
        let mut doc = StyledDocument::from_text("ab", AttributeSet::default());
        doc.insert_attachment(1, link(), &AttributeSet::default())
            .unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.plain_text(), "ab");
        doc.replace_range(0..0, "xx", &AttributeSet::default())
            .unwrap();
        assert_eq!(doc.attachment_at(3), Some(&link()));
        assert_eq!(doc.attachment_at(1), None);
        doc.check_invariants().unwrap();
    }

    #[test]
    fn deleting_an_attachment_slot_drops_it() {
        let mut doc = StyledDocument::from_text("ab", AttributeSet::default());
        doc.insert_attachment(1, link(), &AttributeSet::default())
            .unwrap();
        doc.replace_range(1..2, "", &AttributeSet::default()).unwrap();
        assert_eq!(doc.attachments().count(), 0);
        assert_eq!(doc.plain_text(), "ab");
    }

    #[test]
    fn text_in_returns_the_slice() {
        let doc =
            StyledDocument::from_text("Hello world", AttributeSet::default());
        assert_eq!(doc.text_in(6..11).unwrap(), "world");
        assert!(doc.text_in(6..12).is_err());
    }

    #[test]
    fn set_attribute_respects_bounds() {
        let mut doc = StyledDocument::from_text("abc", AttributeSet::default());
        assert!(doc.set_attribute(&Attribute::Bold(true), 0..4).is_err());
        doc.set_attribute(&Attribute::Bold(true), 0..3).unwrap();
        assert!(doc.attributes_at(2).unwrap().bold);
    }
}
