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

use std::ops::Range;

use crate::error::EditError;

/// A selected range of the document, in UTF-16 code units.
///
/// `length == 0` is a caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub location: usize,
    pub length: usize,
}

impl Selection {
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub fn caret(location: usize) -> Self {
        Self::new(location, 0)
    }

    pub fn is_caret(&self) -> bool {
        self.length == 0
    }

    pub fn end(&self) -> usize {
        self.location + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.location..self.end()
    }

    /// Reject a selection that does not fit a document of `len` units.
    pub fn validate(&self, len: usize) -> Result<(), EditError> {
        match self.location.checked_add(self.length) {
            Some(end) if end <= len => Ok(()),
            _ => Err(EditError::SelectionOutOfBounds {
                location: self.location,
                length: self.length,
                len,
            }),
        }
    }

    /// The nearest selection that fits a document of `len` units.
    pub fn clamped(&self, len: usize) -> Self {
        let location = self.location.min(len);
        Self::new(location, self.length.min(len - location))
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;

    #[test]
    fn a_zero_length_selection_is_a_caret() {
        assert!(Selection::caret(3).is_caret());
        assert!(!Selection::new(3, 1).is_caret());
    }

    #[test]
    fn validation_checks_the_end() {
        assert!(Selection::new(2, 3).validate(5).is_ok());
        assert!(Selection::new(2, 4).validate(5).is_err());
        assert!(Selection::caret(6).validate(5).is_err());
        assert!(Selection::new(usize::MAX, 2).validate(5).is_err());
    }

    #[test]
    fn clamping_pulls_the_selection_inside() {
        assert_eq!(Selection::new(4, 9).clamped(6), Selection::new(4, 2));
        assert_eq!(Selection::caret(9).clamped(6), Selection::caret(6));
        assert_eq!(Selection::new(1, 2).clamped(6), Selection::new(1, 2));
    }
}
