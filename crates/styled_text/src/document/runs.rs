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

//! The attribute run model.
//!
//! A [`RunList`] is an ordered sequence of [`Run`]s that exactly tiles
//! `[0, len)`:
//!
//! - runs are sorted by start and contiguous (`runs[i].end ==
//!   runs[i + 1].start`);
//! - no run is empty;
//! - no two adjacent runs carry equal [`AttributeSet`]s.
//!
//! Every mutating method restores these invariants before returning.
//! Splitting happens only on a mutation path; read-only queries hand out
//! clipped copies and leave the model alone.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, AttributeSet};
use crate::error::{EditError, InvariantError};

/// A maximal span of the buffer sharing one [`AttributeSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub range: Range<usize>,
    pub attributes: AttributeSet,
}

impl Run {
    pub fn new(range: Range<usize>, attributes: AttributeSet) -> Self {
        Self { range, attributes }
    }

    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunList {
    runs: Vec<Run>,
}

impl RunList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single run of `len` units, or no runs at all when `len == 0`.
    pub fn uniform(len: usize, attributes: AttributeSet) -> Self {
        let mut list = Self::new();
        if len > 0 {
            list.runs.push(Run::new(0..len, attributes));
        }
        list
    }

    /// Adopt runs produced elsewhere (e.g. decoded from storage), checking
    /// that they tile `[0, len)`. Equal neighbours are merged.
    pub fn from_runs(
        runs: Vec<Run>,
        len: usize,
    ) -> Result<Self, InvariantError> {
        let mut list = Self { runs };
        list.runs.retain(|r| !r.is_empty());
        list.check_tiling(len)?;
        list.merge_adjacent();
        Ok(list)
    }

    /// Total number of units covered.
    pub fn len(&self) -> usize {
        self.runs.last().map_or(0, |r| r.range.end)
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    /// Index of the run containing `pos`, if any.
    fn index_at(&self, pos: usize) -> Option<usize> {
        let i = self.runs.partition_point(|r| r.range.end <= pos);
        (i < self.runs.len()).then_some(i)
    }

    /// The attributes of the run containing `pos`.
    pub fn attributes_at(
        &self,
        pos: usize,
    ) -> Result<&AttributeSet, EditError> {
        self.index_at(pos)
            .map(|i| &self.runs[i].attributes)
            .ok_or(EditError::PositionOutOfBounds {
                position: pos,
                len: self.len(),
            })
    }

    /// The minimal ordered fragments covering `range`. Runs crossing the
    /// range edges are clipped in the returned copies only.
    pub fn runs_in(&self, range: Range<usize>) -> Result<Vec<Run>, EditError> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let first = self.runs.partition_point(|r| r.range.end <= range.start);
        Ok(self.runs[first..]
            .iter()
            .take_while(|r| r.range.start < range.end)
            .map(|r| {
                Run::new(
                    r.range.start.max(range.start)..r.range.end.min(range.end),
                    r.attributes.clone(),
                )
            })
            .collect())
    }

    /// Overwrite one attribute dimension across `range`, leaving the other
    /// dimensions of each affected run untouched.
    pub fn set_attribute(
        &mut self,
        attribute: &Attribute,
        range: Range<usize>,
    ) -> Result<(), EditError> {
        self.update_range(range, |attrs| attrs.apply(attribute))
    }

    /// Replace the whole attribute set across `range`.
    pub fn replace_attributes(
        &mut self,
        attributes: &AttributeSet,
        range: Range<usize>,
    ) -> Result<(), EditError> {
        self.update_range(range, |attrs| *attrs = attributes.clone())
    }

    /// Run `f` over the attributes of every fragment inside `range`,
    /// splitting at the range edges first and merging afterwards.
    pub fn update_range(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&mut AttributeSet),
    ) -> Result<(), EditError> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }
        self.split_at(range.start);
        self.split_at(range.end);
        for run in self
            .runs
            .iter_mut()
            .skip_while(|r| r.range.start < range.start)
            .take_while(|r| r.range.end <= range.end)
        {
            f(&mut run.attributes);
        }
        self.merge_adjacent();
        Ok(())
    }

    /// Remove `range` and insert `inserted_len` units carrying
    /// `attributes` in its place. Runs after the edit shift accordingly.
    pub fn splice(
        &mut self,
        range: Range<usize>,
        inserted_len: usize,
        attributes: &AttributeSet,
    ) -> Result<(), EditError> {
        self.check_range(&range)?;
        self.split_at(range.start);
        self.split_at(range.end);

        let first = self.runs.partition_point(|r| r.range.start < range.start);
        let last = self.runs.partition_point(|r| r.range.start < range.end);
        self.runs.drain(first..last);

        let removed = range.end - range.start;
        for run in &mut self.runs[first..] {
            run.range.start = run.range.start - removed + inserted_len;
            run.range.end = run.range.end - removed + inserted_len;
        }
        if inserted_len > 0 {
            self.runs.insert(
                first,
                Run::new(
                    range.start..range.start + inserted_len,
                    attributes.clone(),
                ),
            );
        }
        self.merge_adjacent();
        Ok(())
    }

    /// Make `pos` a run boundary.
    fn split_at(&mut self, pos: usize) {
        let Some(i) = self.index_at(pos) else {
            return;
        };
        let run = &mut self.runs[i];
        if run.range.start == pos {
            return;
        }
        let tail = Run::new(pos..run.range.end, run.attributes.clone());
        run.range.end = pos;
        self.runs.insert(i + 1, tail);
    }

    fn merge_adjacent(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.attributes == run.attributes => {
                    prev.range.end = run.range.end;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), EditError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(EditError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(())
    }

    fn check_tiling(&self, len: usize) -> Result<(), InvariantError> {
        let mut expected = 0;
        for run in &self.runs {
            if run.range.start != expected {
                return Err(InvariantError::Gap {
                    start: run.range.start,
                    end: run.range.end,
                    expected,
                });
            }
            if run.is_empty() {
                return Err(InvariantError::EmptyRun { position: expected });
            }
            expected = run.range.end;
        }
        if expected != len {
            return Err(InvariantError::Coverage {
                covered: expected,
                len,
            });
        }
        Ok(())
    }

    /// Verify every invariant listed in the module documentation.
    pub fn check_invariants(&self, len: usize) -> Result<(), InvariantError> {
        self.check_tiling(len)?;
        for pair in self.runs.windows(2) {
            if pair[0].attributes == pair[1].attributes {
                return Err(InvariantError::Unmerged {
                    boundary: pair[1].range.start,
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RunList {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
