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

//! The persisted document format.
//!
//! Version 1 layout:
//!
//! ```text
//! u8       format version (1)
//! record   body: JSON {text, runs, attachment_slots}
//! record*  one JSON attachment per entry of attachment_slots, in order;
//!          image bytes are a base64 string
//! ```
//!
//! where a record is a little-endian `u32` byte length followed by that
//! many bytes. Attachments live in their own records so that one
//! unreadable image does not take the note's text down with it: the slot
//! keeps its placeholder character and the attachment is dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use widestring::Utf16String;

use crate::document::{
    Attachment, Run, RunList, StyledDocument, ATTACHMENT_CHAR,
};
use crate::error::{DecodeError, EncodeError};

pub const FORMAT_VERSION: u8 = 1;

const RECORD_HEADER_LEN: usize = 4;

/// Something that was lost while decoding, without failing the load.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeWarning {
    #[error("attachment at slot {slot} is unreadable: {reason}")]
    UnreadableAttachment { slot: usize, reason: String },

    #[error("attachment at slot {slot} is missing from truncated data")]
    TruncatedAttachment { slot: usize },
}

impl DecodeWarning {
    pub fn slot(&self) -> usize {
        match self {
            DecodeWarning::UnreadableAttachment { slot, .. }
            | DecodeWarning::TruncatedAttachment { slot } => *slot,
        }
    }
}

/// A decoded document plus whatever had to be dropped to load it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedDocument {
    pub document: StyledDocument,
    pub warnings: Vec<DecodeWarning>,
}

impl LoadedDocument {
    /// Whether everything in the saved data was restored.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Serialize)]
struct BodyRef<'a> {
    text: String,
    runs: &'a [Run],
    attachment_slots: &'a [usize],
}

#[derive(Deserialize)]
struct Body {
    text: String,
    runs: Vec<Run>,
    #[serde(default)]
    attachment_slots: Vec<usize>,
}

/// Serialize `document` in the current format version.
pub fn encode(document: &StyledDocument) -> Result<Vec<u8>, EncodeError> {
    let slots: Vec<usize> =
        document.attachments().map(|(pos, _)| pos).collect();
    let body = BodyRef {
        text: document.text().to_string(),
        runs: document.runs().runs(),
        attachment_slots: &slots,
    };

    let mut out = vec![FORMAT_VERSION];
    write_record(&mut out, &serde_json::to_vec(&body)?)?;
    for (_, attachment) in document.attachments() {
        write_record(&mut out, &serde_json::to_vec(attachment)?)?;
    }
    Ok(out)
}

fn write_record(out: &mut Vec<u8>, record: &[u8]) -> Result<(), EncodeError> {
    let len = u32::try_from(record.len())
        .map_err(|_| EncodeError::RecordTooLarge { len: record.len() })?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(record);
    Ok(())
}

/// Deserialize bytes written by [`encode`].
///
/// Empty input is an empty document. A body that cannot be read is an
/// error; attachments that cannot be read are dropped and reported as
/// warnings, leaving their placeholder slot in the text.
pub fn decode(bytes: &[u8]) -> Result<LoadedDocument, DecodeError> {
    let Some((&version, rest)) = bytes.split_first() else {
        return Ok(LoadedDocument::default());
    };
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let mut reader = RecordReader::new(rest, 1);
    let body = reader.next_record().ok_or(DecodeError::Truncated {
        offset: reader.offset(),
    })?;
    let body: Body = serde_json::from_slice(body)?;

    let text = Utf16String::from_str(&body.text);
    let runs = RunList::from_runs(body.runs, text.len())
        .map_err(DecodeError::InvalidRuns)?;
    let placeholder = ATTACHMENT_CHAR as u32 as u16;
    for &slot in &body.attachment_slots {
        if text.as_slice().get(slot) != Some(&placeholder) {
            return Err(DecodeError::InvalidAttachmentSlot { slot });
        }
    }

    let mut attachments = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut slots = body.attachment_slots.iter().copied();
    for slot in slots.by_ref() {
        let Some(record) = reader.next_record() else {
            warnings.push(DecodeWarning::TruncatedAttachment { slot });
            break;
        };
        match serde_json::from_slice::<Attachment>(record) {
            Ok(attachment) => {
                attachments.insert(slot, attachment);
            }
            Err(e) => warnings.push(DecodeWarning::UnreadableAttachment {
                slot,
                reason: e.to_string(),
            }),
        }
    }
    warnings.extend(
        slots.map(|slot| DecodeWarning::TruncatedAttachment { slot }),
    );

    for warning in &warnings {
        warn!(slot = warning.slot(), "dropping attachment: {warning}");
    }

    let document = StyledDocument::from_parts(text, runs, attachments);
    document.assert_invariants();
    Ok(LoadedDocument { document, warnings })
}

/// Walks length-prefixed records.
struct RecordReader<'a> {
    bytes: &'a [u8],
    position: usize,
    /// Offset of `bytes` within the whole input, for error reporting.
    base: usize,
}

impl<'a> RecordReader<'a> {
    fn new(bytes: &'a [u8], base: usize) -> Self {
        Self {
            bytes,
            position: 0,
            base,
        }
    }

    fn offset(&self) -> usize {
        self.base + self.position
    }

    /// The next record, or `None` if the data ends before it does.
    fn next_record(&mut self) -> Option<&'a [u8]> {
        let body_start = self.position.checked_add(RECORD_HEADER_LEN)?;
        let header: [u8; RECORD_HEADER_LEN] =
            self.bytes.get(self.position..body_start)?.try_into().ok()?;
        let len = usize::try_from(u32::from_le_bytes(header)).ok()?;
        let body_end = body_start.checked_add(len)?;
        let record = self.bytes.get(body_start..body_end)?;
        self.position = body_end;
        Some(record)
    }
}
