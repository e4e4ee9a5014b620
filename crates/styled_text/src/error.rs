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

//! Error types.
//!
//! Attribute mutation over a well-formed document is total; errors only
//! come from caller-supplied positions, persisted bytes and configuration.

use thiserror::Error;

/// A caller passed a position or selection the document cannot honour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(
        "selection {location}+{length} out of bounds for document of length {len}"
    )]
    SelectionOutOfBounds {
        location: usize,
        length: usize,
        len: usize,
    },

    #[error("position {position} out of bounds for document of length {len}")]
    PositionOutOfBounds { position: usize, len: usize },

    #[error("range {start}..{end} out of bounds for document of length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("offset {position} splits a surrogate pair")]
    NotOnCharBoundary { position: usize },
}

/// A run list or document that breaks its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("run {start}..{end} does not start at {expected}")]
    Gap {
        start: usize,
        end: usize,
        expected: usize,
    },

    #[error("empty run at {position}")]
    EmptyRun { position: usize },

    #[error("runs cover {covered} of {len} units")]
    Coverage { covered: usize, len: usize },

    #[error("adjacent runs meeting at {boundary} carry equal attributes")]
    Unmerged { boundary: usize },

    #[error("attachment at {position} has no placeholder slot")]
    MissingSlot { position: usize },
}

/// Persisted bytes that could not be turned back into a document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported document format version {0}")]
    UnsupportedVersion(u8),

    #[error("document record truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("malformed document record: {0}")]
    Body(#[from] serde_json::Error),

    #[error("stored runs are malformed: {0}")]
    InvalidRuns(#[source] InvariantError),

    #[error("attachment slot {slot} is not a placeholder character")]
    InvalidAttachmentSlot { slot: usize },
}

/// A document that could not be written out.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize document record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("document record of {len} bytes does not fit a u32 length")]
    RecordTooLarge { len: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);
