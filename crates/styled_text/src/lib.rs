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

//! Styled-text engine for a note editor.
//!
//! A [`StyledDocument`] is a UTF-16 text buffer tiled by attribute
//! [`Run`]s, with inline [`Attachment`]s occupying single slots. A
//! [`ComposerModel`] wraps one document together with the selection, the
//! pending-insertion attributes and the toolbar [`FormattingState`], and
//! implements the formatting commands for both caret and range
//! selections. Hosts that keep those values themselves can use
//! [`apply_command`] instead.
//!
//! Documents are persisted with [`codec::encode`] and [`codec::decode`].

pub mod codec;
mod command;
mod composer_model;
mod composer_model_interface;
mod composer_update;
mod config;
mod document;
mod error;
mod formatting_state;
mod html;
mod markdown;
mod selection;

pub use crate::codec::{DecodeWarning, LoadedDocument, FORMAT_VERSION};
pub use crate::command::{apply_command, Command, CommandOutput};
pub use crate::composer_model::ComposerModel;
pub use crate::composer_model_interface::ComposerModelInterface;
pub use crate::composer_update::{ComposerUpdate, TextUpdate};
pub use crate::config::EditorConfig;
pub use crate::document::{
    Attachment, Attribute, AttributeSet, Color, HeadingLevel, ParagraphStyle,
    Run, RunList, StyledDocument, ATTACHMENT_CHAR, BODY_FONT_SIZE,
};
pub use crate::error::{
    ColorParseError, ConfigError, DecodeError, EditError, EncodeError,
    InvariantError,
};
pub use crate::formatting_state::{
    derive_state, ActionState, FormatAction, FormattingState,
};
pub use crate::html::to_html;
pub use crate::markdown::parse_markdown;
pub use crate::selection::Selection;
