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

//! The styled document: a UTF-16 buffer, the attribute runs tiling it, and
//! the attachments occupying single slots within it.

mod attachment;
mod attributes;
mod runs;
mod styled_document;

pub use attachment::{Attachment, ATTACHMENT_CHAR};
pub use attributes::{
    Attribute, AttributeSet, Color, HeadingLevel, ParagraphStyle,
    BODY_FONT_SIZE,
};
pub use runs::{Run, RunList};
pub use styled_document::StyledDocument;
