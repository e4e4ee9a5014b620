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

use serde::{Deserialize, Serialize};
use url::Url;

/// The character stored in the buffer at every attachment slot.
pub const ATTACHMENT_CHAR: char = '\u{fffc}';

/// An inline non-text unit occupying exactly one buffer position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attachment {
    /// Encoded image bytes plus the intrinsic display size in points.
    /// The bytes are stored as base64.
    Image {
        #[serde(with = "base64_data")]
        data: Vec<u8>,
        width: f32,
        height: f32,
    },
    /// A link to another document, shown as `label`.
    Link { target: Url, label: String },
}

impl Attachment {
    pub fn image(data: Vec<u8>, width: f32, height: f32) -> Self {
        Self::Image {
            data,
            width,
            height,
        }
    }

    pub fn link(target: Url, label: impl Into<String>) -> Self {
        Self::Link {
            target,
            label: label.into(),
        }
    }
}

mod base64_data {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        data: &[u8],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(de::Error::custom)
    }
}
