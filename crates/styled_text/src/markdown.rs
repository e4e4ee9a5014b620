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

//! Markdown import.
//!
//! Externally formatted content (for example text produced by a sync or
//! rewrite service) arrives as Markdown and becomes a [`StyledDocument`]
//! using the same styles the toolbar commands produce: `#` is a title,
//! deeper headings are headings, list items get the bullet marker and
//! bulleted paragraph style.

use pulldown_cmark::{
    Event, HeadingLevel as MarkdownHeading, Options, Parser, Tag, TagEnd,
};

use crate::config::EditorConfig;
use crate::document::{AttributeSet, HeadingLevel, StyledDocument};
use crate::error::EditError;

/// Parse `markdown` into a new document.
///
/// Images and raw HTML are dropped. Soft line breaks become spaces.
pub fn parse_markdown(
    markdown: &str,
    config: &EditorConfig,
) -> Result<StyledDocument, EditError> {
    let mut builder = DocumentBuilder::new(config);

    for event in Parser::new_ext(markdown, Options::empty()) {
        match event {
            Event::Start(tag) => builder.start(tag)?,
            Event::End(tag_end) => builder.end(tag_end),
            Event::Text(text) | Event::Code(text) => builder.push(&text)?,
            Event::SoftBreak => builder.push(" ")?,
            Event::HardBreak => builder.line_break()?,
            _ => {}
        }
    }

    Ok(builder.document)
}

/// Lists currently open, innermost last. Ordered lists carry the number
/// of their next item.
enum ListKind {
    Bulleted,
    Numbered(u64),
}

struct DocumentBuilder<'a> {
    config: &'a EditorConfig,
    document: StyledDocument,
    /// Style of the innermost open element.
    style_stack: Vec<AttributeSet>,
    lists: Vec<ListKind>,
    /// Style of the last text written; line breaks continue it.
    last_style: AttributeSet,
    /// Nothing has been written on the current paragraph yet.
    at_block_start: bool,
    /// Document length right after the last list marker.
    marker_end: Option<usize>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(config: &'a EditorConfig) -> Self {
        Self {
            config,
            document: StyledDocument::new(),
            style_stack: vec![config.default_attributes()],
            lists: Vec::new(),
            last_style: config.default_attributes(),
            at_block_start: true,
            marker_end: None,
        }
    }

    fn style(&self) -> AttributeSet {
        self.style_stack
            .last()
            .cloned()
            .unwrap_or_else(|| self.config.default_attributes())
    }

    fn push_style(&mut self, f: impl FnOnce(&mut AttributeSet)) {
        let mut style = self.style();
        f(&mut style);
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn append(
        &mut self,
        text: &str,
        attributes: &AttributeSet,
    ) -> Result<(), EditError> {
        let end = self.document.len();
        self.document.replace_range(end..end, text, attributes)?;
        self.last_style.clone_from(attributes);
        Ok(())
    }

    fn push(&mut self, text: &str) -> Result<(), EditError> {
        if text.is_empty() {
            return Ok(());
        }
        let style = self.style();
        self.append(text, &style)?;
        self.at_block_start = false;
        Ok(())
    }

    fn line_break(&mut self) -> Result<(), EditError> {
        let style = self.last_style.for_typing();
        self.append("\n", &style)?;
        self.at_block_start = true;
        Ok(())
    }

    /// Separate a new block from the previous one.
    fn begin_block(&mut self) -> Result<(), EditError> {
        if !self.at_block_start {
            self.line_break()?;
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag) -> Result<(), EditError> {
        match tag {
            Tag::Paragraph | Tag::CodeBlock(_) | Tag::BlockQuote(_) => {
                self.begin_block()?;
            }
            Tag::Heading { level, .. } => {
                self.begin_block()?;
                let level = match level {
                    MarkdownHeading::H1 => HeadingLevel::Title,
                    _ => HeadingLevel::Heading,
                };
                let size = self.config.font_size_for(level);
                self.push_style(|s| {
                    s.font_size = size;
                    s.bold = level.is_bold();
                });
            }
            Tag::List(first) => {
                self.lists.push(match first {
                    Some(n) => ListKind::Numbered(n),
                    None => ListKind::Bulleted,
                });
            }
            Tag::Item => {
                // An empty item still ends its line.
                if self.marker_end == Some(self.document.len()) {
                    self.line_break()?;
                }
                self.begin_block()?;
                let (prefix, bulleted) = match self.lists.last_mut() {
                    Some(ListKind::Numbered(n)) => {
                        let prefix = format!("{n}. ");
                        *n += 1;
                        (prefix, false)
                    }
                    _ => (self.config.bullet_prefix(), true),
                };
                let paragraph_style =
                    bulleted.then(|| self.config.bulleted_paragraph_style());
                self.push_style(|s| {
                    if paragraph_style.is_some() {
                        s.paragraph_style = paragraph_style;
                    }
                });
                let style = self.style();
                self.append(&prefix, &style)?;
                self.marker_end = Some(self.document.len());
            }
            Tag::Emphasis => self.push_style(|s| s.italic = true),
            Tag::Strong => self.push_style(|s| s.bold = true),
            Tag::Link { dest_url, .. } => {
                let target = dest_url.to_string();
                self.push_style(|s| {
                    s.link = Some(target);
                    s.underline = true;
                });
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Link => self.pop_style(),
            TagEnd::List(_) => {
                self.lists.pop();
            }
            _ => {}
        }
    }
}
