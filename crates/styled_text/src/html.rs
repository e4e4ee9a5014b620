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

//! HTML export.
//!
//! Each paragraph becomes a `<p>`, consecutive bulleted paragraphs become
//! one `<ul>` with their markers stripped. Inline attributes map to
//! `<strong>`, `<em>`, `<u>`, `<a>` and a `<span style>` for colour, size
//! and background.

use std::ops::Range;

use crate::config::EditorConfig;
use crate::document::{
    Attachment, AttributeSet, StyledDocument, ATTACHMENT_CHAR,
};

/// Render `document` as an HTML fragment. Image bytes are not inlined;
/// images are emitted with their size only.
pub fn to_html(document: &StyledDocument, config: &EditorConfig) -> String {
    let mut html = String::new();
    let mut in_list = false;
    let prefix = config.bullet_prefix();

    for paragraph in paragraphs(document) {
        let bulleted = paragraph_attributes(document, &paragraph)
            .is_some_and(AttributeSet::is_bulleted);

        if bulleted != in_list {
            html.push_str(if bulleted { "<ul>" } else { "</ul>" });
            in_list = bulleted;
        }

        let mut content = paragraph.clone();
        if bulleted {
            let starts_with_marker = document
                .text_in(paragraph.clone())
                .is_ok_and(|t| t.starts_with(&prefix));
            if starts_with_marker {
                content.start += prefix.encode_utf16().count();
            }
        }

        let tag = if bulleted { "li" } else { "p" };
        html.push_str(&format!("<{tag}>"));
        emit_inline(&mut html, document, config, content);
        html.push_str(&format!("</{tag}>"));
    }

    if in_list {
        html.push_str("</ul>");
    }
    html
}

/// Paragraph ranges, newlines excluded. An empty document has none.
fn paragraphs(document: &StyledDocument) -> Vec<Range<usize>> {
    if document.is_empty() {
        return Vec::new();
    }
    let units = document.text().as_slice();
    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, unit) in units.iter().enumerate() {
        if *unit == b'\n' as u16 {
            ranges.push(start..i);
            start = i + 1;
        }
    }
    ranges.push(start..units.len());
    ranges
}

/// The attributes that decide a paragraph's block style: its first
/// character, or its newline when it is empty.
fn paragraph_attributes<'a>(
    document: &'a StyledDocument,
    paragraph: &Range<usize>,
) -> Option<&'a AttributeSet> {
    document.attributes_at(paragraph.start).ok()
}

fn emit_inline(
    html: &mut String,
    document: &StyledDocument,
    config: &EditorConfig,
    range: Range<usize>,
) {
    let Ok(runs) = document.runs_in(range) else {
        return;
    };
    for run in runs {
        let Ok(text) = document.text_in(run.range.clone()) else {
            continue;
        };
        // Link slots render their own anchor.
        let link_slots = text.chars().all(|c| c == ATTACHMENT_CHAR);
        let tags = open_tags(html, &run.attributes, config, !link_slots);

        let mut pos = run.range.start;
        let mut pending = String::new();
        for ch in text.chars() {
            if ch == ATTACHMENT_CHAR {
                html.push_str(&html_escape::encode_text(&pending));
                pending.clear();
                if let Some(attachment) = document.attachment_at(pos) {
                    emit_attachment(html, attachment);
                }
            } else {
                pending.push(ch);
            }
            pos += ch.len_utf16();
        }
        html.push_str(&html_escape::encode_text(&pending));

        for tag in tags.iter().rev() {
            html.push_str(&format!("</{tag}>"));
        }
    }
}

/// Open the tags for `attributes` and return their names, outermost
/// first.
fn open_tags(
    html: &mut String,
    attributes: &AttributeSet,
    config: &EditorConfig,
    with_anchor: bool,
) -> Vec<&'static str> {
    let mut tags = Vec::new();

    if let Some(link) = attributes.link.as_ref().filter(|_| with_anchor) {
        html.push_str(&format!(
            "<a href=\"{}\">",
            html_escape::encode_double_quoted_attribute(link)
        ));
        tags.push("a");
    }

    let mut style = Vec::new();
    if let Some(color) = attributes.color {
        style.push(format!("color: {color}"));
    }
    if attributes.font_size != config.body_font_size {
        style.push(format!("font-size: {}px", attributes.font_size));
    }
    if let Some(background) = attributes.background {
        style.push(format!("background-color: {background}"));
    }
    if !style.is_empty() {
        html.push_str(&format!("<span style=\"{}\">", style.join("; ")));
        tags.push("span");
    }

    for (on, tag) in [
        (attributes.bold, "strong"),
        (attributes.italic, "em"),
        (attributes.underline && attributes.link.is_none(), "u"),
    ] {
        if on {
            html.push_str(&format!("<{tag}>"));
            tags.push(tag);
        }
    }
    tags
}

fn emit_attachment(html: &mut String, attachment: &Attachment) {
    match attachment {
        Attachment::Image { width, height, .. } => {
            html.push_str(&format!(
                "<img width=\"{width}\" height=\"{height}\" />"
            ));
        }
        Attachment::Link { target, label } => {
            html.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                html_escape::encode_double_quoted_attribute(target.as_str()),
                html_escape::encode_text(label)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{Color, ComposerModel, HeadingLevel, Selection};

    fn model_with_text(text: &str) -> ComposerModel {
        let mut m = ComposerModel::new();
        m.replace_text(text).unwrap();
        m
    }

    #[test]
    fn empty_model_produces_empty_html() {
        assert_eq!(ComposerModel::new().to_html(), "");
    }

    #[test]
    fn plain_text_produces_paragraphs() {
        let model = model_with_text("one\ntwo");
        assert_eq!(model.to_html(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn special_characters_are_escaped() {
        let model = model_with_text("a < b & c");
        assert_eq!(model.to_html(), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn inline_styles_nest_in_a_fixed_order() {
        let mut model = model_with_text("Hello world");
        model.select(Selection::new(0, 5));
        model.bold().unwrap();
        model.italic().unwrap();
        assert_eq!(
            model.to_html(),
            "<p><strong><em>Hello</em></strong> world</p>"
        );
    }

    #[test]
    fn colour_and_size_use_a_span() {
        let mut model = model_with_text("Big");
        model.select(Selection::new(0, 3));
        model.apply_heading(HeadingLevel::Heading).unwrap();
        model.apply_color(Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(
            model.to_html(),
            "<p><span style=\"color: #ff0000; font-size: 22px\">\
             <strong>Big</strong></span></p>"
        );
    }

    #[test]
    fn bulleted_paragraphs_become_a_list() {
        let mut model = model_with_text("intro\na\nb");
        model.select(Selection::new(6, 3));
        model.toggle_bullet_list().unwrap();
        assert_eq!(
            model.to_html(),
            "<p>intro</p><ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn attachments_render_inline() {
        let mut model = model_with_text("x");
        model
            .insert_link(Url::parse("notes://n/1?a=1&b=2").unwrap(), "A&B")
            .unwrap();
        model.insert_image(vec![1], 20.0, 10.0).unwrap();
        assert_eq!(
            model.to_html(),
            "<p>x<span style=\"background-color: #e8f0fe\">\
             <a href=\"notes://n/1?a=1&amp;b=2\">A&amp;B</a></span>\
             <img width=\"20\" height=\"10\" /></p>"
        );
    }
}
