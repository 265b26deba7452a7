use std::borrow::Cow;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use tracing::{debug, warn};

/// Tags kept inside the passage container, with their output forms.
const TAG_VOCABULARY: &[(&str, &str, &str)] = &[
    ("p", "<p>", "</p>\n"),
    ("nn", "\n<i>", "</i>\n"),
    ("span", "\n<span class='adonai'>", "</span>\n"),
];

const LINE_BREAK: &str = "<br />";

/// Pulls the passage out of a provider page.
///
/// Only content inside elements whose `class` list contains
/// `container_class` is kept; the container's own tags are not emitted.
/// Text runs are trimmed and joined with single spaces, known tags are
/// rewritten per [`TAG_VOCABULARY`], and everything else is dropped.
/// Malformed markup stops extraction and returns what was collected so far.
pub fn extract_passage(markup: &str, container_class: &str) -> String {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut out = String::new();
    let mut in_container = false;
    let mut depth = 0_usize;
    let mut previous_was_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => {
                if !in_container {
                    in_container = has_class(&tag, container_class);
                    depth = 0;
                    continue;
                }

                previous_was_text = false;
                let name = tag_name(tag.local_name().as_ref());
                if name == "br" {
                    out.push_str(LINE_BREAK);
                    continue;
                }

                match rendering_for(&name) {
                    Some((open, _)) => out.push_str(open),
                    None => debug!(tag = %name, "unprocessed open tag"),
                }
                depth += 1;
            }
            Ok(Event::Empty(tag)) => {
                if !in_container {
                    continue;
                }

                previous_was_text = false;
                let name = tag_name(tag.local_name().as_ref());
                if name == "br" {
                    out.push_str(LINE_BREAK);
                } else {
                    debug!(tag = %name, "unprocessed self-closing tag");
                }
            }
            Ok(Event::End(tag)) => {
                if !in_container {
                    continue;
                }

                previous_was_text = false;
                let name = tag_name(tag.local_name().as_ref());
                if name == "br" {
                    continue;
                }
                if depth == 0 {
                    // closing the container itself
                    in_container = false;
                    continue;
                }
                depth -= 1;

                match rendering_for(&name) {
                    Some((_, close)) => out.push_str(close),
                    None => debug!(tag = %name, "unprocessed close tag"),
                }
            }
            Ok(Event::Text(text)) => {
                if !in_container {
                    continue;
                }

                let decoded = decode_text(&text);
                let trimmed = decoded.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if previous_was_text {
                    out.push(' ');
                }
                out.push_str(trimmed);
                previous_was_text = true;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(
                    position = reader.buffer_position(),
                    error = %err,
                    "stopping passage extraction at malformed markup"
                );
                break;
            }
        }
    }

    out
}

fn rendering_for(name: &str) -> Option<(&'static str, &'static str)> {
    TAG_VOCABULARY
        .iter()
        .find(|(tag, _, _)| *tag == name)
        .map(|(_, open, close)| (*open, *close))
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn has_class(tag: &BytesStart<'_>, container_class: &str) -> bool {
    tag.html_attributes().flatten().any(|attribute| {
        attribute.key.as_ref().eq_ignore_ascii_case(b"class")
            && String::from_utf8_lossy(&attribute.value)
                .split_whitespace()
                .any(|class| class == container_class)
    })
}

fn decode_text<'a>(text: &'a BytesText<'_>) -> Cow<'a, str> {
    text.unescape_with(resolve_entity)
        .unwrap_or_else(|_| String::from_utf8_lossy(text))
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        _ => return None,
    };
    Some(resolved)
}
