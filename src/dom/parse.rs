//! Lenient HTML reader built on `quick-xml`.
//!
//! HTML is not XML, so the reader runs with all well-formedness checks off and
//! tolerates end tags it has not seen open. Nesting is tracked on our own
//! open-element stack: void elements are never pushed onto it and stray end
//! tags are dropped. The bodies of raw-text elements (`script`, `style`,
//! `textarea`) are sliced out of the input verbatim instead of being
//! tokenized. Attribute values decode the full set of HTML5 named entities.

use super::{Attrs, Document, DomError, NodeId, is_void};
use quick_xml::{
    Reader,
    escape::{resolve_html5_entity, unescape_with},
    events::{BytesStart, Event},
};
use std::borrow::Cow;

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

#[inline]
fn create_html_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    // restarts after raw text lose the reader's own open-tag list
    reader.config_mut().allow_unmatched_ends = true;
    reader
}

/// Parse `markup` and append the resulting nodes under `parent`.
pub(super) fn parse_into(doc: &mut Document, parent: NodeId, markup: &str) -> Result<(), DomError> {
    // Offset of `input` within `markup`; the reader restarts after raw text.
    let mut offset = 0;
    let mut input = markup;
    let mut reader = create_html_reader(input);
    let mut stack = vec![parent];
    let mut last = 0;

    loop {
        let event = reader.read_event().map_err(|e| DomError::Parse {
            position: offset as u64 + reader.error_position() as u64,
            message: e.to_string(),
        })?;
        let pos = reader.buffer_position() as usize;
        let top = stack.last().copied().unwrap_or(parent);

        match event {
            Event::Start(elem) => {
                let (name, attrs) = element_parts(&elem);
                let is_raw_text = RAW_TEXT_ELEMENTS.contains(&name.as_str());
                let void = is_void(&name);
                let node = doc.push_element(top, name.clone(), attrs);

                if is_raw_text {
                    let body_start = offset + pos;
                    let (body_end, resume) = find_raw_text_end(markup, body_start, &name);
                    doc.push_raw(node, &markup[body_start..body_end]);

                    offset = resume;
                    input = &markup[resume..];
                    reader = create_html_reader(input);
                    last = 0;
                    continue;
                }
                if !void {
                    stack.push(node);
                }
            }
            Event::Empty(elem) => {
                let (name, attrs) = element_parts(&elem);
                doc.push_element(top, name, attrs);
            }
            Event::End(elem) => {
                let name = String::from_utf8_lossy(elem.name().as_ref()).to_ascii_lowercase();
                // Close the nearest open element with this name; stray end tags are dropped.
                if let Some(idx) = stack
                    .iter()
                    .skip(1)
                    .rposition(|&open| doc.tag(open) == Some(name.as_str()))
                {
                    stack.truncate(idx + 1);
                }
            }
            Event::Eof => break,
            _ => doc.push_raw(top, &input[last..pos]),
        }
        last = pos;
    }

    Ok(())
}

/// Lowercased tag name and attributes of a start tag.
fn element_parts(elem: &BytesStart<'_>) -> (String, Attrs) {
    let name = String::from_utf8_lossy(elem.name().as_ref()).to_ascii_lowercase();
    let attrs = elem
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = unescape_with(&raw, resolve_html5_entity)
                .map(Cow::into_owned)
                .unwrap_or_else(|_| raw.to_string());
            (key, value)
        })
        .collect();
    (name, attrs)
}

/// Locate the closing tag of a raw-text element.
///
/// Returns `(body_end, resume)`: where the body stops and where parsing
/// continues after `</name>`. An unclosed element swallows the rest.
fn find_raw_text_end(markup: &str, body_start: usize, name: &str) -> (usize, usize) {
    let rest = &markup[body_start..];
    let needle = format!("</{name}");
    // ASCII lowercasing keeps byte offsets stable
    let Some(close) = rest.to_ascii_lowercase().find(&needle) else {
        return (markup.len(), markup.len());
    };
    let body_end = body_start + close;
    let resume = rest[close..]
        .find('>')
        .map_or(markup.len(), |gt| body_end + gt + 1);
    (body_end, resume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_raw_text_end() {
        let markup = "<script>a < b</script><p>x</p>";
        // body starts right after "<script>"
        let (end, resume) = find_raw_text_end(markup, 8, "script");
        assert_eq!(&markup[8..end], "a < b");
        assert_eq!(&markup[resume..], "<p>x</p>");
    }

    #[test]
    fn test_find_raw_text_end_unclosed() {
        let markup = "<style>body {}";
        assert_eq!(find_raw_text_end(markup, 7, "style"), (14, 14));
    }

    #[test]
    fn test_stray_end_tag_is_ignored() {
        let doc = Document::parse("<div></span><p>x</p></div>").unwrap();
        let div = doc.query("div").unwrap()[0];
        let p = doc.query("p").unwrap()[0];
        assert!(doc.descendants(div).contains(&p));
    }

    #[test]
    fn test_more_end_tags_than_start_tags() {
        let doc = Document::parse("<p>hi</p></div></section><p>after</p>").unwrap();
        assert_eq!(doc.query("p").unwrap().len(), 2);
        assert_eq!(doc.to_html(), "<p>hi</p><p>after</p>");
    }

    #[test]
    fn test_html_named_entities_in_attributes() {
        let doc = Document::parse(r#"<a title="&copy; me&nbsp;&amp; you">x</a>"#).unwrap();
        let a = doc.query("a").unwrap()[0];
        assert_eq!(doc.attr(a, "title"), Some("\u{a9} me\u{a0}& you"));

        let html = doc.to_html();
        assert!(!html.contains("&amp;copy;"));
        let reparsed = Document::parse(&html).unwrap();
        let a = reparsed.query("a").unwrap()[0];
        assert_eq!(reparsed.attr(a, "title"), Some("\u{a9} me\u{a0}& you"));
    }

    #[test]
    fn test_unclosed_element_closed_by_ancestor_end() {
        let doc = Document::parse("<ul><li>one<li>two</ul><p>after</p>").unwrap();
        let ul = doc.query("ul").unwrap()[0];
        let p = doc.query("p").unwrap()[0];
        assert!(!doc.descendants(ul).contains(&p));
    }

    #[test]
    fn test_page_with_script_before_body_end() {
        let doc = Document::parse(
            r#"<html><body><div id="header-placeholder"></div><script src="scripts/enhancements.js"></script></body></html>"#,
        )
        .unwrap();
        let script = doc.query("script").unwrap()[0];
        assert!(doc.descendants(doc.body()).contains(&script));
        assert!(doc.to_html().ends_with("</script></body></html>"));
    }

    #[test]
    fn test_content_after_script_keeps_nesting() {
        let doc = Document::parse(r#"<body><script>x()</script><div id="d"></div></body>"#).unwrap();
        let body = doc.body();
        let d = doc.element_by_id("d").unwrap();
        assert!(doc.descendants(body).contains(&d));
    }
}
