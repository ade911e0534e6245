//! Simple CSS selectors: compound selectors joined by commas.
//!
//! | Form | Matches |
//! |------|---------|
//! | `a` | tag name |
//! | `.feature-1` | class |
//! | `#content` | id |
//! | `[data-page]` | attribute present |
//! | `a[target="_blank"]` | attribute equals value |
//!
//! Combinators (descendant, child, sibling) are not supported.

use super::{Document, DomError, NodeId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let alternatives = source
            .split(',')
            .map(|part| parse_compound(part.trim()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| DomError::Selector(source.to_owned()))?;
        Ok(Self { alternatives })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|c| compound_matches(c, doc, node))
    }
}

fn compound_matches(compound: &Compound, doc: &Document, node: NodeId) -> bool {
    let Some(tag) = doc.tag(node) else {
        return false;
    };
    compound.tag.as_deref().is_none_or(|t| t == tag)
        && compound.id.as_deref().is_none_or(|id| doc.attr(node, "id") == Some(id))
        && compound.classes.iter().all(|c| doc.has_class(node, c))
        && compound.attrs.iter().all(|(name, value)| match value {
            Some(value) => doc.attr(node, name) == Some(value.as_str()),
            None => doc.has_attr(node, name),
        })
}

#[inline]
const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_')
}

/// Read an identifier starting at `start`, returning it and the end index.
fn ident(src: &str, start: usize) -> Option<(&str, usize)> {
    let end = src[start..]
        .bytes()
        .position(|b| !is_ident_byte(b))
        .map_or(src.len(), |p| start + p);
    (end > start).then(|| (&src[start..end], end))
}

fn parse_compound(src: &str) -> Option<Compound> {
    if src.is_empty() {
        return None;
    }
    let bytes = src.as_bytes();
    let mut compound = Compound::default();
    let mut i = 0;

    if bytes[0] == b'*' {
        i = 1;
    } else if let Some((tag, end)) = ident(src, 0) {
        compound.tag = Some(tag.to_ascii_lowercase());
        i = end;
    }

    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                let (class, end) = ident(src, i + 1)?;
                compound.classes.push(class.to_owned());
                i = end;
            }
            b'#' => {
                let (id, end) = ident(src, i + 1)?;
                compound.id = Some(id.to_owned());
                i = end;
            }
            b'[' => {
                let close = i + src[i..].find(']')?;
                let inner = &src[i + 1..close];
                let attr = match inner.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        (name.trim().to_ascii_lowercase(), Some(value.to_owned()))
                    }
                    None => (inner.trim().to_ascii_lowercase(), None),
                };
                if attr.0.is_empty() {
                    return None;
                }
                compound.attrs.push(attr);
                i = close + 1;
            }
            _ => return None,
        }
    }

    Some(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert!(Selector::parse("a").is_ok());
        assert!(Selector::parse(".feature-1, .feature-2, .timeline-section").is_ok());
        assert!(Selector::parse("#content").is_ok());
        assert!(Selector::parse(r#"a[target="_blank"]"#).is_ok());
        assert!(Selector::parse("[data-page]").is_ok());
        assert!(Selector::parse("a.nav-link[data-page]").is_ok());
    }

    #[test]
    fn test_parse_rejects_combinators_and_garbage() {
        assert!(Selector::parse("nav a").is_err());
        assert!(Selector::parse("ul > li").is_err());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("[=x]").is_err());
        assert!(Selector::parse("a[href").is_err());
    }

    #[test]
    fn test_matching() {
        let doc = Document::parse(
            r#"<div class="feature-1"></div><a class="nav-link" data-page="/" target="_blank"></a><section id="content"></section>"#,
        )
        .unwrap();

        assert_eq!(doc.query(".feature-1, #content").unwrap().len(), 2);
        assert_eq!(doc.query(r#"a[target="_blank"]"#).unwrap().len(), 1);
        assert_eq!(doc.query("a[target='_self']").unwrap().len(), 0);
        assert_eq!(doc.query("a.nav-link[data-page]").unwrap().len(), 1);
        assert_eq!(doc.query("*").unwrap().len(), 3);
        assert_eq!(doc.query("DIV").unwrap().len(), 1);
    }
}
