//! `rel` hardening for links that open a new browsing context.

use crate::config::LinksConfig;
use crate::dom::Document;

/// Give every `a[target="_blank"]` without a `rel` the configured one.
///
/// Links that already carry `rel` (even an empty one) are left alone.
/// Returns how many links were changed.
pub fn harden_external_links(doc: &mut Document, config: &LinksConfig) -> usize {
    let links: Vec<_> = doc
        .elements()
        .into_iter()
        .filter(|&n| {
            doc.tag(n) == Some("a")
                && doc.attr(n, "target") == Some("_blank")
                && !doc.has_attr(n, "rel")
        })
        .collect();

    for &link in &links {
        doc.set_attr(link, "rel", &config.rel);
    }
    links.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harden_external_links() {
        let mut doc = Document::parse(
            r#"<p>
<a id="gh" href="https://github.com/me" target="_blank">GitHub</a>
<a id="kept" href="https://x.com" target="_blank" rel="me">X</a>
<a id="empty" href="https://y.com" target="_blank" rel="">Y</a>
<a id="local" href="html/projects.html">Projects</a>
</p>"#,
        )
        .unwrap();
        let config = LinksConfig::default();

        assert_eq!(harden_external_links(&mut doc, &config), 1);

        let rel = |doc: &Document, id: &str| {
            let node = doc.element_by_id(id).unwrap();
            doc.attr(node, "rel").map(str::to_owned)
        };
        assert_eq!(rel(&doc, "gh").as_deref(), Some("noopener noreferrer"));
        assert_eq!(rel(&doc, "kept").as_deref(), Some("me"));
        assert_eq!(rel(&doc, "empty").as_deref(), Some(""));
        assert_eq!(rel(&doc, "local"), None);

        // second pass finds nothing left to do
        assert_eq!(harden_external_links(&mut doc, &config), 0);
    }
}
