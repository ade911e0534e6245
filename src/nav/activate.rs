//! Active link selection.
//!
//! # Policies
//!
//! | Policy | Current path | Link | Match |
//! |--------|--------------|------|-------|
//! | route-key | `/html/projects.html` | `/html/projects.html` | key equality |
//! | route-key | `/` | `home` | `index.html` == `index.html` |
//! | containment | `/html/projects.html` | `../html/projects.html` | `html/projects.html` ⊆ path |
//! | containment | `/` | `index.html` | empty path matches `index.html` |
//!
//! Containment can match several links when one target is a substring of
//! another (`projects.html` vs `old-projects.html`); the longest normalized
//! target wins so a single link stays active.

use super::{NavLink, NavModel, PageLocation};
use crate::config::{MatchPolicy, NavConfig};
use crate::dom::Document;

/// Picks the nav link that denotes the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavActivator {
    policy: MatchPolicy,
}

impl NavActivator {
    pub const fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Index of the link to mark active, if any link matches.
    pub fn select(&self, links: &[NavLink], location: &PageLocation) -> Option<usize> {
        let candidates = links.iter().enumerate().filter(|(_, l)| l.participates);
        match self.policy {
            MatchPolicy::RouteKey => {
                let key = location.route_key();
                candidates
                    .filter(|(_, link)| link.target.route_key() == key)
                    .map(|(i, _)| i)
                    .next()
            }
            MatchPolicy::Containment => {
                let current = location.normalized_path.trim_matches('/');
                candidates
                    .filter_map(|(i, link)| {
                        let normalized = normalize_href(&link.rendered_href);
                        contains_match(current, normalized).then_some((i, normalized.len()))
                    })
                    // max_by_key keeps the last maximum; reverse to prefer document order on ties
                    .rev()
                    .max_by_key(|&(_, len)| len)
                    .map(|(i, _)| i)
            }
        }
    }

    /// Set the active flag on exactly the selected link and clear all others.
    pub fn apply(&self, model: &mut NavModel, location: &PageLocation) -> Option<usize> {
        let selected = self.select(&model.links, location);
        for (i, link) in model.links.iter_mut().enumerate() {
            link.is_active = selected == Some(i);
        }
        selected
    }
}

/// Strip leading `../` segments and surrounding slashes from a rendered href.
fn normalize_href(href: &str) -> &str {
    let mut rest = href.trim_start_matches('/');
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }
    rest.trim_matches('/')
}

#[inline]
fn contains_match(current: &str, link: &str) -> bool {
    if current.is_empty() {
        link == "index.html"
    } else {
        !link.is_empty() && current.contains(link)
    }
}

/// Mark links whose target attribute equals `page` literally.
///
/// Used by the content transitioner, which addresses pages by the exact
/// identifiers carried in the markup rather than by resolved hrefs.
pub fn mark_page(doc: &mut Document, config: &NavConfig, page: &str) -> usize {
    let mut marked = 0;
    for node in doc.elements() {
        let Some(target) = doc.attr(node, &config.attribute) else {
            continue;
        };
        if !config.link_class.is_empty() && !doc.has_class(node, &config.link_class) {
            continue;
        }
        if target == page {
            doc.add_class(node, &config.active_class);
            marked += 1;
        } else {
            doc.remove_class(node, &config.active_class);
        }
    }
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::LogicalTarget;

    fn link(target: LogicalTarget, href: &str) -> NavLink {
        NavLink {
            node: crate::dom::Document::default().root(),
            target,
            rendered_href: href.to_owned(),
            is_active: false,
            participates: true,
        }
    }

    fn path(p: &str) -> LogicalTarget {
        LogicalTarget::Path(p.to_owned())
    }

    fn loc(p: &str) -> PageLocation {
        PageLocation::new(Some(p), "")
    }

    #[test]
    fn test_normalize_href() {
        assert_eq!(normalize_href("../../html/projects.html"), "html/projects.html");
        assert_eq!(normalize_href("/html/"), "html");
        assert_eq!(normalize_href("index.html"), "index.html");
    }

    #[test]
    fn test_route_key_exact_match() {
        let links = vec![
            link(LogicalTarget::Home, "../index.html"),
            link(path("html/projects.html"), "../html/projects.html"),
            link(path("html/old-projects.html"), "../html/old-projects.html"),
        ];
        let activator = NavActivator::new(MatchPolicy::RouteKey);
        assert_eq!(activator.select(&links, &loc("/html/projects.html")), Some(1));
        assert_eq!(activator.select(&links, &loc("/html/old-projects.html")), Some(2));
        assert_eq!(activator.select(&links, &loc("/html/unknown.html")), None);
    }

    #[test]
    fn test_route_key_home() {
        let links = vec![
            link(LogicalTarget::Home, "index.html"),
            link(path("html/projects.html"), "html/projects.html"),
        ];
        let activator = NavActivator::new(MatchPolicy::RouteKey);
        assert_eq!(activator.select(&links, &loc("/")), Some(0));
        assert_eq!(activator.select(&links, &loc("/index.html")), Some(0));
    }

    #[test]
    fn test_route_key_first_duplicate_wins() {
        let links = vec![
            link(path("html/contact.html"), "html/contact.html"),
            link(path("html/contact.html"), "html/contact.html"),
        ];
        let activator = NavActivator::new(MatchPolicy::RouteKey);
        assert_eq!(activator.select(&links, &loc("/html/contact.html")), Some(0));
    }

    #[test]
    fn test_containment_match() {
        let links = vec![
            link(LogicalTarget::Home, "../index.html"),
            link(path("html/projects.html"), "../html/projects.html"),
        ];
        let activator = NavActivator::new(MatchPolicy::Containment);
        assert_eq!(activator.select(&links, &loc("/html/projects.html")), Some(1));
    }

    #[test]
    fn test_containment_empty_path_matches_index() {
        let links = vec![
            link(path("html/projects.html"), "html/projects.html"),
            link(LogicalTarget::Home, "index.html"),
        ];
        let activator = NavActivator::new(MatchPolicy::Containment);
        assert_eq!(activator.select(&links, &loc("/")), Some(1));
    }

    #[test]
    fn test_containment_prefers_longest() {
        // "projects.html" is a substring of "html/old-projects.html"
        let links = vec![
            link(path("projects.html"), "../projects.html"),
            link(path("html/old-projects.html"), "../html/old-projects.html"),
        ];
        let activator = NavActivator::new(MatchPolicy::Containment);
        assert_eq!(activator.select(&links, &loc("/html/old-projects.html")), Some(1));
    }

    #[test]
    fn test_non_participating_links_are_skipped() {
        let mut brand = link(LogicalTarget::Home, "index.html");
        brand.participates = false;
        let links = vec![brand, link(LogicalTarget::Home, "index.html")];
        let activator = NavActivator::new(MatchPolicy::RouteKey);
        assert_eq!(activator.select(&links, &loc("/")), Some(1));
    }

    #[test]
    fn test_apply_clears_previous_active() {
        let mut model = NavModel {
            links: vec![
                link(LogicalTarget::Home, "../index.html"),
                link(path("html/projects.html"), "../html/projects.html"),
            ],
        };
        model.links[0].is_active = true;

        let activator = NavActivator::new(MatchPolicy::RouteKey);
        activator.apply(&mut model, &loc("/html/projects.html"));
        assert!(!model.links[0].is_active);
        assert!(model.links[1].is_active);
        assert_eq!(model.links.iter().filter(|l| l.is_active).count(), 1);
    }

    #[test]
    fn test_mark_page_exact() {
        let mut doc = Document::parse(
            r#"<a class="nav-link active" data-page="home.html">H</a><a class="nav-link" data-page="projects.html">P</a><a class="nav-link" data-page="old-projects.html">O</a>"#,
        )
        .unwrap();
        let config = NavConfig::default();

        assert_eq!(mark_page(&mut doc, &config, "projects.html"), 1);
        let active = doc.query("a.active").unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(doc.attr(active[0], "data-page"), Some("projects.html"));
    }
}
