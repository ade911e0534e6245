//! Navigation links: logical targets, rendered hrefs and the active flag.
//!
//! Links carry their destination in a target attribute (`data-page` by
//! default) as a root-relative path (`/html/projects.html`) or a symbol
//! (`home`, or any key of `[nav.routes]`). The rendered `href` and the active
//! state are derived from it on every pass:
//!
//! ```text
//! NavModel::collect ─► PathResolver ─► NavActivator ─► NavModel::render
//!   (read targets)     (hrefs)         (active flag)    (write DOM)
//! ```

mod activate;
mod path;

pub use activate::{NavActivator, mark_page};
pub use path::{PageLocation, PathResolver, relative_to_root};

use crate::config::NavConfig;
use crate::dom::{Document, NodeId};

/// Conceptual destination of a nav link, independent of where the page is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalTarget {
    /// The site root page.
    Home,
    /// Site-root-relative path without the leading slash.
    Path(String),
}

impl LogicalTarget {
    /// Interpret a target attribute value.
    pub fn parse(raw: &str, config: &NavConfig) -> Self {
        let raw = raw.trim();
        if let Some(path) = config.routes.get(raw) {
            return Self::from_path(path);
        }
        if config.home_symbols.iter().any(|s| s == raw) {
            return Self::Home;
        }
        Self::from_path(raw)
    }

    fn from_path(path: &str) -> Self {
        let clean = path.strip_prefix('/').unwrap_or(path);
        if clean.is_empty() || clean == "index.html" {
            Self::Home
        } else {
            Self::Path(clean.to_owned())
        }
    }

    /// Canonical key compared against [`PageLocation::route_key`].
    pub fn route_key(&self) -> String {
        match self {
            Self::Home => "index.html".to_owned(),
            Self::Path(path) => {
                let path = path.split(['?', '#']).next().unwrap_or_default();
                if path.ends_with('/') {
                    format!("{path}index.html")
                } else {
                    path.to_owned()
                }
            }
        }
    }
}

/// A navigation element and its derived state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub node: NodeId,
    pub target: LogicalTarget,
    pub rendered_href: String,
    pub is_active: bool,
    /// Whether the link takes part in active highlighting (carries the nav class).
    pub participates: bool,
}

/// Nav links of one document in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavModel {
    pub links: Vec<NavLink>,
}

impl NavModel {
    /// Read every element carrying the target attribute.
    pub fn collect(doc: &Document, config: &NavConfig) -> Self {
        let links = doc
            .elements()
            .into_iter()
            .filter_map(|node| {
                let raw = doc.attr(node, &config.attribute)?;
                Some(NavLink {
                    node,
                    target: LogicalTarget::parse(raw, config),
                    rendered_href: doc.attr(node, "href").unwrap_or_default().to_owned(),
                    is_active: false,
                    participates: config.link_class.is_empty()
                        || doc.has_class(node, &config.link_class),
                })
            })
            .collect();
        Self { links }
    }

    pub fn resolve(&mut self, resolver: &PathResolver) {
        for link in &mut self.links {
            link.rendered_href = resolver.resolve(&link.target);
        }
    }

    pub fn active(&self) -> Option<&NavLink> {
        self.links.iter().find(|l| l.is_active)
    }

    /// Write rendered hrefs to the document.
    pub fn render_hrefs(&self, doc: &mut Document) {
        for link in &self.links {
            doc.set_attr(link.node, "href", &link.rendered_href);
        }
    }

    /// Write the active flag to the document as a class and `aria-current`.
    pub fn render_active(&self, doc: &mut Document, config: &NavConfig) {
        for link in self.links.iter().filter(|l| l.participates) {
            if link.is_active {
                doc.add_class(link.node, &config.active_class);
                doc.set_attr(link.node, "aria-current", "page");
            } else {
                doc.remove_class(link.node, &config.active_class);
                doc.remove_attr(link.node, "aria-current");
            }
        }
    }
}

/// Fix link targets, then mark the active link.
///
/// Both steps run exactly once and in this order.
pub fn update_links(doc: &mut Document, config: &NavConfig, location: &PageLocation) -> NavModel {
    let mut model = NavModel::collect(doc, config);

    model.resolve(&PathResolver::for_location(location));
    model.render_hrefs(doc);

    NavActivator::new(config.matching).apply(&mut model, location);
    model.render_active(doc, config);

    model
}
