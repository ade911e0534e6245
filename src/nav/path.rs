//! Page location and relative link resolution.
//!
//! Pages live at different directory depths (`/index.html` at 0,
//! `/html/projects.html` at 1), so shared header links must be prefixed with
//! one `../` per level to reach the site root.
//!
//! | Location | Depth | `/` resolves to | `/html/career.path.html` resolves to |
//! |----------|-------|-----------------|--------------------------------------|
//! | `/` | 0 | `index.html` | `html/career.path.html` |
//! | `/index.html` | 0 | `index.html` | `html/career.path.html` |
//! | `/html/projects.html` | 1 | `../index.html` | `../html/career.path.html` |
//! | `/a/b/page.html` | 2 | `../../index.html` | `../../html/career.path.html` |

use super::LogicalTarget;
use url::Url;

const HOME_PAGE: &str = "index.html";

/// The current document's path, as seen from the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Location string as given (path or full URL), empty when absent.
    pub raw_path: String,
    /// Decoded, base-stripped path with a leading slash and no empty segments.
    pub normalized_path: String,
    /// Directory levels between the site root and the document.
    pub depth: usize,
}

impl Default for PageLocation {
    fn default() -> Self {
        Self::new(None, "")
    }
}

impl PageLocation {
    /// Build a location from a browser-style path.
    ///
    /// Query and fragment are dropped, percent-escapes decoded and
    /// `base_path` removed. A missing location is the site root.
    pub fn new(raw: Option<&str>, base_path: &str) -> Self {
        let raw_path = raw.unwrap_or_default().trim().to_owned();

        let path = if raw_path.contains("://") {
            Url::parse(&raw_path).map_or_else(|_| raw_path.clone(), |u| u.path().to_owned())
        } else {
            raw_path.clone()
        };
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let decoded = urlencoding::decode(path).map_or_else(|_| path.to_owned(), |s| s.into_owned());
        let stripped = strip_base_path(&decoded, base_path);

        let segments: Vec<&str> = stripped.split('/').filter(|s| !s.is_empty()).collect();
        let is_dir = stripped.ends_with('/');

        let mut normalized_path = format!("/{}", segments.join("/"));
        if is_dir && !segments.is_empty() {
            normalized_path.push('/');
        }

        // the last segment is the document unless the path names a directory
        let depth = if is_dir {
            segments.len()
        } else {
            segments.len().saturating_sub(1)
        };

        Self {
            raw_path,
            normalized_path,
            depth,
        }
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Canonical key of the current resource, comparable with
    /// [`LogicalTarget::route_key`]. The root and directories map to their
    /// `index.html`.
    pub fn route_key(&self) -> String {
        let trimmed = self.normalized_path.trim_start_matches('/');
        if trimmed.is_empty() {
            HOME_PAGE.to_owned()
        } else if trimmed.ends_with('/') {
            format!("{trimmed}{HOME_PAGE}")
        } else {
            trimmed.to_owned()
        }
    }
}

/// Remove `base` from the front of `path` when it ends on a segment boundary.
fn strip_base_path<'a>(path: &'a str, base: &str) -> &'a str {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Prefix a site-root-relative path so it resolves from `depth` levels down.
///
/// One leading slash is stripped first, so `/components/header.html` and
/// `components/header.html` behave the same.
pub fn relative_to_root(path: &str, depth: usize) -> String {
    let clean = path.strip_prefix('/').unwrap_or(path);
    format!("{}{clean}", "../".repeat(depth))
}

/// Computes rendered hrefs for logical targets at a fixed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathResolver {
    depth: usize,
}

impl PathResolver {
    pub const fn new(depth: usize) -> Self {
        Self { depth }
    }

    pub fn for_location(location: &PageLocation) -> Self {
        Self::new(location.depth)
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Rendered href of a logical target.
    ///
    /// Always derived from the target itself, never from a previously
    /// rendered href, so resolving twice yields the same value.
    pub fn resolve(&self, target: &LogicalTarget) -> String {
        match target {
            LogicalTarget::Home => relative_to_root(HOME_PAGE, self.depth),
            LogicalTarget::Path(path) => relative_to_root(path, self.depth),
        }
    }
}
