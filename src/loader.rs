//! Shared header/footer injection.
//!
//! Each page carries empty mount points (`#header-placeholder`,
//! `#footer-placeholder`) that the loader fills with component markup:
//!
//! - embedded mode: markup compiled in from `embed/` (or inlined in config)
//! - fetch mode: `components/<name>.html` fetched relative to the page depth
//!
//! After the header step, link targets are fixed and the active link is
//! marked, exactly once and in that order, before the footer is mounted.
//! A missing mount is skipped; a failed fetch is logged and the mount is
//! left as it was.

use crate::config::{FolioConfig, LoadMode};
use crate::fetch::{FetchError, Fetcher};
use crate::nav::{self, NavModel, relative_to_root};
use crate::page::Page;
use std::fmt;

/// Built-in header markup (embedded mode).
pub const HEADER_TEMPLATE: &str = include_str!("embed/header.html");

/// Built-in footer markup (embedded mode).
pub const FOOTER_TEMPLATE: &str = include_str!("embed/footer.html");

/// Named shared fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Header,
    Footer,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Footer => "footer",
        })
    }
}

/// What happened to one mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted,
    /// The page has no such mount point.
    Skipped,
    /// Retrieval or parsing failed; the mount keeps its previous content.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub header: MountOutcome,
    pub footer: MountOutcome,
    /// Nav state after links were fixed and the active one marked.
    pub nav: NavModel,
}

pub struct ComponentLoader<'a, F> {
    config: &'a FolioConfig,
    fetcher: &'a F,
}

impl<'a, F: Fetcher> ComponentLoader<'a, F> {
    pub const fn new(config: &'a FolioConfig, fetcher: &'a F) -> Self {
        Self { config, fetcher }
    }

    /// Mount header and footer, updating nav links in between.
    pub async fn load(&self, page: &mut Page) -> LoadReport {
        let header = self.mount(page, Component::Header).await;
        let nav = nav::update_links(&mut page.document, &self.config.nav, &page.location);
        let footer = self.mount(page, Component::Footer).await;

        LoadReport {
            header,
            footer,
            nav,
        }
    }

    /// Mount one component into its configured placeholder.
    pub async fn mount(&self, page: &mut Page, component: Component) -> MountOutcome {
        let components = &self.config.components;
        let (mount_id, path) = match component {
            Component::Header => (&components.header_mount, &components.header_path),
            Component::Footer => (&components.footer_mount, &components.footer_path),
        };
        if page.document.element_by_id(mount_id).is_none() {
            return MountOutcome::Skipped;
        }

        match components.mode {
            LoadMode::Embedded => {
                let markup = self.embedded(component).to_owned();
                self.inject(page, mount_id, &component.to_string(), &markup)
            }
            LoadMode::Fetch => {
                let href = relative_to_root(path, page.location.depth);
                self.load_fragment(page, &href, mount_id).await
            }
        }
    }

    /// Fetch `href` (relative to the page) and mount it into `#mount_id`.
    pub async fn load_fragment(&self, page: &mut Page, href: &str, mount_id: &str) -> MountOutcome {
        if page.document.element_by_id(mount_id).is_none() {
            return MountOutcome::Skipped;
        }

        let fetched = match page.resolve_url(href) {
            Ok(url) => self.fetcher.fetch(&url).await,
            Err(err) => Err(err),
        };
        match fetched {
            Ok(markup) => self.inject(page, mount_id, href, &markup),
            Err(err) => {
                report_failure(page, href, &err);
                MountOutcome::Failed
            }
        }
    }

    fn embedded(&self, component: Component) -> &str {
        let components = &self.config.components;
        match component {
            Component::Header => components.header.as_deref().unwrap_or(HEADER_TEMPLATE),
            Component::Footer => components.footer.as_deref().unwrap_or(FOOTER_TEMPLATE),
        }
    }

    fn inject(&self, page: &mut Page, mount_id: &str, source: &str, markup: &str) -> MountOutcome {
        let Some(mount) = page.document.element_by_id(mount_id) else {
            return MountOutcome::Skipped;
        };
        match page.document.set_inner_html(mount, markup) {
            Ok(()) => {
                page.console.info("loader", format!("mounted {source} into #{mount_id}"));
                MountOutcome::Mounted
            }
            Err(err) => {
                page.console
                    .error("loader", format!("error loading content from {source}: {err}"));
                MountOutcome::Failed
            }
        }
    }
}

fn report_failure(page: &mut Page, href: &str, err: &FetchError) {
    page.console
        .error("loader", format!("error loading content from {href}: {err}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::logger::Level;

    const SHELL: &str = r#"<html><body><div id="header-placeholder"></div><main id="content"></main><div id="footer-placeholder"></div></body></html>"#;

    fn page(location: &str, config: &FolioConfig) -> Page {
        Page::new(SHELL, Some(location), config).unwrap()
    }

    fn fetch_config() -> FolioConfig {
        FolioConfig::from_str("[components]\nmode = \"fetch\"\n").unwrap()
    }

    #[test]
    fn test_templates_are_parseable() {
        use crate::dom::Document;
        let header = Document::parse(HEADER_TEMPLATE).unwrap();
        assert_eq!(header.query("a.nav-link[data-page]").unwrap().len(), 4);
        assert!(Document::parse(FOOTER_TEMPLATE).is_ok());
    }

    #[tokio::test]
    async fn test_embedded_mode_mounts_both() {
        let config = FolioConfig::default();
        let fetcher = MemoryFetcher::new();
        let mut page = page("/", &config);

        let report = ComponentLoader::new(&config, &fetcher).load(&mut page).await;

        assert_eq!(report.header, MountOutcome::Mounted);
        assert_eq!(report.footer, MountOutcome::Mounted);
        assert!(fetcher.requests().is_empty());
        assert_eq!(page.document.query("footer").unwrap().len(), 1);
        assert_eq!(report.nav.links.len(), 5);
        let active = report.nav.active().unwrap();
        assert_eq!(page.document.attr(active.node, "data-page"), Some("/"));
    }

    #[tokio::test]
    async fn test_embedded_override_from_config() {
        let config = FolioConfig::from_str(
            "[components]\nfooter = \"<footer id='custom'>mine</footer>\"\n",
        )
        .unwrap();
        let fetcher = MemoryFetcher::new();
        let mut page = page("/", &config);

        ComponentLoader::new(&config, &fetcher).load(&mut page).await;
        assert!(page.document.element_by_id("custom").is_some());
    }

    #[tokio::test]
    async fn test_fetch_mode_uses_depth_relative_paths() {
        let config = fetch_config();
        let fetcher = MemoryFetcher::new()
            .with("components/header.html", HEADER_TEMPLATE)
            .with("components/footer.html", FOOTER_TEMPLATE);
        let mut page = page("/html/projects.html", &config);

        let report = ComponentLoader::new(&config, &fetcher).load(&mut page).await;

        assert_eq!(report.header, MountOutcome::Mounted);
        assert_eq!(report.footer, MountOutcome::Mounted);
        // "../components/header.html" from /html/ resolves to the site root
        assert_eq!(
            fetcher.requests(),
            ["components/header.html", "components/footer.html"]
        );
        let active = report.nav.active().unwrap();
        assert_eq!(active.rendered_href, "../html/projects.html");
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_mount_empty() {
        let config = fetch_config();
        let fetcher = MemoryFetcher::new()
            .with_status("components/header.html", 404)
            .with("components/footer.html", FOOTER_TEMPLATE);
        let mut page = page("/", &config);

        let report = ComponentLoader::new(&config, &fetcher).load(&mut page).await;

        assert_eq!(report.header, MountOutcome::Failed);
        assert_eq!(report.footer, MountOutcome::Mounted);
        let mount = page.document.element_by_id("header-placeholder").unwrap();
        assert!(!page.document.has_children(mount));

        let errors: Vec<_> = page.console.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].level, Level::Error);
        assert!(errors[0].message.contains("404"));
    }

    #[tokio::test]
    async fn test_missing_mounts_are_skipped() {
        let config = fetch_config();
        let fetcher = MemoryFetcher::new();
        let mut page = Page::new("<body><p>bare</p></body>", Some("/"), &config).unwrap();

        let report = ComponentLoader::new(&config, &fetcher).load(&mut page).await;

        assert_eq!(report.header, MountOutcome::Skipped);
        assert_eq!(report.footer, MountOutcome::Skipped);
        assert!(fetcher.requests().is_empty());
        assert!(!page.console.has_errors());
    }

    #[tokio::test]
    async fn test_load_fragment() {
        let config = FolioConfig::default();
        let fetcher = MemoryFetcher::new().with("html/projects.html", "<h1>Projects</h1>");
        let mut page = page("/", &config);
        let loader = ComponentLoader::new(&config, &fetcher);

        let outcome = loader.load_fragment(&mut page, "html/projects.html", "content").await;
        assert_eq!(outcome, MountOutcome::Mounted);
        let content = page.document.element_by_id("content").unwrap();
        assert_eq!(page.document.inner_html(content), "<h1>Projects</h1>");

        let outcome = loader.load_fragment(&mut page, "x.html", "nowhere").await;
        assert_eq!(outcome, MountOutcome::Skipped);
    }
}
