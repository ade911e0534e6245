//! A loaded page: its document, where it lives, and its diagnostics.

use crate::config::FolioConfig;
use crate::dom::Document;
use crate::fetch::FetchError;
use crate::logger::Console;
use crate::nav::PageLocation;
use anyhow::{Context, Result};
use url::Url;

#[derive(Debug)]
pub struct Page {
    pub document: Document,
    pub location: PageLocation,
    /// Absolute URL of the document, used to resolve relative fetches.
    pub url: Url,
    pub console: Console,
}

impl Page {
    /// Parse `markup` as the page found at `location` (a path such as
    /// `/html/projects.html`; `None` when unknown).
    pub fn new(markup: &str, location: Option<&str>, config: &FolioConfig) -> Result<Self> {
        let document = Document::parse(markup).context("failed to parse page markup")?;
        let location_str = location.unwrap_or_default();
        let origin = config.origin()?;
        let url = origin
            .join(location_str)
            .with_context(|| format!("invalid page location `{location_str}`"))?;

        Ok(Self {
            document,
            location: PageLocation::new(location, &config.site.base_path),
            url,
            console: Console::new(config.log.echo),
        })
    }

    /// Resolve `href` against the page URL.
    pub fn resolve_url(&self, href: &str) -> Result<Url, FetchError> {
        self.url.join(href).map_err(|e| FetchError::InvalidUrl {
            url: href.to_owned(),
            message: e.to_string(),
        })
    }
}
