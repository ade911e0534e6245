//! Page behavior configuration from `folio.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[site]`       | Base path and origin of the hosted site         |
//! | `[components]` | Header/footer source (embedded or fetched)      |
//! | `[nav]`        | Link attribute, matching policy, route symbols  |
//! | `[transition]` | Content container and fade timing               |
//! | `[enhance.*]`  | Reveal, back-to-top, forms, links, menu         |
//! | `[log]`        | Console echo                                    |
//!
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! # Example
//!
//! ```toml
//! [components]
//! mode = "fetch"
//!
//! [nav]
//! matching = "route-key"
//!
//! [nav.routes]
//! projects = "/html/projects.html"
//!
//! [log]
//! echo = true
//! ```

mod components;
pub mod defaults;
mod enhance;
mod error;
mod nav;
mod site;
mod transition;

pub use components::{ComponentsConfig, LoadMode};
pub use enhance::{
    BackToTopConfig, EnhanceConfig, FormsConfig, LinksConfig, MenuConfig, RevealConfig,
};
pub use error::ConfigError;
pub use nav::{MatchPolicy, NavConfig};
pub use site::SiteConfig;
pub use transition::TransitionConfig;

use crate::dom::Selector;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

/// Upper bound for the fade delay; anything longer is almost surely a unit mistake.
const MAX_DELAY_MS: u64 = 10_000;

/// `[log]` section in folio.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Echo console entries to the terminal as they are recorded.
    #[serde(default)]
    pub echo: bool,
}

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Path of the file this config was loaded from (empty for defaults)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub components: ComponentsConfig,

    #[serde(default)]
    pub nav: NavConfig,

    #[serde(default)]
    pub transition: TransitionConfig,

    #[serde(default)]
    pub enhance: EnhanceConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl FolioConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Origin as a parsed URL.
    pub fn origin(&self) -> Result<Url> {
        Url::parse(&self.site.origin)
            .map_err(|e| ConfigError::invalid("site.origin", e.to_string()).into())
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let base = &self.site.base_path;
        if !base.is_empty() && !base.starts_with('/') {
            bail!(ConfigError::invalid(
                "site.base_path",
                "must be empty or start with `/`"
            ));
        }
        self.origin()?;

        for (field, value) in [
            ("components.header_mount", &self.components.header_mount),
            ("components.footer_mount", &self.components.footer_mount),
            ("transition.container", &self.transition.container),
            ("nav.attribute", &self.nav.attribute),
        ] {
            if value.trim().is_empty() {
                bail!(ConfigError::invalid(field, "must not be empty"));
            }
        }

        if self.transition.delay_ms > MAX_DELAY_MS {
            bail!(ConfigError::invalid(
                "transition.delay_ms",
                format!("must be at most {MAX_DELAY_MS}")
            ));
        }

        let reveal = &self.enhance.reveal;
        if !(0.0..=1.0).contains(&reveal.threshold) {
            bail!(ConfigError::invalid(
                "enhance.reveal.threshold",
                "must be within 0..=1"
            ));
        }
        if let Some(bad) = reveal.selectors.iter().find(|s| Selector::parse(s).is_err()) {
            bail!(ConfigError::invalid(
                "enhance.reveal.selectors",
                format!("unsupported selector `{bad}`")
            ));
        }

        Ok(())
    }
}
