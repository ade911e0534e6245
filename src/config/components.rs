//! `[components]` section configuration.
//!
//! Controls how the shared header and footer reach the page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// Where component markup comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Markup compiled into the loader (or overridden inline in config).
    #[default]
    Embedded,
    /// Markup fetched from `header_path` / `footer_path`.
    Fetch,
}

/// `[components]` section in folio.toml.
///
/// # Example
/// ```toml
/// [components]
/// mode = "fetch"
/// header_path = "components/header.html"
/// footer_mount = "site-footer"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ComponentsConfig {
    #[serde(default)]
    pub mode: LoadMode,

    /// Id of the element the header is mounted into.
    #[serde(default = "defaults::components::header_mount")]
    #[educe(Default = defaults::components::header_mount())]
    pub header_mount: String,

    /// Id of the element the footer is mounted into.
    #[serde(default = "defaults::components::footer_mount")]
    #[educe(Default = defaults::components::footer_mount())]
    pub footer_mount: String,

    /// Site-root-relative resource of the header in fetch mode.
    #[serde(default = "defaults::components::header_path")]
    #[educe(Default = defaults::components::header_path())]
    pub header_path: String,

    /// Site-root-relative resource of the footer in fetch mode.
    #[serde(default = "defaults::components::footer_path")]
    #[educe(Default = defaults::components::footer_path())]
    pub footer_path: String,

    /// Inline header markup replacing the built-in one in embedded mode.
    #[serde(default)]
    pub header: Option<String>,

    /// Inline footer markup replacing the built-in one in embedded mode.
    #[serde(default)]
    pub footer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::FolioConfig;
    use super::LoadMode;

    #[test]
    fn test_components_defaults() {
        let config: FolioConfig = toml::from_str("").unwrap();
        assert_eq!(config.components.mode, LoadMode::Embedded);
        assert_eq!(config.components.header_mount, "header-placeholder");
        assert_eq!(config.components.footer_mount, "footer-placeholder");
        assert_eq!(config.components.header_path, "components/header.html");
        assert_eq!(config.components.footer_path, "components/footer.html");
        assert!(config.components.header.is_none());
    }

    #[test]
    fn test_components_fetch_mode() {
        let config = r#"
            [components]
            mode = "fetch"
            footer = "<footer>custom</footer>"
        "#;
        let config: FolioConfig = toml::from_str(config).unwrap();
        assert_eq!(config.components.mode, LoadMode::Fetch);
        assert_eq!(config.components.footer.as_deref(), Some("<footer>custom</footer>"));
    }

    #[test]
    fn test_components_invalid_mode() {
        let config = r#"
            [components]
            mode = "ajax"
        "#;
        assert!(toml::from_str::<FolioConfig>(config).is_err());
    }
}
