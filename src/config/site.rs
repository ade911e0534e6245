//! `[site]` section configuration.
//!
//! Where the site lives: the base path it is served under and the origin used
//! to turn page locations into absolute URLs for fetching.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in folio.toml.
///
/// # Example
/// ```toml
/// [site]
/// base_path = "/portfolio"   # project pages hosted under a sub-path
/// origin = "https://example.github.io/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path prefix stripped from locations before depth is computed.
    /// Empty when the site is served from the host root.
    #[serde(default = "defaults::site::base_path")]
    #[educe(Default = defaults::site::base_path())]
    pub base_path: String,

    /// Origin that page locations are joined onto.
    #[serde(default = "defaults::site::origin")]
    #[educe(Default = defaults::site::origin())]
    pub origin: String,
}
