//! `[nav]` section configuration.
//!
//! How navigation links are recognized, resolved and matched.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for deciding which nav link denotes the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Exact equality of canonical route keys.
    #[default]
    RouteKey,
    /// Substring containment of the normalized href in the current path.
    Containment,
}

/// `[nav]` section in folio.toml.
///
/// # Example
/// ```toml
/// [nav]
/// matching = "route-key"
/// home_symbols = ["home", "top"]
///
/// [nav.routes]
/// projects = "/html/projects.html"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct NavConfig {
    /// Attribute holding a link's logical target.
    #[serde(default = "defaults::nav::attribute")]
    #[educe(Default = defaults::nav::attribute())]
    pub attribute: String,

    /// Class that narrows which targeted links take part in highlighting.
    /// Empty means every targeted link does.
    #[serde(default = "defaults::nav::link_class")]
    #[educe(Default = defaults::nav::link_class())]
    pub link_class: String,

    /// Class carried by the active link.
    #[serde(default = "defaults::nav::active_class")]
    #[educe(Default = defaults::nav::active_class())]
    pub active_class: String,

    #[serde(default)]
    pub matching: MatchPolicy,

    /// Symbolic targets that mean the site root besides `/` and `index.html`.
    #[serde(default = "defaults::nav::home_symbols")]
    #[educe(Default = defaults::nav::home_symbols())]
    pub home_symbols: Vec<String>,

    /// Symbolic target -> root-relative path.
    #[serde(default)]
    pub routes: HashMap<String, String>,
}
