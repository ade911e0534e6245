//! `[enhance]` section configuration.
//!
//! One subsection per page enhancement; each can be switched off.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[enhance]` section in folio.toml.
///
/// # Example
/// ```toml
/// [enhance.reveal]
/// selectors = [".card"]
/// threshold = 0.25
///
/// [enhance.back_to_top]
/// enable = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnhanceConfig {
    #[serde(default)]
    pub reveal: RevealConfig,

    #[serde(default)]
    pub back_to_top: BackToTopConfig,

    #[serde(default)]
    pub forms: FormsConfig,

    #[serde(default)]
    pub links: LinksConfig,

    #[serde(default)]
    pub menu: MenuConfig,
}

/// `[enhance.reveal]` - scroll-triggered reveal.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RevealConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Selectors of the elements to reveal.
    #[serde(default = "defaults::enhance::reveal::selectors")]
    #[educe(Default = defaults::enhance::reveal::selectors())]
    pub selectors: Vec<String>,

    /// Visible fraction (0..=1) that triggers the reveal.
    #[serde(default = "defaults::enhance::reveal::threshold")]
    #[educe(Default = defaults::enhance::reveal::threshold())]
    pub threshold: f64,

    /// Pixels trimmed off the bottom of the viewport before measuring.
    #[serde(default = "defaults::enhance::reveal::bottom_margin")]
    #[educe(Default = defaults::enhance::reveal::bottom_margin())]
    pub bottom_margin: f64,

    #[serde(default = "defaults::enhance::reveal::pending_class")]
    #[educe(Default = defaults::enhance::reveal::pending_class())]
    pub pending_class: String,

    #[serde(default = "defaults::enhance::reveal::revealed_class")]
    #[educe(Default = defaults::enhance::reveal::revealed_class())]
    pub revealed_class: String,
}

/// `[enhance.back_to_top]` - floating scroll-to-top button.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BackToTopConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Scroll offset (px) past which the button shows.
    #[serde(default = "defaults::enhance::back_to_top::threshold")]
    #[educe(Default = defaults::enhance::back_to_top::threshold())]
    pub threshold: f64,

    #[serde(default = "defaults::enhance::back_to_top::class")]
    #[educe(Default = defaults::enhance::back_to_top::class())]
    pub class: String,

    #[serde(default = "defaults::enhance::back_to_top::visible_class")]
    #[educe(Default = defaults::enhance::back_to_top::visible_class())]
    pub visible_class: String,

    #[serde(default = "defaults::enhance::back_to_top::label")]
    #[educe(Default = defaults::enhance::back_to_top::label())]
    pub label: String,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub smooth: bool,
}

/// `[enhance.forms]` - submit gating on validity.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FormsConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    #[serde(default = "defaults::enhance::forms::validated_class")]
    #[educe(Default = defaults::enhance::forms::validated_class())]
    pub validated_class: String,
}

/// `[enhance.links]` - `rel` hardening of links opening a new tab.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LinksConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    #[serde(default = "defaults::enhance::links::rel")]
    #[educe(Default = defaults::enhance::links::rel())]
    pub rel: String,
}

/// `[enhance.menu]` - collapsible mobile menu.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MenuConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    #[serde(default = "defaults::enhance::menu::open_class")]
    #[educe(Default = defaults::enhance::menu::open_class())]
    pub open_class: String,
}
