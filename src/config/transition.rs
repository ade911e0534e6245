//! `[transition]` section configuration.
//!
//! Settings of the in-page content transitioner.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[transition]` section in folio.toml.
///
/// # Example
/// ```toml
/// [transition]
/// container = "items"
/// delay_ms = 300
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    /// Id of the element whose content is swapped.
    #[serde(default = "defaults::transition::container")]
    #[educe(Default = defaults::transition::container())]
    pub container: String,

    /// Class applied while content fades out.
    #[serde(default = "defaults::transition::fade_class")]
    #[educe(Default = defaults::transition::fade_class())]
    pub fade_class: String,

    /// Delay between fetch completion and the content swap.
    #[serde(default = "defaults::transition::delay_ms")]
    #[educe(Default = defaults::transition::delay_ms())]
    pub delay_ms: u64,
}
