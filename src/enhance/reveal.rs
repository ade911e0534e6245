//! Scroll-triggered reveal.
//!
//! Matching elements start pending and are revealed once an intersection
//! report shows enough of them inside the viewport. The viewport is shrunk by
//! the configured bottom margin before measuring, so elements reveal slightly
//! after they scroll into view. A revealed element is never observed again.

use crate::config::RevealConfig;
use crate::dom::{Document, NodeId, Selector};
use crate::page::Page;

/// Vertical bounds of an element relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Fraction of `bounds` inside `[0, viewport_height - bottom_margin]`.
///
/// A zero-height element counts as fully visible when its top edge lies
/// inside the shrunk viewport. Non-finite input measures as not visible.
pub fn visible_ratio(bounds: Rect, viewport_height: f64, bottom_margin: f64) -> f64 {
    if ![bounds.top, bounds.height, viewport_height, bottom_margin]
        .iter()
        .all(|v| v.is_finite())
    {
        return 0.0;
    }
    let root_bottom = (viewport_height - bottom_margin).max(0.0);
    if bounds.height <= 0.0 {
        return if (0.0..=root_bottom).contains(&bounds.top) { 1.0 } else { 0.0 };
    }
    let overlap = bounds.bottom().min(root_bottom) - bounds.top.max(0.0);
    (overlap.max(0.0) / bounds.height).clamp(0.0, 1.0)
}

#[derive(Debug, Default)]
pub struct ScrollReveal {
    observed: Vec<NodeId>,
}

impl ScrollReveal {
    /// Mark every matching element pending and start observing it.
    pub fn attach(page: &mut Page, config: &RevealConfig) -> Self {
        let mut selectors = Vec::with_capacity(config.selectors.len());
        for source in &config.selectors {
            match Selector::parse(source) {
                Ok(selector) => selectors.push(selector),
                Err(err) => page.console.error("reveal", err.to_string()),
            }
        }

        let doc = &page.document;
        let observed: Vec<NodeId> = doc
            .elements()
            .into_iter()
            .filter(|&node| selectors.iter().any(|s| s.matches(doc, node)))
            .collect();

        for &node in &observed {
            page.document.add_class(node, &config.pending_class);
        }
        Self { observed }
    }

    /// Elements still waiting to be revealed.
    pub fn observed(&self) -> &[NodeId] {
        &self.observed
    }

    /// Handle an intersection report; returns whether `node` was revealed.
    pub fn on_intersection(
        &mut self,
        doc: &mut Document,
        config: &RevealConfig,
        node: NodeId,
        bounds: Rect,
        viewport_height: f64,
    ) -> bool {
        let Some(index) = self.observed.iter().position(|&n| n == node) else {
            return false;
        };
        let ratio = visible_ratio(bounds, viewport_height, config.bottom_margin);
        if ratio <= 0.0 || ratio < config.threshold {
            return false;
        }

        doc.remove_class(node, &config.pending_class);
        doc.add_class(node, &config.revealed_class);
        self.observed.remove(index);
        true
    }
}
