//! Floating "back to top" button.

use crate::config::BackToTopConfig;
use crate::dom::{Document, NodeId};

/// Request to scroll the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTo {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug)]
pub struct BackToTop {
    button: NodeId,
    visible: bool,
}

impl BackToTop {
    /// Append the button to `<body>`, initially hidden.
    pub fn attach(doc: &mut Document, config: &BackToTopConfig) -> Self {
        let button = doc.create_element(
            "button",
            &[
                ("type", "button"),
                ("class", config.class.as_str()),
                ("aria-label", config.label.as_str()),
            ],
        );
        let icon = doc.create_element("i", &[("class", "fas fa-arrow-up")]);
        doc.append_child(button, icon);

        let body = doc.body();
        doc.append_child(body, button);
        Self {
            button,
            visible: false,
        }
    }

    pub const fn button(&self) -> NodeId {
        self.button
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the button past the threshold, hide it otherwise.
    pub fn on_scroll(&mut self, doc: &mut Document, config: &BackToTopConfig, offset: f64) -> bool {
        let visible = offset > config.threshold;
        if visible != self.visible {
            if visible {
                doc.add_class(self.button, &config.visible_class);
            } else {
                doc.remove_class(self.button, &config.visible_class);
            }
            self.visible = visible;
        }
        visible
    }

    /// Scroll request when the click landed on the button or its icon.
    pub fn on_click(&self, doc: &Document, config: &BackToTopConfig, node: NodeId) -> Option<ScrollTo> {
        doc.closest(node, |_, n| n == self.button)?;
        Some(ScrollTo {
            top: 0.0,
            smooth: config.smooth,
        })
    }
}
