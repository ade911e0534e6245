//! Collapsible mobile menu.
//!
//! A toggler carries `data-toggle="collapse"` and `data-target="#menu-id"`;
//! clicking it (or anything inside it) flips the open class on the target and
//! mirrors the state into the toggler's `aria-expanded`.

use crate::config::MenuConfig;
use crate::dom::{Document, NodeId};

/// A menu changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuToggled {
    pub toggler: NodeId,
    pub menu: NodeId,
    pub open: bool,
}

/// Handle a click on `node`.
///
/// Returns `None` when the click is not inside a toggler or the toggler's
/// target does not exist.
pub fn on_click(doc: &mut Document, config: &MenuConfig, node: NodeId) -> Option<MenuToggled> {
    let toggler = doc.closest(node, |d, n| d.attr(n, "data-toggle") == Some("collapse"))?;
    let target = doc.attr(toggler, "data-target")?.trim();
    let menu = doc.element_by_id(target.strip_prefix('#')?)?;

    let open = doc.toggle_class(menu, &config.open_class);
    doc.set_attr(toggler, "aria-expanded", if open { "true" } else { "false" });
    Some(MenuToggled {
        toggler,
        menu,
        open,
    })
}
