//! In-memory HTML document the page behaviors operate on.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Only elements are
//! modeled structurally; text, comments and doctypes are kept as raw markup
//! so a parse/serialize cycle reproduces them byte for byte.
//!
//! Subtrees replaced by [`Document::set_inner_html`] are released and their
//! slots reused by later insertions. Every slot carries a generation, so a
//! [`NodeId`] kept from before the release no longer resolves: accessors treat
//! it as a missing node.

mod parse;
mod selector;

pub use selector::Selector;

use quick_xml::escape::{escape, resolve_html5_entity, unescape_with};
use smallvec::SmallVec;
use thiserror::Error;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Error)]
pub enum DomError {
    #[error("HTML parse error at position {position}: {message}")]
    Parse { position: u64, message: String },

    #[error("invalid selector `{0}`")]
    Selector(String),
}

type Attrs = SmallVec<[(String, String); 4]>;

#[derive(Debug, Clone)]
struct Element {
    name: String,
    attrs: Attrs,
}

#[derive(Debug, Clone)]
enum NodeData {
    Root,
    Element(Element),
    Raw(String),
    /// Released slot waiting for reuse.
    Vacant,
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Root,
                generation: 0,
                parent: None,
                children: Vec::new(),
            }],
            free: Vec::new(),
        }
    }
}

impl Document {
    /// Parse a full page or a fragment.
    pub fn parse(markup: &str) -> Result<Self, DomError> {
        let mut doc = Self::default();
        let root = doc.root();
        parse::parse_into(&mut doc, root, markup)?;
        Ok(doc)
    }

    pub const fn root(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    /// The `<body>` element, or the root for fragments without one.
    pub fn body(&self) -> NodeId {
        self.elements()
            .into_iter()
            .find(|&id| self.tag(id) == Some("body"))
            .unwrap_or_else(|| self.root())
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Live node behind `id`; `None` once its slot was released.
    fn slot(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index)
            .filter(|node| node.generation == id.generation)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index)
            .filter(|node| node.generation == id.generation)
    }

    fn alloc(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = match self.free.pop() {
            Some(index) => {
                let node = &mut self.nodes[index];
                node.data = data;
                node.parent = parent;
                NodeId {
                    index,
                    generation: node.generation,
                }
            }
            None => {
                self.nodes.push(Node {
                    data,
                    generation: 0,
                    parent,
                    children: Vec::new(),
                });
                NodeId {
                    index: self.nodes.len() - 1,
                    generation: 0,
                }
            }
        };
        if let Some(parent) = parent {
            self.nodes[parent.index].children.push(id);
        }
        id
    }

    /// Release `node` and everything below it for reuse.
    fn release(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            let slot = &mut self.nodes[id.index];
            pending.append(&mut slot.children);
            slot.data = NodeData::Vacant;
            slot.parent = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
        }
    }

    fn push_element(&mut self, parent: NodeId, name: String, attrs: Attrs) -> NodeId {
        self.alloc(NodeData::Element(Element { name, attrs }), Some(parent))
    }

    /// Append raw markup, merging with a preceding raw sibling.
    fn push_raw(&mut self, parent: NodeId, raw: &str) {
        if raw.is_empty() {
            return;
        }
        if let Some(&last) = self.nodes[parent.index].children.last()
            && let NodeData::Raw(text) = &mut self.nodes[last.index].data
        {
            text.push_str(raw);
            return;
        }
        self.alloc(NodeData::Raw(raw.to_owned()), Some(parent));
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), (*v).to_owned()))
            .collect();
        self.alloc(
            NodeData::Element(Element {
                name: name.to_ascii_lowercase(),
                attrs,
            }),
            None,
        )
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.slot(parent).is_none() || self.slot(child).is_none() {
            return;
        }
        self.detach(child);
        self.nodes[child.index].parent = Some(parent);
        self.nodes[parent.index].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index].parent.take() {
            self.nodes[parent.index].children.retain(|&c| c != node);
        }
    }

    /// Replace all children of `node` with the parsed `markup`.
    ///
    /// On a parse error the node keeps its previous content. The old children
    /// are released; ids pointing into them stop resolving.
    pub fn set_inner_html(&mut self, node: NodeId, markup: &str) -> Result<(), DomError> {
        let mut staged = Self::default();
        let staged_root = staged.root();
        parse::parse_into(&mut staged, staged_root, markup)?;

        let Some(slot) = self.slot_mut(node) else {
            return Ok(());
        };
        for child in std::mem::take(&mut slot.children) {
            self.release(child);
        }
        self.graft(&staged, staged_root, node);
        Ok(())
    }

    /// Copy the children of `from` in `other` under `to` in `self`.
    fn graft(&mut self, other: &Self, from: NodeId, to: NodeId) {
        for &child in &other.nodes[from.index].children {
            let copy = self.alloc(other.nodes[child.index].data.clone(), Some(to));
            self.graft(other, child, copy);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All elements reachable from the root, in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
    }

    /// Elements below `node` in document order, `node` excluded.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(slot) = self.slot(node) else {
            return out;
        };
        let mut stack: Vec<NodeId> = slot.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if matches!(self.nodes[id.index].data, NodeData::Element(_)) {
                out.push(id);
            }
            stack.extend(self.nodes[id.index].children.iter().rev().copied());
        }
        out
    }

    /// First element carrying `id`, like `getElementById`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&node| self.attr(node, "id") == Some(id))
    }

    /// Elements matching a simple selector list such as `a[target="_blank"]`.
    pub fn query(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(&selector))
    }

    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// Elements below `scope` matching a predicate.
    pub fn find_within(&self, scope: NodeId, pred: impl Fn(&Self, NodeId) -> bool) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| pred(self, id))
            .collect()
    }

    /// Parent element of `node` (`None` at the root or for detached nodes).
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.slot(node)?.parent?;
        self.element(parent).map(|_| parent)
    }

    /// `node` itself or its nearest ancestor element satisfying `pred`.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Self, NodeId) -> bool) -> Option<NodeId> {
        let mut current = Some(node).filter(|&n| self.element(n).is_some());
        while let Some(id) = current {
            if pred(self, id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root() {
                return true;
            }
            match self.slot(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn has_children(&self, node: NodeId) -> bool {
        self.slot(node).is_some_and(|n| !n.children.is_empty())
    }

    // ========================================================================
    // Element Access
    // ========================================================================

    fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.slot(node)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.slot_mut(node)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Lowercase tag name.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.name.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.element_mut(node) else {
            return;
        };
        match el.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => value.clone_into(v),
            None => el.attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element_mut(node) {
            el.attrs.retain(|(k, _)| k != name);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.element(node).is_none() || self.has_class(node, class) {
            return;
        }
        let classes = match self.attr(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attr(node, "class", &classes);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let classes = self
            .attr(node, "class")
            .unwrap_or_default()
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if classes.is_empty() {
            self.remove_attr(node, "class");
        } else {
            self.set_attr(node, "class", &classes);
        }
    }

    /// Toggle `class`, returning whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Concatenated, unescaped text below `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut raw = String::new();
        self.collect_raw(node, &mut raw);
        unescape_with(&raw, resolve_html5_entity)
            .map(|s| s.into_owned())
            .unwrap_or(raw)
    }

    fn collect_raw(&self, node: NodeId, out: &mut String) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        for &child in &slot.children {
            match &self.nodes[child.index].data {
                NodeData::Raw(text) => out.push_str(text),
                _ => self.collect_raw(child, out),
            }
        }
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(slot) = self.slot(node) {
            for &child in &slot.children {
                self.write_node(child, &mut out);
            }
        }
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if self.slot(node).is_some() {
            self.write_node(node, &mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.index].data {
            NodeData::Root => {
                for &child in &self.nodes[node.index].children {
                    self.write_node(child, out);
                }
            }
            NodeData::Raw(text) => out.push_str(text),
            NodeData::Vacant => {}
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for (key, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape(value.as_str()));
                    out.push('"');
                }
                out.push('>');
                if is_void(&el.name) {
                    return;
                }
                for &child in &self.nodes[node.index].children {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
        }
    }
}

#[inline]
fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
