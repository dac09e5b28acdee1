//! # Document Tree
//!
//! A small arena-backed DOM: the editable surface the caret logic operates on.
//!
//! Nodes are addressed by [`NodeId`] handles into the [`Dom`] arena.
//!
//! - [`Dom::detach`] only unlinks a node: the caller still owns the subtree
//!   and can re-attach it.
//! - [`Dom::remove_children`] (and so [`Dom::set_inner_html`]) frees the
//!   removed subtrees. Their slots are reused by later allocations, and each
//!   slot carries a generation so a handle to a freed node never aliases the
//!   node that replaced it: it reports [`Dom::contains`] and
//!   [`Dom::is_connected`] as `false`.
//!
//! Text offsets and lengths are counted in `char`s throughout.

mod descendants;

pub use descendants::Descendants;

use crate::html;

/// Handle to a node inside a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Position of the node's slot in its arena.
    pub fn index(self) -> usize {
        self.index
    }
}

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The tree root. There is exactly one per [`Dom`].
    Document,
    /// A structural node: contributes no visible text of its own.
    Element {
        tag: String,
        attrs: Vec<Attribute>,
    },
    /// A text-bearing leaf.
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Text content when this node is a text leaf.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Tag name when this node is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// DOM "length" of the node: characters for text, children otherwise.
    pub fn length(&self) -> usize {
        match &self.kind {
            NodeKind::Text(text) => text.chars().count(),
            _ => self.children.len(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct Dom {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create an empty document holding only its root.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new(NodeKind::Document)),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a live node.
    ///
    /// # Panics
    /// If `id` was not handed out by this `Dom` or its node has been freed.
    /// Use [`Dom::get`] for handles that may be stale.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{id:?} is not a live node of this document"),
        }
    }

    /// Borrow a node if `id` still refers to a live one.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Whether `id` refers to a live (not freed) node, attached or not.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
        {
            Some(node) => node,
            None => panic!("{id:?} is not a live node of this document"),
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let node = Some(Node::new(kind));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = node;
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node,
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Release `node` and everything below it. Outstanding handles to any of
    /// them go stale.
    fn free_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if id == self.root {
                continue;
            }
            let Some(slot) = self
                .slots
                .get_mut(id.index)
                .filter(|slot| slot.generation == id.generation)
            else {
                continue;
            };
            if let Some(freed) = slot.node.take() {
                stack.extend(freed.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
            }
        }
    }

    /// Number of live nodes, the root included.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots the arena has allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.create_element_with_attrs(tag, Vec::new())
    }

    pub fn create_element_with_attrs(
        &mut self,
        tag: impl Into<String>,
        attrs: Vec<Attribute>,
    ) -> NodeId {
        self.alloc(NodeKind::Element {
            tag: tag.into(),
            attrs,
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// Ignored (with a warning) when `parent` is a text leaf, or when `child`
    /// is `parent` itself or one of its ancestors, which would form a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_text() {
            log::warn!("append_child: text node {parent:?} cannot take child {child:?}");
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            log::warn!("append_child: {child:?} contains {parent:?}, refusing to form a cycle");
            return;
        }
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Remove `node` from its parent's child list. The node stays live.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    /// Remove and free every child of `node` together with their subtrees.
    pub fn remove_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
            self.free_subtree(child);
        }
    }

    /// Append more text to an existing text leaf.
    pub(crate) fn push_text(&mut self, node: NodeId, more: &str) {
        if let NodeKind::Text(text) = &mut self.node_mut(node).kind {
            text.push_str(more);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.node(node).children.len()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.first().copied()
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.last().copied()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Index of `node` among its parent's children.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Pre-order walk of everything below `node` (not including `node`).
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants::new(self, node)
    }

    /// Whether `node` is live and reachable from the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Find the connected element whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&n| self.node(n).attr("id") == Some(id))
    }

    /// Visible text of `node`: every descendant text leaf, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.node(node).text() {
            return text.to_string();
        }
        self.descendants(node)
            .filter_map(|n| self.node(n).text())
            .collect()
    }

    /// Length of [`Dom::text_content`] in characters.
    pub fn text_len(&self, node: NodeId) -> usize {
        if let Some(text) = self.node(node).text() {
            return text.chars().count();
        }
        self.descendants(node)
            .filter_map(|n| self.node(n).text())
            .map(|t| t.chars().count())
            .sum()
    }

    /// Replace every child of `node` with the parsed form of `markup`.
    ///
    /// The previous children are freed, so positions that referenced them
    /// no longer resolve inside the document.
    pub fn set_inner_html(&mut self, node: NodeId, markup: &str) {
        self.remove_children(node);
        html::parse_into(self, node, markup);
    }

    /// Serialized markup of the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        html::serialize_children(self, node)
    }

    /// Path of child indices from the tree root of `node` down to `node`.
    pub(crate) fn path_from_root(&self, node: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = node;
        while let (Some(parent), Some(index)) = (self.parent(current), self.index_in_parent(current))
        {
            path.push(index);
            current = parent;
        }
        path.reverse();
        path
    }
}
