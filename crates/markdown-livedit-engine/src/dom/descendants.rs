use super::{Dom, NodeId};

/// Iterative pre-order walk below a node.
///
/// Children are visited before the next sibling of their parent, which is the
/// order visible text appears in.
pub struct Descendants<'a> {
    dom: &'a Dom,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(super) fn new(dom: &'a Dom, start: NodeId) -> Self {
        let stack = dom.children(start).iter().rev().copied().collect();
        Self { dom, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.dom.children(node).iter().rev().copied());
        Some(node)
    }
}
