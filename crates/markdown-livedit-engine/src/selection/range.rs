use std::cmp::Ordering;

use crate::dom::{Dom, NodeId};

/// A position between two characters or two children.
///
/// Inside a text leaf `offset` counts characters; inside any other node it
/// counts children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Sort key of a boundary point: the child-index path to its node with the
/// offset appended. Lexicographic order of keys is document order, with a
/// point in a parent before child `i` sorting ahead of anything inside child
/// `i`.
fn point_key(dom: &Dom, point: BoundaryPoint) -> Vec<usize> {
    let mut key = dom.path_from_root(point.node);
    key.push(point.offset);
    key
}

/// Compare two boundary points in document order.
pub fn compare_points(dom: &Dom, a: BoundaryPoint, b: BoundaryPoint) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    point_key(dom, a).cmp(&point_key(dom, b))
}

/// A span of content between two boundary points, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl Range {
    /// A caret: both boundaries at `point`.
    pub fn collapsed_at(point: BoundaryPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn collapse_to_start(&mut self) {
        self.end = self.start;
    }

    /// Span the whole content of `node`.
    pub fn select_node_contents(&mut self, dom: &Dom, node: NodeId) {
        self.start = BoundaryPoint::new(node, 0);
        self.end = BoundaryPoint::new(node, dom.node(node).length());
    }

    /// Move the start. A start past the current end collapses onto it.
    pub fn set_start(&mut self, dom: &Dom, point: BoundaryPoint) {
        if compare_points(dom, point, self.end) == Ordering::Greater {
            self.end = point;
        }
        self.start = point;
    }

    /// Move the end. An end before the current start collapses onto it.
    pub fn set_end(&mut self, dom: &Dom, point: BoundaryPoint) {
        if compare_points(dom, point, self.start) == Ordering::Less {
            self.start = point;
        }
        self.end = point;
    }

    /// Visible text enclosed by the range.
    ///
    /// Only text leaves contribute, so the result ignores markup structure
    /// entirely; its length is a character count between the boundaries.
    ///
    /// One pre-order walk with child-index paths built along the way.
    /// Subtrees wholly before the start are skipped without descending, and
    /// the walk stops at the first node past the end.
    pub fn to_text(&self, dom: &Dom) -> String {
        if self.is_collapsed() {
            return String::new();
        }

        let start_key = point_key(dom, self.start);
        let end_key = point_key(dom, self.end);

        let mut top = self.start.node;
        while let Some(parent) = dom.parent(top) {
            top = parent;
        }

        let mut out = String::new();
        let mut stack = vec![(top, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            // Pre-order visits paths in ascending order, so nothing later can
            // fall inside the range either.
            if path.as_slice() >= end_key.as_slice() {
                break;
            }
            if let Some(text) = dom.node(node).text() {
                let len = text.chars().count();
                let lo = offset_within(&path, len, &start_key);
                let hi = offset_within(&path, len, &end_key);
                if lo < hi {
                    out.extend(text.chars().skip(lo).take(hi - lo));
                }
                continue;
            }
            if entirely_before(&path, &start_key) {
                continue;
            }
            for (index, &child) in dom.children(node).iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(index);
                stack.push((child, child_path));
            }
        }
        out
    }
}

/// Whether every position inside the subtree at `path` sorts before `key`.
fn entirely_before(path: &[usize], key: &[usize]) -> bool {
    !key.starts_with(path) && path < key
}

/// Where the point with `key` falls relative to the characters of the text
/// leaf at `path`: `0` if at or before its start, `len` if at or after its
/// end, the clamped character offset if it lies inside the leaf.
fn offset_within(path: &[usize], len: usize, key: &[usize]) -> usize {
    if key.len() == path.len() + 1 && key.starts_with(path) {
        return key[path.len()].min(len);
    }
    let mut first = path.to_vec();
    first.push(0);
    if key <= first.as_slice() { 0 } else { len }
}
