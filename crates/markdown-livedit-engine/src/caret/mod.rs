/*!
 * # Caret Offsets
 *
 * Replacing an element's content throws away every node a selection could
 * point at, so the caret is carried across the replacement as a plain number:
 * the count of visible characters between the start of the container and the
 * caret.
 *
 * - [`capture_offset`] turns the current selection into that number
 * - [`locate`] finds the text position for a number in a (new) tree
 * - [`restore_offset`] applies [`locate`] to the selection, falling back to an
 *   [`OverflowPolicy`] when the new content is shorter than the offset
 *
 * Only text leaves carry length. Elements contribute nothing but are walked
 * through, so `<p>ab</p>` and `a<b>b</b>` give identical offsets for the same
 * visible position.
 */

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, NodeId};
use crate::selection::{BoundaryPoint, FocusService, Range, SelectionService};

/// What to do when a restored offset lies past the end of the new content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Caret at the end of the last text leaf.
    #[default]
    ClampToEnd,
    /// Caret at the very start of the container.
    ContainerStart,
    /// No caret: the selection is left empty.
    Unset,
}

/// Outcome of walking a tree for an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretSearch {
    Found(BoundaryPoint),
    /// The content ran out with `remaining` characters still to go.
    NotFound { remaining: usize },
}

/// Where the caret ended up after a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretPlacement {
    /// `clamped` is set when the [`OverflowPolicy`] chose the point.
    Placed { point: BoundaryPoint, clamped: bool },
    /// The selection was emptied.
    Cleared,
}

impl CaretPlacement {
    pub fn point(&self) -> Option<BoundaryPoint> {
        match self {
            CaretPlacement::Placed { point, .. } => Some(*point),
            CaretPlacement::Cleared => None,
        }
    }
}

/// Visible-character offset of the caret within `container`.
///
/// Returns 0 when the selection holds no range, or when its first range
/// points at a node that is no longer in the document. Only the first range is
/// considered. A caret outside the container clamps to its start or end.
pub fn capture_offset<S>(dom: &Dom, container: NodeId, selection: &S) -> usize
where
    S: SelectionService + ?Sized,
{
    let Some(first) = selection.range_at(0) else {
        log::debug!("no selection range, caret offset defaults to 0");
        return 0;
    };
    if !dom.is_connected(first.start.node) {
        log::debug!("selection points at a detached node, caret offset defaults to 0");
        return 0;
    }

    let mut preceding = first;
    preceding.select_node_contents(dom, container);
    preceding.set_end(dom, first.start);

    let offset = preceding
        .to_text(dom)
        .chars()
        .count()
        .min(dom.text_len(container));
    log::debug!("captured caret offset {offset}");
    offset
}

/// Find the text position `offset` visible characters into `container`.
///
/// Pre-order walk over text leaves with a running remainder: the first leaf
/// whose length is at least the remainder wins, so an offset sitting exactly
/// between two leaves resolves to the end of the earlier one. A container
/// without text leaves resolves offset 0 to its own start.
pub fn locate(dom: &Dom, container: NodeId, offset: usize) -> CaretSearch {
    let mut remaining = offset;
    let mut stack: Vec<NodeId> = dom.children(container).iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        if let Some(text) = dom.node(node).text() {
            let len = text.chars().count();
            if remaining <= len {
                return CaretSearch::Found(BoundaryPoint::new(node, remaining));
            }
            remaining -= len;
            continue;
        }
        stack.extend(dom.children(node).iter().rev().copied());
    }

    // A text leaf would have matched a remainder of 0, so this means the
    // container holds no text at all.
    if remaining == 0 {
        return CaretSearch::Found(BoundaryPoint::new(container, 0));
    }
    CaretSearch::NotFound { remaining }
}

/// The position just after the last visible character of `container`.
pub fn end_point(dom: &Dom, container: NodeId) -> BoundaryPoint {
    dom.descendants(container)
        .filter(|&n| dom.node(n).is_text())
        .last()
        .map(|leaf| BoundaryPoint::new(leaf, dom.node(leaf).length()))
        .unwrap_or_else(|| BoundaryPoint::new(container, dom.child_count(container)))
}

/// Put the caret `offset` characters into `container` and focus it.
///
/// The selection is reset to exactly one collapsed range (or none, under
/// [`OverflowPolicy::Unset`]).
pub fn restore_offset<S, F>(
    dom: &Dom,
    container: NodeId,
    offset: usize,
    selection: &mut S,
    focus: &mut F,
    overflow: OverflowPolicy,
) -> CaretPlacement
where
    S: SelectionService + ?Sized,
    F: FocusService + ?Sized,
{
    let placement = match locate(dom, container, offset) {
        CaretSearch::Found(point) => CaretPlacement::Placed {
            point,
            clamped: false,
        },
        CaretSearch::NotFound { remaining } => {
            log::warn!(
                "caret offset {offset} overflows content by {remaining}, applying {overflow:?}"
            );
            match overflow {
                OverflowPolicy::ClampToEnd => CaretPlacement::Placed {
                    point: end_point(dom, container),
                    clamped: true,
                },
                OverflowPolicy::ContainerStart => CaretPlacement::Placed {
                    point: BoundaryPoint::new(container, 0),
                    clamped: true,
                },
                OverflowPolicy::Unset => CaretPlacement::Cleared,
            }
        }
    };

    match placement {
        CaretPlacement::Placed { point, .. } => {
            selection.set_single_range(Range::collapsed_at(point))
        }
        CaretPlacement::Cleared => selection.remove_all_ranges(),
    }
    focus.focus(container);
    placement
}
