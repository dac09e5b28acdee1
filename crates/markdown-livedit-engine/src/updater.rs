//! Caret-preserving content replacement.

use crate::caret::{self, CaretPlacement, OverflowPolicy};
use crate::dom::Dom;
use crate::selection::{DocumentSelection, FocusService, FocusTracker, SelectionService};

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("No element with id {0:?} in the document")]
    NotFound(String),
}

/// What an [`ContentUpdater::update`] call did with the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateReport {
    /// Caret offset captured before the content was replaced.
    pub offset: usize,
    pub placement: CaretPlacement,
}

/// Replaces the content of an element while keeping the caret where the user
/// left it.
///
/// The selection and focus services are injected rather than global, so the
/// same updater drives a real editing surface or an in-memory one.
///
/// ```rust
/// use markdown_livedit_engine::{Attribute, ContentUpdater, Dom};
///
/// let mut dom = Dom::new();
/// let editor = dom.create_element_with_attrs("article", vec![Attribute::new("id", "ed")]);
/// dom.append_child(dom.root(), editor);
///
/// let mut updater: ContentUpdater = ContentUpdater::default();
/// let report = updater.update(&mut dom, "ed", "<p>hello</p>").unwrap();
/// assert_eq!(report.offset, 0);
/// assert_eq!(dom.text_content(editor), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentUpdater<S = DocumentSelection, F = FocusTracker> {
    selection: S,
    focus: F,
    overflow: OverflowPolicy,
}

impl<S: SelectionService, F: FocusService> ContentUpdater<S, F> {
    pub fn new(selection: S, focus: F) -> Self {
        Self {
            selection,
            focus,
            overflow: OverflowPolicy::default(),
        }
    }

    pub fn with_overflow_policy(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut S {
        &mut self.selection
    }

    pub fn focus(&self) -> &F {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut F {
        &mut self.focus
    }

    pub fn into_parts(self) -> (S, F) {
        (self.selection, self.focus)
    }

    /// Replace the content of the element with id `container_id` by the
    /// parsed form of `new_content`, then restore the caret to the same
    /// visible-character offset.
    ///
    /// Fails with [`UpdateError::NotFound`] before touching anything when the
    /// id does not resolve.
    pub fn update(
        &mut self,
        dom: &mut Dom,
        container_id: &str,
        new_content: &str,
    ) -> Result<UpdateReport, UpdateError> {
        let Some(container) = dom.get_element_by_id(container_id) else {
            log::warn!("update target {container_id:?} not found");
            return Err(UpdateError::NotFound(container_id.to_string()));
        };

        let offset = caret::capture_offset(dom, container, &self.selection);
        dom.set_inner_html(container, new_content);
        let placement = caret::restore_offset(
            dom,
            container,
            offset,
            &mut self.selection,
            &mut self.focus,
            self.overflow,
        );

        log::debug!("updated {container_id:?}: offset {offset} -> {placement:?}");
        Ok(UpdateReport { offset, placement })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attribute, NodeId};
    use crate::selection::{BoundaryPoint, Range};
    use pretty_assertions::assert_eq;

    fn editor(markup: &str) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let host = dom.create_element_with_attrs("article", vec![Attribute::new("id", "ed")]);
        dom.append_child(dom.root(), host);
        dom.set_inner_html(host, markup);
        (dom, host)
    }

    fn caret_at(dom: &Dom, host: NodeId, offset: usize) -> ContentUpdater {
        let mut updater: ContentUpdater = ContentUpdater::default();
        caret::restore_offset(
            dom,
            host,
            offset,
            updater.selection_mut(),
            &mut FocusTracker::new(),
            OverflowPolicy::ClampToEnd,
        );
        updater
    }

    #[test]
    fn missing_container_is_an_error_and_leaves_dom_alone() {
        let (mut dom, host) = editor("<p>keep</p>");
        let mut updater: ContentUpdater = ContentUpdater::default();

        let err = updater.update(&mut dom, "nope", "<p>x</p>").unwrap_err();

        assert!(matches!(err, UpdateError::NotFound(ref id) if id == "nope"));
        assert_eq!(dom.inner_html(host), "<p>keep</p>");
        assert_eq!(updater.focus().focused(), None);
    }

    #[test]
    fn caret_survives_restructuring() {
        let (mut dom, host) = editor("*ab*");
        let mut updater = caret_at(&dom, host, 2);

        let report = updater
            .update(&mut dom, "ed", "<p><em>*ab*</em></p>")
            .unwrap();

        assert_eq!(report.offset, 2);
        let point = report.placement.point().unwrap();
        assert_eq!(dom.node(point.node).text(), Some("*ab*"));
        assert_eq!(point.offset, 2);
        assert_eq!(
            updater.selection().ranges(),
            &[Range::collapsed_at(point)]
        );
        assert_eq!(updater.focus().focused(), Some(host));
    }

    #[test]
    fn overflow_policy_is_applied() {
        let (mut dom, host) = editor("hello world");
        let mut updater = caret_at(&dom, host, 11).with_overflow_policy(OverflowPolicy::Unset);

        let report = updater.update(&mut dom, "ed", "hi").unwrap();

        assert_eq!(report.offset, 11);
        assert_eq!(report.placement, CaretPlacement::Cleared);
        assert_eq!(updater.selection().range_count(), 0);
    }

    #[test]
    fn repeated_updates_do_not_grow_the_arena() {
        let markup: String = (0..100).map(|i| format!("<p>line <em>{i}</em></p>")).collect();
        let (mut dom, host) = editor(&markup);
        let mut updater = caret_at(&dom, host, 40);
        updater.update(&mut dom, "ed", &markup).unwrap();
        let capacity = dom.capacity();
        let live = dom.live_count();

        for _ in 0..1000 {
            let report = updater.update(&mut dom, "ed", &markup).unwrap();
            assert_eq!(report.offset, 40);
        }

        assert_eq!(dom.capacity(), capacity);
        assert_eq!(dom.live_count(), live);
    }

    #[test]
    fn into_parts_returns_services() {
        let (mut dom, host) = editor("");
        let mut updater: ContentUpdater = ContentUpdater::default();
        updater.update(&mut dom, "ed", "x").unwrap();
        let (selection, focus) = updater.into_parts();
        assert_eq!(
            selection.range_at(0),
            Some(Range::collapsed_at(BoundaryPoint::new(
                dom.first_child(host).unwrap(),
                0
            )))
        );
        assert_eq!(focus.focused(), Some(host));
    }
}
