use crate::dom::NodeId;

/// Which element receives keyboard input.
pub trait FocusService {
    fn focus(&mut self, node: NodeId);

    fn focused(&self) -> Option<NodeId>;
}

/// In-memory focus state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTracker {
    focused: Option<NodeId>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }
}

impl FocusService for FocusTracker {
    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}
