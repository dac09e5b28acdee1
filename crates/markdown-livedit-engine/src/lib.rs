pub mod caret;
pub mod dom;
pub mod html;
pub mod render;
pub mod selection;
pub mod session;
pub mod updater;

// Re-export key types for easier usage
pub use caret::{CaretPlacement, CaretSearch, OverflowPolicy, capture_offset, locate, restore_offset};
pub use dom::{Attribute, Dom, Node, NodeId, NodeKind};
pub use render::{RenderOptions, render_markdown};
pub use selection::*;
pub use session::*;
pub use updater::*;
