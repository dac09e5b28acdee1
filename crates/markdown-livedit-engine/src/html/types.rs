use crate::dom::Attribute;

/// A lexical unit of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attrs: Vec<Attribute>,
        /// Written as `<name ... />`.
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// Character data with references already decoded.
    Text(String),
}

/// Elements that never have children or an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}
