//! # HTML Fragments
//!
//! Just enough HTML to move content in and out of a [`Dom`](crate::dom::Dom):
//! a forgiving fragment parser used by `set_inner_html`, and the matching
//! serializer behind `inner_html`.
//!
//! - **`cursor`**: byte cursor shared by the tokenizer stages
//! - **`tokenizer`**: markup to [`Token`]s, character references decoded
//! - **`tree`**: tokens to nodes under a fragment parent
//! - **`serialize`**: nodes back to escaped markup
//!
//! This is not a conforming HTML5 tree builder. There are no implied end tags,
//! no foster parenting and no raw-text elements; content produced by the
//! markdown renderer never needs them.

pub mod cursor;
pub mod serialize;
pub mod tokenizer;
pub mod tree;
pub mod types;

pub use serialize::serialize_children;
pub use tokenizer::tokenize;
pub use tree::parse_into;
pub use types::{Token, VOID_ELEMENTS, is_void};
