use crate::dom::{Dom, NodeId, NodeKind};

use super::types::is_void;

/// Serialize the children of `node` back to markup.
pub fn serialize_children(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    for &child in dom.children(node) {
        write_node(dom, child, &mut out);
    }
    out
}

fn write_node(dom: &Dom, node: NodeId, out: &mut String) {
    match dom.node(node).kind() {
        NodeKind::Text(text) => out.push_str(&html_escape::encode_text(text)),
        NodeKind::Document => out.push_str(&serialize_children(dom, node)),
        NodeKind::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(&attr.value));
                out.push('"');
            }
            out.push('>');
            if is_void(tag) {
                return;
            }
            for &child in dom.children(node) {
                write_node(dom, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
