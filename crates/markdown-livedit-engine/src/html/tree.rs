use crate::dom::{Dom, NodeId};

use super::{
    tokenizer::tokenize,
    types::{Token, is_void},
};

/// Parse `markup` and append the resulting nodes to `parent`.
///
/// Never fails on malformed input:
/// - an end tag closes the nearest open element with that name, along with
///   everything opened after it;
/// - an end tag with no matching open element is ignored;
/// - elements still open at end of input are closed implicitly.
pub fn parse_into(dom: &mut Dom, parent: NodeId, markup: &str) {
    // `open[0]` is the fragment parent and is never popped.
    let mut open: Vec<(NodeId, String)> = vec![(parent, String::new())];

    for token in tokenize(markup) {
        let top = open.last().map(|(id, _)| *id).unwrap_or(parent);
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => {
                let void = is_void(&name);
                let element = dom.create_element_with_attrs(name.clone(), attrs);
                dom.append_child(top, element);
                if !void && !self_closing {
                    open.push((element, name));
                }
            }
            Token::EndTag { name } => {
                match open.iter().skip(1).rposition(|(_, open_name)| *open_name == name) {
                    Some(index) => open.truncate(index + 1),
                    None => log::debug!("ignoring stray end tag </{name}>"),
                }
            }
            Token::Text(text) => append_text(dom, top, &text),
        }
    }
}

fn append_text(dom: &mut Dom, parent: NodeId, text: &str) {
    if let Some(last) = dom.last_child(parent)
        && dom.node(last).is_text()
    {
        dom.push_text(last, text);
        return;
    }
    let node = dom.create_text(text);
    dom.append_child(parent, node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(markup: &str) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let host = dom.create_element("div");
        dom.append_child(dom.root(), host);
        parse_into(&mut dom, host, markup);
        (dom, host)
    }

    #[test]
    fn nested_elements() {
        let (dom, host) = parse("<p>a<em>b</em>c</p>");
        let p = dom.first_child(host).unwrap();
        assert_eq!(dom.node(p).tag(), Some("p"));
        assert_eq!(dom.child_count(p), 3);
        assert_eq!(dom.text_content(host), "abc");
    }

    #[test]
    fn void_elements_take_no_children() {
        let (dom, host) = parse("a<br>b<img src=x>c");
        let br = dom.children(host)[1];
        assert_eq!(dom.node(br).tag(), Some("br"));
        assert!(dom.children(br).is_empty());
        assert_eq!(dom.text_content(host), "abc");
        assert_eq!(dom.child_count(host), 5);
    }

    #[test]
    fn stray_end_tag_is_ignored() {
        let (dom, host) = parse("a</b>c");
        assert_eq!(dom.child_count(host), 1);
        assert_eq!(dom.text_content(host), "ac");
    }

    #[test]
    fn end_tag_closes_intervening_elements() {
        let (dom, host) = parse("<p><em>x</p>y");
        let p = dom.children(host)[0];
        let y = dom.children(host)[1];
        assert_eq!(dom.node(p).tag(), Some("p"));
        assert_eq!(dom.node(y).text(), Some("y"));
    }

    #[test]
    fn unclosed_elements_close_at_end() {
        let (dom, host) = parse("<ul><li>one<li>two");
        assert_eq!(dom.text_content(host), "onetwo");
    }

    #[test]
    fn end_tag_never_closes_fragment_parent() {
        let (dom, host) = parse("a</div>b");
        assert_eq!(dom.child_count(host), 1);
        assert_eq!(dom.text_content(host), "ab");
    }

    #[test]
    fn text_merges_across_dropped_comments() {
        let (dom, host) = parse("a<!-- c -->b");
        assert_eq!(dom.child_count(host), 1);
    }
}
