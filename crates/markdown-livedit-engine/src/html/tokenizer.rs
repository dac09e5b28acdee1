use std::borrow::Cow;

use crate::dom::Attribute;

use super::{cursor::Cursor, types::Token};

/// Splits markup into start tags, end tags and decoded text runs.
///
/// Comments, doctypes and processing instructions are dropped. A `<` that
/// does not open one of those constructs is kept as literal text. Adjacent
/// text is emitted as a single token.
pub fn tokenize(markup: &str) -> Vec<Token> {
    let mut cur = Cursor::new(markup);
    let mut out = Vec::new();
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<Token>, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = html_escape::decode_html_entities(raw);
        match out.last_mut() {
            Some(Token::Text(prev)) => prev.push_str(&decoded),
            _ => out.push(Token::Text(decoded.into_owned())),
        }
    }

    while !cur.eof() {
        if !opens_markup(&cur) {
            cur.bump();
            continue;
        }
        flush_text(&mut out, cur.slice_from(text_start));

        if cur.starts_with(b"<!--") {
            cur.bump_n(4);
            cur.skip_past("-->");
        } else if cur.starts_with(b"<!") || cur.starts_with(b"<?") {
            cur.skip_past(">");
        } else if cur.starts_with(b"</") {
            out.push(end_tag(&mut cur));
        } else {
            out.push(start_tag(&mut cur));
        }
        text_start = cur.pos();
    }

    flush_text(&mut out, cur.slice_from(text_start));
    out
}

fn opens_markup(cur: &Cursor) -> bool {
    if cur.peek() != Some(b'<') {
        return false;
    }
    match cur.peek_at(1) {
        Some(b'!') | Some(b'?') => true,
        Some(b'/') => cur.peek_at(2).is_some_and(|b| b.is_ascii_alphabetic()),
        Some(b) => b.is_ascii_alphabetic(),
        None => false,
    }
}

fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}

fn tag_name(cur: &mut Cursor) -> String {
    let start = cur.pos();
    cur.bump_while(|b| !is_space(b) && b != b'/' && b != b'>');
    cur.slice_from(start).to_ascii_lowercase()
}

fn end_tag(cur: &mut Cursor) -> Token {
    cur.bump_n(2);
    let name = tag_name(cur);
    cur.skip_past(">");
    Token::EndTag { name }
}

fn start_tag(cur: &mut Cursor) -> Token {
    cur.bump();
    let name = tag_name(cur);
    let mut attrs = Vec::new();
    let mut self_closing = false;

    loop {
        cur.bump_while(is_space);
        match cur.peek() {
            None => break,
            Some(b'>') => {
                cur.bump();
                break;
            }
            Some(b'/') if cur.peek_at(1) == Some(b'>') => {
                cur.bump_n(2);
                self_closing = true;
                break;
            }
            Some(b'/') | Some(b'=') => {
                cur.bump();
            }
            Some(_) => attrs.push(attribute(cur)),
        }
    }

    Token::StartTag {
        name,
        attrs,
        self_closing,
    }
}

fn attribute(cur: &mut Cursor) -> Attribute {
    let start = cur.pos();
    cur.bump_while(|b| !is_space(b) && b != b'=' && b != b'>' && b != b'/');
    let name = cur.slice_from(start).to_ascii_lowercase();

    cur.bump_while(is_space);
    if cur.peek() != Some(b'=') {
        return Attribute::new(name, "");
    }
    cur.bump();
    cur.bump_while(is_space);

    let raw = match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.bump();
            let value_start = cur.pos();
            cur.bump_while(|b| b != quote);
            let value = cur.slice_from(value_start);
            cur.bump();
            value
        }
        _ => {
            let value_start = cur.pos();
            cur.bump_while(|b| !is_space(b) && b != b'>');
            cur.slice_from(value_start)
        }
    };

    let value: Cow<str> = html_escape::decode_html_entities(raw);
    Attribute::new(name, value)
}
