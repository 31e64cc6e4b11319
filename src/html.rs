use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

/// Elements whose body is kept verbatim as a single text node.
const RAW_TEXT_TAGS: [&str; 4] = ["script", "style", "textarea", "title"];

pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut stack = vec![dom.root()];
    let bytes = html.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if starts_with_at(bytes, i, b"<!--") {
            let end = find_subslice(bytes, i + 4, b"-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
            i = end + 3;
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(is_tag_start) {
            let (tag, attrs, self_closing, next) = parse_start_tag(html, i)?;
            i = next;

            let parent = current_parent(&stack)?;
            let node = dom.create_element(parent, tag.clone(), attrs);

            if RAW_TEXT_TAGS.contains(&tag.as_str()) && !self_closing {
                let close = find_case_insensitive_end_tag(bytes, i, tag.as_bytes())
                    .ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
                if let Some(body) = html.get(i..close).filter(|body| !body.is_empty()) {
                    let text = if tag == "script" || tag == "style" {
                        body.to_string()
                    } else {
                        decode_html_character_references(body)
                    };
                    dom.create_text(node, text);
                }
                if tag == "textarea" {
                    let text = dom.text_content(node);
                    dom.set_value(node, &text)?;
                }
                let (_, after_end) = parse_end_tag(html, close)?;
                i = after_end;
                continue;
            }

            if !self_closing && !is_void_tag(&tag) {
                stack.push(node);
            }
            continue;
        }

        if starts_with_at(bytes, i, b"</") {
            let (tag, next) = parse_end_tag(html, i)?;
            i = next;
            // Stray end tags with no open counterpart are dropped.
            if let Some(pos) = stack
                .iter()
                .rposition(|node| dom.tag_name(*node) == Some(tag.as_str()))
            {
                stack.truncate(pos.max(1));
            }
            continue;
        }

        if starts_with_at(bytes, i, b"<!") {
            i = skip_declaration_tag(bytes, i)?;
            continue;
        }

        let text_start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        if let Some(text) = html.get(text_start..i) {
            let decoded = decode_html_character_references(text);
            if !decoded.is_empty() {
                let parent = current_parent(&stack)?;
                dom.create_text(parent, decoded);
            }
        }
    }

    Ok(dom)
}

fn current_parent(stack: &[NodeId]) -> Result<NodeId> {
    stack
        .last()
        .copied()
        .ok_or_else(|| Error::HtmlParse("missing parent element".into()))
}

fn parse_start_tag(
    html: &str,
    at: usize,
) -> Result<(String, BTreeMap<String, String>, bool, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 1;

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html
        .get(tag_start..i)
        .ok_or_else(|| Error::HtmlParse("invalid tag name".into()))?
        .to_ascii_lowercase();
    if tag.is_empty() {
        return Err(Error::HtmlParse("empty tag name".into()));
    }

    let mut attrs = BTreeMap::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            return Err(Error::HtmlParse(format!("unclosed start tag <{tag}")));
        }

        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>') {
            self_closing = true;
            i += 2;
            break;
        }

        if !is_attr_name_char(bytes[i]) {
            // Skip junk tokens the way browsers recover from them.
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'>'
                && !(bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>'))
            {
                i += 1;
            }
            continue;
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_char(bytes[i]) {
            i += 1;
        }
        let name = html
            .get(name_start..i)
            .ok_or_else(|| Error::HtmlParse("invalid attribute name".into()))?
            .to_ascii_lowercase();

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(html, &mut i)?
        } else {
            "true".to_string()
        };

        // First occurrence wins, as in browsers.
        attrs.entry(name).or_insert(value);
    }

    Ok((tag, attrs, self_closing, i))
}

fn parse_end_tag(html: &str, at: usize) -> Result<(String, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 2;
    skip_ws(bytes, &mut i);

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html
        .get(tag_start..i)
        .ok_or_else(|| Error::HtmlParse("invalid end tag".into()))?
        .to_ascii_lowercase();

    while i < bytes.len() && bytes[i] != b'>' {
        i += 1;
    }
    if i >= bytes.len() {
        return Err(Error::HtmlParse("unclosed end tag".into()));
    }

    Ok((tag, i + 1))
}

fn skip_declaration_tag(bytes: &[u8], at: usize) -> Result<usize> {
    let mut i = at + 2;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(open) if b == open => quote = None,
            Some(_) => {}
            None if b == b'\'' || b == b'"' => quote = Some(b),
            None if b == b'>' => return Ok(i + 1),
            None => {}
        }
        i += 1;
    }
    Err(Error::HtmlParse("unclosed declaration tag".into()))
}

fn parse_attr_value(html: &str, i: &mut usize) -> Result<String> {
    let bytes = html.as_bytes();
    if *i >= bytes.len() {
        return Err(Error::HtmlParse("missing attribute value".into()));
    }

    if bytes[*i] == b'\'' || bytes[*i] == b'"' {
        let quote = bytes[*i];
        *i += 1;
        let start = *i;
        while *i < bytes.len() && bytes[*i] != quote {
            *i += 1;
        }
        if *i >= bytes.len() {
            return Err(Error::HtmlParse("unclosed quoted attribute value".into()));
        }
        let value = html
            .get(start..*i)
            .ok_or_else(|| Error::HtmlParse("invalid attribute value".into()))?;
        *i += 1;
        return Ok(decode_html_character_references(value));
    }

    let start = *i;
    while *i < bytes.len()
        && !bytes[*i].is_ascii_whitespace()
        && bytes[*i] != b'>'
        && !(bytes[*i] == b'/' && bytes.get(*i + 1) == Some(&b'>'))
    {
        *i += 1;
    }
    let value = html
        .get(start..*i)
        .ok_or_else(|| Error::HtmlParse("invalid attribute value".into()))?;
    Ok(decode_html_character_references(value))
}

pub(crate) fn decode_html_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    fn decode_numeric(value: &str) -> Option<char> {
        let codepoint = if let Some(hex) = value.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            value.parse::<u32>().ok()?
        };
        char::from_u32(codepoint)
    }

    fn decode_named(value: &str) -> Option<char> {
        match value {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{00A0}'),
            "copy" => Some('©'),
            "hellip" => Some('…'),
            "laquo" => Some('«'),
            "raquo" => Some('»'),
            "larr" => Some('←'),
            "rarr" => Some('→'),
            "star" => Some('☆'),
            "starf" => Some('★'),
            _ => None,
        }
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail.find(';').and_then(|semi| {
            let raw = &tail[..semi];
            let ch = match raw.strip_prefix('#') {
                Some(numeric) => decode_numeric(numeric),
                None => decode_named(raw),
            }?;
            Some((ch, semi + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_tag_start(b: &u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':' || b == b'@'
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|window| window == needle)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || from > bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

fn find_case_insensitive_end_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while let Some(offset) = find_subslice(bytes, i, b"</") {
        let name_start = offset + 2;
        let name_end = name_start + tag.len();
        if bytes
            .get(name_start..name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            && bytes
                .get(name_end)
                .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>')
        {
            return Some(offset);
        }
        i = offset + 2;
    }
    None
}
