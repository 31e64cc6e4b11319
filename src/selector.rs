use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if !self.universal && self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to previous (left) selector part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    split_selector_groups(selector)?
        .iter()
        .map(|group| parse_selector_chain(group))
        .collect()
}

fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let tokens = tokenize_selector(selector)?;
    let mut steps = Vec::new();
    let mut pending_combinator: Option<SelectorCombinator> = None;

    for token in tokens {
        let combinator = match token.as_str() {
            ">" => Some(SelectorCombinator::Child),
            "+" => Some(SelectorCombinator::AdjacentSibling),
            "~" => Some(SelectorCombinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = combinator {
            if pending_combinator.is_some() || steps.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending_combinator = Some(combinator);
            continue;
        }

        let step = parse_selector_step(&token)?;
        let combinator = if steps.is_empty() {
            None
        } else {
            Some(
                pending_combinator
                    .take()
                    .unwrap_or(SelectorCombinator::Descendant),
            )
        };
        steps.push(SelectorPart { step, combinator });
    }

    if steps.is_empty() || pending_combinator.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    Ok(steps)
}

fn split_selector_groups(selector: &str) -> Result<Vec<String>> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '"' | '\'' if bracket_depth > 0 => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                if bracket_depth == 0 {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                bracket_depth -= 1;
                current.push(ch);
            }
            ',' if bracket_depth == 0 => {
                let trimmed = current.trim();
                if trimmed.is_empty() {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                groups.push(trimmed.to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if bracket_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let trimmed = current.trim();
    if trimmed.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    groups.push(trimmed.to_string());
    Ok(groups)
}

fn tokenize_selector(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.trim().is_empty() {
            tokens.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in selector.chars() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '"' | '\'' if bracket_depth > 0 => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                if bracket_depth == 0 {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                bracket_depth -= 1;
                current.push(ch);
            }
            '>' | '+' | '~' if bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(ch.to_string());
            }
            ch if ch.is_ascii_whitespace() && bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
            }
            _ => current.push(ch),
        }
    }

    if bracket_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    flush(&mut current, &mut tokens);

    Ok(tokens)
}

fn parse_selector_step(part: &str) -> Result<SelectorStep> {
    let part = part.trim();
    if part.is_empty() {
        return Err(Error::UnsupportedSelector(part.into()));
    }

    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = SelectorStep::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if step.universal || i != 0 {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let Some((id, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                if step.id.replace(id).is_some() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                i = next;
            }
            b'.' => {
                let Some((class_name, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_selector_attr_condition(part, i)?;
                step.attrs.push(attr);
                i = next;
            }
            _ => {
                if i != 0 {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                let Some((tag, next)) = parse_selector_ident(part, i) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    Ok(step)
}

fn parse_selector_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    if start >= bytes.len() || !is_selector_ident_char(bytes[start]) {
        return None;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_selector_ident_char(bytes[end]) {
        end += 1;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn is_selector_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_selector_attr_name_char(b: u8) -> bool {
    is_selector_ident_char(b) || b == b':'
}

#[derive(Debug, Clone, Copy)]
enum SelectorAttrConditionType {
    Eq,
    StartsWith,
    EndsWith,
    Contains,
    Includes,
}

fn parse_selector_attr_condition(
    src: &str,
    open_bracket: usize,
) -> Result<(SelectorAttrCondition, usize)> {
    let unsupported = || Error::UnsupportedSelector(src.into());
    let bytes = src.as_bytes();
    let mut i = open_bracket + 1;

    skip_ws(bytes, &mut i);
    let key_start = i;
    while i < bytes.len() && is_selector_attr_name_char(bytes[i]) {
        i += 1;
    }
    if key_start == i {
        return Err(unsupported());
    }
    let key = src
        .get(key_start..i)
        .ok_or_else(unsupported)?
        .to_ascii_lowercase();

    skip_ws(bytes, &mut i);
    match bytes.get(i) {
        None => return Err(unsupported()),
        Some(b']') => return Ok((SelectorAttrCondition::Exists { key }, i + 1)),
        Some(_) => {}
    }

    let (op, next) = match (bytes[i], bytes.get(i + 1)) {
        (b'=', _) => (SelectorAttrConditionType::Eq, i + 1),
        (b'^', Some(b'=')) => (SelectorAttrConditionType::StartsWith, i + 2),
        (b'$', Some(b'=')) => (SelectorAttrConditionType::EndsWith, i + 2),
        (b'*', Some(b'=')) => (SelectorAttrConditionType::Contains, i + 2),
        (b'~', Some(b'=')) => (SelectorAttrConditionType::Includes, i + 2),
        _ => return Err(unsupported()),
    };

    i = next;
    skip_ws(bytes, &mut i);
    let (value, after_value) = parse_selector_attr_value(src, i)?;
    i = after_value;
    skip_ws(bytes, &mut i);
    if bytes.get(i) != Some(&b']') {
        return Err(unsupported());
    }

    let cond = match op {
        SelectorAttrConditionType::Eq => SelectorAttrCondition::Eq { key, value },
        SelectorAttrConditionType::StartsWith => SelectorAttrCondition::StartsWith { key, value },
        SelectorAttrConditionType::EndsWith => SelectorAttrCondition::EndsWith { key, value },
        SelectorAttrConditionType::Contains => SelectorAttrCondition::Contains { key, value },
        SelectorAttrConditionType::Includes => SelectorAttrCondition::Includes { key, value },
    };

    Ok((cond, i + 1))
}

fn parse_selector_attr_value(src: &str, start: usize) -> Result<(String, usize)> {
    let bytes = src.as_bytes();
    let Some(&first) = bytes.get(start) else {
        return Err(Error::UnsupportedSelector(src.into()));
    };

    if first == b'"' || first == b'\'' {
        let close = bytes[start + 1..]
            .iter()
            .position(|b| *b == first)
            .map(|offset| start + 1 + offset)
            .ok_or_else(|| Error::UnsupportedSelector(src.into()))?;
        let raw = src
            .get(start + 1..close)
            .ok_or_else(|| Error::UnsupportedSelector(src.into()))?;
        return Ok((raw.to_string(), close + 1));
    }

    let mut i = start;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b']' {
        i += 1;
    }
    let raw = src
        .get(start..i)
        .ok_or_else(|| Error::UnsupportedSelector(src.into()))?;
    Ok((raw.to_string(), i))
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}
