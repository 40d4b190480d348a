//! Minimal CSS selector support: compound simple selectors (`tag`, `#id`,
//! `.class`, `[attr]`, `[attr="value"]`) joined by descendant whitespace.
//! Quoted attribute values accept `\` escapes.

use crate::PageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeMatch>,
}

/// What a compound is matched against.
pub trait Matchable {
    fn tag(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

impl Compound {
    pub fn matches(&self, element: &impl Matchable) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(element.tag()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|attr| match (&attr.value, element.attribute(&attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Outermost ancestor first; the last compound matches the element itself.
    pub chain: Vec<Compound>,
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self, PageError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid(raw, "empty selector"));
        }

        let mut chain = Vec::new();
        for part in split_compounds(trimmed, raw)? {
            chain.push(parse_compound(&part, raw)?);
        }
        Ok(Self { chain })
    }

    /// Compound the matched element itself must satisfy.
    pub fn subject(&self) -> Option<&Compound> {
        self.chain.last()
    }
}

fn invalid(selector: &str, reason: impl Into<String>) -> PageError {
    PageError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.into(),
    }
}

fn split_compounds(selector: &str, raw: &str) -> Result<Vec<String>, PageError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in selector.chars() {
        if escaped {
            escaped = false;
            current.push(ch);
            continue;
        }
        match (ch, quote, in_brackets) {
            ('\\', Some(_), _) => {
                escaped = true;
                current.push(ch);
            }
            (c, Some(q), _) if c == q => {
                quote = None;
                current.push(c);
            }
            (c, Some(_), _) => current.push(c),
            ('"' | '\'', None, true) => {
                quote = Some(ch);
                current.push(ch);
            }
            ('[', None, false) => {
                in_brackets = true;
                current.push(ch);
            }
            (']', None, true) => {
                in_brackets = false;
                current.push(ch);
            }
            (c, None, false) if c.is_whitespace() => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            ('>' | '+' | '~' | ',', None, false) => {
                return Err(PageError::UnsupportedSelector(raw.to_string()));
            }
            (c, None, _) => current.push(c),
        }
    }

    if quote.is_some() || in_brackets {
        return Err(invalid(raw, "unterminated attribute selector"));
    }
    if !current.is_empty() {
        parts.push(current);
    }
    Ok(parts)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(part: &str, raw: &str) -> Result<Compound, PageError> {
    let chars: Vec<char> = part.chars().collect();
    let mut compound = Compound::default();
    let mut pos = 0;

    if chars.first() == Some(&'*') {
        pos = 1;
    } else if chars.first().is_some_and(|c| c.is_alphabetic()) {
        compound.tag = Some(take_ident(&chars, &mut pos).to_ascii_lowercase());
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                let id = take_ident(&chars, &mut pos);
                if id.is_empty() {
                    return Err(invalid(raw, "empty id"));
                }
                compound.id = Some(id);
            }
            '.' => {
                pos += 1;
                let class = take_ident(&chars, &mut pos);
                if class.is_empty() {
                    return Err(invalid(raw, "empty class"));
                }
                compound.classes.push(class);
            }
            '[' => {
                pos += 1;
                compound.attributes.push(parse_attribute(&chars, &mut pos, raw)?);
            }
            ':' => return Err(PageError::UnsupportedSelector(raw.to_string())),
            other => return Err(invalid(raw, format!("unexpected character `{other}`"))),
        }
    }

    Ok(compound)
}

fn parse_attribute(chars: &[char], pos: &mut usize, raw: &str) -> Result<AttributeMatch, PageError> {
    let name = take_ident(chars, pos);
    if name.is_empty() {
        return Err(invalid(raw, "empty attribute name"));
    }

    match chars.get(*pos) {
        Some(']') => {
            *pos += 1;
            return Ok(AttributeMatch { name, value: None });
        }
        Some('=') => *pos += 1,
        Some(_) => return Err(PageError::UnsupportedSelector(raw.to_string())),
        None => return Err(invalid(raw, "unterminated attribute selector")),
    }

    let value = match chars.get(*pos) {
        Some(&q) if q == '"' || q == '\'' => {
            *pos += 1;
            let mut value = String::new();
            loop {
                match chars.get(*pos) {
                    None => return Err(invalid(raw, "unterminated string")),
                    Some(&c) if c == q => break,
                    Some('\\') => {
                        let Some(&next) = chars.get(*pos + 1) else {
                            return Err(invalid(raw, "dangling escape"));
                        };
                        value.push(next);
                        *pos += 2;
                    }
                    Some(&c) => {
                        value.push(c);
                        *pos += 1;
                    }
                }
            }
            *pos += 1;
            value
        }
        _ => take_ident(chars, pos),
    };

    if chars.get(*pos) != Some(&']') {
        return Err(invalid(raw, "expected `]`"));
    }
    *pos += 1;

    Ok(AttributeMatch {
        name,
        value: Some(value),
    })
}

#[cfg(test)]
#[path = "tests/selector_tests.rs"]
mod tests;
