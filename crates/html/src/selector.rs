//! The CSS selector subset the page behavior needs.
//!
//! Supported: selector lists (`,`), descendant and child (`>`) combinators, and compound
//! selectors built from `*`, type, `#id`, `.class` and attribute selectors
//! (`[a]`, `[a=v]`, `[a^=v]`, `[a$=v]`, `[a*=v]`, `[a~=v]`). Pseudo-classes, escapes and
//! sibling combinators are rejected with a [`SelectorError`], which is also what a browser
//! does for e.g. `#1abc`.

use crate::types::ElementData;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    UnexpectedChar { pos: usize, ch: char },
    UnterminatedAttribute { pos: usize },
    Unsupported { pos: usize, what: &'static str },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "empty selector"),
            SelectorError::UnexpectedChar { pos, ch } => {
                write!(f, "unexpected {ch:?} at offset {pos}")
            }
            SelectorError::UnterminatedAttribute { pos } => {
                write!(f, "unterminated attribute selector at offset {pos}")
            }
            SelectorError::Unsupported { pos, what } => {
                write!(f, "unsupported {what} at offset {pos}")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
    Includes(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrSelector {
    pub name: String,
    pub op: AttrOp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttrSelector>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// One complex selector, stored left to right. `parts[0].0` is unused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Complex {
    pub parts: Vec<(Combinator, Compound)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<Complex>,
}

impl std::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector_list(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn is_ident_start(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || !c.is_ascii() => true,
        Some('-') => matches!(chars.next(), Some(c) if !c.is_ascii_digit() && is_ident_char(c)),
        _ => false,
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let before = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos != before
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        if !is_ident_start(self.rest()) {
            return Err(self.unexpected());
        }
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some('\\') => SelectorError::Unsupported {
                pos: self.pos,
                what: "escape",
            },
            Some(ch) => SelectorError::UnexpectedChar { pos: self.pos, ch },
            None => SelectorError::Empty,
        }
    }
}

pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let mut cursor = Cursor { src: input, pos: 0 };
    let mut selectors = Vec::new();
    loop {
        selectors.push(parse_complex(&mut cursor)?);
        match cursor.bump() {
            None => break,
            Some(',') => continue,
            Some(ch) => {
                return Err(SelectorError::UnexpectedChar {
                    pos: cursor.pos - ch.len_utf8(),
                    ch,
                });
            }
        }
    }
    Ok(SelectorList { selectors })
}

fn parse_complex(cursor: &mut Cursor<'_>) -> Result<Complex, SelectorError> {
    cursor.skip_whitespace();
    let mut parts = vec![(Combinator::Descendant, parse_compound(cursor)?)];
    loop {
        let had_space = cursor.skip_whitespace();
        let combinator = match cursor.peek() {
            None | Some(',') => break,
            Some('>') => {
                cursor.bump();
                cursor.skip_whitespace();
                Combinator::Child
            }
            Some('+') | Some('~') => {
                return Err(SelectorError::Unsupported {
                    pos: cursor.pos,
                    what: "sibling combinator",
                });
            }
            Some(_) if had_space => Combinator::Descendant,
            Some(_) => return Err(cursor.unexpected()),
        };
        parts.push((combinator, parse_compound(cursor)?));
    }
    Ok(Complex { parts })
}

fn parse_compound(cursor: &mut Cursor<'_>) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let start = cursor.pos;
    match cursor.peek() {
        Some('*') => {
            cursor.bump();
        }
        Some(_) if is_ident_start(cursor.rest()) => {
            compound.tag = Some(cursor.ident()?.to_ascii_lowercase());
        }
        _ => {}
    }
    loop {
        match cursor.peek() {
            Some('#') => {
                cursor.bump();
                compound.id = Some(cursor.ident()?);
            }
            Some('.') => {
                cursor.bump();
                compound.classes.push(cursor.ident()?);
            }
            Some('[') => {
                cursor.bump();
                compound.attributes.push(parse_attribute(cursor)?);
            }
            Some(':') => {
                return Err(SelectorError::Unsupported {
                    pos: cursor.pos,
                    what: "pseudo-class",
                });
            }
            _ => break,
        }
    }
    if cursor.pos == start {
        return Err(cursor.unexpected());
    }
    Ok(compound)
}

fn parse_attribute(cursor: &mut Cursor<'_>) -> Result<AttrSelector, SelectorError> {
    let open = cursor.pos - 1;
    cursor.skip_whitespace();
    let name = cursor.ident()?.to_ascii_lowercase();
    cursor.skip_whitespace();
    let op_char = match cursor.bump() {
        Some(']') => {
            return Ok(AttrSelector {
                name,
                op: AttrOp::Exists,
            });
        }
        Some('=') => '=',
        Some(c @ ('^' | '$' | '*' | '~')) => {
            if cursor.bump() != Some('=') {
                return Err(SelectorError::UnexpectedChar {
                    pos: cursor.pos,
                    ch: c,
                });
            }
            c
        }
        Some(ch) => {
            return Err(SelectorError::UnexpectedChar {
                pos: cursor.pos - ch.len_utf8(),
                ch,
            });
        }
        None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
    };
    cursor.skip_whitespace();
    let value = match cursor.peek() {
        Some(quote @ ('"' | '\'')) => {
            cursor.bump();
            let start = cursor.pos;
            let Some(len) = cursor.rest().find(quote) else {
                return Err(SelectorError::UnterminatedAttribute { pos: open });
            };
            cursor.pos += len + 1;
            cursor.src[start..start + len].to_string()
        }
        _ => cursor.ident()?,
    };
    cursor.skip_whitespace();
    if cursor.bump() != Some(']') {
        return Err(SelectorError::UnterminatedAttribute { pos: open });
    }
    let op = match op_char {
        '=' => AttrOp::Equals(value),
        '^' => AttrOp::Prefix(value),
        '$' => AttrOp::Suffix(value),
        '*' => AttrOp::Substring(value),
        _ => AttrOp::Includes(value),
    };
    Ok(AttrSelector { name, op })
}

impl Compound {
    pub fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !el.is_named(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|a| a.matches(el))
    }
}

impl AttrSelector {
    fn matches(&self, el: &ElementData) -> bool {
        let Some(value) = el.attribute(&self.name) else {
            return false;
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(want) => value == want,
            // Empty operands never match for the substring operators.
            AttrOp::Prefix(want) => !want.is_empty() && value.starts_with(want.as_str()),
            AttrOp::Suffix(want) => !want.is_empty() && value.ends_with(want.as_str()),
            AttrOp::Substring(want) => !want.is_empty() && value.contains(want.as_str()),
            AttrOp::Includes(want) => value.split_ascii_whitespace().any(|w| w == want),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(name: &str, attrs: &[(&str, &str)]) -> ElementData {
        let mut data = ElementData::new(name);
        data.attributes = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect();
        data
    }

    #[test]
    fn parses_selector_list_with_classes() {
        let list = parse_selector_list(".fade-in, .fade-in-left ,.fade-in-right").unwrap();
        assert_eq!(list.selectors.len(), 3);
        assert_eq!(list.selectors[1].parts[0].1.classes, vec!["fade-in-left"]);
    }

    #[test]
    fn parses_descendant_and_child_combinators() {
        let list = parse_selector_list(".contact-form form > .btn").unwrap();
        let parts = &list.selectors[0].parts;
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].0, Combinator::Descendant);
        assert_eq!(parts[1].1.tag.as_deref(), Some("form"));
        assert_eq!(parts[2].0, Combinator::Child);
    }

    #[test]
    fn prefix_attribute_selector_matches_hash_links() {
        let list = parse_selector_list(r##"a[href^="#"]"##).unwrap();
        let compound = &list.selectors[0].parts[0].1;
        assert!(compound.matches(&el("a", &[("href", "#om-oss")])));
        assert!(!compound.matches(&el("a", &[("href", "/om-oss")])));
        assert!(!compound.matches(&el("div", &[("href", "#x")])));
    }

    #[test]
    fn compound_requires_every_part() {
        let list = parse_selector_list("div#main.card[data-type=bad]").unwrap();
        let compound = &list.selectors[0].parts[0].1;
        let hit = el(
            "div",
            &[("id", "main"), ("class", "card wide"), ("data-type", "bad")],
        );
        let miss = el("div", &[("id", "main"), ("class", "card")]);
        assert!(compound.matches(&hit));
        assert!(!compound.matches(&miss));
    }

    #[test]
    fn rejects_ids_starting_with_a_digit() {
        assert_eq!(
            parse_selector_list("#1abc"),
            Err(SelectorError::UnexpectedChar { pos: 1, ch: '1' })
        );
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert!(matches!(
            parse_selector_list("a:hover"),
            Err(SelectorError::Unsupported { .. })
        ));
        assert!(matches!(
            parse_selector_list("a + b"),
            Err(SelectorError::Unsupported { .. })
        ));
        assert!(matches!(
            parse_selector_list("[href"),
            Err(SelectorError::UnterminatedAttribute { .. })
        ));
        assert_eq!(parse_selector_list(""), Err(SelectorError::Empty));
        assert_eq!(parse_selector_list("#"), Err(SelectorError::Empty));
    }
}
