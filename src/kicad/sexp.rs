//! Minimal S-expression model and parser for KiCad footprint text.
//!
//! Only the subset KiCad uses is supported: lists, bare symbols and
//! double-quoted strings with backslash escapes.

use std::fmt;

use super::error::{KicadError, KicadResult};

/// An S-expression value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExp {
    /// A symbol, number or quoted string.
    Atom(String),
    /// A parenthesised list.
    List(Vec<SExp>),
}

impl SExp {
    /// Returns the atom text, if this is an atom.
    #[must_use]
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the list items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            Self::Atom(_) => None,
        }
    }

    /// Returns the leading symbol of a list, e.g. `pad` for `(pad 1 ...)`.
    #[must_use]
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// Finds the first child list whose head is `key`.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Self> {
        self.as_list()?.iter().find(|item| item.head() == Some(key))
    }

    /// Iterates over child lists whose head is `key`.
    pub fn children<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.as_list()
            .unwrap_or_default()
            .iter()
            .filter(move |item| item.head() == Some(key))
    }
}

impl fmt::Display for SExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(s) => {
                let needs_quotes = s.is_empty()
                    || s.chars()
                        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\\'));
                if needs_quotes {
                    write!(f, "\"{}\"", escape(s))
                } else {
                    write!(f, "{s}")
                }
            }
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Escapes a string for use inside double quotes.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Parses every top-level expression in `input`.
///
/// # Errors
///
/// Returns an error on unbalanced parentheses, unterminated strings or
/// stray closing parentheses.
pub fn parse_all(input: &str) -> KicadResult<Vec<SExp>> {
    let mut parser = Parser::new(input);
    let mut items = Vec::new();
    loop {
        parser.skip_whitespace();
        if parser.is_eof() {
            return Ok(items);
        }
        items.push(parser.parse_expr()?);
    }
}

struct Parser {
    input: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn parse_expr(&mut self) -> KicadResult<SExp> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(KicadError::parse_error(self.pos, "unexpected end of input")),
            Some('(') => self.parse_list(),
            Some(')') => Err(KicadError::parse_error(self.pos, "unexpected ')'")),
            Some('"') => self.parse_string(),
            Some(_) => Ok(self.parse_symbol()),
        }
    }

    fn parse_list(&mut self) -> KicadResult<SExp> {
        let start = self.pos;
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(KicadError::parse_error(start, "unclosed '('")),
                Some(')') => {
                    self.pos += 1;
                    return Ok(SExp::List(items));
                }
                Some(_) => items.push(self.parse_expr()?),
            }
        }
    }

    fn parse_string(&mut self) -> KicadResult<SExp> {
        let start = self.pos;
        self.pos += 1;
        let mut s = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                '"' => return Ok(SExp::Atom(s)),
                '\\' => {
                    let escaped = self
                        .peek()
                        .ok_or_else(|| KicadError::parse_error(self.pos, "dangling escape"))?;
                    self.pos += 1;
                    s.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                }
                _ => s.push(c),
            }
        }
        Err(KicadError::parse_error(start, "unterminated string"))
    }

    fn parse_symbol(&mut self) -> SExp {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
                break;
            }
            s.push(c);
            self.pos += 1;
        }
        SExp::Atom(s)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(s: &str) -> SExp {
        SExp::Atom(s.to_string())
    }

    #[test]
    fn parse_nested_list() {
        let items = parse_all("(at 1.5 -2)").unwrap();
        assert_eq!(
            items,
            vec![SExp::List(vec![atom("at"), atom("1.5"), atom("-2")])]
        );
    }

    #[test]
    fn parse_quoted_strings() {
        let items = parse_all(r#"(pad "" thru_hole) (descr "a \"b\"")"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_list().unwrap()[1], atom(""));
        assert_eq!(items[1].as_list().unwrap()[1], atom("a \"b\""));
    }

    #[test]
    fn child_lookup() {
        let items = parse_all("(pad 1 smd rect (at 0 0) (size 1 3.2))").unwrap();
        let pad = &items[0];
        assert_eq!(pad.head(), Some("pad"));
        let size = pad.child("size").unwrap();
        assert_eq!(size.as_list().unwrap()[2], atom("3.2"));
        assert!(pad.child("drill").is_none());
    }

    #[test]
    fn child_outlives_lookup_key() {
        let items = parse_all("(pad 1 smd rect (at 0 0) (size 1 3.2))").unwrap();
        let at = {
            let key = String::from("at");
            items[0].child(&key)
        };
        assert_eq!(at.and_then(SExp::as_list).map(<[SExp]>::len), Some(3));
        assert_eq!(items[0].children("size").count(), 1);
    }

    #[test]
    fn display_round_trips() {
        let text = r#"(fp_text value "Harwin LTek" (layer F.Fab))"#;
        let items = parse_all(text).unwrap();
        assert_eq!(items[0].to_string(), text);
    }

    #[test]
    fn reject_unbalanced() {
        assert!(matches!(
            parse_all("(pad 1"),
            Err(KicadError::ParseError { offset: 0, .. })
        ));
        assert!(parse_all("(pad))").is_err());
        assert!(parse_all("(descr \"open").is_err());
    }

    #[test]
    fn empty_input_has_no_items() {
        assert!(parse_all("  \n").unwrap().is_empty());
    }
}
