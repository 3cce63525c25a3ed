//! Type-expression parsing.
//!
//! Accepted forms:
//!   - plain representations: `int`, `str`, `Sized`, ...
//!   - unions: `Optional[int]`, `Union[int, str]`, `int | str`
//!   - homogeneous collections: `tuple[int, ...]`, `list[str]`
//!
//! Capitalized `typing` aliases (`Tuple`, `List`, `typing.Union`) are
//! accepted. Every union syntax normalizes to the same [`Repr`].

use std::str::FromStr;

use crate::error::{RefineError, Result};

use super::Repr;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Open,
    Close,
    Comma,
    Pipe,
    Ellipsis,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '[' => tokens.push(Token::Open),
            ']' => tokens.push(Token::Close),
            ',' => tokens.push(Token::Comma),
            '|' => tokens.push(Token::Pipe),
            '.' if input[start..].starts_with("...") => {
                chars.next();
                chars.next();
                tokens.push(Token::Ellipsis);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' || next == '.' {
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(input[start..end].to_string()));
            }
            other => {
                return Err(RefineError::InvalidRepr(format!(
                    "unexpected character '{other}' in '{input}'"
                )))
            }
        }
    }
    Ok(tokens)
}

/// Deepest bracket nesting accepted in a type expression.
const MAX_DEPTH: usize = 64;

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, msg: &str) -> RefineError {
        RefineError::InvalidRepr(format!("{msg} in '{}'", self.input))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, what: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    fn expr(&mut self) -> Result<Repr> {
        let mut members = vec![self.term()?];
        while self.eat(&Token::Pipe) {
            members.push(self.term()?);
        }
        if members.len() == 1 {
            Ok(members.remove(0))
        } else {
            Ok(Repr::Union(members))
        }
    }

    fn args(&mut self) -> Result<Vec<Repr>> {
        let mut args = vec![self.expr()?];
        while self.eat(&Token::Comma) {
            args.push(self.expr()?);
        }
        self.expect(&Token::Close, "']'")?;
        Ok(args)
    }

    fn term(&mut self) -> Result<Repr> {
        let name = match self.tokens.get(self.pos) {
            Some(Token::Ident(name)) => name.clone(),
            _ => return Err(self.error("expected a type name")),
        };
        self.pos += 1;
        let name = name.strip_prefix("typing.").unwrap_or(name.as_str()).to_string();

        if !self.eat(&Token::Open) {
            return simple(&name).ok_or_else(|| self.error(&format!("unknown type '{name}'")));
        }

        if self.depth == MAX_DEPTH {
            return Err(RefineError::InvalidRepr(
                "type expression nested too deeply".to_string(),
            ));
        }
        self.depth += 1;
        let parsed = self.parametrized(&name);
        self.depth -= 1;
        parsed
    }

    fn parametrized(&mut self, name: &str) -> Result<Repr> {
        match name {
            "Optional" => {
                let args = self.args()?;
                match <[Repr; 1]>::try_from(args) {
                    Ok([inner]) => Ok(Repr::Union(vec![inner, Repr::NoneType])),
                    Err(_) => Err(self.error("Optional takes exactly one argument")),
                }
            }
            "Union" => Ok(Repr::Union(self.args()?)),
            "tuple" | "Tuple" => {
                let item = self.expr()?;
                self.expect(&Token::Comma, "', ...'")?;
                self.expect(&Token::Ellipsis, "'...'")?;
                self.expect(&Token::Close, "']'")?;
                Ok(Repr::TupleOf(Box::new(item)))
            }
            "list" | "List" => {
                let item = self.expr()?;
                self.expect(&Token::Close, "']'")?;
                Ok(Repr::ListOf(Box::new(item)))
            }
            other => Err(self.error(&format!("type '{other}' takes no parameters"))),
        }
    }
}

fn simple(name: &str) -> Option<Repr> {
    Some(match name {
        "object" | "Any" => Repr::Object,
        "None" | "NoneType" => Repr::NoneType,
        "bool" => Repr::Bool,
        "int" => Repr::Int,
        "float" => Repr::Float,
        "Number" | "number" => Repr::Number,
        "str" => Repr::Str,
        "bytes" => Repr::Bytes,
        "tuple" | "Tuple" => Repr::Tuple,
        "list" | "List" => Repr::List,
        "set" | "Set" => Repr::Set,
        "frozenset" | "FrozenSet" => Repr::FrozenSet,
        "dict" | "Dict" => Repr::Dict,
        "Sized" => Repr::Sized,
        "Iterable" => Repr::Iterable,
        "SizedIterable" => Repr::SizedIterable,
        "Sequence" => Repr::Sequence,
        "Mapping" => Repr::Mapping,
        _ => return None,
    })
}

impl FromStr for Repr {
    type Err = RefineError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser {
            input: s,
            tokens: tokenize(s)?,
            pos: 0,
            depth: 0,
        };
        let repr = parser.expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("trailing input"));
        }
        Ok(repr.normalize())
    }
}
