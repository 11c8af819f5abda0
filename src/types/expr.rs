//! Go type expressions as written in type manifests.
//!
//! Supported forms: `T`, `pkg/path.T`, `*T`, `[]T`, `[N]T`, `map[K]V`,
//! `chan T`, `chan<- T`, `<-chan T`, `func(...)`, `interface{...}`, `any`,
//! `error`.

use super::ChanDir;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static RE_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*(\d+)\s*\](.+)$").unwrap());

static RE_CHAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^chan(?:\s*(<-))?\s+(.+)$").unwrap());

static RE_RECV_CHAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<-\s*chan\s+(.+)$").unwrap());

static RE_NAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\S+)\.)?([A-Za-z_][A-Za-z0-9_]*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name` or `package/path.Name`.
    Named {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array(usize, Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Chan(ChanDir, Box<TypeExpr>),
    Func,
    Interface,
}

impl TypeExpr {
    /// Field name Go gives an embedded field of this type: the type's local
    /// name, with at most one pointer stripped.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named { name, .. } => Some(name),
            TypeExpr::Pointer(inner) => match inner.as_ref() {
                TypeExpr::Named { name, .. } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("empty type expression")]
    Empty,

    #[error("unbalanced brackets in `{0}`")]
    Unbalanced(String),

    #[error("inline struct types are not supported: `{0}`")]
    InlineStruct(String),

    #[error("invalid type expression `{0}`")]
    Invalid(String),
}

/// Parse a type expression.
pub fn parse(src: &str) -> Result<TypeExpr, ExprError> {
    let s = src.trim();
    if s.is_empty() {
        return Err(ExprError::Empty);
    }

    if let Some(rest) = s.strip_prefix('*') {
        return Ok(TypeExpr::Pointer(Box::new(parse(rest)?)));
    }
    if let Some(rest) = s.strip_prefix("[]") {
        return Ok(TypeExpr::Slice(Box::new(parse(rest)?)));
    }
    if let Some(caps) = RE_ARRAY.captures(s) {
        let len = caps[1]
            .parse()
            .map_err(|_| ExprError::Invalid(s.to_string()))?;
        return Ok(TypeExpr::Array(len, Box::new(parse(&caps[2])?)));
    }
    if let Some(rest) = s.strip_prefix("map[") {
        let close = matching_bracket(rest).ok_or_else(|| ExprError::Unbalanced(s.to_string()))?;
        let key = parse(&rest[..close])?;
        let value = parse(&rest[close + 1..])?;
        return Ok(TypeExpr::Map(Box::new(key), Box::new(value)));
    }
    if let Some(caps) = RE_RECV_CHAN.captures(s) {
        return Ok(TypeExpr::Chan(ChanDir::Recv, Box::new(parse(&caps[1])?)));
    }
    if let Some(caps) = RE_CHAN.captures(s) {
        let dir = if caps.get(1).is_some() {
            ChanDir::Send
        } else {
            ChanDir::Both
        };
        return Ok(TypeExpr::Chan(dir, Box::new(parse(&caps[2])?)));
    }
    if s == "func" || s.starts_with("func(") || s.starts_with("func (") {
        return Ok(TypeExpr::Func);
    }
    if s == "any" || s == "error" || s.starts_with("interface") {
        return Ok(TypeExpr::Interface);
    }
    if s.starts_with("struct{") || s.starts_with("struct {") {
        return Err(ExprError::InlineStruct(s.to_string()));
    }
    if let Some(caps) = RE_NAMED.captures(s) {
        return Ok(TypeExpr::Named {
            package: caps.get(1).map(|m| m.as_str().to_string()),
            name: caps[2].to_string(),
        });
    }

    Err(ExprError::Invalid(s.to_string()))
}

/// Index of the `]` closing an already-opened `[`.
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
