//! Static typing rules of the three builtins, as data.
//!
//! The trait impls in [`crate::add`], [`crate::length`] and [`crate::identity`] are the
//! authority at build time. This module states the same rules over uC type names so a
//! code generator can compute result types and report rejected calls before emitting
//! any code.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::numeric::{promote, NumKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StaticType {
    Num(NumKind),
    Boolean,
    String,
    Void,
    Null,
    Array(Box<StaticType>),
    Record(String),
}

impl StaticType {
    pub const INT: StaticType = StaticType::Num(NumKind::Int);
    pub const LONG: StaticType = StaticType::Num(NumKind::Long);
    pub const FLOAT: StaticType = StaticType::Num(NumKind::Float);

    pub fn array_of(elem: StaticType) -> Self {
        StaticType::Array(Box::new(elem))
    }

    pub fn record(name: &str) -> Self {
        StaticType::Record(name.to_string())
    }

    pub fn num_kind(&self) -> Option<NumKind> {
        match self {
            StaticType::Num(k) => Some(*k),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, StaticType::Array(_) | StaticType::Record(_))
    }

    pub fn is_void_or_null(&self) -> bool {
        matches!(self, StaticType::Void | StaticType::Null)
    }

    pub fn parse(s: &str) -> Result<Self, TypeParseError> {
        let s = s.trim();
        if let Some(elem) = s.strip_suffix("[]") {
            let elem = StaticType::parse(elem)?;
            if elem.is_void_or_null() {
                return Err(TypeParseError::new(s, "array element type cannot be void or null"));
            }
            return Ok(StaticType::array_of(elem));
        }
        if let Some(k) = NumKind::parse(s) {
            return Ok(StaticType::Num(k));
        }
        match s {
            "boolean" => Ok(StaticType::Boolean),
            "string" => Ok(StaticType::String),
            "void" => Ok(StaticType::Void),
            "null" => Ok(StaticType::Null),
            _ if is_ident(s) => Ok(StaticType::Record(s.to_string())),
            _ => Err(TypeParseError::new(s, "not a type name")),
        }
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticType::Num(k) => f.write_str(k.as_str()),
            StaticType::Boolean => f.write_str("boolean"),
            StaticType::String => f.write_str("string"),
            StaticType::Void => f.write_str("void"),
            StaticType::Null => f.write_str("null"),
            StaticType::Array(elem) => write!(f, "{elem}[]"),
            StaticType::Record(name) => f.write_str(name),
        }
    }
}

impl FromStr for StaticType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaticType::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParseError {
    pub input: String,
    pub reason: &'static str,
}

impl TypeParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for TypeParseError {}

/// Record types known to the resolver, with the type of each one's `length` field.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    records: BTreeMap<String, Option<StaticType>>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, length: Option<StaticType>) -> &mut Self {
        self.records.insert(name.to_string(), length);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn length_field(&self, name: &str) -> Option<&StaticType> {
        self.records.get(name).and_then(|l| l.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    pub code: &'static str,
    pub message: String,
}

impl ResolveError {
    fn new(code: &'static str, message: String) -> Self {
        Self { code, message }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ResolveError {}

/// Result type of `lhs + rhs`. Checks run in the uC checker's order so the first
/// violated rule is the one reported.
pub fn resolve_add(lhs: &StaticType, rhs: &StaticType) -> Result<StaticType, ResolveError> {
    if lhs.is_reference() || rhs.is_reference() {
        return Err(ResolveError::new(
            "UC-ADD-0001",
            format!("lhs and rhs operands must be primitive types, got {lhs} and {rhs}"),
        ));
    }
    if lhs.is_void_or_null() {
        return Err(ResolveError::new(
            "UC-ADD-0002",
            format!("lhs operand cannot be of type {lhs}"),
        ));
    }
    if rhs.is_void_or_null() {
        return Err(ResolveError::new(
            "UC-ADD-0003",
            format!("rhs operand cannot be of type {rhs}"),
        ));
    }
    if *lhs == StaticType::Boolean && *rhs != StaticType::String {
        return Err(ResolveError::new(
            "UC-ADD-0004",
            format!("lhs operand is of type boolean, so rhs must be of type string, got {rhs}"),
        ));
    }
    if *rhs == StaticType::Boolean && *lhs != StaticType::String {
        return Err(ResolveError::new(
            "UC-ADD-0005",
            format!("rhs operand is of type boolean, so lhs must be of type string, got {lhs}"),
        ));
    }
    if *lhs == StaticType::String || *rhs == StaticType::String {
        return Ok(StaticType::String);
    }
    match (lhs.num_kind(), rhs.num_kind()) {
        (Some(a), Some(b)) => Ok(StaticType::Num(promote(a, b))),
        _ => Err(ResolveError::new(
            "UC-ADD-0006",
            format!("no + for {lhs} and {rhs}"),
        )),
    }
}

/// Result type of `recv.length`.
pub fn resolve_length(
    recv: &StaticType,
    records: &RecordTable,
) -> Result<StaticType, ResolveError> {
    match recv {
        StaticType::Array(_) => Ok(StaticType::INT),
        StaticType::Record(name) => {
            if !records.contains(name) {
                return Err(ResolveError::new(
                    "UC-LEN-0003",
                    format!("unknown record type {name}"),
                ));
            }
            records.length_field(name).cloned().ok_or_else(|| {
                ResolveError::new(
                    "UC-LEN-0002",
                    format!("record type {name} has no length field"),
                )
            })
        }
        _ => Err(ResolveError::new(
            "UC-LEN-0001",
            format!("receiver must be user-defined type or array type, but was {recv}"),
        )),
    }
}

/// Result type of `#operand`.
pub fn resolve_id(operand: &StaticType) -> Result<StaticType, ResolveError> {
    if operand.is_reference() {
        Ok(StaticType::LONG)
    } else {
        Err(ResolveError::new(
            "UC-ID-0001",
            format!("subexpression was of type {operand}, but must be of reference type"),
        ))
    }
}
