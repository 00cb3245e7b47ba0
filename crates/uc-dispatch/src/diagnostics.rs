use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uc_contracts::UCDIAG_SCHEMA_VERSION;
use uc_rt::sig::{ResolveError, TypeParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Parse,
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Location {
    Json { ptr: String },
}

impl Location {
    pub fn ptr(&self) -> &str {
        match self {
            Location::Json { ptr } => ptr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Value>,
}

impl Diagnostic {
    pub fn error(code: &str, stage: Stage, message: String) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            stage,
            message,
            loc: None,
            data: BTreeMap::new(),
        }
    }

    pub fn at(mut self, ptr: String) -> Self {
        self.loc = Some(Location::Json { ptr });
        self
    }

    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    pub fn from_resolve_error(err: &ResolveError) -> Self {
        Self::error(err.code, Stage::Type, err.message.clone())
    }

    pub fn from_type_parse_error(err: &TypeParseError) -> Self {
        Self::error("UC-PARSE-0001", Stage::Parse, err.to_string())
            .with_data("input", Value::String(err.input.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub schema_version: String,
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, Value>,
}

impl Report {
    pub fn ok() -> Self {
        Self {
            schema_version: UCDIAG_SCHEMA_VERSION.to_string(),
            ok: true,
            diagnostics: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_diagnostics(mut self, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by(|a, b| {
            let ap = a.loc.as_ref().map(Location::ptr).unwrap_or("");
            let bp = b.loc.as_ref().map(Location::ptr).unwrap_or("");
            cmp_ptr(ap, bp)
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.message.cmp(&b.message))
        });
        self.ok = diagnostics.iter().all(|d| d.severity != Severity::Error);
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_meta(mut self, key: &str, value: Value) -> Self {
        self.meta.insert(key.to_string(), value);
        self
    }
}

/// Orders JSON pointers segment by segment; array indices compare numerically, so
/// `/calls/2` sorts before `/calls/10`.
fn cmp_ptr(a: &str, b: &str) -> Ordering {
    let mut a_segs = a.split('/');
    let mut b_segs = b.split('/');
    loop {
        match (a_segs.next(), b_segs.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Escapes one reference token for use in a JSON pointer (RFC 6901).
pub fn ptr_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
