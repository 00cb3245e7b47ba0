//! Batch resolution of builtin call sites, as a front end would submit them.
//!
//! Input document:
//!
//! ```json
//! {
//!   "records": { "foo": "int", "bar": null },
//!   "calls": [
//!     { "op": "add", "args": ["int", "float"] },
//!     { "op": "length", "args": ["foo"] },
//!     { "op": "id", "args": ["bar"] }
//!   ]
//! }
//! ```
//!
//! `records` maps each record type to the type of its `length` field, or `null` when
//! it has none.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uc_rt::sig::{resolve_add, resolve_id, resolve_length, RecordTable, ResolveError, StaticType};

use crate::diagnostics::{ptr_token, Diagnostic, Report, Severity, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Length,
    Id,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Length => "length",
            Op::Id => "id",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Op::Add => 2,
            Op::Length | Op::Id => 1,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallSite {
    pub op: Op,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInput {
    #[serde(default)]
    pub records: BTreeMap<String, Option<String>>,
    pub calls: Vec<CallSite>,
}

/// Result type of one builtin call. `args.len()` must equal `op.arity()`.
pub fn resolve_call(
    op: Op,
    args: &[StaticType],
    records: &RecordTable,
) -> Result<StaticType, ResolveError> {
    match (op, args) {
        (Op::Add, [lhs, rhs]) => resolve_add(lhs, rhs),
        (Op::Length, [recv]) => resolve_length(recv, records),
        (Op::Id, [operand]) => resolve_id(operand),
        _ => Err(ResolveError {
            code: "UC-CHECK-0002",
            message: format!(
                "{op} takes {} operand(s), got {}",
                op.arity(),
                args.len()
            ),
        }),
    }
}

pub fn check(input: &CheckInput) -> Report {
    let mut diagnostics = Vec::new();

    let mut records = RecordTable::new();
    // Records whose length type did not parse. Their `.length` call sites get no
    // diagnostic of their own; the declaration already carries the error.
    let mut broken_length: BTreeSet<&str> = BTreeSet::new();
    for (name, length) in &input.records {
        let ptr = format!("/records/{}", ptr_token(name));
        match StaticType::parse(name) {
            Ok(StaticType::Record(_)) => {}
            Ok(other) => {
                diagnostics.push(
                    Diagnostic::error(
                        "UC-PARSE-0001",
                        Stage::Parse,
                        format!("{other} is not a record type name"),
                    )
                    .at(ptr),
                );
                continue;
            }
            Err(err) => {
                diagnostics.push(Diagnostic::from_type_parse_error(&err).at(ptr));
                continue;
            }
        }
        let length = match length.as_deref().map(StaticType::parse).transpose() {
            Ok(length) => length,
            Err(err) => {
                diagnostics.push(Diagnostic::from_type_parse_error(&err).at(ptr));
                broken_length.insert(name.as_str());
                records.declare(name, None);
                continue;
            }
        };
        if let Some(ty) = &length {
            if ty.num_kind().is_none() {
                diagnostics.push(Diagnostic {
                    severity: Severity::Warning,
                    ..Diagnostic::error(
                        "UC-CHECK-0003",
                        Stage::Type,
                        format!("length field of record {name} has non-numeric type {ty}"),
                    )
                    .at(ptr)
                });
            }
        }
        records.declare(name, length);
    }

    let mut results = Vec::with_capacity(input.calls.len());
    for (i, call) in input.calls.iter().enumerate() {
        let ptr = format!("/calls/{i}");
        let args: Result<Vec<StaticType>, _> =
            call.args.iter().map(|a| StaticType::parse(a)).collect();
        let args = match args {
            Ok(args) => args,
            Err(err) => {
                diagnostics.push(Diagnostic::from_type_parse_error(&err).at(ptr));
                results.push(Value::Null);
                continue;
            }
        };
        if let (Op::Length, [StaticType::Record(name)]) = (call.op, args.as_slice()) {
            if broken_length.contains(name.as_str()) {
                results.push(Value::Null);
                continue;
            }
        }
        match resolve_call(call.op, &args, &records) {
            Ok(ty) => results.push(Value::String(ty.to_string())),
            Err(err) => {
                let stage = if err.code == "UC-CHECK-0002" {
                    Stage::Parse
                } else {
                    Stage::Type
                };
                diagnostics.push(
                    Diagnostic {
                        stage,
                        ..Diagnostic::from_resolve_error(&err)
                    }
                    .at(ptr)
                    .with_data("op", Value::String(call.op.as_str().to_string())),
                );
                results.push(Value::Null);
            }
        }
    }

    Report::ok()
        .with_diagnostics(diagnostics)
        .with_meta("results", Value::Array(results))
}
