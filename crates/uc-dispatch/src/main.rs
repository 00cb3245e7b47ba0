use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use uc_contracts::{
    UC_DISPATCH_RESOLVE_REPORT_SCHEMA_VERSION, UC_DISPATCH_TABLE_REPORT_SCHEMA_VERSION,
};
use uc_dispatch::check::{self, CheckInput, Op};
use uc_dispatch::diagnostics::Diagnostic;
use uc_dispatch::table;
use uc_rt::sig::{RecordTable, StaticType};
use uc_rt::{NumKind, UcBoolean, UcFloat, UcInt, UcLong, UcText};

#[derive(Parser)]
#[command(name = "uc-dispatch")]
#[command(about = "Static resolution of the uC builtins +, .length and #.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Resolve one builtin call from its operand types.
    Resolve {
        #[arg(value_enum)]
        op: Op,
        #[arg(value_name = "TYPE")]
        args: Vec<StaticType>,
        /// Record type known to the resolver, optionally with its length field type.
        #[arg(long = "record", value_name = "NAME[=TYPE]")]
        records: Vec<RecordDecl>,
        #[arg(long)]
        report_json: bool,
    },
    /// Print the legality and result type of `+` for every operand pair.
    Table {
        #[arg(long)]
        report_json: bool,
    },
    /// Resolve a batch of call sites from a JSON document and print a diagnostics report.
    Check {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the canonical text of a primitive value, as string `+` renders it.
    Render {
        #[arg(value_name = "TYPE")]
        ty: StaticType,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Debug, Clone)]
struct RecordDecl {
    name: String,
    length: Option<StaticType>,
}

impl FromStr for RecordDecl {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, length) = match s.split_once('=') {
            Some((name, ty)) => (name.trim(), Some(StaticType::parse(ty)?)),
            None => (s.trim(), None),
        };
        match StaticType::parse(name)? {
            StaticType::Record(name) => Ok(RecordDecl { name, length }),
            other => bail!("{other} is not a record type name"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResolveReport {
    schema_version: &'static str,
    op: &'static str,
    operands: Vec<String>,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    diagnostics_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
    exit_code: u8,
}

#[derive(Debug, Serialize)]
struct TableReport {
    schema_version: &'static str,
    operands: Vec<String>,
    legal_count: usize,
    entries: Vec<table::AddTableEntry>,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Resolve {
            op,
            args,
            records,
            report_json,
        } => cmd_resolve(op, &args, &records, report_json),
        Cmd::Table { report_json } => cmd_table(report_json),
        Cmd::Check { input } => cmd_check(&input),
        Cmd::Render { ty, value } => cmd_render(&ty, &value),
    }
}

fn cmd_resolve(
    op: Op,
    args: &[StaticType],
    decls: &[RecordDecl],
    report_json: bool,
) -> Result<ExitCode> {
    if args.len() != op.arity() {
        bail!(
            "resolve {op} takes {} operand type(s), got {}",
            op.arity(),
            args.len()
        );
    }

    let mut records = RecordTable::new();
    for decl in decls {
        records.declare(&decl.name, decl.length.clone());
    }

    let res = check::resolve_call(op, args, &records);
    let exit_code: u8 = if res.is_ok() { 0 } else { 1 };

    if report_json {
        let diagnostics: Vec<Diagnostic> = res
            .as_ref()
            .err()
            .map(Diagnostic::from_resolve_error)
            .into_iter()
            .collect();
        let report = ResolveReport {
            schema_version: UC_DISPATCH_RESOLVE_REPORT_SCHEMA_VERSION,
            op: op.as_str(),
            operands: args.iter().map(|a| a.to_string()).collect(),
            ok: res.is_ok(),
            result: res.as_ref().ok().map(|t| t.to_string()),
            diagnostics_count: diagnostics.len(),
            diagnostics,
            exit_code,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &res {
            Ok(ty) => println!("{ty}"),
            Err(err) => eprintln!("error[{}]: {}", err.code, err.message),
        }
    }

    Ok(ExitCode::from(exit_code))
}

fn cmd_table(report_json: bool) -> Result<ExitCode> {
    let operands = table::operand_universe();
    let entries = table::add_table(&operands);

    if report_json {
        let report = TableReport {
            schema_version: UC_DISPATCH_TABLE_REPORT_SCHEMA_VERSION,
            operands: operands.iter().map(|t| t.to_string()).collect(),
            legal_count: entries.iter().filter(|e| e.ok).count(),
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    for e in &entries {
        match (&e.result, &e.code) {
            (Some(result), _) => println!("{} + {} = {}", e.lhs, e.rhs, result),
            (None, Some(code)) => println!("{} + {}: {}", e.lhs, e.rhs, code),
            (None, None) => println!("{} + {}: ?", e.lhs, e.rhs),
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(path: &Path) -> Result<ExitCode> {
    let bytes = std::fs::read(path).with_context(|| format!("read: {}", path.display()))?;
    let input: CheckInput = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse check input: {}", path.display()))?;

    let report = check::check(&input);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn cmd_render(ty: &StaticType, value: &str) -> Result<ExitCode> {
    let text = match ty {
        StaticType::Num(NumKind::Int) => parse_value::<UcInt>(ty, value)?.to_text(),
        StaticType::Num(NumKind::Long) => parse_value::<UcLong>(ty, value)?.to_text(),
        StaticType::Num(NumKind::Float) => parse_value::<UcFloat>(ty, value)?.to_text(),
        StaticType::Boolean => parse_value::<UcBoolean>(ty, value)?.to_text(),
        StaticType::String => value.to_string(),
        other => bail!("type {other} has no canonical text form"),
    };
    println!("{text}");
    Ok(ExitCode::SUCCESS)
}

fn parse_value<T>(ty: &StaticType, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("invalid {ty} literal {value:?}"))
}
