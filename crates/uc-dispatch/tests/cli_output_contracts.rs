use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;
use uc_contracts::{
    UCDIAG_SCHEMA_VERSION, UC_DISPATCH_RESOLVE_REPORT_SCHEMA_VERSION,
    UC_DISPATCH_TABLE_REPORT_SCHEMA_VERSION,
};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir(prefix: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    base.join(format!("{prefix}_{pid}_{n}"))
}

fn run(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_uc-dispatch");
    Command::new(bin)
        .args(args)
        .output()
        .expect("run uc-dispatch")
}

fn stdout_json(out: &Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).unwrap_or_else(|err| {
        panic!(
            "parse report json: {err}\nstdout={}\nstderr={}",
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        )
    })
}

#[test]
fn cli_resolve_add_prints_result_type() {
    let out = run(&["resolve", "add", "int", "float"]);
    assert!(
        out.status.success(),
        "status={}\nstderr={}",
        out.status,
        String::from_utf8_lossy(&out.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "float");

    let out = run(&["resolve", "add", "boolean", "string"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "string");
}

#[test]
fn cli_resolve_report_json_is_stable() {
    let ok_out = run(&["resolve", "add", "int", "long", "--report-json"]);
    assert!(ok_out.status.success());
    let v = stdout_json(&ok_out);
    assert_eq!(
        v.get("schema_version").and_then(|s| s.as_str()),
        Some(UC_DISPATCH_RESOLVE_REPORT_SCHEMA_VERSION)
    );
    assert_eq!(v.get("op").and_then(|s| s.as_str()), Some("add"));
    assert_eq!(v.get("operands"), Some(&json!(["int", "long"])));
    assert_eq!(v.get("ok").and_then(|b| b.as_bool()), Some(true));
    assert_eq!(v.get("result").and_then(|s| s.as_str()), Some("long"));
    assert_eq!(v.get("diagnostics_count").and_then(|n| n.as_u64()), Some(0));
    assert_eq!(v.get("exit_code").and_then(|n| n.as_u64()), Some(0));

    let bad_out = run(&["resolve", "add", "boolean", "int", "--report-json"]);
    assert_eq!(bad_out.status.code(), Some(1));
    let v = stdout_json(&bad_out);
    assert_eq!(v.get("ok").and_then(|b| b.as_bool()), Some(false));
    assert!(v.get("result").is_none());
    assert_eq!(v.get("exit_code").and_then(|n| n.as_u64()), Some(1));
    assert_eq!(
        v.pointer("/diagnostics/0/code").and_then(|s| s.as_str()),
        Some("UC-ADD-0004")
    );
    assert_eq!(
        v.pointer("/diagnostics/0/stage").and_then(|s| s.as_str()),
        Some("type")
    );
}

#[test]
fn cli_resolve_length_uses_declared_records() {
    let out = run(&["resolve", "length", "foo", "--record", "foo=long"]);
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "long");

    let out = run(&["resolve", "length", "bar", "--record", "bar"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("UC-LEN-0002"));

    let out = run(&["resolve", "length", "int[][]"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "int");
}

#[test]
fn cli_resolve_id_accepts_references_only() {
    let out = run(&["resolve", "id", "foo"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "long");

    let out = run(&["resolve", "id", "string"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("UC-ID-0001"));
}

#[test]
fn cli_bad_type_name_is_usage_error() {
    let out = run(&["resolve", "add", "int", "not-a-type"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn cli_resolve_wrong_operand_count_is_usage_error() {
    for args in [
        &["resolve", "add", "int"][..],
        &["resolve", "length", "int[]", "int[]"][..],
        &["resolve", "id", "--report-json"][..],
    ] {
        let out = run(args);
        assert_eq!(out.status.code(), Some(2), "args={args:?}");
        assert!(out.stdout.is_empty(), "args={args:?}");
        assert!(
            String::from_utf8_lossy(&out.stderr).contains("operand type(s)"),
            "args={args:?}\nstderr={}",
            String::from_utf8_lossy(&out.stderr)
        );
    }
}

#[test]
fn cli_table_report_json_counts_legal_pairs() {
    let out = run(&["table", "--report-json"]);
    assert!(out.status.success());
    let v = stdout_json(&out);
    assert_eq!(
        v.get("schema_version").and_then(|s| s.as_str()),
        Some(UC_DISPATCH_TABLE_REPORT_SCHEMA_VERSION)
    );
    assert_eq!(v.get("legal_count").and_then(|n| n.as_u64()), Some(18));
    let entries = v.get("entries").and_then(|e| e.as_array()).expect("entries");
    assert_eq!(entries.len(), 81);
    assert!(entries.iter().any(|e| e == &json!({
        "lhs": "int",
        "rhs": "float",
        "ok": true,
        "result": "float"
    })));
}

#[test]
fn cli_table_text_lists_pairs() {
    let out = run(&["table"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.lines().any(|l| l == "string + boolean = string"));
    assert!(text.lines().any(|l| l == "boolean + boolean: UC-ADD-0004"));
}

#[test]
fn cli_render_uses_canonical_text() {
    let cases = [
        (["render", "float", "5.5"], "5.5"),
        (["render", "float", "5"], "5"),
        (["render", "float", "-2.0"], "-2"),
        (["render", "int", "-42"], "-42"),
        (["render", "long", "9000000000"], "9000000000"),
        (["render", "boolean", "true"], "true"),
    ];
    for (args, want) in cases {
        let out = run(&args);
        assert!(
            out.status.success(),
            "args={args:?}\nstderr={}",
            String::from_utf8_lossy(&out.stderr)
        );
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), want, "args={args:?}");
    }

    let out = run(&["render", "int[]", "1"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn cli_check_reports_per_call_diagnostics() {
    let dir = temp_dir("uc_dispatch_cli_check");
    std::fs::create_dir_all(&dir).expect("create temp dir");

    let ok_path = dir.join("ok.json");
    let ok_doc = json!({
        "records": {"foo": "int"},
        "calls": [
            {"op": "add", "args": ["string", "int"]},
            {"op": "length", "args": ["foo"]}
        ]
    });
    std::fs::write(&ok_path, ok_doc.to_string()).expect("write ok input");

    let out = run(&["check", "--input", ok_path.to_str().expect("utf-8 path")]);
    assert!(out.status.success());
    let v = stdout_json(&out);
    assert_eq!(
        v.get("schema_version").and_then(|s| s.as_str()),
        Some(UCDIAG_SCHEMA_VERSION)
    );
    assert_eq!(v.pointer("/meta/results"), Some(&json!(["string", "int"])));

    let bad_path = dir.join("bad.json");
    let bad_doc = json!({
        "calls": [
            {"op": "add", "args": ["int", "boolean"]}
        ]
    });
    std::fs::write(&bad_path, bad_doc.to_string()).expect("write bad input");

    let out = run(&["check", "--input", bad_path.to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(1));
    let v = stdout_json(&out);
    assert_eq!(v.get("ok").and_then(|b| b.as_bool()), Some(false));
    assert_eq!(
        v.pointer("/diagnostics/0/code").and_then(|s| s.as_str()),
        Some("UC-ADD-0005")
    );
    assert_eq!(
        v.pointer("/diagnostics/0/loc/ptr").and_then(|s| s.as_str()),
        Some("/calls/0")
    );

    let out = run(&["check", "--input", dir.join("missing.json").to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(2));

    let _ = std::fs::remove_dir_all(&dir);
}
