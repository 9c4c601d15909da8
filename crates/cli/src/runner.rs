//! Conformance suite runner.
//!
//! Convention:
//!   positive/  -- *.md + *.expected.json (parse succeeds, output matches)
//!   negative/  -- *.md + *.expected-error.json (structural error expected)
//!   findings/  -- *.md + *.expected-findings.json (parse succeeds, the
//!                 validation pass reports exactly the listed findings)

use crate::tap::Tap;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct RunResult {
    pub failed: usize,
}

pub fn run_suite(suite_dir: &Path) -> RunResult {
    let mut tap = Tap::new();

    run_positive_tests(suite_dir, &mut tap);
    run_negative_tests(suite_dir, &mut tap);
    run_findings_tests(suite_dir, &mut tap);

    let failed = tap.failure_count();
    tap.finish();

    RunResult { failed }
}

fn run_positive_tests(suite_dir: &Path, tap: &mut Tap) {
    let dir = suite_dir.join("positive");
    if !dir.exists() {
        return;
    }
    let mut entries = glob_markdown_files(&dir);
    entries.sort();
    for md_path in &entries {
        let name = format!("positive/{}", stem(md_path));
        let expected_path = dir.join(format!("{}.expected.json", stem(md_path)));
        if !expected_path.exists() {
            tap.not_ok(
                &name,
                format!("missing expected file: {}", expected_path.display()),
            );
            continue;
        }

        let expected = match read_json(&expected_path) {
            Ok(v) => v,
            Err(e) => {
                tap.not_ok(&name, e);
                continue;
            }
        };

        match parse_fixture(md_path) {
            Ok(doc) => {
                let got = stepform_core::serialize(&doc);
                if json_equal(&got, &expected) {
                    tap.ok(&name);
                } else {
                    let diff = json_diff(&expected, &got);
                    tap.not_ok(&name, format!("output mismatch:\n{}", diff));
                }
            }
            Err(e) => {
                tap.not_ok(&name, e);
            }
        }
    }
}

fn run_negative_tests(suite_dir: &Path, tap: &mut Tap) {
    let dir = suite_dir.join("negative");
    if !dir.exists() {
        return;
    }
    let mut entries = glob_markdown_files(&dir);
    entries.sort();
    for md_path in &entries {
        let name = format!("negative/{}", stem(md_path));
        let expected_path = dir.join(format!("{}.expected-error.json", stem(md_path)));
        if !expected_path.exists() {
            tap.not_ok(
                &name,
                format!("missing expected-error file: {}", expected_path.display()),
            );
            continue;
        }

        let expected_error = match read_json(&expected_path) {
            Ok(v) => v,
            Err(e) => {
                tap.not_ok(&name, e);
                continue;
            }
        };

        let src = match std::fs::read_to_string(md_path) {
            Ok(s) => s,
            Err(e) => {
                tap.not_ok(&name, format!("cannot read {}: {}", md_path.display(), e));
                continue;
            }
        };

        match stepform_core::parse(&src, &file_name(md_path)) {
            Err(got_error) => {
                let got_json = got_error.to_json_value();
                if json_equal(&got_json, &expected_error) {
                    tap.ok(&name);
                } else {
                    let diff = json_diff(&expected_error, &got_json);
                    tap.not_ok(&name, format!("error mismatch:\n{}", diff));
                }
            }
            Ok(_) => {
                tap.not_ok(&name, "expected a structural parse error but parsing succeeded");
            }
        }
    }
}

fn run_findings_tests(suite_dir: &Path, tap: &mut Tap) {
    let dir = suite_dir.join("findings");
    if !dir.exists() {
        return;
    }
    let mut entries = glob_markdown_files(&dir);
    entries.sort();
    for md_path in &entries {
        let name = format!("findings/{}", stem(md_path));
        let expected_path = dir.join(format!("{}.expected-findings.json", stem(md_path)));
        if !expected_path.exists() {
            tap.not_ok(
                &name,
                format!(
                    "missing expected-findings file: {}",
                    expected_path.display()
                ),
            );
            continue;
        }

        let expected = match read_json(&expected_path) {
            Ok(v) => v,
            Err(e) => {
                tap.not_ok(&name, e);
                continue;
            }
        };

        match parse_fixture(md_path) {
            Ok(doc) => {
                let findings: Vec<Value> = stepform_core::validate(&doc)
                    .iter()
                    .map(|f| f.to_json_value())
                    .collect();
                let got = Value::Array(findings);
                if json_equal(&got, &expected) {
                    tap.ok(&name);
                } else {
                    let diff = json_diff(&expected, &got);
                    tap.not_ok(&name, format!("findings mismatch:\n{}", diff));
                }
            }
            Err(e) => {
                tap.not_ok(&name, e);
            }
        }
    }
}

// -- Helpers --

fn parse_fixture(md_path: &Path) -> Result<stepform_core::Document, String> {
    let src = std::fs::read_to_string(md_path)
        .map_err(|e| format!("cannot read {}: {}", md_path.display(), e))?;
    stepform_core::parse(&src, &file_name(md_path))
        .map_err(|e| format!("unexpected parse error ({}): {}", e.stage, e.message))
}

fn glob_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("md") {
                results.push(path);
            }
        }
    }
    results
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> Result<Value, String> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&src).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

/// Deep equality of two JSON values, normalizing number types.
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(am), Value::Object(bm)) => {
            if am.len() != bm.len() {
                return false;
            }
            am.iter()
                .all(|(k, v)| bm.get(k).is_some_and(|bv| json_equal(v, bv)))
        }
        (Value::Array(av), Value::Array(bv)) => {
            av.len() == bv.len() && av.iter().zip(bv).all(|(a, b)| json_equal(a, b))
        }
        (Value::Number(an), Value::Number(bn)) => an.as_f64() == bn.as_f64(),
        (Value::Null, Value::Null) => true,
        _ => a == b,
    }
}

fn json_diff(expected: &Value, got: &Value) -> String {
    let exp_str = serde_json::to_string_pretty(expected).unwrap_or_default();
    let got_str = serde_json::to_string_pretty(got).unwrap_or_default();
    format!("--- expected\n{}\n+++ got\n{}", exp_str, got_str)
}
