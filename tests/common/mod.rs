//! Common test utilities and fixtures.
//!
//! Console fixtures mirror what the inspection tools print.

use safescan::core::MacroEntry;
use safescan::RawAnalysisResult;
use serde_json::{json, Value};

pub mod fixtures;

/// Parse an output string, failing the test when it is not a JSON object.
pub fn parse_object(text: &str) -> Value {
    let v: Value = serde_json::from_str(text).expect("output must be valid JSON");
    assert!(v.is_object(), "output must be a JSON object: {text}");
    v
}

/// Check the caller-facing assessment contract.
pub fn assert_assessment_shape(text: &str) {
    let v = parse_object(text);
    let obj = v.as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["reasons", "recommended_actions", "risk_level", "risk_score", "summary"]
    );
    let score = v["risk_score"].as_u64().unwrap();
    assert!(score <= 100);
    let level = v["risk_level"].as_str().unwrap();
    let expected = if score < 40 {
        "low"
    } else if score < 70 {
        "medium"
    } else {
        "high"
    };
    assert_eq!(level, expected);
}

/// Office document with one macro module and the given keyword counts.
pub fn macro_document(keywords: &[(&str, u64)]) -> RawAnalysisResult {
    let mut raw = RawAnalysisResult::new("invoice.docm").with_macro(MacroEntry::new("Module1", 2048));
    for (k, c) in keywords {
        raw = raw.with_keyword(*k, *c);
    }
    raw
}

/// Nested shape emitted by the OLE tool runner.
pub fn tool_runner_document() -> Value {
    json!({
        "ok": true,
        "analysis": {
            "file": "payroll.xlsm",
            "olevba": {
                "has_macros": true,
                "macros": [
                    {"filename": "payroll.xlsm", "stream_path": "xl/vbaProject.bin",
                     "vba_filename": "ThisWorkbook.cls", "code_size": "3100"},
                    {"filename": "payroll.xlsm", "stream_path": "xl/vbaProject.bin",
                     "vba_filename": "Module1.bas", "code_size": 900}
                ],
                "keywords": [
                    {"keyword": "Workbook_Open", "description": "Runs when the workbook opens", "count": 1},
                    {"keyword": "CreateObject", "description": "May create an OLE object", "count": "2"},
                    {"keyword": "StrReverse", "description": "May obfuscate strings"},
                    {"keyword": "Chr", "description": "May obfuscate strings", "count": 14}
                ]
            },
            "oledir": {"tool": "oledir", "ok": true, "stdout": fixtures::OLEDIR, "stderr": ""},
            "oleobj": {"tool": "oleobj", "ok": true, "stdout": fixtures::OLEOBJ, "stderr": ""},
            "olemap": {"tool": "olemap", "ok": false, "stdout": "", "stderr": "not an OLE file"},
            "oletimes": {"tool": "oletimes", "ok": true, "stdout": "Root Entry 2024-01-02", "stderr": ""}
        }
    })
}
