use crate::common::{macro_document, tool_runner_document};
use safescan::indicators::IndicatorExtractor;
use safescan::{FileCategory, Pipeline, RawAnalysisResult, SafescanConfig};

fn extractor() -> IndicatorExtractor {
    IndicatorExtractor::new(&SafescanConfig::default())
}

#[test]
fn tool_runner_shape_end_to_end() {
    let raw = RawAnalysisResult::from_value(&tool_runner_document());
    assert_eq!(raw.file_name, "payroll.xlsm");
    assert_eq!(raw.category, FileCategory::OfficeHwp);

    let ind = extractor().extract(&raw);
    assert!(ind.has_macros);
    assert_eq!(ind.macro_count, 2);
    assert_eq!(ind.total_code_bytes, 4000);
    assert!(ind.autoexec_detected);
    assert!(ind.external_exec_detected);
    assert_eq!(ind.obfuscation_signals, vec!["StrReverse", "Chr"]);

    let top: Vec<_> = ind
        .top_keywords
        .iter()
        .map(|k| (k.keyword.as_str(), k.count))
        .collect();
    assert_eq!(
        top,
        vec![("Chr", 14), ("CreateObject", 2), ("Workbook_Open", 1), ("StrReverse", 1)]
    );

    assert_eq!(
        ind.urls,
        vec![
            "https://cdn.badhost.example/stage2.bin",
            "http://decalage.info/oletools"
        ]
    );
    assert_eq!(
        ind.base64_suspects,
        vec!["TVqQAAMAAAAEAAAA//8AALgAAAAAAAAAQAAAAAAAAAA="]
    );
    assert_eq!(
        ind.embedded_object_lines,
        vec![
            "Parsing OLE Package",
            "Class = Package",
            "Embedded data: TVqQAAMAAAAEAAAA//8AALgAAAAAAAAAQAAAAAAAAAA="
        ]
    );
}

#[test]
fn empty_macro_and_keyword_lists_score_zero() {
    let raw = RawAnalysisResult::new("clean.docx");
    let payload = Pipeline::default().prepare(&raw);
    assert!(!payload.indicators.has_macros);
    assert_eq!(payload.risk.score, 0);
    assert_eq!(payload.risk.level.as_str(), "low");
}

#[test]
fn keywords_without_macros_raise_no_flags() {
    let mut raw = macro_document(&[("AutoOpen", 3), ("Shell", 1), ("Chr", 9)]);
    raw.macros.clear();
    let ind = extractor().extract(&raw);
    assert!(!ind.autoexec_detected);
    assert!(!ind.external_exec_detected);
    assert!(ind.obfuscation_signals.is_empty());
}

#[test]
fn keyword_case_matters() {
    let raw = macro_document(&[("autoopen", 1), ("SHELL", 1)]);
    let ind = extractor().extract(&raw);
    assert!(!ind.autoexec_detected);
    assert!(!ind.external_exec_detected);
}

#[test]
fn custom_rules_are_injected() {
    let mut config = SafescanConfig::default();
    config.rules.office_hwp.autoexec.push("Auto_Close".into());
    let raw = macro_document(&[("Auto_Close", 1)]);
    let ind = IndicatorExtractor::new(&config).extract(&raw);
    assert!(ind.autoexec_detected);
}

#[test]
fn malformed_input_is_total() {
    let raw = RawAnalysisResult::from_value(&serde_json::json!({
        "analysis": {
            "file": "x.doc",
            "olevba": {"macros": [{"code_size": "n/a"}], "keywords": [{"count": 5}]},
            "oledir": {"stdout": 12}
        }
    }));
    let ind = extractor().extract(&raw);
    assert!(ind.has_macros);
    assert_eq!(ind.total_code_bytes, 0);
    assert!(ind.top_keywords.is_empty());
    assert!(ind.urls.is_empty());
}

#[test]
fn odd_keyword_rows_are_coerced_end_to_end() {
    let raw = RawAnalysisResult::from_value(&serde_json::json!({
        "analysis": {
            "file": "odd.docm",
            "olevba": {
                "macros": [{"vba_filename": "Module1.bas", "code_size": 300}],
                "keywords": [
                    {"keyword": "Shell", "count": "abc"},
                    {"keyword": "Chr", "count": null},
                    {"keyword": "  ", "count": 5},
                    {"keyword": "AutoOpen", "count": "0"}
                ]
            }
        }
    }));
    let payload = Pipeline::default().prepare(&raw);
    let ind = &payload.indicators;

    let top: Vec<_> = ind
        .top_keywords
        .iter()
        .map(|k| (k.keyword.as_str(), k.count))
        .collect();
    assert_eq!(top, vec![("Shell", 1), ("Chr", 1)]);
    assert!(ind.autoexec_detected);
    assert!(ind.external_exec_detected);
    assert_eq!(ind.obfuscation_signals, vec!["Chr"]);
    // active 25 + autoexec 30 + external 25 + one obfuscation signal 5
    assert_eq!(payload.risk.score, 85);
}
