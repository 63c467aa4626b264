use crate::common::{macro_document, tool_runner_document};
use safescan::core::ScoreContribution;
use safescan::scoring::{RiskScorer, ScoreEngine, WeightTable};
use safescan::{FileCategory, IndicatorSet, Pipeline, RawAnalysisResult, RiskLevel};

#[test]
fn autoopen_shell_chr_with_macros_is_85_high() {
    let raw = macro_document(&[("AutoOpen", 1), ("Shell", 2), ("Chr", 3)]);
    let payload = Pipeline::default().prepare(&raw);
    assert_eq!(payload.risk.score, 85);
    assert_eq!(payload.risk.level, RiskLevel::High);
    assert_eq!(
        payload.risk.contributions,
        vec![
            ScoreContribution { signal: "active_content".into(), points: 25 },
            ScoreContribution { signal: "autoexec".into(), points: 30 },
            ScoreContribution { signal: "external_exec".into(), points: 25 },
            ScoreContribution { signal: "obfuscation".into(), points: 5 },
        ]
    );
}

#[test]
fn tool_runner_document_scores_high() {
    let raw = RawAnalysisResult::from_value(&tool_runner_document());
    let payload = Pipeline::default().prepare(&raw);
    // 25 + 30 + 25 + 2 obfuscation * 5 + 2 urls * 2
    assert_eq!(payload.risk.score, 94);
}

fn score_for(points: u32) -> u32 {
    // one weight table whose only non-zero term is the active-content flag
    let weights = WeightTable {
        active_content: points,
        autoexec: 0,
        external_exec: 0,
        obfuscation_each: 0,
        obfuscation_cap: 0,
        url_each: 0,
        url_cap: 0,
    };
    let ind = IndicatorSet {
        has_macros: true,
        ..IndicatorSet::default()
    };
    ScoreEngine::score_with(&weights, &ind).score
}

#[test]
fn level_boundaries() {
    for (points, level) in [
        (0, RiskLevel::Low),
        (39, RiskLevel::Low),
        (40, RiskLevel::Medium),
        (69, RiskLevel::Medium),
        (70, RiskLevel::High),
        (100, RiskLevel::High),
    ] {
        let score = score_for(points);
        assert_eq!(score, points);
        assert_eq!(RiskLevel::from_score(score), level, "score {score}");
    }
    assert_eq!(score_for(250), 100);
}

#[test]
fn url_term_alone_stays_low() {
    let ind = IndicatorSet {
        urls: (0..10).map(|i| format!("http://h{i}.example/x")).collect(),
        ..IndicatorSet::default()
    };
    let s = ScoreEngine::default().score(FileCategory::OfficeHwp, &ind);
    assert_eq!(s.score, 10);
    assert_eq!(s.level, RiskLevel::Low);
}

#[test]
fn configured_weights_are_used() {
    let mut config = safescan::SafescanConfig::default();
    config.scoring.office_hwp.autoexec = 60;
    let raw = macro_document(&[("AutoOpen", 1)]);
    let payload = Pipeline::new(config).prepare(&raw);
    assert_eq!(payload.risk.score, 85);
}
