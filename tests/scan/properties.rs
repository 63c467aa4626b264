use crate::common::parse_object;
use proptest::prelude::*;
use safescan::core::{KeywordObservation, MacroEntry};
use safescan::indicators::keywords::{rank_keywords, rerank};
use safescan::{normalize_response, Pipeline, RawAnalysisResult, RiskLevel};

fn keyword() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("AutoOpen".to_string()),
        Just("Shell".to_string()),
        Just("Chr".to_string()),
        Just("Xor".to_string()),
        Just("Run".to_string()),
        "[A-Za-z_$.]{0,12}",
    ]
}

proptest! {
    #[test]
    fn prepared_scores_are_bounded(
        keywords in prop::collection::vec((keyword(), 0u64..50), 0..30),
        macros in 0usize..4,
        noise in "[ -~\n]{0,400}",
    ) {
        let mut raw = RawAnalysisResult::new("doc.docm").with_tool("olemap", noise);
        for i in 0..macros {
            raw = raw.with_macro(MacroEntry::new(format!("Module{i}"), 10));
        }
        for (k, c) in &keywords {
            raw = raw.with_keyword(k.clone(), *c);
        }
        let payload = Pipeline::default().prepare(&raw);
        let ind = &payload.indicators;

        prop_assert!(payload.risk.score <= 100);
        prop_assert_eq!(payload.risk.level, RiskLevel::from_score(payload.risk.score));
        if !ind.has_macros {
            prop_assert!(!ind.autoexec_detected && !ind.external_exec_detected);
        }
        prop_assert!(ind.urls.len() <= 10);
        prop_assert!(ind.base64_suspects.len() <= 5);
        prop_assert!(ind.top_keywords.len() <= 10);
        prop_assert!(ind.obfuscation_signals.len() <= 10);
        prop_assert!(ind.embedded_object_lines.len() <= 8);
        let mut urls = ind.urls.clone();
        urls.sort();
        urls.dedup();
        prop_assert_eq!(urls.len(), ind.urls.len());
        let mut b64 = ind.base64_suspects.clone();
        b64.sort();
        b64.dedup();
        prop_assert_eq!(b64.len(), ind.base64_suspects.len());
    }

    #[test]
    fn ranking_is_idempotent(
        keywords in prop::collection::vec((keyword(), 0u64..20), 0..40),
    ) {
        let obs: Vec<_> = keywords
            .iter()
            .map(|(k, c)| KeywordObservation::new(k.clone(), *c))
            .collect();
        let ranked = rank_keywords(&obs, 10);
        prop_assert_eq!(rerank(&ranked, 10), ranked.clone());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn normalizer_always_returns_an_object(text in ".{0,300}") {
        let out = normalize_response(&text);
        parse_object(&out);
    }

    #[test]
    fn normalizer_recovers_embedded_objects(
        prefix in "[a-zA-Z][a-zA-Z ,.]{0,40}",
        suffix in "[a-zA-Z ,.]{0,40}",
        score in 0u32..=100,
    ) {
        let object = format!("{{\"risk_score\": {score}}}");
        let out = normalize_response(&format!("{prefix}{object}{suffix}"));
        prop_assert_eq!(out, object);
    }
}
