use crate::common::assert_assessment_shape;
use safescan::config::SummarizerConfig;
use safescan::FallbackGenerator;
use serde_json::{json, Value};

#[test]
fn resource_exhausted_gives_exact_quota_fallback() {
    let gen = FallbackGenerator::default();
    let out = gen.for_error("google.genai.errors.ClientError: 429 RESOURCE_EXHAUSTED. Quota exceeded");
    assert_eq!(out, FallbackGenerator::quota());

    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        v,
        json!({
            "summary": "The summarization service quota has been exceeded. Please try again shortly.",
            "risk_score": 0,
            "risk_level": "low",
            "reasons": ["AI analysis could not run because the service quota was exceeded"],
            "recommended_actions": [
                "Refer to the static analysis results",
                "Retry in a minute or raise the service quota"
            ]
        })
    );
}

#[test]
fn every_fallback_honors_the_contract() {
    let gen = FallbackGenerator::default();
    for out in [
        FallbackGenerator::empty(),
        FallbackGenerator::quota(),
        gen.error("socket closed"),
        gen.for_error(""),
    ] {
        assert_assessment_shape(&out);
    }
}

#[test]
fn generic_error_quotes_a_bounded_excerpt() {
    let gen = FallbackGenerator::new(&SummarizerConfig {
        error_excerpt_chars: 10,
        ..SummarizerConfig::default()
    });
    let v: Value = serde_json::from_str(&gen.for_error("connection refused by upstream")).unwrap();
    assert_eq!(v["reasons"], json!(["Error: connection"]));
    assert_eq!(v["summary"], "An error occurred during AI analysis.");
}
