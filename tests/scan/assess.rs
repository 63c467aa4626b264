use crate::common::{assert_assessment_shape, macro_document, parse_object, tool_runner_document};
use safescan::summarizer::ScriptedSummarizer;
use safescan::{cancel_pair, CancelToken, FallbackGenerator, Pipeline, SafescanConfig};
use std::time::Duration;

#[tokio::test]
async fn full_chain_with_fenced_reply() {
    let reply = "```json\n{\"summary\": \"s\", \"risk_score\": 91, \"risk_level\": \"high\", \"reasons\": [], \"recommended_actions\": [\"a\", \"b\"]}\n```";
    let summarizer = ScriptedSummarizer::reply(reply);
    let out = Pipeline::default()
        .assess_value(&tool_runner_document(), &summarizer, &CancelToken::never())
        .await;
    assert_assessment_shape(&out);
    assert_eq!(parse_object(&out)["risk_score"], 91);

    let message = summarizer.last_user_message().unwrap();
    assert!(message.starts_with("File: payroll.xlsm\n\nAnalysis:\n"));
    let body = message.split_once("Analysis:\n").unwrap().1;
    let payload = parse_object(body);
    assert_eq!(payload["risk"]["score"], 94);
    assert_eq!(payload["category"], "office_hwp");
    assert_eq!(payload["indicators"]["macro_count"], 2);
}

#[tokio::test]
async fn quota_failure_returns_quota_fallback() {
    let summarizer = ScriptedSummarizer::failing("RESOURCE_EXHAUSTED: quota metric exceeded");
    let raw = macro_document(&[("AutoOpen", 1)]);
    let out = Pipeline::default()
        .assess(&raw, &summarizer, &CancelToken::never())
        .await;
    assert_eq!(out, FallbackGenerator::quota());
}

#[tokio::test]
async fn generic_failure_returns_error_fallback() {
    let summarizer = ScriptedSummarizer::failing("dns lookup failed");
    let raw = macro_document(&[]);
    let pipeline = Pipeline::default();
    let out = pipeline.assess(&raw, &summarizer, &CancelToken::never()).await;
    assert_eq!(out, FallbackGenerator::default().error("dns lookup failed"));
}

#[tokio::test]
async fn prose_reply_returns_empty_fallback() {
    let summarizer = ScriptedSummarizer::reply("The file looks fine to me.");
    let raw = macro_document(&[]);
    let out = Pipeline::default()
        .assess(&raw, &summarizer, &CancelToken::never())
        .await;
    assert_eq!(out, FallbackGenerator::empty());
}

#[tokio::test]
async fn slow_generator_times_out() {
    let config = SafescanConfig::from_json_str(r#"{"summarizer": {"timeout_seconds": 1}}"#).unwrap();
    let summarizer = ScriptedSummarizer::reply("{}").with_delay(Duration::from_secs(10));
    let raw = macro_document(&[]);
    let out = Pipeline::new(config)
        .assess(&raw, &summarizer, &CancelToken::never())
        .await;
    assert_assessment_shape(&out);
    assert!(out.contains("Generator timeout after 1s"));
}

#[tokio::test]
async fn cancelled_request_returns_error_fallback() {
    let (source, token) = cancel_pair();
    source.cancel();
    let summarizer = ScriptedSummarizer::reply("{}");
    let raw = macro_document(&[]);
    let out = Pipeline::default().assess(&raw, &summarizer, &token).await;
    assert!(out.contains("Generator call cancelled"));
    assert_eq!(summarizer.calls(), 0);
}
