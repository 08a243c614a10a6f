//! Integration tests against the live evaluator backend.
//!
//! These call the real extraction API and require network access (plus
//! whatever API key the default config carries).
//!
//! Run with: `cargo test -p cvdeval-flow --test live_extraction -- --ignored`

use cvdeval_evaluator::EvaluatorClient;
use cvdeval_flow::FlowConfig;

#[tokio::test]
#[ignore]
async fn extraction_round_returns_values_or_questions() {
    let config = FlowConfig::default();
    let client =
        EvaluatorClient::new(&config.evaluator_base_url, &config.evaluator_api_key).unwrap();

    let result = client
        .interactive_extraction(
            "Patient reports occasional chest pain. Blood pressure one thirty over eighty five.",
            None,
        )
        .await
        .expect("extraction should succeed");

    assert!(
        !result.extracted_values.is_empty() || !result.suggested_follow_up_questions.is_empty(),
        "expected the backend to extract something or ask something"
    );
}
