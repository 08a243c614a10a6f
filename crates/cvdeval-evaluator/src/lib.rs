//! cvdeval-evaluator
//!
//! Client for the evaluator backend: interactive narrative extraction
//! (initial round and survey resubmissions) and the evaluate-only call.
//! Both endpoints authenticate with a fixed API-key header rather than
//! the records backend's bearer token.

pub mod error;

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use cvdeval_core::inputs::EvaluationPayload;
use cvdeval_core::models::evaluation::EvaluationOutcome;
use cvdeval_core::models::extraction::ExtractionResult;
use cvdeval_core::models::survey::SurveyAnswers;

use crate::error::EvaluatorError;

const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Serialize)]
struct ExtractionRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    follow_up_data: Option<&'a SurveyAnswers>,
}

#[derive(Serialize)]
struct EvaluateRequest<'a> {
    #[serde(flatten)]
    base: &'a EvaluationPayload,
    // The evaluator backend carries these as opaque placeholders.
    #[serde(rename = "UserId")]
    user_id: &'a str,
    #[serde(rename = "Platform")]
    platform: &'a str,
    // Bearer token for the records backend, forwarded so the evaluator
    // can act on the user's behalf.
    auth_token: &'a str,
}

pub struct EvaluatorClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EvaluatorClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, EvaluatorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| EvaluatorError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// One round of interactive extraction.
    ///
    /// The initial round sends the narrative alone; survey resubmissions
    /// add the accumulated answers. An empty answer map is omitted from
    /// the request entirely rather than sent as `{}`.
    pub async fn interactive_extraction(
        &self,
        text: &str,
        follow_up: Option<&SurveyAnswers>,
    ) -> Result<ExtractionResult, EvaluatorError> {
        let url = format!("{}/api/interactive_extraction/", self.base_url);
        let follow_up_data = follow_up.filter(|answers| !answers.is_empty());

        info!(
            text_len = text.len(),
            follow_up = follow_up_data.is_some(),
            "requesting extraction"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&ExtractionRequest {
                text,
                follow_up_data,
            })
            .send()
            .await
            .map_err(|e| EvaluatorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
                .unwrap_or_else(|| "Failed to extract data.".to_string());
            return Err(EvaluatorError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let result: ExtractionResult = response
            .json()
            .await
            .map_err(|e| EvaluatorError::Parse(e.to_string()))?;

        info!(
            values = result.extracted_values.len(),
            questions = result.suggested_follow_up_questions.len(),
            is_complete = result.is_complete,
            "extraction round complete"
        );
        Ok(result)
    }

    /// Compute a risk result without persisting anything. The bearer
    /// token rides inside the body as `auth_token`.
    pub async fn evaluate(
        &self,
        payload: &EvaluationPayload,
        auth_token: &str,
    ) -> Result<EvaluationOutcome, EvaluatorError> {
        let url = format!("{}/api/evaluate/", self.base_url);
        info!(patient = %payload.name, "requesting evaluation");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&EvaluateRequest {
                base: payload,
                user_id: "0",
                platform: "0",
                auth_token,
            })
            .send()
            .await
            .map_err(|e| EvaluatorError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EvaluatorError::Network(e.to_string()))?;

        let outcome = decode_evaluate_body(status.is_success(), status.as_u16(), &body)?;

        info!(groups = outcome.outputs.len(), "evaluation complete");
        Ok(outcome)
    }
}

/// Decode the evaluate endpoint's body. An empty body is its own error
/// (the backend produces one on some gateway failures), distinct from a
/// body that fails to parse.
fn decode_evaluate_body(
    success: bool,
    status: u16,
    body: &str,
) -> Result<EvaluationOutcome, EvaluatorError> {
    if body.trim().is_empty() {
        return Err(EvaluatorError::EmptyResponse);
    }

    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| EvaluatorError::Parse(e.to_string()))?;

    if !success {
        let detail = json
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown server error")
            .to_string();
        return Err(EvaluatorError::Api { status, detail });
    }

    serde_json::from_value(json).map_err(|e| EvaluatorError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvdeval_core::models::extraction::{QuestionInputType, SuggestedQuestion};
    use cvdeval_core::models::survey::AnswerValue;

    fn question(field: &str) -> SuggestedQuestion {
        SuggestedQuestion {
            field_to_probe: field.to_string(),
            question_text: String::new(),
            input_type: QuestionInputType::Boolean,
            options: vec![],
        }
    }

    #[test]
    fn empty_follow_up_is_omitted_from_request() {
        let answers = SurveyAnswers::new();
        let request = ExtractionRequest {
            text: "narrative",
            follow_up_data: Some(&answers).filter(|a| !a.is_empty()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"text": "narrative"}));
    }

    #[test]
    fn empty_evaluate_body_is_its_own_error() {
        assert!(matches!(
            decode_evaluate_body(true, 200, "   "),
            Err(EvaluatorError::EmptyResponse)
        ));
    }

    #[test]
    fn evaluate_error_status_carries_server_message() {
        let err = decode_evaluate_body(false, 502, r#"{"message": "backend down"}"#).unwrap_err();
        match err {
            EvaluatorError::Api { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "backend down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_success_body_decodes_output_groups() {
        let outcome = decode_evaluate_body(
            true,
            200,
            r#"{"Outputs": [{"groupname": "Risk", "fields": [{"val": "12%"}]}]}"#,
        )
        .unwrap();
        assert_eq!(outcome.outputs.len(), 1);
        assert_eq!(outcome.outputs[0].fields[0].val, "12%");
    }

    #[test]
    fn follow_up_answers_ride_alongside_text() {
        let mut answers = SurveyAnswers::new();
        answers.answer(&question("fatigue"), AnswerValue::Bool(true));

        let request = ExtractionRequest {
            text: "narrative",
            follow_up_data: Some(&answers),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "narrative",
                "follow_up_data": {"fatigue": true}
            })
        );
    }
}
