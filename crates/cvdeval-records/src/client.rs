use std::time::Duration;

use serde::Serialize;
use tracing::info;

use cvdeval_core::inputs::EvaluationPayload;
use cvdeval_core::models::evaluation::{EvaluationDetail, EvaluationSummary};

use crate::error::RecordsError;

#[derive(Serialize)]
struct SaveEvaluationRequest<'a> {
    #[serde(flatten)]
    base: &'a EvaluationPayload,
    // The backend treats zeroed ids as "create new".
    #[serde(rename = "EvaluationID")]
    evaluation_id: i64,
    #[serde(rename = "PatientId")]
    patient_id: i64,
    #[serde(rename = "Dob")]
    dob: String,
}

/// Client for the bearer-token records backend: the prior-evaluation
/// list, single-evaluation detail, and the save endpoint.
pub struct RecordsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecordsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RecordsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RecordsError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch the current user's evaluations, newest shape the server
    /// sends under the `evals` field.
    pub async fn fetch_evaluations(
        &self,
        token: &str,
    ) -> Result<Vec<EvaluationSummary>, RecordsError> {
        let url = format!(
            "{}/api/v1/Values/GetAllEvaluations?filterForUser=true",
            self.base_url
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RecordsError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RecordsError::Network(e.to_string()))?;

        let items = decode_evaluations_body(status.is_success(), status.as_u16(), &body)?;

        info!(count = items.len(), "fetched evaluations");
        Ok(items)
    }

    /// Fetch one evaluation's full detail, including the nested computed
    /// CVD result.
    pub async fn fetch_evaluation(
        &self,
        token: &str,
        id: i64,
    ) -> Result<EvaluationDetail, RecordsError> {
        let url = format!("{}/api/v1/Values/GetEvaluationById?id={id}", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RecordsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecordsError::Api {
                status: status.as_u16(),
                message: "failed to load evaluation details".to_string(),
            });
        }

        let detail: EvaluationDetail = response
            .json()
            .await
            .map_err(|e| RecordsError::Parse(e.to_string()))?;

        info!(id, "fetched evaluation detail");
        Ok(detail)
    }

    /// Persist a finished evaluation. The base payload is augmented with
    /// zeroed ids and a fresh timestamp.
    pub async fn save_evaluation(
        &self,
        token: &str,
        payload: &EvaluationPayload,
    ) -> Result<(), RecordsError> {
        let url = format!("{}/api/v1/Values/SaveEvaluation", self.base_url);
        let request = SaveEvaluationRequest {
            base: payload,
            evaluation_id: 0,
            patient_id: 0,
            dob: jiff::Timestamp::now().to_string(),
        };

        info!(patient = %payload.name, "saving evaluation");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| RecordsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Unknown server error".to_string());
            return Err(RecordsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(patient = %payload.name, "evaluation saved");
        Ok(())
    }
}

/// Decode the evaluation-list body. The backend sometimes answers with
/// an empty body or an object missing the `evals` array; each case gets
/// its own error so the list screen can say what actually went wrong.
fn decode_evaluations_body(
    success: bool,
    status: u16,
    body: &str,
) -> Result<Vec<EvaluationSummary>, RecordsError> {
    if body.trim().is_empty() {
        return Err(RecordsError::EmptyResponse);
    }

    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| RecordsError::Parse(e.to_string()))?;

    if !success {
        let message = json
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("failed to fetch evaluations")
            .to_string();
        return Err(RecordsError::Api { status, message });
    }

    let evals = json
        .get("evals")
        .and_then(|e| e.as_array())
        .ok_or_else(|| RecordsError::Format("missing `evals` array".to_string()))?;

    serde_json::from_value(serde_json::Value::Array(evals.clone()))
        .map_err(|e| RecordsError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_body_is_its_own_error() {
        assert!(matches!(
            decode_evaluations_body(true, 200, ""),
            Err(RecordsError::EmptyResponse)
        ));
    }

    #[test]
    fn unparseable_list_body_is_a_parse_error() {
        assert!(matches!(
            decode_evaluations_body(true, 200, "<html>"),
            Err(RecordsError::Parse(_))
        ));
    }

    #[test]
    fn missing_evals_field_is_a_format_error() {
        assert!(matches!(
            decode_evaluations_body(true, 200, r#"{"items": []}"#),
            Err(RecordsError::Format(_))
        ));
    }

    #[test]
    fn error_status_carries_server_message() {
        let err = decode_evaluations_body(false, 401, r#"{"message": "expired"}"#).unwrap_err();
        match err {
            RecordsError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "expired");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_body_decodes_rows() {
        let body = r#"{"evals": [{
            "platform": 1, "PatientId": 12, "ID": 344, "IsPAH": 0, "ForHF": 0,
            "Name": "Jane Doe", "createdate": "2026-07-12T09:15:00",
            "SBP": 130, "DBP": 85, "gender": 2,
            "inputs": "SBP=130|DBP=85", "age": 54,
            "evaluatedBy": "jane@example.com", "UserId": null
        }]}"#;
        let rows = decode_evaluations_body(true, 200, body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Jane Doe");
    }

    #[test]
    fn save_request_augments_base_payload() {
        use cvdeval_core::inputs::EvaluationPayload;
        use cvdeval_core::models::patient::{Gender, PatientForm};

        let patient = PatientForm {
            name: "Jane Doe".to_string(),
            age: "54".to_string(),
            gender: Gender::Female,
        }
        .validate()
        .unwrap();
        let payload = EvaluationPayload::assemble(&patient, &[]);

        let request = SaveEvaluationRequest {
            base: &payload,
            evaluation_id: 0,
            patient_id: 0,
            dob: "2026-08-30T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["EvaluationID"], 0);
        assert_eq!(json["PatientId"], 0);
        assert_eq!(json["Name"], "Jane Doe");
        assert_eq!(json["SBP"], 120);
        assert_eq!(json["DBP"], 70);
        assert_eq!(json["Inputs"], "");
    }
}
