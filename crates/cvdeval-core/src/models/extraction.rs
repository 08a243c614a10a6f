use serde::{Deserialize, Serialize};

/// One structured field the extraction backend pulled out of the
/// narrative. The value may be a boolean, number, or string; later
/// rounds may repeat a key, in which case the later value supersedes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedValue {
    pub api_key: String,
    pub value: serde_json::Value,
}

impl ExtractedValue {
    pub fn new(api_key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            api_key: api_key.into(),
            value,
        }
    }
}

/// How a follow-up question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionInputType {
    Boolean,
    Text,
    Number,
    Select,
}

/// One option of a `select` question. `value` is what goes back to the
/// API; `text` is what the user sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub text: String,
}

/// A clarification the backend wants before extraction is complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedQuestion {
    pub field_to_probe: String,
    pub question_text: String,
    pub input_type: QuestionInputType,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

/// Response of the interactive extraction endpoint, for both the initial
/// call and survey resubmissions.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionResult {
    pub extracted_values: Vec<ExtractedValue>,
    #[serde(default)]
    pub suggested_follow_up_questions: Vec<SuggestedQuestion>,
    pub is_complete: bool,
}

impl ExtractionResult {
    /// A survey round is warranted only when the backend marks the
    /// result incomplete and actually supplied questions.
    pub fn needs_follow_up(&self) -> bool {
        !self.is_complete && !self.suggested_follow_up_questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_shape() {
        let json = r#"{
            "extracted_values": [
                {"api_key": "SBP", "value": 130},
                {"api_key": "chest_pain", "value": true}
            ],
            "suggested_follow_up_questions": [
                {
                    "field_to_probe": "smoking_status",
                    "question_text": "Does the patient smoke?",
                    "input_type": "select",
                    "options": [
                        {"value": "current", "text": "Currently smokes"},
                        {"value": "never", "text": "Never smoked"}
                    ]
                }
            ],
            "is_complete": false
        }"#;

        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.extracted_values.len(), 2);
        assert_eq!(result.extracted_values[0].api_key, "SBP");
        let q = &result.suggested_follow_up_questions[0];
        assert_eq!(q.input_type, QuestionInputType::Select);
        assert_eq!(q.options[1].value, "never");
        assert!(result.needs_follow_up());
    }

    #[test]
    fn missing_questions_defaults_empty() {
        let json = r#"{"extracted_values": [], "is_complete": true}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert!(result.suggested_follow_up_questions.is_empty());
        assert!(!result.needs_follow_up());
    }

    #[test]
    fn incomplete_without_questions_needs_no_follow_up() {
        let json = r#"{"extracted_values": [], "is_complete": false}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert!(!result.needs_follow_up());
    }
}
