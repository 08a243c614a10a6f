use std::collections::BTreeMap;

use serde::Serialize;

use super::extraction::{QuestionInputType, SuggestedQuestion};

/// Answers accumulated against the current set of suggested questions,
/// keyed by `field_to_probe`. Reset at the start of each survey round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SurveyAnswers(BTreeMap<String, serde_json::Value>);

impl SurveyAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Record an answer for a question, applying the capture rule for its
    /// input type: booleans store true/false, text and number questions
    /// store the raw unconverted text, select questions store the chosen
    /// option's internal value.
    pub fn answer(&mut self, question: &SuggestedQuestion, raw: AnswerValue) {
        let value = match (question.input_type, raw) {
            (QuestionInputType::Boolean, AnswerValue::Bool(b)) => serde_json::Value::Bool(b),
            (QuestionInputType::Text, AnswerValue::Text(t))
            | (QuestionInputType::Number, AnswerValue::Text(t)) => serde_json::Value::String(t),
            (QuestionInputType::Select, AnswerValue::Option(value)) => {
                serde_json::Value::String(value)
            }
            // Mismatched widget/answer pairs should not happen; keep the
            // raw value rather than dropping the answer.
            (_, raw) => raw.into_value(),
        };
        self.0.insert(question.field_to_probe.clone(), value);
    }

    /// A boolean question that was never toggled reads as "No".
    pub fn bool_answer(&self, field: &str) -> bool {
        self.0
            .get(field)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Raw user input before the capture rule is applied.
#[derive(Debug, Clone)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
    /// The internal `value` of a selected option, not its display text.
    Option(String),
}

impl AnswerValue {
    fn into_value(self) -> serde_json::Value {
        match self {
            AnswerValue::Bool(b) => serde_json::Value::Bool(b),
            AnswerValue::Text(t) | AnswerValue::Option(t) => serde_json::Value::String(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::extraction::QuestionOption;

    fn question(field: &str, input_type: QuestionInputType) -> SuggestedQuestion {
        SuggestedQuestion {
            field_to_probe: field.to_string(),
            question_text: format!("About {field}?"),
            input_type,
            options: vec![],
        }
    }

    #[test]
    fn untouched_boolean_reads_as_no() {
        let answers = SurveyAnswers::new();
        assert!(!answers.bool_answer("fatigue"));
    }

    #[test]
    fn boolean_toggle_stores_bool() {
        let mut answers = SurveyAnswers::new();
        let q = question("fatigue", QuestionInputType::Boolean);
        answers.answer(&q, AnswerValue::Bool(true));
        assert!(answers.bool_answer("fatigue"));
        answers.answer(&q, AnswerValue::Bool(false));
        assert!(!answers.bool_answer("fatigue"));
    }

    #[test]
    fn number_stores_unconverted_text() {
        let mut answers = SurveyAnswers::new();
        let q = question("sbp", QuestionInputType::Number);
        answers.answer(&q, AnswerValue::Text("135".to_string()));
        assert_eq!(
            answers.get("sbp"),
            Some(&serde_json::Value::String("135".to_string()))
        );
    }

    #[test]
    fn select_stores_option_value() {
        let mut answers = SurveyAnswers::new();
        let mut q = question("smoking_status", QuestionInputType::Select);
        q.options = vec![QuestionOption {
            value: "never".to_string(),
            text: "Never smoked".to_string(),
        }];
        answers.answer(&q, AnswerValue::Option("never".to_string()));
        assert_eq!(
            answers.get("smoking_status"),
            Some(&serde_json::Value::String("never".to_string()))
        );
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut answers = SurveyAnswers::new();
        answers.answer(
            &question("fatigue", QuestionInputType::Boolean),
            AnswerValue::Bool(true),
        );
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json, serde_json::json!({"fatigue": true}));
    }
}
