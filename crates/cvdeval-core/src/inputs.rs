//! Formatting rules for the outbound evaluation payload.
//!
//! The backends accept the extracted values as a single pipe-separated
//! `Inputs` line rather than structured JSON, with blood pressure broken
//! out into dedicated fields.

use serde::Serialize;
use serde_json::Number;

use crate::models::extraction::ExtractedValue;
use crate::models::patient::ValidPatient;

/// Placeholder blood pressure used when the narrative carried none.
pub const DEFAULT_SBP: i64 = 120;
pub const DEFAULT_DBP: i64 = 70;

/// Format extracted values as the backend's `Inputs` line.
///
/// Booleans that are true contribute just their key; false booleans are
/// dropped entirely. Everything else is `key=value` with strings left
/// unquoted. Pieces are joined by `|` with no edge separators.
pub fn format_input_line(values: &[ExtractedValue]) -> String {
    values
        .iter()
        .filter_map(|item| match &item.value {
            serde_json::Value::Bool(true) => Some(item.api_key.clone()),
            serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) => Some(format!("{}={}", item.api_key, s)),
            other => Some(format!("{}={}", item.api_key, other)),
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Systolic/diastolic pressure carried as exact JSON numbers so the
/// outbound payload echoes the server's numeric form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodPressure {
    pub systolic: Number,
    pub diastolic: Number,
}

impl Default for BloodPressure {
    fn default() -> Self {
        Self {
            systolic: Number::from(DEFAULT_SBP),
            diastolic: Number::from(DEFAULT_DBP),
        }
    }
}

/// Derive blood pressure from values keyed exactly `SBP` / `DBP`.
/// Non-numeric or absent entries fall back to the 120/70 defaults.
pub fn derive_blood_pressure(values: &[ExtractedValue]) -> BloodPressure {
    let numeric = |key: &str| {
        values
            .iter()
            .find(|item| item.api_key == key)
            .and_then(|item| item.value.as_number().cloned())
    };

    let defaults = BloodPressure::default();
    BloodPressure {
        systolic: numeric("SBP").unwrap_or(defaults.systolic),
        diastolic: numeric("DBP").unwrap_or(defaults.diastolic),
    }
}

/// The base wire object shared by the save and evaluate-only calls.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationPayload {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "IsPAH")]
    pub is_pah: bool,
    pub age: u32,
    pub gender: u8,
    #[serde(rename = "SBP")]
    pub sbp: Number,
    #[serde(rename = "DBP")]
    pub dbp: Number,
    #[serde(rename = "Inputs")]
    pub inputs: String,
}

impl EvaluationPayload {
    /// Assemble the base payload: patient identity, derived blood
    /// pressure, the default non-PAH flag, and the formatted input line.
    pub fn assemble(patient: &ValidPatient, values: &[ExtractedValue]) -> Self {
        let bp = derive_blood_pressure(values);
        Self {
            name: patient.name.clone(),
            first_name: patient.name.clone(),
            is_pah: false,
            age: patient.age,
            gender: patient.gender.code(),
            sbp: bp.systolic,
            dbp: bp.diastolic,
            inputs: format_input_line(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patient::{Gender, PatientForm};
    use serde_json::json;

    fn values() -> Vec<ExtractedValue> {
        vec![
            ExtractedValue::new("SBP", json!(130)),
            ExtractedValue::new("DBP", json!(85)),
            ExtractedValue::new("chest_pain", json!(true)),
            ExtractedValue::new("smoker", json!(false)),
        ]
    }

    #[test]
    fn input_line_matches_worked_example() {
        assert_eq!(format_input_line(&values()), "SBP=130|DBP=85|chest_pain");
    }

    #[test]
    fn input_line_has_no_edge_separators() {
        let line = format_input_line(&[
            ExtractedValue::new("smoker", json!(false)),
            ExtractedValue::new("fatigue", json!(true)),
            ExtractedValue::new("smoker2", json!(false)),
        ]);
        assert_eq!(line, "fatigue");
    }

    #[test]
    fn all_false_booleans_yield_empty_line() {
        let line = format_input_line(&[
            ExtractedValue::new("a", json!(false)),
            ExtractedValue::new("b", json!(false)),
        ]);
        assert_eq!(line, "");
    }

    #[test]
    fn strings_are_unquoted() {
        let line = format_input_line(&[ExtractedValue::new("note", json!("mild pain"))]);
        assert_eq!(line, "note=mild pain");
    }

    #[test]
    fn bp_from_worked_example() {
        let bp = derive_blood_pressure(&values());
        assert_eq!(bp.systolic, Number::from(130));
        assert_eq!(bp.diastolic, Number::from(85));
    }

    #[test]
    fn bp_defaults_when_absent() {
        let bp = derive_blood_pressure(&[ExtractedValue::new("chest_pain", json!(true))]);
        assert_eq!(bp, BloodPressure::default());
    }

    #[test]
    fn bp_defaults_when_non_numeric() {
        let bp = derive_blood_pressure(&[
            ExtractedValue::new("SBP", json!("high")),
            ExtractedValue::new("DBP", json!(85)),
        ]);
        assert_eq!(bp.systolic, Number::from(DEFAULT_SBP));
        assert_eq!(bp.diastolic, Number::from(85));
    }

    #[test]
    fn decimal_bp_survives_untouched() {
        let bp = derive_blood_pressure(&[ExtractedValue::new("SBP", json!(130.5))]);
        assert_eq!(bp.systolic.as_f64(), Some(130.5));
    }

    #[test]
    fn assembled_payload_serializes_with_wire_names() {
        let patient = PatientForm {
            name: "Jane Doe".to_string(),
            age: "54".to_string(),
            gender: Gender::Female,
        }
        .validate()
        .unwrap();

        let payload = EvaluationPayload::assemble(&patient, &values());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            json!({
                "Name": "Jane Doe",
                "FirstName": "Jane Doe",
                "IsPAH": false,
                "age": 54,
                "gender": 2,
                "SBP": 130,
                "DBP": 85,
                "Inputs": "SBP=130|DBP=85|chest_pain"
            })
        );
    }
}
