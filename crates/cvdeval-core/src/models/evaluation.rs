use serde::{Deserialize, Serialize};

/// One row of the evaluation list, exactly as the records backend
/// returns it. Read-only from the client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "PatientId")]
    pub patient_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    pub age: i64,
    pub gender: i64,
    #[serde(rename = "SBP")]
    pub sbp: f64,
    #[serde(rename = "DBP")]
    pub dbp: f64,
    #[serde(rename = "IsPAH", default)]
    pub is_pah: i64,
    #[serde(rename = "ForHF", default)]
    pub for_hf: i64,
    #[serde(default)]
    pub platform: i64,
    pub createdate: String,
    #[serde(default)]
    pub inputs: String,
    #[serde(rename = "evaluatedBy", default)]
    pub evaluated_by: String,
    #[serde(rename = "UserId", default)]
    pub user_id: Option<String>,
}

/// A single computed output line inside a result group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputField {
    #[serde(default)]
    pub par: String,
    pub val: String,
}

/// A named group of computed outputs (e.g. a risk category block).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputGroup {
    pub groupname: String,
    pub fields: Vec<OutputField>,
}

/// The backend's computed CVD result as embedded in an evaluation detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvdResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "Outputs", default)]
    pub outputs: Vec<OutputGroup>,
    #[serde(rename = "EvaluationID", default)]
    pub evaluation_id: i64,
}

/// Full evaluation detail from `GetEvaluationById`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationDetail {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    pub age: i64,
    pub gender: i64,
    #[serde(rename = "SBP")]
    pub sbp: f64,
    #[serde(rename = "DBP")]
    pub dbp: f64,
    #[serde(rename = "CvdResult")]
    pub cvd_result: CvdResult,
    pub createdate: String,
    #[serde(default)]
    pub inputs: String,
    #[serde(rename = "Dob", default)]
    pub dob: String,
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(rename = "isPAH", default)]
    pub is_pah: i64,
    #[serde(rename = "userDiagnostics", default)]
    pub user_diagnostics: String,
    #[serde(rename = "userTherapeutics", default)]
    pub user_therapeutics: String,
    #[serde(rename = "userTargets", default)]
    pub user_targets: String,
    #[serde(rename = "userCitations", default)]
    pub user_citations: String,
    #[serde(rename = "userICD", default)]
    pub user_icd: String,
    #[serde(rename = "userAssessment", default)]
    pub user_assessment: String,
}

/// What the evaluate-only endpoint returns: the computed output groups,
/// shown in the result view without ever being persisted locally.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationOutcome {
    #[serde(rename = "Outputs", default)]
    pub outputs: Vec<OutputGroup>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}
