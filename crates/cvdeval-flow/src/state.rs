//! The interactive extraction state machine, expressed as a value type
//! transitioned by discrete events. All network work happens in the
//! driver; every method here is a pure transition, so the round
//! semantics (snapshot at start, fixed pending action) are testable
//! without any I/O.

use cvdeval_core::error::CoreError;
use cvdeval_core::models::evaluation::EvaluationOutcome;
use cvdeval_core::models::extraction::{ExtractedValue, ExtractionResult, SuggestedQuestion};
use cvdeval_core::models::patient::PatientForm;
use cvdeval_core::models::survey::{AnswerValue, SurveyAnswers};

use crate::error::FlowError;

/// What the user asked for when they kicked off the round. Fixed at
/// round start and authoritative for the eventual finalization, even
/// across an intervening survey round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Save,
    EvaluateOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Recording,
    Transcribing,
    Extracting,
    AwaitingSurvey,
    SubmittingSurvey,
    Finalizing,
    ResultReady,
}

/// One extraction round: the requested action plus the transcript as it
/// stood when the round began. Survey resubmissions always extract
/// against this snapshot, not any edited copy.
#[derive(Debug, Clone)]
struct Round {
    action: PendingAction,
    original_transcript: String,
}

/// An extraction request the driver should issue.
#[derive(Debug, Clone)]
pub struct ExtractionCall {
    pub text: String,
    pub answers: Option<SurveyAnswers>,
}

/// Where a settled extraction round leads.
#[derive(Debug)]
pub enum RoundOutcome {
    /// Results are complete (or no questions came back): finalize with
    /// the round's fixed action.
    Finalize {
        values: Vec<ExtractedValue>,
        action: PendingAction,
    },
    /// Questions came back: the survey is on screen, waiting for input.
    Survey,
    /// No round is active (it already failed); drop the response.
    Stale,
}

pub struct EvaluationFlow {
    state: FlowState,
    pub patient: PatientForm,
    pub transcript: String,
    mic_permission: bool,
    error: Option<String>,
    round: Option<Round>,
    questions: Vec<SuggestedQuestion>,
    answers: SurveyAnswers,
    survey_visible: bool,
    result: Option<EvaluationOutcome>,
    final_values_for_save: Option<Vec<ExtractedValue>>,
}

impl Default for EvaluationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            patient: PatientForm::default(),
            transcript: String::new(),
            mic_permission: false,
            error: None,
            round: None,
            questions: Vec::new(),
            answers: SurveyAnswers::new(),
            survey_visible: false,
            result: None,
            final_values_for_save: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// In-flight network work; controls are disabled while busy so no
    /// second round can start.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            FlowState::Transcribing
                | FlowState::Extracting
                | FlowState::SubmittingSurvey
                | FlowState::Finalizing
        )
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn questions(&self) -> &[SuggestedQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &SurveyAnswers {
        &self.answers
    }

    pub fn survey_visible(&self) -> bool {
        self.survey_visible
    }

    pub fn result(&self) -> Option<&EvaluationOutcome> {
        self.result.as_ref()
    }

    pub fn has_values_to_save(&self) -> bool {
        self.final_values_for_save.is_some()
    }

    /// The platform layer reports whether microphone access was granted.
    pub fn set_mic_permission(&mut self, granted: bool) {
        self.mic_permission = granted;
    }

    /// Begin a new recording. Clears the prior transcript, questions,
    /// answers, and error so the round starts clean.
    pub fn start_recording(&mut self) -> Result<(), FlowError> {
        if !self.mic_permission {
            return Err(FlowError::MicPermissionDenied);
        }
        if self.state != FlowState::Idle && self.state != FlowState::ResultReady {
            return Err(FlowError::NotIdle);
        }
        self.transcript.clear();
        self.questions.clear();
        self.answers.clear();
        self.error = None;
        self.state = FlowState::Recording;
        Ok(())
    }

    /// Recording finished; the driver now transcribes the captured file.
    pub fn stop_recording(&mut self) {
        self.state = FlowState::Transcribing;
    }

    pub fn transcription_succeeded(&mut self, text: String) {
        self.transcript = text;
        self.state = FlowState::Idle;
    }

    pub fn transcription_failed(&mut self, message: String) {
        self.error = Some(message);
        self.state = FlowState::Idle;
    }

    /// Start an extraction round for the given action.
    ///
    /// Validates the patient form and transcript first; a validation
    /// failure short-circuits with no state change and no network call.
    /// Refused while another operation is in flight so an active round's
    /// snapshotted action cannot be clobbered.
    /// On success the action and transcript are snapshotted for the rest
    /// of the round, and the initial call carries no follow-up data.
    pub fn begin_round(&mut self, action: PendingAction) -> Result<ExtractionCall, FlowError> {
        if self.state != FlowState::Idle && self.state != FlowState::ResultReady {
            return Err(FlowError::NotIdle);
        }
        self.patient.validate()?;
        if self.transcript.trim().is_empty() {
            return Err(CoreError::EmptyTranscript.into());
        }

        self.error = None;
        self.round = Some(Round {
            action,
            original_transcript: self.transcript.clone(),
        });
        self.state = FlowState::Extracting;

        Ok(ExtractionCall {
            text: self.transcript.clone(),
            answers: None,
        })
    }

    /// Branch on a settled extraction response.
    pub fn extraction_succeeded(&mut self, result: ExtractionResult) -> RoundOutcome {
        let Some(round) = self.round.as_ref() else {
            return RoundOutcome::Stale;
        };

        if result.needs_follow_up() {
            self.questions = result.suggested_follow_up_questions;
            self.answers.clear();
            self.survey_visible = true;
            self.state = FlowState::AwaitingSurvey;
            RoundOutcome::Survey
        } else {
            self.state = FlowState::Finalizing;
            RoundOutcome::Finalize {
                values: result.extracted_values,
                action: round.action,
            }
        }
    }

    pub fn extraction_failed(&mut self, message: String) {
        self.error = Some(message);
        self.round = None;
        self.state = FlowState::Idle;
    }

    /// Record a survey answer against the question probing `field`.
    /// Answers for unknown fields are dropped.
    pub fn record_answer(&mut self, field: &str, value: AnswerValue) {
        if self.state != FlowState::AwaitingSurvey {
            return;
        }
        if let Some(question) = self.questions.iter().find(|q| q.field_to_probe == field) {
            self.answers.answer(question, value);
        }
    }

    /// Submit the survey: re-extract against the transcript snapshotted
    /// at round start, with the accumulated answers.
    pub fn submit_survey(&mut self) -> Result<ExtractionCall, FlowError> {
        if self.state != FlowState::AwaitingSurvey {
            return Err(FlowError::NoSurvey);
        }
        let round = self.round.as_ref().ok_or(FlowError::NoSurvey)?;

        self.error = None;
        self.state = FlowState::SubmittingSurvey;
        Ok(ExtractionCall {
            text: round.original_transcript.clone(),
            answers: Some(self.answers.clone()),
        })
    }

    /// The survey UI hides once the resubmission settles, success or not.
    pub fn survey_settled(&mut self) {
        self.survey_visible = false;
    }

    pub fn save_succeeded(&mut self) {
        self.round = None;
        self.state = FlowState::Idle;
    }

    /// An evaluate-only round finished: keep the outcome for display and
    /// cache the extracted values so a later manual save can reuse them.
    pub fn evaluate_succeeded(
        &mut self,
        outcome: EvaluationOutcome,
        values: Vec<ExtractedValue>,
    ) {
        self.result = Some(outcome);
        self.final_values_for_save = Some(values);
        self.round = None;
        self.state = FlowState::ResultReady;
    }

    pub fn finalize_failed(&mut self, message: String) {
        self.error = Some(message);
        self.round = None;
        // A failed manual save keeps the result view; otherwise back to idle.
        self.state = if self.result.is_some() {
            FlowState::ResultReady
        } else {
            FlowState::Idle
        };
    }

    /// Manual save from the result view. Only valid after a successful
    /// evaluate-only round in this session.
    pub fn request_manual_save(&mut self) -> Result<Vec<ExtractedValue>, FlowError> {
        let values = self
            .final_values_for_save
            .clone()
            .ok_or(FlowError::NothingToSave)?;
        self.error = None;
        self.round = Some(Round {
            action: PendingAction::Save,
            original_transcript: self.transcript.clone(),
        });
        self.state = FlowState::Finalizing;
        Ok(values)
    }
}
