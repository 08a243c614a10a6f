//! Async driver for the evaluation flow: owns the backend clients and
//! the state machine, and runs each round sequentially. At most one
//! round is in flight; failures set the flow's visible error and return
//! it to a stable state before the error propagates for alerting.

use std::path::Path;

use tracing::{info, warn};

use cvdeval_core::inputs::EvaluationPayload;
use cvdeval_core::models::extraction::{ExtractedValue, ExtractionResult};
use cvdeval_evaluator::EvaluatorClient;
use cvdeval_records::RecordsClient;
use cvdeval_session::SessionStore;
use cvdeval_transcribe::Transcriber;

use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::state::{EvaluationFlow, PendingAction, RoundOutcome};

pub struct FlowDriver {
    pub flow: EvaluationFlow,
    transcriber: Transcriber,
    evaluator: EvaluatorClient,
    records: RecordsClient,
    store: SessionStore,
}

impl FlowDriver {
    pub fn new(config: &FlowConfig, store: SessionStore) -> Result<Self, FlowError> {
        Ok(Self {
            flow: EvaluationFlow::new(),
            transcriber: Transcriber::new(
                &config.transcription_endpoint,
                &config.transcription_api_key,
            )?,
            evaluator: EvaluatorClient::new(&config.evaluator_base_url, &config.evaluator_api_key)?,
            records: RecordsClient::new(&config.records_base_url)?,
            store,
        })
    }

    /// Recording stopped: transcribe the captured file and store the
    /// text as the current transcript.
    pub async fn finish_recording(&mut self, audio_path: &Path) -> Result<(), FlowError> {
        self.flow.stop_recording();

        match self.transcriber.transcribe_file(audio_path).await {
            Ok(text) => {
                self.flow.transcription_succeeded(text);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "transcription failed");
                self.flow.transcription_failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Start an extraction round for the given action. Validation
    /// failures surface before any network call.
    pub async fn run_round(&mut self, action: PendingAction) -> Result<(), FlowError> {
        let call = self.flow.begin_round(action)?;

        match self
            .evaluator
            .interactive_extraction(&call.text, None)
            .await
        {
            Ok(result) => self.settle_round(result).await,
            Err(e) => {
                self.flow.extraction_failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Submit the accumulated survey answers. The survey hides once the
    /// call settles, regardless of outcome; a success finalizes with the
    /// action fixed at round start.
    pub async fn submit_survey(&mut self) -> Result<(), FlowError> {
        let call = self.flow.submit_survey()?;

        let outcome = self
            .evaluator
            .interactive_extraction(&call.text, call.answers.as_ref())
            .await;
        self.flow.survey_settled();

        match outcome {
            Ok(result) => self.settle_round(result).await,
            Err(e) => {
                self.flow.extraction_failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Manual save from the result view, reusing the values cached by
    /// the evaluate-only round.
    pub async fn save_evaluated(&mut self) -> Result<(), FlowError> {
        let values = self.flow.request_manual_save()?;
        self.finalize(values, PendingAction::Save).await
    }

    async fn settle_round(&mut self, result: ExtractionResult) -> Result<(), FlowError> {
        match self.flow.extraction_succeeded(result) {
            RoundOutcome::Survey => Ok(()),
            RoundOutcome::Finalize { values, action } => self.finalize(values, action).await,
            RoundOutcome::Stale => Ok(()),
        }
    }

    async fn finalize(
        &mut self,
        values: Vec<ExtractedValue>,
        action: PendingAction,
    ) -> Result<(), FlowError> {
        let token = match self.store.token() {
            Ok(Some(token)) => token,
            Ok(None) | Err(_) => {
                self.flow
                    .finalize_failed("Authentication token not found. Please log in again.".into());
                return Err(FlowError::NoToken);
            }
        };

        let patient = match self.flow.patient.validate() {
            Ok(patient) => patient,
            Err(e) => {
                self.flow.finalize_failed(e.to_string());
                return Err(e.into());
            }
        };

        let payload = EvaluationPayload::assemble(&patient, &values);

        match action {
            PendingAction::Save => match self.records.save_evaluation(&token, &payload).await {
                Ok(()) => {
                    info!(patient = %payload.name, "evaluation saved");
                    self.flow.save_succeeded();
                    Ok(())
                }
                Err(e) => {
                    self.flow
                        .finalize_failed(format!("Failed to save evaluation: {e}"));
                    Err(e.into())
                }
            },
            PendingAction::EvaluateOnly => {
                match self.evaluator.evaluate(&payload, &token).await {
                    Ok(outcome) => {
                        info!(groups = outcome.outputs.len(), "evaluation computed");
                        self.flow.evaluate_succeeded(outcome, values);
                        Ok(())
                    }
                    Err(e) => {
                        self.flow.finalize_failed(e.to_string());
                        Err(e.into())
                    }
                }
            }
        }
    }
}
