//! cvdeval-flow
//!
//! The interactive extraction orchestrator: record → transcribe →
//! extract → clarify → finalize, as a pure state machine plus an async
//! driver over the backend clients.

pub mod config;
pub mod driver;
pub mod error;
pub mod state;

pub use config::FlowConfig;
pub use driver::FlowDriver;
pub use state::{EvaluationFlow, FlowState, PendingAction};
