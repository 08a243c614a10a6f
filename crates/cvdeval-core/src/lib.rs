//! cvdeval-core
//!
//! Pure domain types and the evaluation payload formatting rules.
//! No HTTP dependency — this is the shared vocabulary of the CVD
//! evaluator client.

pub mod error;
pub mod inputs;
pub mod models;
