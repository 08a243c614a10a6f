//! cvdeval-records
//!
//! Client for the records backend: evaluation list, detail, and save.

pub mod client;
pub mod error;
pub mod list;

pub use client::RecordsClient;
pub use list::EvaluationList;
