pub mod evaluation;
pub mod extraction;
pub mod patient;
pub mod session;
pub mod survey;
