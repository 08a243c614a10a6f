//! cvdeval-auth
//!
//! Account API client (authenticate / register) and the
//! authenticated/unauthenticated session state machine.

pub mod client;
pub mod error;
pub mod state;

pub use client::AuthClient;
pub use state::{AuthState, RegisterOutcome};
