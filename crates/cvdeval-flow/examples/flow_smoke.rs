//! Smoke test for the full evaluation flow against the live backends.
//!
//! Logs in with credentials from environment variables, runs an
//! evaluate-only round over a typed narrative (no audio), answers any
//! follow-up survey with defaults, and prints the computed result.
//!
//! Usage:
//!   CVDEVAL_EMAIL=you@example.com \
//!   CVDEVAL_PASSWORD=... \
//!   cargo run -p cvdeval-flow --example flow_smoke

use cvdeval_auth::{AuthClient, AuthState};
use cvdeval_flow::config;
use cvdeval_flow::{FlowDriver, PendingAction};
use cvdeval_session::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let email = std::env::var("CVDEVAL_EMAIL").map_err(|_| "set CVDEVAL_EMAIL env var")?;
    let password = std::env::var("CVDEVAL_PASSWORD").map_err(|_| "set CVDEVAL_PASSWORD env var")?;

    if !config::has_config() {
        println!("No config file found; using default endpoints.");
    }
    let flow_config = config::load_config()?;
    let store = SessionStore::open_default()?;

    println!("Signing in as {email}...");
    let auth_client = AuthClient::new(&flow_config.records_base_url)?;
    let mut auth = AuthState::new(store.clone());
    auth.resolve_startup();
    if !auth.login(&auth_client, &email, &password).await {
        return Err("login failed".into());
    }
    println!("Signed in.");

    let mut driver = FlowDriver::new(&flow_config, store)?;
    driver.flow.patient.name = "Smoke Test".to_string();
    driver.flow.patient.age = "54".to_string();
    driver.flow.transcript =
        "Patient reports occasional chest pain on exertion. Blood pressure measured at \
         one hundred thirty over eighty five. Non-smoker."
            .to_string();

    println!("Running evaluate-only round...");
    driver.run_round(PendingAction::EvaluateOnly).await?;

    if driver.flow.survey_visible() {
        println!(
            "Survey requested ({} questions); submitting default answers...",
            driver.flow.questions().len()
        );
        driver.submit_survey().await?;
    }

    let result = driver.flow.result().ok_or("no result after round")?;
    for group in &result.outputs {
        println!("== {}", group.groupname);
        for field in &group.fields {
            println!("   {}", field.val);
        }
    }

    Ok(())
}
