use tracing::warn;

use cvdeval_core::models::evaluation::EvaluationSummary;

use crate::client::RecordsClient;
use crate::error::RecordsError;

/// In-memory evaluation list with the loading/error state the list
/// screen binds to. The loading flag is cleared on every exit path.
#[derive(Default)]
pub struct EvaluationList {
    pub items: Vec<EvaluationSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

impl EvaluationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from the backend. A missing token short-circuits without a
    /// network call; success replaces the list wholesale.
    pub async fn refresh(&mut self, client: &RecordsClient, token: Option<&str>) {
        self.loading = true;
        self.error = None;

        let outcome = match token {
            Some(token) => client.fetch_evaluations(token).await,
            None => Err(RecordsError::NoToken),
        };

        match outcome {
            Ok(items) => self.items = items,
            Err(e) => {
                warn!(error = %e, "failed to refresh evaluation list");
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_fails_without_network() {
        // Unroutable base URL: a network attempt would error differently.
        let client = RecordsClient::new("http://127.0.0.1:1").unwrap();
        let mut list = EvaluationList::new();

        list.refresh(&client, None).await;

        assert!(!list.loading);
        assert_eq!(
            list.error.as_deref(),
            Some("no authentication token found")
        );
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn loading_clears_after_network_failure() {
        let client = RecordsClient::new("http://127.0.0.1:1").unwrap();
        let mut list = EvaluationList::new();

        list.refresh(&client, Some("jwt")).await;

        assert!(!list.loading);
        assert!(list.error.is_some());
    }
}
