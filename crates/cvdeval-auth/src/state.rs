use tracing::warn;

use cvdeval_session::SessionStore;

use crate::client::AuthClient;
use crate::error::AuthError;

const GENERIC_REGISTER_MESSAGE: &str =
    "An unexpected error occurred during registration. Please try again.";

/// Outcome of a registration attempt, shaped for direct display.
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub success: bool,
    pub message: String,
}

/// The authenticated/unauthenticated state machine of §login/logout,
/// backed by the persistent session store.
///
/// Failures never escape to the caller as errors: login reports a plain
/// boolean, registration a `{success, message}` pair, and logout always
/// succeeds from the UI's point of view (storage errors are logged and
/// swallowed). `loading` gates navigation until the persisted token has
/// been checked once at startup.
pub struct AuthState {
    store: SessionStore,
    authenticated: bool,
    loading: bool,
    confirmation_message: Option<String>,
}

impl AuthState {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            authenticated: false,
            loading: true,
            confirmation_message: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn confirmation_message(&self) -> Option<&str> {
        self.confirmation_message.as_deref()
    }

    pub fn clear_confirmation(&mut self) {
        self.confirmation_message = None;
    }

    /// Resolve the initial state from the persisted token. Storage errors
    /// are treated as signed out; the loading flag clears either way.
    pub fn resolve_startup(&mut self) {
        match self.store.token() {
            Ok(token) => self.authenticated = token.is_some(),
            Err(e) => {
                warn!(error = %e, "failed to check login status");
                self.authenticated = false;
            }
        }
        self.loading = false;
    }

    /// Attempt a login. Any failure, network or storage, yields `false`.
    pub async fn login(&mut self, client: &AuthClient, email: &str, password: &str) -> bool {
        match client.login(email, password).await {
            Ok(session) => {
                if let Err(e) = self.store.save(&session) {
                    warn!(error = %e, "failed to persist session");
                    return false;
                }
                self.authenticated = true;
                true
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                false
            }
        }
    }

    /// Attempt a registration; a successful confirmation message is kept
    /// for the confirmation screen.
    pub async fn register(
        &mut self,
        client: &AuthClient,
        name: &str,
        email: &str,
        password: &str,
    ) -> RegisterOutcome {
        match client.register(name, email, password).await {
            Ok(message) => {
                self.confirmation_message = Some(message.clone());
                RegisterOutcome {
                    success: true,
                    message,
                }
            }
            Err(AuthError::RegistrationFailed(message)) => RegisterOutcome {
                success: false,
                message,
            },
            Err(e) => {
                warn!(error = %e, "registration failed");
                RegisterOutcome {
                    success: false,
                    message: GENERIC_REGISTER_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Clear the session and flip to unauthenticated. Storage errors are
    /// swallowed so logout can never block the UI.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored session");
        }
        self.authenticated = false;
    }

    /// The persisted bearer token, if any.
    pub fn token(&self) -> Option<String> {
        match self.store.token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "failed to read stored token");
                None
            }
        }
    }
}
