use serde::{Deserialize, Serialize};

/// The locally persisted login state: bearer token plus the display
/// fields the profile screen shows. All fields are absent when signed out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl Session {
    pub fn authenticated(&self) -> bool {
        self.token.is_some()
    }
}
