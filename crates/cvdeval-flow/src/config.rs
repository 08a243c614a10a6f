use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FlowError;

fn default_records_base_url() -> String {
    "https://cvdevaluator-api-alpha.azurewebsites.net".to_string()
}

fn default_evaluator_base_url() -> String {
    "http://cvdevaluator.com:8080".to_string()
}

fn default_evaluator_api_key() -> String {
    "test-api-key-123".to_string()
}

fn default_transcription_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

/// Endpoint configuration for the three backends the flow talks to.
/// Defaults point at the production services; the transcription key has
/// no default and must come from the config file or the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default = "default_records_base_url")]
    pub records_base_url: String,
    #[serde(default = "default_evaluator_base_url")]
    pub evaluator_base_url: String,
    #[serde(default = "default_evaluator_api_key")]
    pub evaluator_api_key: String,
    #[serde(default = "default_transcription_endpoint")]
    pub transcription_endpoint: String,
    #[serde(default)]
    pub transcription_api_key: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            records_base_url: default_records_base_url(),
            evaluator_base_url: default_evaluator_base_url(),
            evaluator_api_key: default_evaluator_api_key(),
            transcription_endpoint: default_transcription_endpoint(),
            transcription_api_key: String::new(),
        }
    }
}

fn config_dir() -> Result<PathBuf, FlowError> {
    let base = dirs::config_dir().ok_or(FlowError::NoConfigDir)?;
    Ok(base.join("com.cvdeval.client"))
}

fn config_path() -> Result<PathBuf, FlowError> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

/// Load the config file; a missing file yields the defaults.
pub fn load_config() -> Result<FlowConfig, FlowError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(FlowConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    let config: FlowConfig = serde_json::from_str(&contents)?;
    Ok(config)
}

pub fn save_config(config: &FlowConfig) -> Result<(), FlowError> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(config)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    info!(path = %path.display(), "config saved");
    Ok(())
}
