//! Teller settings
//!
//! Gateway base URLs, fixed internal credentials, the re-authentication retry
//! budget, and the minimum visible loading duration. Settings are read from an
//! optional JSON file and every field can be overridden with a `VATELLER_*`
//! environment variable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TellerError, TellerResult};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the internal (ledger) gateway
    #[serde(default = "default_internal_base_url")]
    pub internal_base_url: String,

    /// Base URL of the external (payment) gateway
    #[serde(default = "default_external_base_url")]
    pub external_base_url: String,

    /// Fixed credentials for the internal gateway's /auth endpoint
    #[serde(default)]
    pub internal_username: String,

    /// Paired with `internal_username`
    #[serde(default)]
    pub internal_password: String,

    /// API key for the external gateway's /auth endpoint
    #[serde(default)]
    pub external_api_key: String,

    /// Paired with `external_api_key`
    #[serde(default)]
    pub external_api_secret: String,

    /// Source account charged for the fund-transfer fee
    #[serde(default)]
    pub from_account: String,

    /// Total attempts allowed when (re-)acquiring a bearer token
    #[serde(default = "default_auth_attempts")]
    pub auth_attempts: u32,

    /// Minimum visible loading duration in milliseconds. Responses are held
    /// back until this much time has passed so the loading state is readable.
    /// Set to 0 in tests.
    #[serde(default = "default_min_loading_ms")]
    pub min_loading_ms: u64,

    /// Where tracing output goes; stdout belongs to the TUI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_internal_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_external_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_auth_attempts() -> u32 {
    3
}

fn default_min_loading_ms() -> u64 {
    1500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            internal_base_url: default_internal_base_url(),
            external_base_url: default_external_base_url(),
            internal_username: String::new(),
            internal_password: String::new(),
            external_api_key: String::new(),
            external_api_secret: String::new(),
            from_account: String::new(),
            auth_attempts: default_auth_attempts(),
            min_loading_ms: default_min_loading_ms(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file if it exists, then apply environment
    /// overrides. Missing file means defaults plus environment.
    pub fn load(path: Option<&Path>) -> TellerResult<Self> {
        let mut settings = match path {
            Some(p) if p.exists() => {
                let contents = std::fs::read_to_string(p)
                    .map_err(|e| TellerError::Io(format!("Failed to read settings file: {}", e)))?;
                serde_json::from_str(&contents).map_err(|e| {
                    TellerError::Config(format!("Failed to parse settings file: {}", e))
                })?
            }
            _ => Settings::default(),
        };

        settings.apply_env();
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> TellerResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TellerError::Io(format!("Failed to create config dir: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TellerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| TellerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Overlay `VATELLER_*` environment variables onto the current values
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Overlay overrides from an arbitrary variable source. Numeric values
    /// that fail to parse are ignored, keeping the current value.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("VATELLER_INTERNAL_BASE_URL") {
            self.internal_base_url = v;
        }
        if let Some(v) = get("VATELLER_EXTERNAL_BASE_URL") {
            self.external_base_url = v;
        }
        if let Some(v) = get("VATELLER_INTERNAL_USERNAME") {
            self.internal_username = v;
        }
        if let Some(v) = get("VATELLER_INTERNAL_PASSWORD") {
            self.internal_password = v;
        }
        if let Some(v) = get("VATELLER_EXTERNAL_API_KEY") {
            self.external_api_key = v;
        }
        if let Some(v) = get("VATELLER_EXTERNAL_API_SECRET") {
            self.external_api_secret = v;
        }
        if let Some(v) = get("VATELLER_FROM_ACCOUNT") {
            self.from_account = v;
        }
        if let Some(v) = get("VATELLER_AUTH_ATTEMPTS") {
            if let Ok(n) = v.parse() {
                self.auth_attempts = n;
            }
        }
        if let Some(v) = get("VATELLER_MIN_LOADING_MS") {
            if let Ok(n) = v.parse() {
                self.min_loading_ms = n;
            }
        }
        if let Some(v) = get("VATELLER_LOG_FILE") {
            self.log_file = Some(PathBuf::from(v));
        }
    }

    /// A copy safe to print: credentials replaced with a placeholder
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for secret in [
            &mut copy.internal_password,
            &mut copy.external_api_secret,
        ] {
            if !secret.is_empty() {
                *secret = "********".to_string();
            }
        }
        copy
    }
}
