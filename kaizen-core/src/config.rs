//! Spreadsheet connection configuration.
//!
//! The credential itself (an OAuth bearer token for the service
//! account) and the spreadsheet identifier are supplied externally;
//! loading and refreshing them is not this system's responsibility.
//! Configuration is read from environment variables with sensible
//! defaults for everything that has one.

use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;

/// Default worksheet (tab) holding the idea rows.
pub const DEFAULT_WORKSHEET: &str = "Ideias";

/// Default cache lifetime for the full-table snapshot.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Connection settings for the backing spreadsheet and the optional
/// attachment folder.
#[derive(Clone)]
pub struct SheetsConfig {
    /// Identifier of the backing spreadsheet.
    pub spreadsheet_id: String,
    /// Worksheet (tab) name within the spreadsheet.
    pub worksheet: String,
    /// Bearer token for the spreadsheet and Drive APIs.
    pub api_token: String,
    /// Base URL of the Sheets API.
    pub base_url: String,
    /// Base URL of the Drive API (attachment uploads).
    pub drive_base_url: String,
    /// Upload base URL of the Drive API (multipart media).
    pub drive_upload_url: String,
    /// Drive folder receiving attachments; `None` disables the
    /// attachment path entirely.
    pub drive_folder_id: Option<String>,
    /// Lifetime of the cached table snapshot.
    pub cache_ttl: Duration,
}

impl SheetsConfig {
    /// Build a config with defaults for everything but the two required
    /// values.
    pub fn new(spreadsheet_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: DEFAULT_WORKSHEET.to_string(),
            api_token: api_token.into(),
            base_url: "https://sheets.googleapis.com/v4".to_string(),
            drive_base_url: "https://www.googleapis.com/drive/v3".to_string(),
            drive_upload_url: "https://www.googleapis.com/upload/drive/v3".to_string(),
            drive_folder_id: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }

    /// Set the worksheet name.
    pub fn with_worksheet(mut self, worksheet: impl Into<String>) -> Self {
        self.worksheet = worksheet.into();
        self
    }

    /// Set the cache lifetime.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the Drive folder for attachments.
    pub fn with_drive_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.drive_folder_id = Some(folder_id.into());
        self
    }

    /// Create a config from environment variables.
    ///
    /// Environment variables:
    /// - `KAIZEN_SPREADSHEET_ID`: backing spreadsheet id (required)
    /// - `KAIZEN_SHEETS_TOKEN`: bearer token (required)
    /// - `KAIZEN_WORKSHEET`: worksheet name (default: "Ideias")
    /// - `KAIZEN_SHEETS_BASE_URL`: Sheets API base URL
    /// - `KAIZEN_DRIVE_FOLDER_ID`: attachment folder (optional; unset
    ///   disables uploads)
    /// - `KAIZEN_CACHE_TTL_SECS`: snapshot lifetime in seconds
    ///   (default: 300)
    pub fn from_env() -> Result<Self, ConfigError> {
        let spreadsheet_id = require_env("KAIZEN_SPREADSHEET_ID")?;
        let api_token = require_env("KAIZEN_SHEETS_TOKEN")?;

        let mut config = Self::new(spreadsheet_id, api_token);

        if let Ok(worksheet) = std::env::var("KAIZEN_WORKSHEET") {
            if !worksheet.trim().is_empty() {
                config.worksheet = worksheet;
            }
        }

        if let Ok(base_url) = std::env::var("KAIZEN_SHEETS_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(folder) = std::env::var("KAIZEN_DRIVE_FOLDER_ID") {
            if !folder.trim().is_empty() {
                config.drive_folder_id = Some(folder);
            }
        }

        if let Ok(raw) = std::env::var("KAIZEN_CACHE_TTL_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "KAIZEN_CACHE_TTL_SECS".to_string(),
                value: raw.clone(),
                reason: "must be a positive integer".to_string(),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "KAIZEN_CACHE_TTL_SECS".to_string(),
                    value: raw,
                    reason: "must be a positive integer".to_string(),
                });
            }
            config.cache_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingRequired {
            field: name.to_string(),
        }),
    }
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .field("api_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("drive_folder_id", &self.drive_folder_id)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}
