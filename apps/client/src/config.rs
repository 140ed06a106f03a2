use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api::DEFAULT_API_URL;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    /// Holds `preferences.json`.
    pub home: PathBuf,
    pub rust_log: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let home = match std::env::var("NAVIQ_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::var("HOME")
                .map(|h| PathBuf::from(h).join(".naviq"))
                .context("Set NAVIQ_HOME or HOME so preferences have somewhere to live")?,
        };

        Ok(ClientConfig {
            api_url: api_url_from(std::env::var("NAVIQ_API_URL").ok()),
            home,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn api_url_from(raw: Option<String>) -> String {
    raw.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_url_falls_back() {
        assert_eq!(api_url_from(None), DEFAULT_API_URL);
        assert_eq!(api_url_from(Some("  ".into())), DEFAULT_API_URL);
        assert_eq!(
            api_url_from(Some(" https://naviq.example ".into())),
            "https://naviq.example"
        );
    }
}
