use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a local-development default, so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub seed_on_startup: bool,
    /// Replaces the embedded catalog when set.
    pub seed_file: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://naviq.db".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            seed_on_startup: parse_flag("SEED_ON_STARTUP", true)?,
            seed_file: std::env::var("SEED_FILE").ok().map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_flag(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_bool(&raw)
            .with_context(|| format!("Environment variable '{key}' must be true or false")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised boolean '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" on ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("No").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        assert!(parse_bool("maybe").is_err());
    }
}
