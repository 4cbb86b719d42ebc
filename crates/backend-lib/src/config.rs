// ============================
// credgate-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use anyhow::Result;

use crate::auth::PasswordRequirements;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Bearer token TTL in seconds
    pub token_ttl_secs: u64,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            token_ttl_secs: 60 * 60 * 24 * 7, // 7 days
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default config file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings from a specific config file, then environment variables
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("CREDGATE_"))
            .extract()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.token_ttl_secs, 60 * 60 * 24 * 7);
        assert_eq!(settings.password_requirements.min_length, 8);
    }

    #[test]
    fn test_load_from_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from("does-not-exist.toml").unwrap();
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_from_toml_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
bind_addr = "0.0.0.0:8080"
log_level = "debug"
token_ttl_secs = 3600
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.token_ttl_secs, 3600);
        // untouched sections keep their defaults
        assert!(settings.password_requirements.require_digit);
    }
}
