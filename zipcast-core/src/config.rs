use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Application identifier sent in the NWS `User-Agent` header.
const APP_IDENT: &str = concat!("zipcast/", env!("CARGO_PKG_VERSION"));

/// Default contact address; api.weather.gov asks every client to identify
/// itself with one.
const DEFAULT_CONTACT: &str = "zipcast-maintainers@proton.me";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Top-level configuration stored on disk.
///
/// Everything is optional; a missing config file is equivalent to the
/// defaults. Example TOML:
///
/// ```toml
/// contact = "you@example.com"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Contact address included in the identifying `User-Agent` header.
    pub contact: Option<String>,

    /// Per-request timeout override, in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// The `User-Agent` value sent on every NWS call, e.g.
    /// `(zipcast/0.1.0, you@example.com)`.
    pub fn user_agent(&self) -> String {
        let contact = self.contact.as_deref().unwrap_or(DEFAULT_CONTACT);
        format!("({APP_IDENT}, {contact})")
    }

    /// Bounded per-request timeout for both NWS calls.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "zipcast", "zipcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_identifies_app_and_contact() {
        let cfg = Config::default();
        let ua = cfg.user_agent();

        assert!(ua.starts_with("(zipcast/"));
        assert!(ua.contains(DEFAULT_CONTACT));
    }

    #[test]
    fn contact_override_replaces_default() {
        let cfg = Config { contact: Some("ops@example.com".to_string()), ..Config::default() };

        let ua = cfg.user_agent();
        assert!(ua.contains("ops@example.com"));
        assert!(!ua.contains(DEFAULT_CONTACT));
    }

    #[test]
    fn timeout_defaults_and_overrides() {
        assert_eq!(Config::default().timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let cfg = Config { timeout_secs: Some(10), ..Config::default() };
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn toml_round_trip() {
        let cfg = Config { contact: Some("you@example.com".to_string()), timeout_secs: Some(12) };

        let serialized = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&serialized).expect("config must parse back");

        assert_eq!(parsed.contact.as_deref(), Some("you@example.com"));
        assert_eq!(parsed.timeout_secs, Some(12));
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let parsed: Config = toml::from_str("").expect("empty config must parse");
        assert!(parsed.contact.is_none());
        assert!(parsed.timeout_secs.is_none());
    }
}
