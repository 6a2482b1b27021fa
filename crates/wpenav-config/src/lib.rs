//! Shared configuration for the wpenav CLI.
//!
//! TOML profiles, `WPE_`-prefixed environment overrides, the cache TTL
//! sanitizer, and translation to `wpenav_core::AccountConfig`. The
//! stored API password is encrypted at rest (see [`secret`]).
//!
//! Environment overrides use `__` as the nesting separator so that
//! field names containing `_` stay addressable: `WPE_DEFAULT_PROFILE`,
//! `WPE_PROFILES__PROD__HOST`, `WPE_DEFAULTS__TIMEOUT`. Credentials are
//! the exception: `WPE_API_USERNAME` / `WPE_API_PASSWORD` are read
//! directly during credential resolution, not through the figment
//! layer.

pub mod secret;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wpenav_core::{AccountConfig, Credentials, MenuMode};

pub use secret::SecretCipher;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named account profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Account API username.
    pub username: Option<String>,

    /// Account API password, encrypted at rest (base64 nonce+ciphertext).
    pub password: Option<String>,

    /// The current site's hostname (what "current site" means here).
    pub host: Option<String>,

    /// Account API root override (tests, staging).
    pub api_url: Option<String>,

    /// Directory cache TTL in seconds. Non-positive values fall back to
    /// the default (3600).
    pub cache_ttl: Option<i64>,

    /// Menu mode: "current-first" (default) or "matching-only".
    pub menu_mode: Option<String>,

    /// Link installs to `/wp-admin` (default true).
    pub admin_links: Option<bool>,

    /// Request timeout override, seconds.
    pub timeout: Option<u64>,
}

impl Profile {
    /// The effective cache TTL: configured seconds, coerced to the
    /// default when missing or non-positive.
    pub fn effective_ttl(&self) -> Duration {
        match self.cache_ttl {
            Some(secs) if secs > 0 => {
                // Positive i64 always fits u64.
                Duration::from_secs(secs.unsigned_abs())
            }
            _ => AccountConfig::DEFAULT_TTL,
        }
    }

    /// Parse the menu mode string.
    pub fn effective_menu_mode(&self) -> Result<MenuMode, ConfigError> {
        match self.menu_mode.as_deref() {
            None | Some("current-first") => Ok(MenuMode::CurrentFirst),
            Some("matching-only") => Ok(MenuMode::MatchingOnly),
            Some(other) => Err(ConfigError::Validation {
                field: "menu_mode".into(),
                reason: format!("expected 'current-first' or 'matching-only', got '{other}'"),
            }),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Directory holding the config file and the fallback key file.
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "wpenav", "wpenav")
        .map_or_else(dirs_fallback, |dirs| dirs.config_dir().to_path_buf())
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wpenav");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(env_overrides());

    let config: Config = figment.extract()?;
    Ok(config)
}

/// The `WPE_`-prefixed environment provider. `__` separates nesting
/// levels; a single `_` stays part of the field name.
fn env_overrides() -> Env {
    Env::prefixed("WPE_").split("__")
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve credentials with per-field overrides.
///
/// Each half resolves independently: explicit override, then the
/// `WPE_API_USERNAME` / `WPE_API_PASSWORD` environment, then the
/// profile (decrypting the stored password). An overridden half never
/// requires the stored half to exist.
pub fn resolve_credentials_with(
    profile: &Profile,
    profile_name: &str,
    cipher: &SecretCipher,
    username_override: Option<String>,
    password_override: Option<SecretString>,
) -> Result<Credentials, ConfigError> {
    let username = username_override
        .or_else(|| std::env::var("WPE_API_USERNAME").ok())
        .or_else(|| profile.username.clone())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let password = match password_override {
        Some(password) => password,
        None => {
            if let Ok(password) = std::env::var("WPE_API_PASSWORD") {
                SecretString::from(password)
            } else {
                let stored =
                    profile
                        .password
                        .as_deref()
                        .ok_or_else(|| ConfigError::NoCredentials {
                            profile: profile_name.into(),
                        })?;
                SecretString::from(cipher.decrypt(stored))
            }
        }
    };

    Ok(Credentials { username, password })
}

/// Resolve credentials: environment first, then the profile (decrypting
/// the stored password).
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    cipher: &SecretCipher,
) -> Result<Credentials, ConfigError> {
    resolve_credentials_with(profile, profile_name, cipher, None, None)
}

/// Build an `AccountConfig` for a credential test.
///
/// Explicit credentials stand in for the stored values, so a test can
/// run before any password has been saved; the profile, when present,
/// still supplies the API root and tuning. No host is required -- a
/// credential test never correlates domains.
pub fn profile_to_test_config(
    profile: Option<&Profile>,
    credentials: Credentials,
) -> Result<AccountConfig, ConfigError> {
    let api_url_str = profile
        .and_then(|p| p.api_url.as_deref())
        .unwrap_or(wpenav_api::DEFAULT_API_URL);
    let api_url: url::Url = api_url_str.parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {api_url_str}"),
    })?;

    let menu_mode = match profile {
        Some(p) => p.effective_menu_mode()?,
        None => MenuMode::default(),
    };

    Ok(AccountConfig {
        api_url,
        credentials,
        current_host: profile
            .and_then(|p| p.host.as_deref())
            .unwrap_or_default()
            .to_lowercase(),
        cache_ttl: profile.map_or(AccountConfig::DEFAULT_TTL, Profile::effective_ttl),
        menu_mode,
        admin_links: profile.and_then(|p| p.admin_links).unwrap_or(true),
        timeout: Duration::from_secs(
            profile
                .and_then(|p| p.timeout)
                .unwrap_or_else(default_timeout),
        ),
    })
}

/// Build an `AccountConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_account_config(
    profile: &Profile,
    profile_name: &str,
    cipher: &SecretCipher,
) -> Result<AccountConfig, ConfigError> {
    let credentials = resolve_credentials(profile, profile_name, cipher)?;
    let account = profile_to_test_config(Some(profile), credentials)?;

    if account.current_host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "no current-site host configured".into(),
        });
    }

    Ok(account)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ttl_defaults_and_coercion() {
        let mut profile = Profile::default();
        assert_eq!(profile.effective_ttl(), Duration::from_secs(3600));

        profile.cache_ttl = Some(600);
        assert_eq!(profile.effective_ttl(), Duration::from_secs(600));

        profile.cache_ttl = Some(0);
        assert_eq!(profile.effective_ttl(), Duration::from_secs(3600));

        profile.cache_ttl = Some(-5);
        assert_eq!(profile.effective_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn menu_mode_parsing() {
        let mut profile = Profile::default();
        assert_eq!(profile.effective_menu_mode().unwrap(), MenuMode::CurrentFirst);

        profile.menu_mode = Some("matching-only".into());
        assert_eq!(profile.effective_menu_mode().unwrap(), MenuMode::MatchingOnly);

        profile.menu_mode = Some("bogus".into());
        assert!(profile.effective_menu_mode().is_err());
    }

    #[test]
    fn account_config_lowercases_host() {
        let cipher = SecretCipher::new([7u8; 32]);
        let profile = Profile {
            username: Some("user".into()),
            password: Some(cipher.encrypt("pass")),
            host: Some("WWW.Example.COM".into()),
            ..Profile::default()
        };

        let account = profile_to_account_config(&profile, "default", &cipher).unwrap();
        assert_eq!(account.current_host, "www.example.com");
        assert!(account.admin_links);
    }

    #[test]
    fn missing_credentials_is_an_error() {
        let cipher = SecretCipher::new([7u8; 32]);
        let profile = Profile {
            host: Some("example.com".into()),
            ..Profile::default()
        };

        let err = profile_to_account_config(&profile, "default", &cipher).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn credential_overrides_fill_the_missing_halves() {
        use secrecy::ExposeSecret;

        let cipher = SecretCipher::new([7u8; 32]);

        // Username from the caller, password from the profile.
        let profile = Profile {
            password: Some(cipher.encrypt("stored-pass")),
            ..Profile::default()
        };
        let creds =
            resolve_credentials_with(&profile, "default", &cipher, Some("cli-user".into()), None)
                .unwrap();
        assert_eq!(creds.username, "cli-user");
        assert_eq!(creds.password.expose_secret(), "stored-pass");

        // Both from the caller: nothing stored is needed at all.
        let empty = Profile::default();
        let creds = resolve_credentials_with(
            &empty,
            "default",
            &cipher,
            Some("cli-user".into()),
            Some(SecretString::from("cli-pass".to_string())),
        )
        .unwrap();
        assert_eq!(creds.password.expose_secret(), "cli-pass");
    }

    #[test]
    fn test_config_needs_no_host_or_stored_password() {
        let credentials = Credentials {
            username: "cli-user".into(),
            password: SecretString::from("cli-pass".to_string()),
        };

        // A bare profile (no host, no password) is enough.
        let profile = Profile::default();
        let account = profile_to_test_config(Some(&profile), credentials.clone()).unwrap();
        assert_eq!(account.credentials.username, "cli-user");
        assert!(account.current_host.is_empty());

        // So is no profile at all: API root and TTL fall back to defaults.
        let account = profile_to_test_config(None, credentials).unwrap();
        assert_eq!(account.api_url.as_str(), "https://api.wpengineapi.com/v1");
        assert_eq!(account.cache_ttl, AccountConfig::DEFAULT_TTL);
        assert!(account.admin_links);
    }

    #[test]
    fn env_overrides_reach_nested_profile_fields() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WPE_DEFAULT_PROFILE", "prod");
            jail.set_env("WPE_PROFILES__PROD__HOST", "example.com");

            let config: Config = Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(env_overrides())
                .extract()?;

            assert_eq!(config.default_profile.as_deref(), Some("prod"));
            assert_eq!(
                config.profiles.get("prod").and_then(|p| p.host.as_deref()),
                Some("example.com")
            );
            Ok(())
        });
    }
}
