//! Bridges the stored profile and CLI flags into `AccountConfig`.
//!
//! The core never sees profiles or flags -- it receives a pre-built
//! `AccountConfig`.

use std::time::Duration;

use secrecy::SecretString;
use wpenav_config::{self as cfg, Config, SecretCipher};
use wpenav_core::{AccountConfig, Credentials};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the account config for the active profile, applying CLI flag
/// overrides on top.
pub fn resolve_account(global: &GlobalOpts) -> Result<AccountConfig, CliError> {
    let config = cfg::load_config_or_default();
    let profile_name = active_profile_name(global, &config);

    let profile = config
        .profiles
        .get(&profile_name)
        .ok_or_else(|| missing_profile(&config, &profile_name))?;

    let cipher = SecretCipher::from_machine_key();
    let mut account = cfg::profile_to_account_config(profile, &profile_name, &cipher)?;
    apply_flag_overrides(&mut account, global);

    Ok(account)
}

/// Build the account config for a credential test.
///
/// When both `--username` and `--password` were given, no stored
/// profile is consulted for credentials at all, so the test works
/// before `config init` has ever run. With only one (or neither)
/// override, the missing half still resolves from the environment or
/// the profile.
pub fn resolve_test_account(
    global: &GlobalOpts,
    username: Option<String>,
    password: Option<SecretString>,
) -> Result<AccountConfig, CliError> {
    let config = cfg::load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profiles.get(&profile_name);

    let credentials = if let Some(credentials) =
        explicit_credentials(username.as_deref(), password.as_ref())
    {
        credentials
    } else {
        let profile = profile.ok_or_else(|| missing_profile(&config, &profile_name))?;
        let cipher = SecretCipher::from_machine_key();
        cfg::resolve_credentials_with(profile, &profile_name, &cipher, username, password)?
    };

    let mut account = cfg::profile_to_test_config(profile, credentials)?;
    apply_flag_overrides(&mut account, global);

    Ok(account)
}

/// Credentials taken wholly from the command line. `None` when either
/// half is missing and stored resolution is still needed.
fn explicit_credentials(
    username: Option<&str>,
    password: Option<&SecretString>,
) -> Option<Credentials> {
    match (username, password) {
        (Some(username), Some(password)) => Some(Credentials {
            username: username.to_owned(),
            password: password.clone(),
        }),
        _ => None,
    }
}

fn missing_profile(config: &Config, profile_name: &str) -> CliError {
    if config.profiles.is_empty() {
        CliError::NoConfig {
            path: cfg::config_path().display().to_string(),
        }
    } else {
        let available: Vec<_> = config.profiles.keys().cloned().collect();
        CliError::ProfileNotFound {
            name: profile_name.to_owned(),
            available: available.join(", "),
        }
    }
}

fn apply_flag_overrides(account: &mut AccountConfig, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        account.current_host = host.to_lowercase();
    }
    if let Some(secs) = global.timeout {
        account.timeout = Duration::from_secs(secs);
    }
}
