//! Config subcommand handlers.

use wpenav_config::{
    self as cfg, Config, Profile, SecretCipher, secret::store_password,
};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init {
            username,
            host,
            cache_ttl,
            menu_mode,
        } => {
            if let Some(ref mode) = menu_mode {
                if mode != "current-first" && mode != "matching-only" {
                    return Err(CliError::Validation {
                        field: "menu_mode".into(),
                        reason: format!(
                            "expected 'current-first' or 'matching-only', got '{mode}'"
                        ),
                    });
                }
            }

            let mut config = cfg::load_config_or_default();
            let profile_name = crate::config::active_profile_name(global, &config);

            let password = rpassword::prompt_password("API password: ")?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            let cipher = SecretCipher::from_machine_key();
            let profile = config
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(Profile::default);
            profile.username = Some(username);
            profile.host = Some(host);
            profile.cache_ttl = cache_ttl;
            profile.menu_mode = menu_mode;
            store_password(profile, &cipher, &password);

            config.default_profile = Some(profile_name.clone());
            cfg::save_config(&config)?;

            eprintln!(
                "\u{2713} Configuration written to {}",
                cfg::config_path().display()
            );
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: wpenav auth test");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut config = cfg::load_config_or_default();
            redact(&mut config);

            let out = match global.output {
                OutputFormat::Json => output::json(&config, false),
                OutputFormat::JsonCompact => output::json(&config, true),
                OutputFormat::Yaml => output::yaml(&config),
                OutputFormat::Table | OutputFormat::Plain => format!("{config:#?}"),
            };
            output::print(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", cfg::config_path().display());
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let mut config = cfg::load_config_or_default();
            let profile_name = crate::config::active_profile_name(global, &config);

            if !config.profiles.contains_key(&profile_name) {
                let available: Vec<_> = config.profiles.keys().cloned().collect();
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }

            let password = rpassword::prompt_password("API password: ")?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            let cipher = SecretCipher::from_machine_key();
            if let Some(profile) = config.profiles.get_mut(&profile_name) {
                store_password(profile, &cipher, &password);
            }
            cfg::save_config(&config)?;

            eprintln!("\u{2713} Password updated for profile '{profile_name}' (encrypted at rest)");
            Ok(())
        }
    }
}

/// Replace stored passwords with the masked placeholder before display.
fn redact(config: &mut Config) {
    for profile in config.profiles.values_mut() {
        if profile.password.as_deref().is_some_and(|p| !p.is_empty()) {
            profile.password = Some(crate::commands::auth::MASKED_PASSWORD.into());
        }
    }
}
