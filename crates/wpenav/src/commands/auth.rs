//! The `auth` command: credential testing.

use owo_colors::OwoColorize;
use secrecy::SecretString;
use serde::Serialize;

use wpenav_core::{ErrorEnvelope, Navigator, SecretOverride};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Masked placeholder shown instead of the stored password. Supplying
/// it back means "keep using the stored one".
pub const MASKED_PASSWORD: &str = "********";

#[derive(Debug, Serialize)]
struct Status {
    message: String,
}

/// Translate the optional `--password` flag into a core override. Only
/// this boundary knows about the masked literal.
fn secret_override(password: Option<String>) -> SecretOverride {
    match password {
        None => SecretOverride::Stored,
        Some(p) if p == MASKED_PASSWORD => SecretOverride::Stored,
        Some(p) => SecretOverride::Provided(SecretString::from(p)),
    }
}

pub async fn handle(args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Test { username, password } => {
            let secret = secret_override(password);
            let provided = match &secret {
                SecretOverride::Provided(password) => Some(password.clone()),
                SecretOverride::Stored => None,
            };

            // Flag-supplied credentials must be testable before any
            // are stored, so the account is resolved with them in hand.
            let account = crate::config::resolve_test_account(global, username.clone(), provided)?;
            let navigator = Navigator::connect(account)?;

            match navigator.test_credentials(username, secret).await {
                Ok(message) => {
                    let status = Status { message };
                    let out = match global.output {
                        OutputFormat::Json => output::json(&status, false),
                        OutputFormat::JsonCompact => output::json(&status, true),
                        OutputFormat::Yaml => output::yaml(&status),
                        OutputFormat::Table | OutputFormat::Plain => {
                            if output::should_color(&global.color) {
                                status.message.green().to_string()
                            } else {
                                status.message.clone()
                            }
                        }
                    };
                    output::print(&out, global.quiet);
                    Ok(())
                }
                Err(err) => {
                    if global.output.is_structured() {
                        let payload = ErrorEnvelope::new(&err);
                        let out = match global.output {
                            OutputFormat::JsonCompact => output::json(&payload, true),
                            OutputFormat::Yaml => output::yaml(&payload),
                            _ => output::json(&payload, false),
                        };
                        output::print(&out, global.quiet);
                    }
                    Err(err.into())
                }
            }
        }
    }
}
