mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need API credentials
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "wpenav", &mut std::io::stdout());
            Ok(())
        }

        // The menu is decoration, not a tool of record: any failure on
        // this path logs at debug and renders nothing.
        Command::Menu(args) => commands::menu::handle(args, &cli.global).await,

        // Credential tests resolve their own account: flag-supplied
        // credentials must work before anything is stored.
        Command::Auth(args) => commands::auth::handle(args, &cli.global).await,

        cmd => {
            let account = config::resolve_account(&cli.global)?;
            let navigator = wpenav_core::Navigator::connect(account)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &navigator, &cli.global).await
        }
    }
}
