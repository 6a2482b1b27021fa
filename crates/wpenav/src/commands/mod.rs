//! Command dispatch: bridges CLI args -> navigator calls -> output.

pub mod auth;
pub mod config_cmd;
pub mod menu;
pub mod search;
pub mod sites;

use wpenav_core::{ApiSource, Navigator};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    navigator: &Navigator<ApiSource>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Search(args) => search::handle(navigator, args, global).await,
        Command::Sites(args) => sites::handle(navigator, args, global).await,
        // Menu, Auth, Config, and Completions are handled before dispatch
        Command::Menu(_) | Command::Auth(_) | Command::Config(_) | Command::Completions(_) => {
            unreachable!()
        }
    }
}
