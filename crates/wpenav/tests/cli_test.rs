//! End-to-end checks of the `wpenav` binary.
//!
//! Everything here runs without API credentials: parsing, completions,
//! the config-free commands, and the failure modes of the ones that do
//! need an account.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// A `wpenav` invocation sealed off from the developer's machine:
/// config lookups land on a path that does not exist and every `WPE_*`
/// variable is scrubbed.
fn isolated() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wpenav");
    cmd.env("HOME", "/tmp/wpenav-isolated")
        .env("XDG_CONFIG_HOME", "/tmp/wpenav-isolated");
    for var in [
        "WPE_PROFILE",
        "WPE_HOST",
        "WPE_OUTPUT",
        "WPE_TIMEOUT",
        "WPE_API_USERNAME",
        "WPE_API_PASSWORD",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn bare_invocation_asks_for_a_subcommand() {
    isolated()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_names_every_command_group() {
    isolated().arg("--help").assert().success().stdout(
        predicate::str::contains("menu")
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("auth"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn version_reports_the_binary_name() {
    isolated()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wpenav"));
}

#[test]
fn completions_generate_for_common_shells() {
    isolated()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());

    isolated()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    isolated()
        .arg("unmenu")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unmenu"));
}

#[test]
fn unknown_output_format_is_a_usage_error() {
    isolated()
        .args(["--output", "csv", "sites", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("possible values"));
}

#[test]
fn listing_commands_need_a_configured_account() {
    for args in [&["sites", "list"][..], &["search", "acme"][..]] {
        isolated()
            .args(args)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration file not found"));
    }
}

#[test]
fn menu_stays_silent_without_an_account() {
    // Every failure on the menu path renders nothing: an empty,
    // successful run instead of a broken one.
    isolated()
        .arg("menu")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn masked_password_flag_still_needs_a_stored_secret() {
    // "********" means "use what is stored", and nothing is stored
    // here. An actual password in its place would proceed to the API.
    isolated()
        .args(["auth", "test", "--username", "user", "--password", "********"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn config_inspection_works_before_init() {
    // `config show` renders the built-in defaults; `config path` only
    // resolves a location.
    isolated().args(["config", "show"]).assert().success();

    isolated()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn subcommand_help_lists_operations() {
    isolated()
        .args(["sites", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"));

    isolated()
        .args(["auth", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test"));

    isolated().args(["config", "--help"]).assert().success().stdout(
        predicate::str::contains("init")
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("set-password")),
    );
}
