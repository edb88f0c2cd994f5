//! `repoman push` and `repoman pull`.
//!
//! Omitted arguments fall back to `remote.name` / `remote.branch` from the
//! configuration.

use crate::{
    cli::{GlobalArgs, RemoteArgs},
    commands::open_repository,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn push(
    args: RemoteArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    let (remote, branch) = resolve(&args, &config);
    manager.repository().push(Some(remote), Some(branch))?;

    output.success(&format!("Pushed to {remote}/{branch}"))?;
    Ok(())
}

pub fn pull(
    args: RemoteArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    let (remote, branch) = resolve(&args, &config);
    manager.repository().pull(Some(remote), Some(branch))?;

    output.success(&format!("Pulled from {remote}/{branch}"))?;
    Ok(())
}

fn resolve<'a>(args: &'a RemoteArgs, config: &'a AppConfig) -> (&'a str, &'a str) {
    (
        args.remote.as_deref().unwrap_or(&config.remote.name),
        args.branch.as_deref().unwrap_or(&config.remote.branch),
    )
}
