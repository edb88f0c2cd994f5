//! `repoman add` and `repoman commit`.

use crate::{
    cli::{AddArgs, CommitArgs, GlobalArgs},
    commands::open_repository,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn add(
    args: AddArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    manager.repository().add_files(&args.files)?;

    let listing = args
        .files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    output.success(&format!("Staged {listing}"))?;
    Ok(())
}

pub fn commit(
    args: CommitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    manager.repository().commit(&args.message)?;

    output.success(&format!("Committed: {}", args.message))?;
    Ok(())
}
