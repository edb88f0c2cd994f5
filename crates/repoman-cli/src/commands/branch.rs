//! Branch commands: `branch`, `merge`, `checkout`, `branches`.

use crate::{
    cli::{BranchArgs, GlobalArgs},
    commands::open_repository,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn create(
    args: BranchArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    manager.repository().create_branch(&args.name)?;

    output.success(&format!("Created and switched to branch {}", args.name))?;
    Ok(())
}

pub fn merge(
    args: BranchArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    manager.repository().merge(&args.name)?;

    output.success(&format!("Merged {}", args.name))?;
    Ok(())
}

pub fn checkout(
    args: BranchArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    manager.repository().checkout(&args.name)?;

    output.success(&format!("Switched to branch {}", args.name))?;
    Ok(())
}

pub fn list(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    let branches = manager.repository().list_branches()?;

    if output.is_json() {
        output.json(&branches)?;
        return Ok(());
    }

    if branches.is_empty() {
        output.info("No branches yet (nothing committed)")?;
        return Ok(());
    }
    for (i, name) in branches.iter().enumerate() {
        output.item(name, i == 0 && branches.current().is_some())?;
    }
    Ok(())
}
