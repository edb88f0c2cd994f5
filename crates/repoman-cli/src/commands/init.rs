//! `repoman init` - create a new repository.

use tracing::instrument;

use crate::{
    cli::GlobalArgs, commands::repo_manager, config::AppConfig, error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(repo = %global.repo.display()))]
pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manager = repo_manager(&global, &config)?;
    manager.create_repository()?;

    output.success(&format!(
        "Initialized repository at {}",
        manager.repository().handle()
    ))?;
    Ok(())
}
